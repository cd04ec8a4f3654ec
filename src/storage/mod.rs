//! On-disk state: well-known paths and the default version pointer

pub mod default_version;
pub mod paths;
