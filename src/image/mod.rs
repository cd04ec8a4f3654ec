//! OpenGrok versions and their build sources

pub mod source;
pub mod version;
