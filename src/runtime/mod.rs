//! Container runtime access

pub mod docker;
pub mod gateway;
