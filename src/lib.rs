//! Grokman - a local manager for OpenGrok server containers
//!
//! Tracks which OpenGrok versions are built as container images, builds new
//! ones from local source directories, runs them against a source tree and
//! keeps a persisted "default version" pointer consistent as images come and go.

pub mod cli;
pub mod image;
pub mod prompt;
pub mod resolver;
pub mod runtime;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

use image::version::Version;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Grokman operations
#[derive(Error, Debug)]
pub enum GrokError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),

    #[error("Invalid version: {0:?} (a version must not be empty)")]
    InvalidVersion(String),

    #[error("Image for version {0} not found; build it first with `grokman build {0}`")]
    ImageNotFound(Version),

    #[error(
        "Default version {0} has no image; rebuild it with `grokman build {0}` \
         or pick another with `grokman set-default <version>`"
    )]
    DefaultImageMissing(Version),

    #[error(
        "No default version set; run `grokman set-default <version>` \
         or pass one explicitly with `grokman -v <version> <path>`"
    )]
    NoDefaultSet,

    #[error(
        "Build source for version {version} not found at {}; \
         run `grokman build ls` to see available sources",
        .path.display()
    )]
    BuildSourceNotFound { version: Version, path: PathBuf },

    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Container runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, GrokError>;

/// Application name
pub const APP_NAME: &str = "grokman";
