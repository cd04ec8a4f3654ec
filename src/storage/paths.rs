//! Well-known locations used by grokman
//!
//! Configuration lives under the platform config directory
//! (`~/.config/grokman/` on Linux) and build contexts are looked up under
//! `~/opengrok/`. Both can be overridden through the environment.

use crate::image::source::source_dir_name;
use crate::image::version::Version;
use crate::{GrokError, Result, APP_NAME};
use std::path::{Path, PathBuf};

/// Overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "GROKMAN_CONFIG_DIR";

/// Overrides the root directory holding `opengrok-<version>` build contexts
pub const SOURCES_DIR_ENV: &str = "GROKMAN_SOURCES_DIR";

/// Manages paths for grokman's configuration and build sources
#[derive(Debug, Clone)]
pub struct GrokPaths {
    config_dir: PathBuf,
    sources_root: PathBuf,
}

impl GrokPaths {
    /// Resolve paths from the environment, falling back to the user's
    /// config and home directories
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| {
                    not_found(&format!(
                        "Could not determine user config directory. Set {} to choose one.",
                        CONFIG_DIR_ENV
                    ))
                })?
                .join(APP_NAME),
        };

        let sources_root = match std::env::var_os(SOURCES_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .ok_or_else(|| {
                    not_found(&format!(
                        "Could not determine user home directory. Set {} to choose a sources root.",
                        SOURCES_DIR_ENV
                    ))
                })?
                .join("opengrok"),
        };

        Ok(Self {
            config_dir,
            sources_root,
        })
    }

    /// Create a GrokPaths instance with explicit directories
    pub fn with_dirs(config_dir: impl AsRef<Path>, sources_root: impl AsRef<Path>) -> Self {
        Self {
            config_dir: config_dir.as_ref().to_path_buf(),
            sources_root: sources_root.as_ref().to_path_buf(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Directory containing `opengrok-<version>` build contexts
    pub fn sources_root(&self) -> &Path {
        &self.sources_root
    }

    /// File holding the default version string
    pub fn default_version_file(&self) -> PathBuf {
        self.config_dir.join("default-version")
    }

    /// Build context directory for a version
    pub fn build_context(&self, version: &Version) -> PathBuf {
        self.sources_root.join(source_dir_name(version))
    }
}

fn not_found(message: &str) -> GrokError {
    GrokError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, message))
}
