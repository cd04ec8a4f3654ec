//! Discovery of OpenGrok build contexts on disk
//!
//! A build context for version `V` is a directory named `opengrok-V` directly
//! under the sources root.

use crate::image::version::Version;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name prefix of a build context
pub const SOURCE_DIR_PREFIX: &str = "opengrok-";

/// A build context directory found under the sources root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSource {
    pub version: Version,
    pub path: PathBuf,
}

/// Directory name for a version's build context
pub fn source_dir_name(version: &Version) -> String {
    format!("{}{}", SOURCE_DIR_PREFIX, version)
}

/// List build contexts under `root`, sorted by version.
///
/// A missing root is treated as having no sources.
pub fn discover(root: &Path) -> Result<Vec<BuildSource>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::debug!("Skipping non UTF-8 entry {:?}", entry.path());
            continue;
        };
        let Some(raw) = name.strip_prefix(SOURCE_DIR_PREFIX) else {
            continue;
        };
        if let Ok(version) = Version::parse(raw) {
            sources.push(BuildSource {
                version,
                path: entry.path(),
            });
        }
    }

    sources.sort_by(|a, b| a.version.cmp(&b.version));
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_missing_root() {
        let tmp = TempDir::new().unwrap();
        let sources = discover(&tmp.path().join("nope")).unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn test_discover_filters_entries() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("opengrok-1.1")).unwrap();
        fs::create_dir(tmp.path().join("opengrok-1.0")).unwrap();
        // Prefix alone carries no version
        fs::create_dir(tmp.path().join("opengrok-")).unwrap();
        fs::create_dir(tmp.path().join("linux")).unwrap();
        fs::write(tmp.path().join("opengrok-2.0"), "not a dir").unwrap();

        let sources = discover(tmp.path()).unwrap();
        let versions: Vec<_> = sources.iter().map(|s| s.version.as_str()).collect();
        assert_eq!(versions, vec!["1.0", "1.1"]);
        assert_eq!(sources[0].path, tmp.path().join("opengrok-1.0"));
    }

    #[test]
    fn test_source_dir_name() {
        let v = Version::parse("1.12.0").unwrap();
        assert_eq!(source_dir_name(&v), "opengrok-1.12.0");
    }
}
