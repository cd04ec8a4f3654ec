//! OpenGrok version identifiers and image references

use crate::{GrokError, Result};
use std::fmt;

/// Repository name every managed image is tagged under
pub const IMAGE_REPOSITORY: &str = "opengrok";

/// Whether a repository as listed by the runtime is the managed one.
///
/// Podman qualifies locally built images as `localhost/<name>`.
pub fn is_image_repository(repository: &str) -> bool {
    repository == IMAGE_REPOSITORY
        || repository.strip_prefix("localhost/") == Some(IMAGE_REPOSITORY)
}

/// An opaque OpenGrok version, e.g. "1.12.0".
///
/// Versions are compared byte for byte. Nothing is trimmed, case-folded or
/// aliased, so "1.2" and "1.2.0" are unrelated versions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(String);

impl Version {
    /// Parse a user-supplied version string
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(GrokError::InvalidVersion(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Image reference for this version, e.g. `opengrok:1.12.0`
    pub fn image_ref(&self) -> String {
        format!("{}:{}", IMAGE_REPOSITORY, self.0)
    }

    /// Extract the version from an image reference.
    ///
    /// Returns `None` unless the repository is exactly [`IMAGE_REPOSITORY`]
    /// (or its `localhost/` form) and a non-empty tag is present.
    pub fn from_image_ref(reference: &str) -> Option<Self> {
        let (repository, tag) = reference.rsplit_once(':')?;
        if !is_image_repository(repository) {
            return None;
        }
        Self::from_tag(tag)
    }

    /// Version for an image tag as listed by the runtime; untagged images
    /// (`<none>`) have no version.
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.is_empty() || tag == "<none>" {
            return None;
        }
        Some(Self(tag.to_string()))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}
