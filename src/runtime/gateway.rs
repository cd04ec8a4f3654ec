//! Typed view over the container runtime
//!
//! Everything grokman knows about images and containers comes through
//! [`RuntimeGateway`] as parsed records. Versions are matched by equality on
//! those records, never by searching listing text.

#![allow(async_fn_in_trait)]

use crate::image::version::Version;
use crate::Result;
use std::path::{Path, PathBuf};

/// Location of the source tree inside the container
pub const SOURCE_MOUNT: &str = "/opengrok/src";

/// Port the server listens on, published unchanged on the host
pub const SERVER_PORT: u16 = 8080;

/// A built OpenGrok image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub version: Version,
    pub id: String,
    pub size: String,
    pub created_since: String,
}

/// A container created from an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: String,
    pub image: String,
    pub names: String,
    pub state: String,
}

impl ContainerRecord {
    /// Version of the image this container runs, if it is an OpenGrok one
    pub fn version(&self) -> Option<Version> {
        Version::from_image_ref(&self.image)
    }

    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}

/// Which containers a listing should return
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerFilter {
    /// Only containers of this exact version; any OpenGrok version if unset
    pub version: Option<Version>,
    /// Skip stopped containers
    pub running_only: bool,
}

impl ContainerFilter {
    /// Every OpenGrok container, running or not
    pub fn all() -> Self {
        Self::default()
    }

    /// Every container of one version, running or not
    pub fn version(version: &Version) -> Self {
        Self {
            version: Some(version.clone()),
            running_only: false,
        }
    }

    /// Running containers, optionally of one version
    pub fn running(version: Option<&Version>) -> Self {
        Self {
            version: version.cloned(),
            running_only: true,
        }
    }

    pub fn matches(&self, container: &ContainerRecord) -> bool {
        let Some(container_version) = container.version() else {
            return false;
        };
        if let Some(ref wanted) = self.version {
            if &container_version != wanted {
                return false;
            }
        }
        !self.running_only || container.is_running()
    }
}

/// Parameters of a server launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    pub version: Version,
    /// Absolute host path of the source tree
    pub source: PathBuf,
    pub mount_target: String,
    pub host_port: u16,
    pub container_port: u16,
}

impl RunSpec {
    /// Launch `version` with `source` mounted read/write at the standard
    /// location and the server port published
    pub fn new(version: Version, source: impl AsRef<Path>) -> Self {
        Self {
            version,
            source: source.as_ref().to_path_buf(),
            mount_target: SOURCE_MOUNT.to_string(),
            host_port: SERVER_PORT,
            container_port: SERVER_PORT,
        }
    }

    /// `-v` argument binding the source tree into the container
    pub fn volume_arg(&self) -> String {
        format!("{}:{}", self.source.display(), self.mount_target)
    }

    /// `-p` argument publishing the server port
    pub fn publish_arg(&self) -> String {
        format!("{}:{}", self.host_port, self.container_port)
    }
}

/// Operations grokman needs from a container runtime
pub trait RuntimeGateway {
    /// Images tagged under the OpenGrok repository
    async fn list_images(&self) -> Result<Vec<ImageRecord>>;

    /// OpenGrok containers selected by `filter`
    async fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerRecord>>;

    /// Build and tag the image for `version` from `context`
    async fn build(&self, version: &Version, context: &Path) -> Result<()>;

    /// Start a detached server container, returning its ID
    async fn run(&self, spec: &RunSpec) -> Result<String>;

    async fn stop(&self, container_id: &str) -> Result<()>;

    /// Remove a container, killing it first if it is running
    async fn remove_container(&self, container_id: &str) -> Result<()>;

    async fn remove_image(&self, version: &Version) -> Result<()>;
}
