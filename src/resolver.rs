//! Version resolution and the actions built on it
//!
//! Every operation first works out which version it targets, checks that
//! version against a fresh image listing and only then touches the runtime or
//! the default pointer. A failed check leaves both untouched.

use crate::image::source::{self, BuildSource};
use crate::image::version::Version;
use crate::prompt::Confirm;
use crate::runtime::gateway::{
    ContainerFilter, ContainerRecord, ImageRecord, RunSpec, RuntimeGateway,
};
use crate::storage::default_version::DefaultVersionStore;
use crate::storage::paths::GrokPaths;
use crate::{GrokError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A server container that was started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launched {
    pub version: Version,
    pub container_id: String,
    pub source: PathBuf,
}

/// Built images plus the default pointer
#[derive(Debug, Clone)]
pub struct Listing {
    pub images: Vec<ImageRecord>,
    pub default: Option<Version>,
}

impl Listing {
    /// Default is set but its image is gone
    pub fn default_is_stale(&self) -> bool {
        match self.default {
            Some(ref default) => !self.images.iter().any(|i| &i.version == default),
            None => false,
        }
    }
}

/// A build context and whether its image exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatus {
    pub source: BuildSource,
    pub built: bool,
}

/// Result of removing a single version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub version: Version,
    pub containers: Vec<String>,
    pub default_cleared: bool,
}

/// Result of a bulk removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The user declined; nothing was touched
    Cancelled,
    Removed {
        containers: Vec<String>,
        images: Vec<Version>,
    },
}

/// Resolves target versions and carries out actions against the runtime
pub struct VersionResolver<'a, G, S> {
    runtime: &'a G,
    store: &'a S,
    paths: &'a GrokPaths,
}

impl<'a, G: RuntimeGateway, S: DefaultVersionStore> VersionResolver<'a, G, S> {
    pub fn new(runtime: &'a G, store: &'a S, paths: &'a GrokPaths) -> Self {
        Self {
            runtime,
            store,
            paths,
        }
    }

    /// Versions with a built image, fetched live
    pub async fn catalog(&self) -> Result<BTreeSet<Version>> {
        let images = self.runtime.list_images().await?;
        Ok(images.into_iter().map(|i| i.version).collect())
    }

    /// Work out which version a run targets.
    ///
    /// An explicit version must have an image. Without one the default
    /// pointer is used, distinguishing "no default" from "default without
    /// an image".
    pub async fn resolve_run(&self, explicit: Option<&Version>) -> Result<Version> {
        let (version, from_default) = match explicit {
            Some(version) => (version.clone(), false),
            None => (self.store.get()?.ok_or(GrokError::NoDefaultSet)?, true),
        };

        if !self.catalog().await?.contains(&version) {
            return Err(if from_default {
                GrokError::DefaultImageMissing(version)
            } else {
                GrokError::ImageNotFound(version)
            });
        }

        debug!(
            "Resolved version {} ({})",
            version,
            if from_default { "default" } else { "explicit" }
        );
        Ok(version)
    }

    /// Start a server for `source`
    pub async fn run(&self, explicit: Option<&Version>, source: &Path) -> Result<Launched> {
        let version = self.resolve_run(explicit).await?;

        let source = source
            .canonicalize()
            .map_err(|_| GrokError::PathNotFound(source.to_path_buf()))?;

        let spec = RunSpec::new(version.clone(), &source);
        let container_id = self.runtime.run(&spec).await?;
        info!("Started {} as {}", version.image_ref(), container_id);

        Ok(Launched {
            version,
            container_id,
            source,
        })
    }

    /// Build the image for `version` from its conventional build context
    pub async fn build(&self, version: &Version) -> Result<PathBuf> {
        let context = self.paths.build_context(version);
        if !context.is_dir() {
            return Err(GrokError::BuildSourceNotFound {
                version: version.clone(),
                path: context,
            });
        }

        if self.catalog().await?.contains(version) {
            info!("Image {} already exists and will be rebuilt", version.image_ref());
        }

        self.runtime.build(version, &context).await?;
        Ok(context)
    }

    /// Build contexts on disk, each marked built or not
    pub async fn build_sources(&self) -> Result<Vec<SourceStatus>> {
        let sources = source::discover(self.paths.sources_root())?;
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        let catalog = self.catalog().await?;
        Ok(sources
            .into_iter()
            .map(|source| SourceStatus {
                built: catalog.contains(&source.version),
                source,
            })
            .collect())
    }

    pub async fn list(&self) -> Result<Listing> {
        Ok(Listing {
            images: self.runtime.list_images().await?,
            default: self.store.get()?,
        })
    }

    /// Make `version` the default. The pointer is only written once the
    /// image is known to exist.
    pub async fn set_default(&self, version: &Version) -> Result<()> {
        if !self.catalog().await?.contains(version) {
            return Err(GrokError::ImageNotFound(version.clone()));
        }
        self.store.set(version)?;
        info!("Default version set to {}", version);
        Ok(())
    }

    /// Remove every container of `version`, then its image. The default is
    /// cleared only when it is exactly `version`.
    pub async fn remove(&self, version: &Version) -> Result<Removed> {
        if !self.catalog().await?.contains(version) {
            return Err(GrokError::ImageNotFound(version.clone()));
        }
        let default_cleared = self.store.get()?.as_ref() == Some(version);

        let containers = self
            .runtime
            .list_containers(&ContainerFilter::version(version))
            .await?;
        let mut removed = Vec::with_capacity(containers.len());
        for container in containers {
            self.runtime.remove_container(&container.id).await?;
            removed.push(container.id);
        }

        self.runtime.remove_image(version).await?;
        info!("Removed image {}", version.image_ref());

        if default_cleared {
            self.store.clear()?;
            info!("Cleared default version {}", version);
        }

        Ok(Removed {
            version: version.clone(),
            containers: removed,
            default_cleared,
        })
    }

    /// Remove all OpenGrok containers, then all images, after asking.
    ///
    /// On confirmation the default is cleared whatever it pointed at.
    pub async fn remove_all(&self, confirm: &mut impl Confirm) -> Result<Removal> {
        if !confirm
            .confirm("This will remove all OpenGrok containers and images. Continue?")?
        {
            debug!("Bulk removal declined");
            return Ok(Removal::Cancelled);
        }

        let containers = self.runtime.list_containers(&ContainerFilter::all()).await?;
        let mut removed_containers = Vec::with_capacity(containers.len());
        for container in containers {
            self.runtime.remove_container(&container.id).await?;
            removed_containers.push(container.id);
        }

        let images = self.catalog().await?;
        let mut removed_images = Vec::with_capacity(images.len());
        for version in images {
            self.runtime.remove_image(&version).await?;
            removed_images.push(version);
        }

        self.store.clear()?;
        info!(
            "Removed {} containers and {} images",
            removed_containers.len(),
            removed_images.len()
        );

        Ok(Removal::Removed {
            containers: removed_containers,
            images: removed_images,
        })
    }

    /// Stop running containers, of one version or of all
    pub async fn stop(&self, version: Option<&Version>) -> Result<Vec<ContainerRecord>> {
        let containers = self
            .runtime
            .list_containers(&ContainerFilter::running(version))
            .await?;

        for container in &containers {
            self.runtime.stop(&container.id).await?;
            debug!("Stopped {} ({})", container.names, container.id);
        }
        Ok(containers)
    }
}
