//! CLI command definitions and handlers

pub mod build;
pub mod ls;
pub mod rm;
pub mod run;
pub mod set_default;
pub mod stop;

use crate::image::version::Version;
use crate::resolver::VersionResolver;
use crate::runtime::docker::DockerCli;
use crate::storage::default_version::FileDefaultStore;
use crate::storage::paths::GrokPaths;
use crate::{GrokError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Grokman - build, run and manage OpenGrok containers
#[derive(Parser, Debug)]
#[command(name = "grokman")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "grokman [-v <VERSION>] <PATH>\n       \
                            grokman -u <VERSION|all>\n       \
                            grokman <COMMAND>")]
pub struct Cli {
    /// Run this version instead of the default one
    #[arg(short = 'v', value_name = "VERSION")]
    pub run_version: Option<String>,

    /// Remove containers and image of VERSION, or of every version with `all`
    #[arg(short = 'u', value_name = "VERSION|all")]
    pub uninstall: Option<String>,

    /// Source tree to serve, mounted into the container
    pub path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the image for a version, or list build sources with `build ls`
    Build(build::BuildArgs),

    /// List built versions and the default
    Ls,

    /// Choose the version used when none is given
    SetDefault(set_default::SetDefaultArgs),

    /// Stop running containers, all or of one version
    Stop(stop::StopArgs),
}

/// What an invocation asks for, after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Help,
    Run {
        version: Option<Version>,
        path: PathBuf,
    },
    Build(Version),
    BuildList,
    Remove(Version),
    RemoveAll,
    List,
    SetDefault(Version),
    Stop(Option<Version>),
}

impl Cli {
    /// Turn parsed arguments into an [`Intent`], rejecting combinations that
    /// make no sense together
    pub fn into_intent(self) -> Result<Intent> {
        if let Some(target) = self.uninstall {
            if self.path.is_some() || self.run_version.is_some() || self.command.is_some() {
                return Err(usage("-u cannot be combined with other arguments"));
            }
            return Ok(match target.as_str() {
                "all" => Intent::RemoveAll,
                _ => Intent::Remove(Version::parse(&target)?),
            });
        }

        if let Some(command) = self.command {
            if self.path.is_some() || self.run_version.is_some() {
                return Err(usage("a source path cannot be combined with a command"));
            }
            return Ok(match command {
                Commands::Build(args) if args.version == "ls" => Intent::BuildList,
                Commands::Build(args) => Intent::Build(Version::parse(&args.version)?),
                Commands::Ls => Intent::List,
                Commands::SetDefault(args) => Intent::SetDefault(Version::parse(&args.version)?),
                Commands::Stop(args) => {
                    Intent::Stop(args.version.as_deref().map(Version::parse).transpose()?)
                }
            });
        }

        match (self.path, self.run_version) {
            (Some(path), version) => Ok(Intent::Run {
                version: version.as_deref().map(Version::parse).transpose()?,
                path,
            }),
            (None, Some(_)) => Err(usage("-v needs a source path: grokman -v <VERSION> <PATH>")),
            (None, None) => Ok(Intent::Help),
        }
    }
}

fn usage(message: &str) -> GrokError {
    GrokError::Usage(message.to_string())
}

/// Production collaborators shared by the command handlers
pub struct Session {
    pub paths: GrokPaths,
    pub runtime: DockerCli,
    pub store: FileDefaultStore,
}

impl Session {
    pub fn load() -> Result<Self> {
        let paths = GrokPaths::new()?;
        let store = FileDefaultStore::new(paths.default_version_file());
        tracing::debug!(
            "Config in {}, sources in {}",
            paths.config_dir().display(),
            paths.sources_root().display()
        );
        Ok(Self {
            paths,
            runtime: DockerCli::from_env(),
            store,
        })
    }

    pub fn resolver(&self) -> VersionResolver<'_, DockerCli, FileDefaultStore> {
        VersionResolver::new(&self.runtime, &self.store, &self.paths)
    }
}
