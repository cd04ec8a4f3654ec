//! `grokman stop` command implementation

use crate::cli::Session;
use crate::image::version::Version;
use clap::Args;

/// Arguments for the `stop` command
#[derive(Args, Debug)]
pub struct StopArgs {
    /// Only stop containers of this version
    pub version: Option<String>,
}

/// Stop running OpenGrok containers, optionally only those of `version`
pub async fn execute(version: Option<Version>) -> anyhow::Result<()> {
    let session = Session::load()?;
    let stopped = session.resolver().stop(version.as_ref()).await?;

    if stopped.is_empty() {
        match version {
            Some(version) => eprintln!("No running containers for version {}", version),
            None => eprintln!("No running OpenGrok containers"),
        }
        return Ok(());
    }

    for container in stopped {
        let id = &container.id[..12.min(container.id.len())];
        println!("{:<15} {:<20} {}", id, container.image, container.names);
    }

    Ok(())
}
