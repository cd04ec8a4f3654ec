//! `grokman build` command implementation

use crate::cli::Session;
use crate::image::version::Version;
use clap::Args;

/// Arguments for the `build` command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Version to build from `opengrok-<VERSION>`, or `ls`
    pub version: String,
}

/// Build the image for `version`
pub async fn execute(version: Version) -> anyhow::Result<()> {
    let session = Session::load()?;

    eprintln!("Building {}...", version.image_ref());
    let context = session.resolver().build(&version).await?;

    eprintln!("Successfully built {} from {}", version.image_ref(), context.display());
    Ok(())
}

/// Execute `build ls`: show build sources and whether each is built
pub async fn execute_list() -> anyhow::Result<()> {
    let session = Session::load()?;
    let sources = session.resolver().build_sources().await?;

    if sources.is_empty() {
        println!(
            "No versions found in {} (expected directories named opengrok-<version>)",
            session.paths.sources_root().display()
        );
        return Ok(());
    }

    for status in sources {
        let note = if status.built { "already built" } else { "not built" };
        println!("{:<20} {}", status.source.version, note);
    }

    Ok(())
}
