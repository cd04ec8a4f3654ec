//! `grokman set-default` command implementation

use crate::cli::Session;
use crate::image::version::Version;
use clap::Args;

/// Arguments for the `set-default` command
#[derive(Args, Debug)]
pub struct SetDefaultArgs {
    pub version: String,
}

pub async fn execute(version: Version) -> anyhow::Result<()> {
    let session = Session::load()?;
    session.resolver().set_default(&version).await?;

    println!("Default version set to {}", version);
    Ok(())
}
