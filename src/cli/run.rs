//! `grokman [-v <version>] <path>` implementation

use crate::cli::Session;
use crate::image::version::Version;
use crate::runtime::gateway::SERVER_PORT;
use std::path::PathBuf;

/// Start an OpenGrok server over `path`, using the default version unless
/// one is given
pub async fn execute(version: Option<Version>, path: PathBuf) -> anyhow::Result<()> {
    let session = Session::load()?;
    let launched = session.resolver().run(version.as_ref(), &path).await?;

    println!("{}", launched.container_id);
    eprintln!(
        "OpenGrok {} is serving {} at http://localhost:{}/",
        launched.version,
        launched.source.display(),
        SERVER_PORT
    );
    Ok(())
}
