//! `grokman -u` implementation

use crate::cli::Session;
use crate::image::version::Version;
use crate::prompt::LineConfirm;
use crate::resolver::Removal;

/// Remove the containers and image of one version
pub async fn execute(version: Version) -> anyhow::Result<()> {
    let session = Session::load()?;
    let removed = session.resolver().remove(&version).await?;

    for id in &removed.containers {
        println!("Deleted container: {}", &id[..12.min(id.len())]);
    }
    println!("Deleted image: {}", removed.version.image_ref());
    if removed.default_cleared {
        eprintln!("Default version {} was removed and is now unset", removed.version);
    }

    Ok(())
}

/// Execute `-u all` after asking on the terminal
pub async fn execute_all() -> anyhow::Result<()> {
    let session = Session::load()?;
    let mut confirm = LineConfirm::stdio();

    match session.resolver().remove_all(&mut confirm).await? {
        Removal::Cancelled => eprintln!("Cancelled"),
        Removal::Removed { containers, images } => {
            for id in &containers {
                println!("Deleted container: {}", &id[..12.min(id.len())]);
            }
            for version in &images {
                println!("Deleted image: {}", version.image_ref());
            }
            if containers.is_empty() && images.is_empty() {
                println!("Nothing to remove");
            }
        }
    }

    Ok(())
}
