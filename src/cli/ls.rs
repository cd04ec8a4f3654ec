//! `grokman ls` command implementation

use crate::cli::Session;

/// List built versions and report the default
pub async fn execute() -> anyhow::Result<()> {
    let session = Session::load()?;
    let listing = session.resolver().list().await?;

    if listing.images.is_empty() {
        println!("No OpenGrok images built. Run `grokman build ls` to see what can be built.");
    } else {
        println!("{:<3}{:<20} {:<15} {:<20} {:<10}", "", "VERSION", "IMAGE ID", "CREATED", "SIZE");
        for image in &listing.images {
            let marker = if listing.default.as_ref() == Some(&image.version) {
                "*"
            } else {
                ""
            };
            let id = &image.id[..12.min(image.id.len())];
            println!(
                "{:<3}{:<20} {:<15} {:<20} {:<10}",
                marker, image.version, id, image.created_since, image.size
            );
        }
    }

    println!();
    match listing.default {
        Some(ref default) if listing.default_is_stale() => println!(
            "Default version: {} (image missing; rebuild with `grokman build {}`)",
            default, default
        ),
        Some(ref default) => println!("Default version: {}", default),
        None => println!("No default version set. Choose one with `grokman set-default <version>`."),
    }

    Ok(())
}
