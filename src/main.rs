//! Grokman CLI entry point
//!
//! Manages OpenGrok server containers on the local machine.

use clap::{CommandFactory, Parser};
use grokman::cli::{Cli, Intent};
use grokman::GrokError;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; command output owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Usage problems exit with 1, help and --version with 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print()?;
            std::process::exit(code);
        }
    };

    let intent = match cli.into_intent() {
        Ok(intent) => intent,
        Err(GrokError::Usage(message)) => {
            eprintln!("Error: {}\n", message);
            Cli::command().print_help()?;
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    match intent {
        Intent::Help => Ok(Cli::command().print_help()?),
        Intent::Run { version, path } => grokman::cli::run::execute(version, path).await,
        Intent::Build(version) => grokman::cli::build::execute(version).await,
        Intent::BuildList => grokman::cli::build::execute_list().await,
        Intent::Remove(version) => grokman::cli::rm::execute(version).await,
        Intent::RemoveAll => grokman::cli::rm::execute_all().await,
        Intent::List => grokman::cli::ls::execute().await,
        Intent::SetDefault(version) => grokman::cli::set_default::execute(version).await,
        Intent::Stop(version) => grokman::cli::stop::execute(version).await,
    }
}
