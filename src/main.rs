//! pgsh - PostgreSQL shell
//!
//! An interactive PostgreSQL shell with psql-style, context-sensitive tab
//! completion of keywords, catalog objects, variables and file names.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! pgsh postgres://localhost:5432/postgres
//!
//! # Print the candidates for one line
//! pgsh complete "SELECT * FROM us"
//! ```

use std::sync::Arc;

use tracing::{Level, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use pgsh::cli::CliInterface;
use pgsh::connection::{CatalogSource, ConnectionManager};
use pgsh::error::Result;
use pgsh::repl::{ReplEngine, SharedState};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start the REPL
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand().await? {
        return Ok(());
    }

    cli.print_banner();

    run_interactive_mode(&cli).await
}

/// Run application in interactive REPL mode
async fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let manager = Arc::new(ConnectionManager::new(
        cli.get_connection_uri(),
        cli.config().connection.clone(),
    ));
    let mut shared_state = SharedState::new(cli.get_database());
    let mut completion = cli.config().completion.clone();

    if !cli.args().no_connect {
        match manager.connect().await {
            Ok(()) => {
                let version = manager.ping().await.ok();
                if let Some(ref version) = version {
                    cli.print_connection_info(version);
                }
                shared_state.set_connected(version);

                match manager.standard_conforming_strings().await {
                    Ok(standard) => completion.standard_conforming_strings = standard,
                    Err(e) => warn!("could not read standard_conforming_strings: {}", e),
                }
            }
            // Keep the shell usable; catalog names are simply not offered
            Err(e) => eprintln!("Warning: {}", e),
        }
    }

    let source: Arc<dyn CatalogSource> = manager.clone();
    let mut repl = ReplEngine::new(shared_state, &cli.config().history, source, completion)?;
    repl.run()?;

    manager.disconnect().await?;
    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// # Arguments
/// * `cli` - CLI interface with the merged logging configuration
fn initialize_logging(cli: &CliInterface) {
    let level: Level = cli.config().logging.level.to_tracing_level();

    // RUST_LOG, when set, refines the configured level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
