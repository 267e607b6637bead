//! gravctl - Bulk list editing for Pi-hole's gravity database.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use gravctl::cli::{Cli, Commands};
use gravctl::db::ListScope;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let db = cli.db.as_deref();

    // Execute command
    match cli.command {
        Commands::ToggleDomain {
            domain,
            action,
            blacklist,
            whitelist,
        } => gravctl::commands::toggle_domain::run(
            &domain,
            action.into(),
            ListScope::from_flags(blacklist, whitelist),
            db,
        ),
        Commands::ToggleGroup {
            group,
            action,
            blacklist,
            whitelist,
        } => gravctl::commands::toggle_group::run(
            &group,
            action.into(),
            ListScope::from_flags(blacklist, whitelist),
            db,
        ),
        Commands::UpdateGroup {
            domain,
            groups,
            blacklist,
            whitelist,
        } => gravctl::commands::update_group::run(
            &domain,
            &groups,
            ListScope::from_flags(blacklist, whitelist),
            db,
        ),
        Commands::Version => {
            println!("gravctl {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
