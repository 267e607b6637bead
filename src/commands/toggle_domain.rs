//! Toggle-domain command implementation.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::config;
use crate::db::{GravityDb, ListScope, ToggleMode};
use crate::error::GravctlError;

/// Run the toggle-domain command
pub fn run(
    domain: &str,
    mode: ToggleMode,
    scope: ListScope,
    db_override: Option<&Path>,
) -> Result<()> {
    if domain.is_empty() {
        anyhow::bail!(GravctlError::InvalidArgument(
            "domain must not be empty".to_string()
        ));
    }

    let path = config::resolve_gravity_path(db_override);
    let mut db = GravityDb::open(&path)?;

    info!("Looking up '{}' in {}", domain, path.display());
    let entries = db.entries_by_domain(domain)?;
    let Some(scoped) = super::filter_by_scope(entries, domain, scope) else {
        return Ok(());
    };

    let matched = scoped.len();
    let changed = db.set_enabled(&scoped, mode)?;

    if changed == 0 {
        println!(
            "'{}' is already {} ({} {})",
            domain,
            super::state_word(mode),
            matched,
            super::entry_noun(matched)
        );
    } else {
        println!(
            "[OK] {} {} {} for '{}'",
            super::past_tense(mode),
            changed,
            super::entry_noun(changed),
            domain
        );
        println!("{}", super::RELOAD_HINT);
    }

    Ok(())
}
