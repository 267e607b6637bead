//! Toggle-group command implementation.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::config;
use crate::db::{GravityDb, ListScope, ToggleMode};
use crate::error::GravctlError;

/// Run the toggle-group command
///
/// Affects every entry that is a member of the group, even entries that
/// also belong to other groups.
pub fn run(
    group: &str,
    mode: ToggleMode,
    scope: ListScope,
    db_override: Option<&Path>,
) -> Result<()> {
    let path = config::resolve_gravity_path(db_override);
    let mut db = GravityDb::open(&path)?;

    info!("Looking up group '{}' in {}", group, path.display());
    let entries = match db.entries_in_group(group) {
        Ok(entries) => entries,
        Err(GravctlError::GroupNotFound(name)) => {
            println!("Group '{}' not found.", name);
            println!();
            println!("Available groups:");
            for known in db.group_names()?.keys() {
                println!("  - {}", known);
            }
            anyhow::bail!(GravctlError::GroupNotFound(name));
        }
        Err(err) => return Err(err.into()),
    };

    if entries.is_empty() {
        println!("No domains are in group '{}'", group);
        return Ok(());
    }

    let scoped: Vec<_> = entries
        .into_iter()
        .filter(|entry| scope.includes(entry.kind.list()))
        .collect();

    if scoped.is_empty() {
        match scope {
            ListScope::Blacklist => println!("No blacklist entries in group '{}'", group),
            ListScope::Whitelist => println!("No whitelist entries in group '{}'", group),
            ListScope::Both => println!("No domains are in group '{}'", group),
        }
        return Ok(());
    }

    let matched = scoped.len();
    let changed = db.set_enabled(&scoped, mode)?;

    if changed == 0 {
        println!(
            "All {} matching {} in group '{}' are already {}",
            matched,
            super::entry_noun(matched),
            group,
            super::state_word(mode)
        );
    } else {
        println!(
            "[OK] {} {} {} in group '{}'",
            super::past_tense(mode),
            changed,
            super::entry_noun(changed),
            group
        );
        println!("{}", super::RELOAD_HINT);
    }

    Ok(())
}
