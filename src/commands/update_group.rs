//! Update-group command implementation.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::config;
use crate::db::{GravityDb, ListScope};
use crate::error::GravctlError;

/// Run the update-group command
///
/// Replaces the group memberships of every matching entry with exactly the
/// named groups. Callers who want to add a group must supply the union
/// themselves.
pub fn run(
    domain: &str,
    group_names: &[String],
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

    // Validate every group name before touching any entry.
    let known = db.group_names()?;
    let mut group_ids: Vec<i64> = Vec::new();
    for name in group_names {
        match known.get(name) {
            Some(id) => {
                // Same group named twice on the command line
                if !group_ids.contains(id) {
                    group_ids.push(*id);
                }
            }
            None => {
                println!("Group '{}' not found.", name);
                println!();
                println!("Available groups:");
                for known_name in known.keys() {
                    println!("  - {}", known_name);
                }
                anyhow::bail!(GravctlError::GroupNotFound(name.clone()));
            }
        }
    }

    info!("Looking up '{}' in {}", domain, path.display());
    let entries = db.entries_by_domain(domain)?;
    let Some(scoped) = super::filter_by_scope(entries, domain, scope) else {
        return Ok(());
    };

    let matched = scoped.len();
    db.set_groups(&scoped, &group_ids)?;

    println!(
        "[OK] Assigned {} {} for '{}' to: {}",
        matched,
        super::entry_noun(matched),
        domain,
        group_names.join(", ")
    );
    println!("{}", super::RELOAD_HINT);

    Ok(())
}
