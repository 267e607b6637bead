//! CLI command implementations.

pub mod toggle_domain;
pub mod toggle_group;
pub mod update_group;

use crate::db::{FilterEntry, ListScope, ToggleMode};

/// Reminder printed after any successful mutation; reloading the DNS
/// service is operator responsibility.
pub(crate) const RELOAD_HINT: &str = "     Run 'pihole restartdns reload-lists' to apply changes";

/// Keep the entries the scope covers, printing the reason when nothing is
/// left. `None` means "nothing to do" and the command exits 0.
pub(crate) fn filter_by_scope(
    entries: Vec<FilterEntry>,
    domain: &str,
    scope: ListScope,
) -> Option<Vec<FilterEntry>> {
    if entries.is_empty() {
        println!("'{domain}' is not in the domain list");
        return None;
    }

    let scoped: Vec<_> = entries
        .into_iter()
        .filter(|entry| scope.includes(entry.kind.list()))
        .collect();

    if scoped.is_empty() {
        match scope {
            ListScope::Whitelist => println!("'{domain}' is not whitelisted"),
            ListScope::Blacklist => println!("'{domain}' is not blacklisted"),
            ListScope::Both => println!("'{domain}' is not in the domain list"),
        }
        return None;
    }
    Some(scoped)
}

pub(crate) fn past_tense(mode: ToggleMode) -> &'static str {
    match mode {
        ToggleMode::Enable => "Enabled",
        ToggleMode::Disable => "Disabled",
        ToggleMode::Invert => "Toggled",
    }
}

pub(crate) fn state_word(mode: ToggleMode) -> &'static str {
    match mode {
        ToggleMode::Enable => "enabled",
        ToggleMode::Disable => "disabled",
        ToggleMode::Invert => "toggled",
    }
}

pub(crate) fn entry_noun(count: usize) -> &'static str {
    if count == 1 {
        "entry"
    } else {
        "entries"
    }
}
