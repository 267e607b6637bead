//! CLI argument parsing with clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::db::ToggleMode;

#[derive(Parser)]
#[command(name = "gravctl")]
#[command(author, version, about = "Bulk enable/disable and group assignment for Pi-hole domain lists")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Gravity database path (default: resolved from pihole-FTL.conf)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enable or disable list entries matching a domain/regex exactly
    ToggleDomain {
        /// Domain or regex pattern, matched verbatim
        domain: String,

        /// New state for the matching entries
        #[arg(value_enum)]
        action: SetAction,

        /// Blacklist entries only
        #[arg(short = 'b')]
        blacklist: bool,

        /// Whitelist entries only
        #[arg(short = 'w')]
        whitelist: bool,
    },

    /// Enable, disable, or toggle every entry in a group
    ToggleGroup {
        /// Group name
        group: String,

        /// New state for the group's entries
        #[arg(value_enum)]
        action: GroupAction,

        /// Blacklist entries only
        #[arg(short = 'b')]
        blacklist: bool,

        /// Whitelist entries only
        #[arg(short = 'w')]
        whitelist: bool,
    },

    /// Replace the group memberships of entries matching a domain/regex
    UpdateGroup {
        /// Domain or regex pattern, matched verbatim
        domain: String,

        /// Groups the entries will belong to (full replace, not a merge)
        #[arg(short = 'g', num_args = 1.., required = true)]
        groups: Vec<String>,

        /// Blacklist entries only
        #[arg(short = 'b')]
        blacklist: bool,

        /// Whitelist entries only
        #[arg(short = 'w')]
        whitelist: bool,
    },

    /// Show version
    Version,
}

/// Enable/disable action for `toggle-domain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SetAction {
    #[value(alias = "e")]
    Enable,
    #[value(alias = "d")]
    Disable,
}

impl From<SetAction> for ToggleMode {
    fn from(action: SetAction) -> Self {
        match action {
            SetAction::Enable => ToggleMode::Enable,
            SetAction::Disable => ToggleMode::Disable,
        }
    }
}

/// Enable/disable/toggle action for `toggle-group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupAction {
    #[value(alias = "e")]
    Enable,
    #[value(alias = "d")]
    Disable,
    #[value(alias = "t")]
    Toggle,
}

impl From<GroupAction> for ToggleMode {
    fn from(action: GroupAction) -> Self {
        match action {
            GroupAction::Enable => ToggleMode::Enable,
            GroupAction::Disable => ToggleMode::Disable,
            GroupAction::Toggle => ToggleMode::Invert,
        }
    }
}
