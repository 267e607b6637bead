//! # gravctl - Bulk list editing for Pi-hole's gravity database
//!
//! Command-line utilities that enable/disable whitelist and blacklist
//! entries in Pi-hole's `gravity.db` and reassign their group memberships.
//! Entries are located by exact string match on the stored domain or regex
//! pattern; regex syntax is never interpreted.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                        gravctl                         │
//! ├────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                            │
//! │    └── Commands: toggle-domain, toggle-group,          │
//! │                  update-group                          │
//! ├────────────────────────────────────────────────────────┤
//! │  Config                                                │
//! │    └── gravity.db path from pihole-FTL.conf            │
//! ├────────────────────────────────────────────────────────┤
//! │  GravityDb (rusqlite)                                  │
//! │    ├── domainlist lookups (exact match, scoped)        │
//! │    ├── enabled-flag updates (per-entry)                │
//! │    └── group membership replacement                    │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! The tool only updates `enabled` flags and membership rows; entry and
//! group records are created and deleted by Pi-hole itself. The database
//! file is shared with FTL and other invocations, with no locking beyond
//! SQLite's own. Back up `gravity.db` before bulk edits.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Gravity database path resolution
//! - [`db`] - Gravity database access (the entry store)
//! - [`error`] - Error types

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;

pub use cli::{Cli, Commands};
pub use db::{GravityDb, ListScope, ToggleMode};
pub use error::GravctlError;
