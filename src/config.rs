//! Gravity database path resolution.
//!
//! Pi-hole stores an optional `GRAVITYDB` override in `pihole-FTL.conf`, a
//! flat `KEY=value` file with `#`/`;` comment lines. Resolution order: the
//! `--db` CLI flag, then the FTL config key, then the stock location.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Pi-hole FTL configuration file.
pub const FTL_CONFIG_PATH: &str = "/etc/pihole/pihole-FTL.conf";

/// Stock gravity database location.
pub const DEFAULT_GRAVITY_PATH: &str = "/etc/pihole/gravity.db";

const GRAVITY_DB_KEY: &str = "GRAVITYDB";

/// Resolve the gravity database path for this invocation.
pub fn resolve_gravity_path(cli_override: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_override {
        return path.to_path_buf();
    }
    resolve_from_ftl_config(Path::new(FTL_CONFIG_PATH))
}

fn resolve_from_ftl_config(ftl_config: &Path) -> PathBuf {
    let path = fs::read_to_string(ftl_config)
        .ok()
        .and_then(|contents| gravity_path_from_conf(&contents))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GRAVITY_PATH));
    debug!("Resolved gravity database path: {}", path.display());
    path
}

/// Extract the `GRAVITYDB` value from FTL config contents, if present.
fn gravity_path_from_conf(contents: &str) -> Option<PathBuf> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with(';'))
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == GRAVITY_DB_KEY)
        .map(|(_, value)| PathBuf::from(value.trim()))
}
