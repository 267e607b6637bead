//! Gravity database access.
//!
//! [`GravityDb`] wraps a single read-write connection to Pi-hole's
//! `gravity.db` and exposes the handful of reads and writes the commands
//! need: exact-match entry lookup, group membership lookup, enabled-flag
//! updates, and full membership replacement. The connection is released on
//! drop, success or error.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{params, Connection, OpenFlags};
use tracing::debug;

use crate::error::GravctlError;

/// Which list partition an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterList {
    Whitelist,
    Blacklist,
}

/// The four `domainlist.type` codes used by the gravity schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    WhitelistExact,
    BlacklistExact,
    WhitelistRegex,
    BlacklistRegex,
}

impl EntryType {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::WhitelistExact),
            1 => Some(Self::BlacklistExact),
            2 => Some(Self::WhitelistRegex),
            3 => Some(Self::BlacklistRegex),
            _ => None,
        }
    }

    pub fn list(self) -> FilterList {
        match self {
            Self::WhitelistExact | Self::WhitelistRegex => FilterList::Whitelist,
            Self::BlacklistExact | Self::BlacklistRegex => FilterList::Blacklist,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WhitelistExact => "whitelist",
            Self::BlacklistExact => "blacklist",
            Self::WhitelistRegex => "regex whitelist",
            Self::BlacklistRegex => "regex blacklist",
        }
    }
}

/// Which lists a lookup or mutation applies to.
///
/// Neither `-b` nor `-w` on the command line means both; passing both flags
/// also means both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    Blacklist,
    Whitelist,
    Both,
}

impl ListScope {
    pub fn from_flags(blacklist: bool, whitelist: bool) -> Self {
        match (blacklist, whitelist) {
            (true, false) => Self::Blacklist,
            (false, true) => Self::Whitelist,
            _ => Self::Both,
        }
    }

    pub fn includes(self, list: FilterList) -> bool {
        match self {
            Self::Blacklist => list == FilterList::Blacklist,
            Self::Whitelist => list == FilterList::Whitelist,
            Self::Both => true,
        }
    }
}

/// Requested state change for a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleMode {
    Enable,
    Disable,
    /// Negate each entry's own prior state independently.
    Invert,
}

impl ToggleMode {
    fn target_for(self, entry: &FilterEntry) -> bool {
        match self {
            Self::Enable => true,
            Self::Disable => false,
            Self::Invert => !entry.enabled,
        }
    }
}

/// One `domainlist` row (domain or regex pattern).
#[derive(Debug, Clone)]
pub struct FilterEntry {
    pub id: i64,
    pub kind: EntryType,
    pub domain: String,
    pub enabled: bool,
}

const ENTRY_COLUMNS: &str = "id, type, domain, enabled";

/// Open store over the gravity database.
#[derive(Debug)]
pub struct GravityDb {
    conn: Connection,
}

impl GravityDb {
    /// Open the database read-write. The file must already exist; this tool
    /// never creates or migrates the schema.
    pub fn open(path: &Path) -> Result<Self, GravctlError> {
        if !path.is_file() {
            return Err(GravctlError::DatabaseMissing(path.to_path_buf()));
        }
        debug!("Opening gravity database at {}", path.display());
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        Ok(Self { conn })
    }

    /// All entries whose `domain` column equals `domain` exactly, across
    /// both lists. Zero matches is not an error.
    pub fn entries_by_domain(&self, domain: &str) -> Result<Vec<FilterEntry>, GravctlError> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM domainlist WHERE domain = ?1");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![domain], entry_row)?;
        collect_entries(rows)
    }

    /// All entries that are members of the named group.
    ///
    /// Fails with [`GravctlError::GroupNotFound`] if the group does not
    /// exist; an existing group with no members yields an empty vec.
    pub fn entries_in_group(&self, name: &str) -> Result<Vec<FilterEntry>, GravctlError> {
        let group_id = self
            .group_names()?
            .get(name)
            .copied()
            .ok_or_else(|| GravctlError::GroupNotFound(name.to_string()))?;

        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM domainlist \
             JOIN domainlist_by_group ON domainlist_by_group.domainlist_id = domainlist.id \
             WHERE domainlist_by_group.group_id = ?1"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![group_id], entry_row)?;
        collect_entries(rows)
    }

    /// All group names mapped to their ids, sorted by name.
    pub fn group_names(&self) -> Result<BTreeMap<String, i64>, GravctlError> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM \"group\"")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(1)?, row.get::<_, i64>(0)?))
        })?;
        let mut names = BTreeMap::new();
        for row in rows {
            let (name, id) = row?;
            names.insert(name, id);
        }
        Ok(names)
    }

    /// Persist the requested enabled state for every entry in the set, one
    /// UPDATE per entry. Entries already in the target state are skipped, so
    /// enable/disable are idempotent. Returns the number of rows changed.
    pub fn set_enabled(
        &mut self,
        entries: &[FilterEntry],
        mode: ToggleMode,
    ) -> Result<usize, GravctlError> {
        let tx = self.conn.transaction()?;
        let mut changed = 0;
        {
            let mut stmt = tx.prepare("UPDATE domainlist SET enabled = ?1 WHERE id = ?2")?;
            for entry in entries {
                let target = mode.target_for(entry);
                if target != entry.enabled {
                    stmt.execute(params![target, entry.id])?;
                    changed += 1;
                }
            }
        }
        tx.commit()?;
        Ok(changed)
    }

    /// Replace the group memberships of every entry in the set with exactly
    /// `group_ids`. A full replace, never a merge.
    pub fn set_groups(
        &mut self,
        entries: &[FilterEntry],
        group_ids: &[i64],
    ) -> Result<(), GravctlError> {
        let tx = self.conn.transaction()?;
        {
            let mut delete =
                tx.prepare("DELETE FROM domainlist_by_group WHERE domainlist_id = ?1")?;
            let mut insert = tx.prepare(
                "INSERT INTO domainlist_by_group (domainlist_id, group_id) VALUES (?1, ?2)",
            )?;
            for entry in entries {
                delete.execute(params![entry.id])?;
                for group_id in group_ids {
                    insert.execute(params![entry.id, group_id])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Group ids currently assigned to an entry, sorted.
    pub fn groups_of_entry(&self, entry_id: i64) -> Result<Vec<i64>, GravctlError> {
        let mut stmt = self.conn.prepare(
            "SELECT group_id FROM domainlist_by_group WHERE domainlist_id = ?1 ORDER BY group_id",
        )?;
        let rows = stmt.query_map(params![entry_id], |row| row.get(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }
}

type RawEntry = (i64, i64, String, bool);

fn entry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEntry> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn collect_entries(
    rows: impl Iterator<Item = rusqlite::Result<RawEntry>>,
) -> Result<Vec<FilterEntry>, GravctlError> {
    let mut entries = Vec::new();
    for row in rows {
        let (id, raw, domain, enabled) = row?;
        let kind = EntryType::from_raw(raw).ok_or(GravctlError::UnknownEntryType(raw))?;
        entries.push(FilterEntry {
            id,
            kind,
            domain,
            enabled,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Relevant subset of the gravity schema as shipped by Pi-hole.
    const TEST_SCHEMA: &str = "
        CREATE TABLE domainlist (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type INTEGER NOT NULL DEFAULT 0,
            domain TEXT NOT NULL,
            enabled BOOLEAN NOT NULL DEFAULT 1,
            date_added INTEGER NOT NULL DEFAULT 0,
            date_modified INTEGER NOT NULL DEFAULT 0,
            comment TEXT,
            UNIQUE (domain, type)
        );
        CREATE TABLE \"group\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            enabled BOOLEAN NOT NULL DEFAULT 1,
            name TEXT UNIQUE NOT NULL,
            date_added INTEGER NOT NULL DEFAULT 0,
            date_modified INTEGER NOT NULL DEFAULT 0,
            description TEXT
        );
        CREATE TABLE domainlist_by_group (
            domainlist_id INTEGER NOT NULL REFERENCES domainlist (id),
            group_id INTEGER NOT NULL REFERENCES \"group\" (id),
            PRIMARY KEY (domainlist_id, group_id)
        );
    ";

    fn test_db() -> GravityDb {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(TEST_SCHEMA).unwrap();
        GravityDb { conn }
    }

    fn add_entry(db: &GravityDb, kind: i64, domain: &str, enabled: bool) -> i64 {
        db.conn
            .execute(
                "INSERT INTO domainlist (type, domain, enabled) VALUES (?1, ?2, ?3)",
                params![kind, domain, enabled],
            )
            .unwrap();
        db.conn.last_insert_rowid()
    }

    fn add_group(db: &GravityDb, name: &str) -> i64 {
        db.conn
            .execute("INSERT INTO \"group\" (name) VALUES (?1)", params![name])
            .unwrap();
        db.conn.last_insert_rowid()
    }

    fn add_membership(db: &GravityDb, entry_id: i64, group_id: i64) {
        db.conn
            .execute(
                "INSERT INTO domainlist_by_group (domainlist_id, group_id) VALUES (?1, ?2)",
                params![entry_id, group_id],
            )
            .unwrap();
    }

    fn enabled_of(db: &GravityDb, id: i64) -> bool {
        db.conn
            .query_row(
                "SELECT enabled FROM domainlist WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_entries_by_domain_exact_match_only() {
        let db = test_db();
        add_entry(&db, 1, "ads.example.com", true);
        add_entry(&db, 1, "ads.example.com.evil.net", true);

        let entries = db.entries_by_domain("ads.example.com").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].domain, "ads.example.com");
        assert_eq!(entries[0].kind, EntryType::BlacklistExact);
    }

    #[test]
    fn test_entries_by_domain_empty_is_not_error() {
        let db = test_db();
        let entries = db.entries_by_domain("nothing.example.com").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_entries_by_domain_spans_both_lists() {
        let db = test_db();
        add_entry(&db, 0, "dual.example.com", true);
        add_entry(&db, 1, "dual.example.com", true);

        let entries = db.entries_by_domain("dual.example.com").unwrap();
        assert_eq!(entries.len(), 2);

        let scoped: Vec<_> = entries
            .iter()
            .filter(|e| ListScope::Blacklist.includes(e.kind.list()))
            .collect();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].kind, EntryType::BlacklistExact);
    }

    #[test]
    fn test_regex_pattern_matched_verbatim() {
        let db = test_db();
        add_entry(&db, 3, r"(\.|^)doubleclick\.net$", true);

        // The pattern string itself must match; no regex evaluation happens.
        assert_eq!(db.entries_by_domain(r"(\.|^)doubleclick\.net$").unwrap().len(), 1);
        assert!(db.entries_by_domain("doubleclick.net").unwrap().is_empty());
    }

    #[test]
    fn test_set_enabled_disable_then_idempotent() {
        let mut db = test_db();
        let id = add_entry(&db, 1, "a.com", true);

        let entries = db.entries_by_domain("a.com").unwrap();
        assert_eq!(db.set_enabled(&entries, ToggleMode::Disable).unwrap(), 1);
        assert!(!enabled_of(&db, id));

        // Second run sees the already-disabled row and changes nothing.
        let entries = db.entries_by_domain("a.com").unwrap();
        assert_eq!(db.set_enabled(&entries, ToggleMode::Disable).unwrap(), 0);
        assert!(!enabled_of(&db, id));
    }

    #[test]
    fn test_set_enabled_invert_is_per_entry() {
        let mut db = test_db();
        let a = add_entry(&db, 1, "a.com", true);
        let b = add_entry(&db, 1, "b.com", false);
        let c = add_entry(&db, 0, "c.com", true);

        let mut entries = db.entries_by_domain("a.com").unwrap();
        entries.extend(db.entries_by_domain("b.com").unwrap());
        entries.extend(db.entries_by_domain("c.com").unwrap());

        assert_eq!(db.set_enabled(&entries, ToggleMode::Invert).unwrap(), 3);
        assert!(!enabled_of(&db, a));
        assert!(enabled_of(&db, b));
        assert!(!enabled_of(&db, c));
    }

    #[test]
    fn test_entries_in_group_unknown_group() {
        let db = test_db();
        let err = db.entries_in_group("no-such-group").unwrap_err();
        assert!(matches!(err, GravctlError::GroupNotFound(ref name) if name == "no-such-group"));
    }

    #[test]
    fn test_entries_in_group_empty_group() {
        let db = test_db();
        add_group(&db, "empty");
        assert!(db.entries_in_group("empty").unwrap().is_empty());
    }

    #[test]
    fn test_group_membership_blast_radius() {
        let db = test_db();
        let entry = add_entry(&db, 1, "shared.com", true);
        let g1 = add_group(&db, "group1");
        let g2 = add_group(&db, "group2");
        add_membership(&db, entry, g1);
        add_membership(&db, entry, g2);

        // Member of both groups, so reachable through either name.
        assert_eq!(db.entries_in_group("group1").unwrap().len(), 1);
        assert_eq!(db.entries_in_group("group2").unwrap().len(), 1);
    }

    #[test]
    fn test_set_groups_is_full_replace() {
        let mut db = test_db();
        let entry = add_entry(&db, 1, "x.com", true);
        let a = add_group(&db, "A");
        let b = add_group(&db, "B");
        let c = add_group(&db, "C");

        let entries = db.entries_by_domain("x.com").unwrap();
        db.set_groups(&entries, &[a, b]).unwrap();
        assert_eq!(db.groups_of_entry(entry).unwrap(), vec![a, b]);

        db.set_groups(&entries, &[c]).unwrap();
        assert_eq!(db.groups_of_entry(entry).unwrap(), vec![c]);
    }

    #[test]
    fn test_group_names_sorted() {
        let db = test_db();
        add_group(&db, "zeta");
        add_group(&db, "alpha");

        let names: Vec<_> = db.group_names().unwrap().into_keys().collect();
        assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn test_unknown_entry_type_is_storage_error() {
        let db = test_db();
        add_entry(&db, 9, "weird.com", true);
        let err = db.entries_by_domain("weird.com").unwrap_err();
        assert!(matches!(err, GravctlError::UnknownEntryType(9)));
    }

    #[test]
    fn test_scope_from_flags() {
        assert_eq!(ListScope::from_flags(false, false), ListScope::Both);
        assert_eq!(ListScope::from_flags(true, false), ListScope::Blacklist);
        assert_eq!(ListScope::from_flags(false, true), ListScope::Whitelist);
        assert_eq!(ListScope::from_flags(true, true), ListScope::Both);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GravityDb::open(&dir.path().join("gravity.db")).unwrap_err();
        assert!(matches!(err, GravctlError::DatabaseMissing(_)));
    }
}
