//! SQLite schema for imported publications

/// Schema version for migrations
pub const SCHEMA_VERSION: u32 = 1;

/// SQLite schema definition
pub struct Schema;

impl Schema {
    /// Get the complete schema SQL
    pub fn create_tables() -> &'static str {
        r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Publications; localized maps, identifiers and authors are JSON
CREATE TABLE IF NOT EXISTS publications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    submission_id INTEGER NOT NULL,
    status TEXT NOT NULL,
    version INTEGER NOT NULL,
    seq INTEGER NOT NULL,
    access_status TEXT NOT NULL,
    date_published TEXT NOT NULL,
    section_id INTEGER NOT NULL,
    issue_id INTEGER NOT NULL,
    url_path TEXT,
    pages TEXT,
    title TEXT NOT NULL,
    subtitle TEXT NOT NULL,
    abstract TEXT NOT NULL,
    public_ids TEXT NOT NULL,
    copyright_holder TEXT NOT NULL,
    copyright_notice TEXT NOT NULL,
    copyright_year TEXT,
    license_url TEXT,
    locale TEXT NOT NULL,
    language TEXT NOT NULL,
    authors TEXT NOT NULL,
    created_at TEXT NOT NULL,
    published_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_publications_submission ON publications(submission_id);
CREATE INDEX IF NOT EXISTS idx_publications_issue ON publications(issue_id);

-- Representations (galleys)
CREATE TABLE IF NOT EXISTS representations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    publication_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    seq INTEGER NOT NULL,
    label TEXT NOT NULL,
    locale TEXT NOT NULL,
    file_id TEXT,
    FOREIGN KEY (publication_id) REFERENCES publications(id)
);

CREATE INDEX IF NOT EXISTS idx_representations_publication ON representations(publication_id);
"#
    }

    /// Get migration SQL for a specific version
    pub fn migration(from_version: u32, to_version: u32) -> Option<&'static str> {
        match (from_version, to_version) {
            _ => None,
        }
    }
}
