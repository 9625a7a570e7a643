//! What the importer knows about an article besides its XML

use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// The submission the publication belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub id: i64,
    pub context_id: i64,
}

/// The issue the article is published in
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub id: i64,
    pub date_published: Option<DateTime<Utc>>,
}

/// The already-ingested PDF rendering of the article
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub filename: String,
}

impl SourceFile {
    /// Source file named after the last component of its path
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, filename }
    }
}

/// Everything one import needs besides the document itself
#[derive(Debug, Clone, PartialEq)]
pub struct ImportContext {
    /// Identifies the document in errors and logs (usually its path)
    pub document_id: String,
    pub submission: Submission,
    pub section_id: i64,
    pub issue: Issue,
    pub source_file: SourceFile,
}
