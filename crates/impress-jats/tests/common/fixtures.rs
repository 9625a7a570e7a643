//! Test fixture loading utilities

use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use impress_jats::{ImportContext, Issue, JatsDocument, SourceFile, Submission};

/// Get the path to a fixture file
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
#[allow(dead_code)]
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Parse a JATS fixture
#[allow(dead_code)]
pub fn load_jats_fixture(name: &str) -> JatsDocument {
    let xml = load_fixture(&format!("jats/{}", name));
    JatsDocument::parse(&xml).unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", name, e))
}

/// Parse an `article-meta` fragment wrapped in a minimal article
#[allow(dead_code)]
pub fn article_meta(meta: &str) -> JatsDocument {
    let xml = format!(
        "<article><front><article-meta>{}</article-meta></front></article>",
        meta
    );
    JatsDocument::parse(&xml).unwrap()
}

/// Import context for submission 42 in section 3 of issue 9, using the PDF fixture
#[allow(dead_code)]
pub fn import_context(document: &str, issue_date: Option<(i32, u32, u32)>) -> ImportContext {
    ImportContext {
        document_id: document.to_string(),
        submission: Submission {
            id: 42,
            context_id: 1,
        },
        section_id: 3,
        issue: Issue {
            id: 9,
            date_published: issue_date
                .map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
        },
        source_file: SourceFile::from_path(fixture_path("pdf/article.pdf")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_path() {
        let path = fixture_path("jats/a-study.xml");
        assert!(path.to_string_lossy().contains("test_fixtures"));
    }

    #[test]
    fn test_load_jats_fixture() {
        let document = load_jats_fixture("a-study.xml");
        assert_eq!(document.root().name(), "article");
    }
}
