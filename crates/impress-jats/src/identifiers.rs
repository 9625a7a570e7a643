//! Public identifier extraction

use impress_domain::PublicIds;

use crate::document::JatsDocument;

const ARTICLE_IDS: &str = "front/article-meta/article-id";

/// Every `article-id` keyed by its lowercased `pub-id-type`.
///
/// Nodes are read in document order and a repeated type keeps the value of
/// the last node.
pub fn extract_public_ids(document: &JatsDocument) -> PublicIds {
    let mut ids = PublicIds::new();
    for node in document.select(ARTICLE_IDS) {
        let scheme = node.attribute("pub-id-type").unwrap_or_default();
        ids.insert(scheme, node.text());
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(meta: &str) -> PublicIds {
        let xml = format!(
            "<article><front><article-meta>{}</article-meta></front></article>",
            meta
        );
        extract_public_ids(&JatsDocument::parse(&xml).unwrap())
    }

    #[test]
    fn test_types_are_lowercased() {
        let ids = extract(
            r#"<article-id pub-id-type="DOI">10.1234/ABC</article-id>
               <article-id pub-id-type="publisher-id">e42</article-id>"#,
        );
        assert_eq!(ids.get("doi"), Some("10.1234/ABC"));
        assert_eq!(ids.get("publisher-id"), Some("e42"));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let ids = extract(
            r#"<article-id pub-id-type="doi">10.1/first</article-id>
               <article-id pub-id-type="other">x</article-id>
               <article-id pub-id-type="Doi">10.1/last</article-id>"#,
        );
        assert_eq!(ids.len(), 2);
        assert_eq!(ids.get("doi"), Some("10.1/last"));
    }

    #[test]
    fn test_no_ids() {
        assert!(extract("").is_empty());
    }
}
