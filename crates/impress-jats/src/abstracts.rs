//! Abstract extraction

use impress_domain::LocalizedText;

use crate::document::JatsDocument;
use crate::locale::LocaleResolver;
use crate::markup::sanitize;

const ABSTRACTS: &str = "front/article-meta/abstract|front/article-meta/trans-abstract";

/// Sanitized abstracts keyed by locale.
///
/// Abstract and translated-abstract nodes are visited in document order; a
/// node that sanitizes to nothing is skipped and a later node for the same
/// locale replaces an earlier one.
pub fn resolve_abstracts(document: &JatsDocument, locales: &dyn LocaleResolver) -> LocalizedText {
    let mut abstracts = LocalizedText::new();
    for node in document.select(ABSTRACTS) {
        if let Some(value) = sanitize(node) {
            abstracts.set(locales.resolve(node.lang()), value);
        }
    }
    abstracts
}
