//! Title, subtitle and canonical locale resolution

use impress_domain::{LocaleCode, LocalizedText};

use crate::document::JatsDocument;
use crate::error::ExtractError;
use crate::locale::LocaleResolver;

const ARTICLE_TITLE: &str = "front/article-meta/title-group/article-title";
const SUBTITLE: &str = "front/article-meta/title-group/subtitle";
const TRANS_TITLE_GROUP: &str = "front/article-meta/title-group/trans-title-group";

/// Titles of an article and the locale the publication is filed under
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTitles {
    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    /// Locale of the first title-bearing node
    pub locale: LocaleCode,
}

/// Read the primary title, its subtitle and every translated title group.
///
/// The canonical locale comes from the first node with non-empty text, in
/// order: the primary title, then translated titles in document order. Once
/// set it is never replaced.
pub fn resolve_titles(
    document: &JatsDocument,
    locales: &dyn LocaleResolver,
) -> Result<ResolvedTitles, ExtractError> {
    let mut title = LocalizedText::new();
    let mut subtitle = LocalizedText::new();
    let mut canonical: Option<LocaleCode> = None;

    if let Some(node) = document.select_first(ARTICLE_TITLE) {
        let locale = locales.resolve(node.lang());
        let value = node.text();
        if !value.is_empty() && canonical.is_none() {
            canonical = Some(locale.clone());
        }
        title.set(locale, value);
    }

    if let Some(node) = document.select_first(SUBTITLE) {
        subtitle.set(locales.resolve(node.lang()), node.text());
    }

    for group in document.select(TRANS_TITLE_GROUP) {
        let locale = locales.resolve(group.lang());
        if let Some(value) = group.select_text("trans-title") {
            if canonical.is_none() {
                canonical = Some(locale.clone());
            }
            title.set(locale.clone(), value);
        }
        if let Some(value) = group.select_text("trans-subtitle") {
            subtitle.set(locale, value);
        }
    }

    let locale = canonical.ok_or(ExtractError::MissingTitle)?;
    tracing::debug!(locale = %locale, locales = title.len(), "resolved titles");

    Ok(ResolvedTitles {
        title,
        subtitle,
        locale,
    })
}
