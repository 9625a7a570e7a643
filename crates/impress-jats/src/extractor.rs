//! Field extraction over a parsed article
//!
//! [`PublicationExtractor`] bundles every read the builder performs as
//! default methods, so anything that can hand out a document and a locale
//! resolver gets the whole extraction surface.

use chrono::{DateTime, Utc};
use impress_domain::{LocalizedText, PublicIds};

use crate::abstracts::resolve_abstracts;
use crate::date::resolve_publication_date;
use crate::document::JatsDocument;
use crate::error::ExtractError;
use crate::identifiers::extract_public_ids;
use crate::locale::LocaleResolver;
use crate::title::{resolve_titles, ResolvedTitles};

const FIRST_PAGE: &str = "front/article-meta/fpage";
const LAST_PAGE: &str = "front/article-meta/lpage";
const COPYRIGHT_HOLDER: &str = "front/article-meta/permissions/copyright-holder";
const COPYRIGHT_STATEMENT: &str = "front/article-meta/permissions/copyright-statement";
const COPYRIGHT_YEAR: &str = "front/article-meta/permissions/copyright-year";

/// Reads publication fields out of an article
pub trait PublicationExtractor {
    fn document(&self) -> &JatsDocument;

    fn locales(&self) -> &dyn LocaleResolver;

    fn titles(&self) -> Result<ResolvedTitles, ExtractError> {
        resolve_titles(self.document(), self.locales())
    }

    fn abstracts(&self) -> LocalizedText {
        resolve_abstracts(self.document(), self.locales())
    }

    fn public_ids(&self) -> PublicIds {
        extract_public_ids(self.document())
    }

    /// Document date, else `issue_date`
    fn publication_date(
        &self,
        issue_date: Option<DateTime<Utc>>,
    ) -> Result<DateTime<Utc>, ExtractError> {
        resolve_publication_date(self.document(), issue_date)
    }

    /// `(fpage, lpage)`, each `None` when absent or blank
    fn pages(&self) -> (Option<String>, Option<String>) {
        (
            self.document().select_text(FIRST_PAGE),
            self.document().select_text(LAST_PAGE),
        )
    }

    /// Copyright holder under the current locale; empty when the document has none
    fn copyright_holder(&self) -> LocalizedText {
        current_locale_text(self, COPYRIGHT_HOLDER)
    }

    /// Copyright statement under the current locale; empty when the document has none
    fn copyright_notice(&self) -> LocalizedText {
        current_locale_text(self, COPYRIGHT_STATEMENT)
    }

    fn copyright_year(&self) -> Option<String> {
        self.document().select_text(COPYRIGHT_YEAR)
    }
}

fn current_locale_text<E: PublicationExtractor + ?Sized>(extractor: &E, path: &str) -> LocalizedText {
    match extractor.document().select_text(path) {
        Some(text) => LocalizedText::single(extractor.locales().current_locale(), text),
        None => LocalizedText::new(),
    }
}

/// A document paired with the resolver its language tags go through
pub struct ArticleExtractor<'a> {
    document: &'a JatsDocument,
    locales: &'a dyn LocaleResolver,
}

impl<'a> ArticleExtractor<'a> {
    pub fn new(document: &'a JatsDocument, locales: &'a dyn LocaleResolver) -> Self {
        Self { document, locales }
    }
}

impl PublicationExtractor for ArticleExtractor<'_> {
    fn document(&self) -> &JatsDocument {
        self.document
    }

    fn locales(&self) -> &dyn LocaleResolver {
        self.locales
    }
}
