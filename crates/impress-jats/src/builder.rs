//! Draft publication assembly

use chrono::Datelike;
use impress_domain::Publication;

use crate::context::ImportContext;
use crate::contributors::ContributorPopulator;
use crate::date::format_wire;
use crate::document::JatsDocument;
use crate::error::{ImportError, Result};
use crate::extractor::{ArticleExtractor, PublicationExtractor};
use crate::locale::LocaleResolver;

/// Builds a complete draft [`Publication`] from an article and its context.
///
/// The steps run in a fixed order and the first failure aborts the build.
/// The date comes first so a document without one fails before anything else
/// is read; the title is the only other mandatory field.
pub struct PublicationBuilder<'a> {
    locales: &'a dyn LocaleResolver,
    contributors: &'a dyn ContributorPopulator,
}

impl<'a> PublicationBuilder<'a> {
    pub fn new(locales: &'a dyn LocaleResolver, contributors: &'a dyn ContributorPopulator) -> Self {
        Self {
            locales,
            contributors,
        }
    }

    pub fn build(&self, document: &JatsDocument, context: &ImportContext) -> Result<Publication> {
        let extractor = ArticleExtractor::new(document, self.locales);
        let document_id = context.document_id.as_str();

        let date = extractor
            .publication_date(context.issue.date_published)
            .map_err(|e| ImportError::extract(document_id, e))?;

        let mut publication = Publication::new(
            context.submission.id,
            context.section_id,
            context.issue.id,
            format_wire(&date),
        );

        let (first_page, last_page) = extractor.pages();
        publication.set_pages(first_page.as_deref(), last_page.as_deref());

        let titles = extractor
            .titles()
            .map_err(|e| ImportError::extract(document_id, e))?;
        publication.title = titles.title;
        publication.subtitle = titles.subtitle;
        publication.set_locale(titles.locale);

        publication.abstract_text = extractor.abstracts();
        publication.public_ids = extractor.public_ids();

        publication.copyright_holder = extractor.copyright_holder();
        publication.copyright_notice = extractor.copyright_notice();
        publication.copyright_year = Some(
            extractor
                .copyright_year()
                .unwrap_or_else(|| date.year().to_string()),
        );
        publication.license_url = None;

        self.contributors.populate(document, &mut publication);

        tracing::debug!(
            document = document_id,
            locale = %publication.locale,
            date_published = %publication.date_published,
            identifiers = publication.public_ids.len(),
            authors = publication.authors.len(),
            "built draft publication"
        );

        Ok(publication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Issue, SourceFile, Submission};
    use crate::contributors::{JatsContributors, NoContributors};
    use crate::error::ErrorKind;
    use crate::locale::LocaleTable;
    use chrono::{TimeZone, Utc};
    use impress_domain::{AccessStatus, PublicationStatus};

    fn context(issue_date: Option<(i32, u32, u32)>) -> ImportContext {
        ImportContext {
            document_id: "article.xml".to_string(),
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
            source_file: SourceFile::from_path("/tmp/article.pdf"),
        }
    }

    fn parse(meta: &str) -> JatsDocument {
        let xml = format!(
            "<article><front><article-meta>{}</article-meta></front></article>",
            meta
        );
        JatsDocument::parse(&xml).unwrap()
    }

    #[test]
    fn test_a_study_with_issue_date() {
        let locales = LocaleTable::new("en");
        let builder = PublicationBuilder::new(&locales, &NoContributors);
        let doc = parse(r#"<title-group><article-title xml:lang="en">A Study</article-title></title-group>"#);

        let publication = builder.build(&doc, &context(Some((2020, 3, 1)))).unwrap();

        assert_eq!(publication.locale, "en");
        assert_eq!(publication.language, "en");
        assert_eq!(publication.title.get("en"), Some("A Study"));
        assert_eq!(publication.date_published, "2020-03-01T00:00:00+00:00");
        assert_eq!(publication.copyright_year.as_deref(), Some("2020"));
        assert_eq!(publication.status, PublicationStatus::Published);
        assert_eq!(publication.access_status, AccessStatus::Open);
        assert_eq!(publication.version, 1);
        assert_eq!(publication.seq, 42);
        assert_eq!(publication.section_id, 3);
        assert_eq!(publication.issue_id, 9);
        assert_eq!(publication.url_path, None);
        assert_eq!(publication.license_url, None);
        assert_eq!(publication.pages, None);
        assert!(publication.copyright_holder.is_empty());
    }

    #[test]
    fn test_missing_date_fails_before_title() {
        let locales = LocaleTable::new("en");
        let builder = PublicationBuilder::new(&locales, &NoContributors);
        let doc = parse("");

        let err = builder.build(&doc, &context(None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingPublicationDate);
        assert_eq!(err.document(), "article.xml");
    }

    #[test]
    fn test_missing_title() {
        let locales = LocaleTable::new("en");
        let builder = PublicationBuilder::new(&locales, &NoContributors);
        let doc = parse("<title-group><article-title>  </article-title></title-group>");

        let err = builder.build(&doc, &context(Some((2020, 3, 1)))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingTitle);
    }

    #[test]
    fn test_full_front_matter() {
        let locales = LocaleTable::new("en_US").with_alias("en", "en_US");
        let builder = PublicationBuilder::new(&locales, &JatsContributors);
        let doc = parse(
            r#"
            <article-id pub-id-type="DOI">10.1000/xyz</article-id>
            <title-group>
              <article-title xml:lang="en">Tides</article-title>
              <trans-title-group xml:lang="pt-br"><trans-title>Marés</trans-title></trans-title-group>
            </title-group>
            <contrib-group>
              <contrib contrib-type="author"><name><surname>Ng</surname><given-names>Ada</given-names></name></contrib>
            </contrib-group>
            <pub-date pub-type="epub"><year>2018</year><month>5</month><day>2</day></pub-date>
            <fpage>1</fpage><lpage>9</lpage>
            <permissions>
              <copyright-statement>© 2017 Ng</copyright-statement>
              <copyright-year>2017</copyright-year>
              <copyright-holder>Ada Ng</copyright-holder>
            </permissions>
            <abstract><p>Water <italic>moves</italic>.</p></abstract>"#,
        );

        let publication = builder.build(&doc, &context(Some((2020, 3, 1)))).unwrap();

        assert_eq!(publication.locale, "en_US");
        assert_eq!(publication.title.get("pt_BR"), Some("Marés"));
        assert_eq!(publication.date_published, "2018-05-02T00:00:00+00:00");
        assert_eq!(publication.pages.as_deref(), Some("1-9"));
        assert_eq!(publication.public_id("doi"), Some("10.1000/xyz"));
        assert_eq!(publication.copyright_year.as_deref(), Some("2017"));
        assert_eq!(publication.copyright_holder.get("en_US"), Some("Ada Ng"));
        assert_eq!(
            publication.abstract_text.get("en_US"),
            Some("<p>Water <em>moves</em>.</p>")
        );
        assert_eq!(publication.authors.len(), 1);
    }
}
