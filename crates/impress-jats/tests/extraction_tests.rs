//! Extraction integration tests over the JATS fixtures

mod common;

use chrono::{TimeZone, Utc};
use common::fixtures::{article_meta, load_jats_fixture};
use impress_jats::{
    ArticleExtractor, DocumentError, ExtractError, JatsDocument, LocaleTable, PublicationExtractor,
};
use rstest::rstest;

fn locales() -> LocaleTable {
    LocaleTable::new("en")
}

// === Titles ===

#[test]
fn test_full_article_titles() {
    let document = load_jats_fixture("full-article.xml");
    let locales = locales();
    let titles = ArticleExtractor::new(&document, &locales).titles().unwrap();

    assert_eq!(titles.locale, "en");
    assert_eq!(
        titles.title.get("en"),
        Some("Tidal Mixing in Estuarine Channels")
    );
    assert_eq!(
        titles.title.get("pt_BR"),
        Some("Mistura de Marés em Canais Estuarinos")
    );
    assert_eq!(
        titles.title.get("fr"),
        Some("Mélange des marées dans les chenaux estuariens")
    );
    assert_eq!(titles.subtitle.get("en"), Some("A Field Study"));
    assert_eq!(titles.subtitle.get("pt_BR"), Some("Um Estudo de Campo"));
    assert_eq!(titles.subtitle.get("fr"), None);
}

#[test]
fn test_translated_titles_only() {
    let document = load_jats_fixture("translated-only.xml");
    let locales = locales();
    let titles = ArticleExtractor::new(&document, &locales).titles().unwrap();

    // blank Spanish title does not count as title-bearing
    assert_eq!(titles.locale, "de");
    assert_eq!(titles.title.get("de"), Some("Gezeitenströmungen"));
    assert_eq!(titles.title.get("fr"), Some("Courants de marée"));
    assert!(!titles.title.contains_locale("es"));
    assert_eq!(titles.title.get("en"), Some(""));
}

#[test]
fn test_untitled_article() {
    let document = load_jats_fixture("untitled.xml");
    let locales = locales();
    assert_eq!(
        ArticleExtractor::new(&document, &locales).titles(),
        Err(ExtractError::MissingTitle)
    );
}

#[rstest]
#[case(r#"<article-title xml:lang="en">Primary</article-title>"#, "en")]
#[case(r#"<article-title xml:lang="es">Primario</article-title><trans-title-group xml:lang="en"><trans-title>Primary</trans-title></trans-title-group>"#, "es")]
#[case(r#"<trans-title-group xml:lang="fr"><trans-title>Premier</trans-title></trans-title-group><trans-title-group xml:lang="de"><trans-title>Erster</trans-title></trans-title-group>"#, "fr")]
#[case(r#"<article-title/><trans-title-group xml:lang="it"><trans-title>Primo</trans-title></trans-title-group>"#, "it")]
#[case(r#"<article-title>Untagged</article-title>"#, "en")]
fn test_canonical_locale(#[case] title_group: &str, #[case] expected: &str) {
    let document = article_meta(&format!("<title-group>{}</title-group>", title_group));
    let locales = locales();
    let titles = ArticleExtractor::new(&document, &locales).titles().unwrap();
    assert_eq!(titles.locale, expected);
}

// === Abstracts ===

#[test]
fn test_full_article_abstracts() {
    let document = load_jats_fixture("full-article.xml");
    let locales = locales();
    let abstracts = ArticleExtractor::new(&document, &locales).abstracts();

    let english = abstracts.get("en").unwrap();
    assert!(english.starts_with("Abstract"));
    assert!(english.contains("H<sub>2</sub>O and CO<sub>2</sub>"));
    assert!(english.contains("across three sites &amp; seasons."));
    assert!(english.ends_with("<p>Mixing is strongest at <em>spring</em> tide.</p>"));
    assert!(!english.contains("<bold>"));

    assert_eq!(
        abstracts.get("pt_BR"),
        Some("<p>A salinidade no canal varia com a maré.</p>")
    );
}

#[test]
fn test_later_abstract_overwrites_same_locale() {
    let document = article_meta(
        r#"<abstract><p>First</p></abstract>
           <trans-abstract xml:lang="en"><p>Second</p></trans-abstract>
           <trans-abstract xml:lang="en"> </trans-abstract>"#,
    );
    let locales = locales();
    let abstracts = ArticleExtractor::new(&document, &locales).abstracts();
    assert_eq!(abstracts.len(), 1);
    assert_eq!(abstracts.get("en"), Some("<p>Second</p>"));
}

#[test]
fn test_deeply_nested_abstract_is_rejected() {
    let depth = 10_000;
    let xml = format!(
        "<article><front><article-meta><abstract>{}x{}</abstract></article-meta></front></article>",
        "<bold>".repeat(depth),
        "</bold>".repeat(depth)
    );
    assert!(matches!(
        JatsDocument::parse(&xml),
        Err(DocumentError::TooDeep { .. })
    ));
}

// === Identifiers ===

#[test]
fn test_full_article_identifiers() {
    let document = load_jats_fixture("full-article.xml");
    let locales = locales();
    let ids = ArticleExtractor::new(&document, &locales).public_ids();

    assert_eq!(ids.len(), 2);
    assert_eq!(ids.get("doi"), Some("10.5555/jco.2018.017"));
    assert_eq!(ids.get("publisher-id"), Some("jco-2018-017"));
}

#[test]
fn test_duplicate_identifier_type_keeps_last() {
    let document = load_jats_fixture("translated-only.xml");
    let locales = locales();
    let ids = ArticleExtractor::new(&document, &locales).public_ids();
    assert_eq!(ids.get("doi"), Some("10.5555/second"));
    assert_eq!(ids.len(), 1);
}

// === Dates ===

#[test]
fn test_electronic_date_wins() {
    let document = load_jats_fixture("full-article.xml");
    let locales = locales();
    let date = ArticleExtractor::new(&document, &locales)
        .publication_date(None)
        .unwrap();
    assert_eq!(date, Utc.with_ymd_and_hms(2018, 11, 14, 0, 0, 0).unwrap());
}

#[test]
fn test_last_date_without_preference() {
    let document = load_jats_fixture("translated-only.xml");
    let locales = locales();
    let date = ArticleExtractor::new(&document, &locales)
        .publication_date(None)
        .unwrap();
    assert_eq!(date, Utc.with_ymd_and_hms(2016, 6, 30, 0, 0, 0).unwrap());
}

#[test]
fn test_issue_date_fallback() {
    let document = load_jats_fixture("a-study.xml");
    let locales = locales();
    let extractor = ArticleExtractor::new(&document, &locales);
    let issue_date = Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap();

    assert_eq!(extractor.publication_date(Some(issue_date)), Ok(issue_date));
    assert_eq!(
        extractor.publication_date(None),
        Err(ExtractError::MissingPublicationDate)
    );
}

// === Pages and copyright ===

#[rstest]
#[case("<fpage>1</fpage><lpage>9</lpage>", (Some("1"), Some("9")))]
#[case("<fpage>1</fpage>", (Some("1"), None))]
#[case("<lpage>9</lpage>", (None, Some("9")))]
#[case("<fpage> </fpage><lpage>9</lpage>", (None, Some("9")))]
fn test_pages(#[case] meta: &str, #[case] expected: (Option<&str>, Option<&str>)) {
    let document = article_meta(meta);
    let locales = locales();
    let (first, last) = ArticleExtractor::new(&document, &locales).pages();
    assert_eq!((first.as_deref(), last.as_deref()), expected);
}

#[test]
fn test_full_article_copyright() {
    let document = load_jats_fixture("full-article.xml");
    let locales = LocaleTable::new("en_US");
    let extractor = ArticleExtractor::new(&document, &locales);

    assert_eq!(extractor.copyright_holder().get("en_US"), Some("The Authors"));
    assert_eq!(
        extractor.copyright_notice().get("en_US"),
        Some("© 2017 The Authors")
    );
    assert_eq!(extractor.copyright_year().as_deref(), Some("2017"));
}
