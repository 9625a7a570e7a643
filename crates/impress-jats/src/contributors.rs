//! Contributor population

use std::collections::HashMap;

use impress_domain::{Author, Publication};

use crate::document::{Element, JatsDocument};

const CONTRIBUTORS: &str = "front/article-meta/contrib-group/contrib";
const AFFILIATIONS: &str = "front/article-meta/aff|front/article-meta/contrib-group/aff";

/// Fills the contributor data of a draft publication
///
/// Runs after every other field is set and before the draft is committed.
pub trait ContributorPopulator {
    fn populate(&self, document: &JatsDocument, publication: &mut Publication);
}

/// Leaves the author list untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContributors;

impl ContributorPopulator for NoContributors {
    fn populate(&self, _document: &JatsDocument, _publication: &mut Publication) {}
}

/// Authors from `contrib-group/contrib[@contrib-type="author"]`
///
/// The first author becomes the primary contact. Affiliations are resolved
/// through `xref[@ref-type="aff"]/@rid` when the `aff` elements carry ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct JatsContributors;

impl ContributorPopulator for JatsContributors {
    fn populate(&self, document: &JatsDocument, publication: &mut Publication) {
        let affiliations: HashMap<&str, String> = document
            .select(AFFILIATIONS)
            .into_iter()
            .filter_map(|aff| Some((aff.attribute("id")?, affiliation_text(aff))))
            .collect();

        let mut seq = 0;
        for contrib in document.select(CONTRIBUTORS) {
            if contrib.attribute("contrib-type").unwrap_or("author") != "author" {
                continue;
            }
            let Some(mut author) = author_from(contrib, &affiliations) else {
                tracing::debug!("skipping contributor without a name");
                continue;
            };
            author.seq = seq;
            author.primary_contact = seq == 0;
            publication.authors.push(author);
            seq += 1;
        }
    }
}

fn author_from(contrib: &Element, affiliations: &HashMap<&str, String>) -> Option<Author> {
    let given = contrib.select_text("name/given-names");
    let (family, given) = match contrib.select_text("name/surname") {
        Some(family) => (family, given),
        // mononymous authors are sometimes tagged with given-names only
        None => (given?, None),
    };

    let mut author = Author::new(family);
    if let Some(given) = given {
        author = author.with_given_name(given);
    }
    if let Some(suffix) = contrib.select_text("name/suffix") {
        author = author.with_suffix(suffix);
    }
    if let Some(email) = contrib.select_text("email") {
        author = author.with_email(email);
    }
    if let Some(orcid) = contrib
        .select("contrib-id")
        .into_iter()
        .find(|id| id.attribute("contrib-id-type") == Some("orcid"))
        .map(Element::text)
        .filter(|orcid| !orcid.is_empty())
    {
        author = author.with_orcid(orcid);
    }
    author.affiliation = contrib
        .select("xref")
        .into_iter()
        .filter(|xref| xref.attribute("ref-type") == Some("aff"))
        .filter_map(|xref| affiliations.get(xref.attribute("rid")?))
        .next()
        .cloned()
        .or_else(|| contrib.select_first("aff").map(affiliation_text));
    Some(author)
}

/// Affiliation text without its `label` (footnote marker)
fn affiliation_text(aff: &Element) -> String {
    let label = aff.select_text("label").unwrap_or_default();
    let text = aff.text();
    text.strip_prefix(label.as_str())
        .unwrap_or(&text)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<article><front><article-meta>
      <contrib-group>
        <contrib contrib-type="author">
          <contrib-id contrib-id-type="orcid">https://orcid.org/0000-0002-1825-0097</contrib-id>
          <name><surname>Curie</surname><given-names>Marie</given-names></name>
          <email>marie@example.org</email>
          <xref ref-type="aff" rid="aff1"><sup>1</sup></xref>
        </contrib>
        <contrib contrib-type="editor">
          <name><surname>Editor</surname></name>
        </contrib>
        <contrib>
          <name><given-names>Plato</given-names></name>
          <aff>Academy</aff>
        </contrib>
        <contrib contrib-type="author"><collab>Consortium</collab></contrib>
      </contrib-group>
      <aff id="aff1"><label>1</label>Sorbonne, Paris</aff>
    </article-meta></front></article>"#;

    fn populate() -> Publication {
        let document = JatsDocument::parse(SAMPLE).unwrap();
        let mut publication = Publication::new(1, 1, 1, "2020-01-01T00:00:00+00:00".into());
        JatsContributors.populate(&document, &mut publication);
        publication
    }

    #[test]
    fn test_authors_in_order() {
        let publication = populate();
        let names: Vec<String> = publication.authors.iter().map(Author::display_name).collect();
        assert_eq!(names, vec!["Marie Curie", "Plato"]);
        assert_eq!(publication.authors[1].seq, 1);
    }

    #[test]
    fn test_first_author_is_primary_contact() {
        let publication = populate();
        assert!(publication.authors[0].primary_contact);
        assert!(!publication.authors[1].primary_contact);
    }

    #[test]
    fn test_author_details() {
        let publication = populate();
        let curie = &publication.authors[0];
        assert_eq!(curie.email.as_deref(), Some("marie@example.org"));
        assert_eq!(
            curie.orcid.as_deref(),
            Some("https://orcid.org/0000-0002-1825-0097")
        );
        assert_eq!(curie.affiliation.as_deref(), Some("Sorbonne, Paris"));
        assert_eq!(publication.authors[1].affiliation.as_deref(), Some("Academy"));
        assert_eq!(publication.authors[1].email, None);
        assert_eq!(publication.authors[1].orcid, None);
    }

    #[test]
    fn test_blank_orcid_is_ignored() {
        let document = JatsDocument::parse(
            r#"<article><front><article-meta><contrib-group>
                 <contrib contrib-type="author">
                   <contrib-id contrib-id-type="orcid"> </contrib-id>
                   <name><surname>Noether</surname></name>
                 </contrib>
               </contrib-group></article-meta></front></article>"#,
        )
        .unwrap();
        let mut publication = Publication::new(1, 1, 1, "2020-01-01T00:00:00+00:00".into());
        JatsContributors.populate(&document, &mut publication);
        assert_eq!(publication.authors[0].orcid, None);
    }

    #[test]
    fn test_no_contributors_is_a_no_op() {
        let document = JatsDocument::parse(SAMPLE).unwrap();
        let mut publication = Publication::new(1, 1, 1, "2020-01-01T00:00:00+00:00".into());
        NoContributors.populate(&document, &mut publication);
        assert!(publication.authors.is_empty());
    }
}
