//! One-document import: build, then commit

use crate::builder::PublicationBuilder;
use crate::committer::{Committed, PublicationCommitter};
use crate::context::ImportContext;
use crate::document::JatsDocument;
use crate::error::Result;

/// Imports a single parsed article
pub struct ArticleImporter<'a> {
    builder: PublicationBuilder<'a>,
    committer: PublicationCommitter<'a>,
}

impl<'a> ArticleImporter<'a> {
    pub fn new(builder: PublicationBuilder<'a>, committer: PublicationCommitter<'a>) -> Self {
        Self { builder, committer }
    }

    /// Build the draft and commit it. Nothing is persisted if the build fails.
    pub fn import(&self, document: &JatsDocument, context: &ImportContext) -> Result<Committed> {
        let span = tracing::info_span!(
            "import_article",
            document = %context.document_id,
            submission = context.submission.id
        );
        let _enter = span.enter();

        let publication = self.builder.build(document, context)?;
        let committed = self.committer.commit(publication, context)?;

        tracing::info!(
            publication = ?committed.publication_id(),
            "article imported"
        );
        Ok(committed)
    }
}
