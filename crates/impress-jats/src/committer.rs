//! Persisting a built publication
//!
//! Three collaborator steps, in order: add the draft, attach the primary PDF
//! representation, publish. There is no rollback; once the add succeeds any
//! later failure is reported as [`ImportError::Incomplete`] so the caller can
//! find and repair the half-imported record.

use impress_domain::{
    validate_publication, Publication, PublicationId, Representation, ValidationError,
    ValidationSeverity,
};

use crate::config::ImportConfig;
use crate::context::ImportContext;
use crate::error::{AttachmentError, ImportError, ImportStage, Result, StoreError};
use crate::store::{
    AssociationType, FileCopyRequest, FileStage, FileStore, PublicationRepository,
    RepresentationStore,
};

/// Values the committer needs that neither the draft nor the context carry
#[derive(Debug, Clone, PartialEq)]
pub struct CommitSettings {
    /// Locale of the representation and its name
    pub current_locale: String,
    /// Recorded as the uploader of the copied file
    pub editor_id: i64,
    pub genre_id: i64,
}

impl CommitSettings {
    pub fn new(current_locale: impl Into<String>, editor_id: i64, genre_id: i64) -> Self {
        Self {
            current_locale: current_locale.into(),
            editor_id,
            genre_id,
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(
            config.default_locale.clone(),
            config.editor_id,
            config.submission_genre_id,
        )
    }
}

/// Outcome of a fully successful commit
#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    /// The publication with its generated id
    pub publication: Publication,
    /// The attached primary representation
    pub representation: Representation,
}

impl Committed {
    pub fn publication_id(&self) -> Option<PublicationId> {
        self.publication.id
    }
}

/// Runs add, attach and publish against injected stores
pub struct PublicationCommitter<'a> {
    repository: &'a dyn PublicationRepository,
    representations: &'a dyn RepresentationStore,
    files: &'a dyn FileStore,
    settings: CommitSettings,
}

impl<'a> PublicationCommitter<'a> {
    pub fn new(
        repository: &'a dyn PublicationRepository,
        representations: &'a dyn RepresentationStore,
        files: &'a dyn FileStore,
        settings: CommitSettings,
    ) -> Self {
        Self {
            repository,
            representations,
            files,
            settings,
        }
    }

    pub fn settings(&self) -> &CommitSettings {
        &self.settings
    }

    pub fn commit(&self, mut publication: Publication, context: &ImportContext) -> Result<Committed> {
        let document = context.document_id.as_str();

        let problems: Vec<ValidationError> = validate_publication(&publication)
            .into_iter()
            .filter(|e| e.severity == ValidationSeverity::Error)
            .collect();
        if !problems.is_empty() {
            let err = rejection(document, &problems);
            tracing::warn!(document, stage = %err.stage(), error = %err, "draft rejected");
            return Err(err);
        }

        let publication_id = self.repository.add(&publication).map_err(|source| {
            tracing::warn!(document, stage = %ImportStage::Add, error = %source, "add failed");
            ImportError::Persistence {
                document: document.to_string(),
                stage: ImportStage::Add,
                source,
            }
        })?;
        publication.id = Some(publication_id);
        tracing::debug!(document, stage = %ImportStage::Add, publication = %publication_id, "publication added");

        let representation = self
            .attach(publication_id, context)
            .map_err(|source| {
                tracing::warn!(
                    document,
                    stage = %ImportStage::Attach,
                    publication = %publication_id,
                    error = %source,
                    "publication left without its representation"
                );
                incomplete(
                    publication_id,
                    ImportStage::Attach,
                    ImportError::Attachment {
                        document: document.to_string(),
                        source,
                    },
                )
            })?;
        tracing::debug!(document, stage = %ImportStage::Attach, publication = %publication_id, "representation attached");

        self.repository.publish(&publication).map_err(|source| {
            tracing::warn!(
                document,
                stage = %ImportStage::Publish,
                publication = %publication_id,
                error = %source,
                "publication left unpublished"
            );
            incomplete(
                publication_id,
                ImportStage::Publish,
                ImportError::Persistence {
                    document: document.to_string(),
                    stage: ImportStage::Publish,
                    source,
                },
            )
        })?;

        tracing::info!(document, stage = %ImportStage::Publish, publication = %publication_id, "publication published");

        Ok(Committed {
            publication,
            representation,
        })
    }

    /// Insert the primary PDF representation, copy its file and link the two
    fn attach(
        &self,
        publication_id: PublicationId,
        context: &ImportContext,
    ) -> std::result::Result<Representation, AttachmentError> {
        let mut representation = Representation::primary_pdf(
            publication_id,
            self.settings.current_locale.clone(),
            context.source_file.filename.clone(),
        );

        let representation_id = self
            .representations
            .insert_representation(&representation)
            .map_err(AttachmentError::Representation)?;
        representation.id = Some(representation_id);

        let request = FileCopyRequest {
            source_path: &context.source_file.path,
            context_id: context.submission.context_id,
            submission_id: context.submission.id,
            stage: FileStage::Proof,
            uploader_id: self.settings.editor_id,
            genre_id: self.settings.genre_id,
            association_type: AssociationType::Representation,
            association_id: representation_id.0,
        };
        let file_id = self.files.copy(&request)?;
        representation.file_id = Some(file_id);

        self.representations
            .update_representation(&representation)
            .map_err(AttachmentError::Representation)?;

        Ok(representation)
    }
}

/// Error for a draft that failed validation
///
/// Title, locale and date problems surface as the same kinds the builder
/// reports; anything else is an add-stage persistence failure.
fn rejection(document: &str, problems: &[ValidationError]) -> ImportError {
    let document = document.to_string();
    let has = |field: &str| problems.iter().any(|e| e.field == field);
    if has("title") || has("locale") {
        ImportError::MissingTitle { document }
    } else if has("date_published") {
        ImportError::MissingPublicationDate { document }
    } else {
        let message = problems
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        ImportError::Persistence {
            document,
            stage: ImportStage::Add,
            source: StoreError::Validation(message),
        }
    }
}

fn incomplete(publication_id: PublicationId, stage: ImportStage, source: ImportError) -> ImportError {
    ImportError::Incomplete {
        publication_id,
        stage,
        source: Box::new(source),
    }
}
