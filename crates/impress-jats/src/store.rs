//! Storage collaborators the committer calls into
//!
//! Implementations live in [`crate::persistence`] (SQLite) and
//! [`crate::file_store`] (filesystem); tests substitute their own.

use std::fmt;
use std::path::Path;

use impress_domain::{FileId, Publication, PublicationId, Representation, RepresentationId};

use crate::error::{FileStoreError, StoreError};

/// The trait publication repositories implement.
pub trait PublicationRepository: Send + Sync {
    /// Add a draft publication. Returns the generated id.
    fn add(&self, publication: &Publication) -> Result<PublicationId, StoreError>;

    /// Transition an added publication to published.
    fn publish(&self, publication: &Publication) -> Result<(), StoreError>;

    /// Get a publication by id.
    fn get(&self, id: PublicationId) -> Result<Option<Publication>, StoreError>;
}

/// Persistence for representation (galley) records.
pub trait RepresentationStore: Send + Sync {
    /// Insert a new representation. Returns the generated id.
    fn insert_representation(
        &self,
        representation: &Representation,
    ) -> Result<RepresentationId, StoreError>;

    /// Overwrite a stored representation.
    fn update_representation(&self, representation: &Representation) -> Result<(), StoreError>;

    /// Representations of a publication, ordered by `seq`.
    fn representations_for(
        &self,
        publication_id: PublicationId,
    ) -> Result<Vec<Representation>, StoreError>;
}

/// Workflow stage a stored file is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStage {
    Proof,
}

impl FileStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStage::Proof => "proof",
        }
    }
}

impl fmt::Display for FileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of record a stored file is associated with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationType {
    Representation,
}

impl AssociationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociationType::Representation => "representation",
        }
    }
}

/// Everything the file store needs to file a copy of a source file
#[derive(Debug, Clone)]
pub struct FileCopyRequest<'a> {
    pub source_path: &'a Path,
    pub context_id: i64,
    pub submission_id: i64,
    pub stage: FileStage,
    pub uploader_id: i64,
    pub genre_id: i64,
    pub association_type: AssociationType,
    pub association_id: i64,
}

/// Permanent storage for submission files.
pub trait FileStore: Send + Sync {
    /// Copy a file into storage and associate it. Returns the new file id.
    fn copy(&self, request: &FileCopyRequest<'_>) -> Result<FileId, FileStoreError>;
}
