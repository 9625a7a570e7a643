//! Error types for impress-jats

use std::fmt;
use std::path::PathBuf;

use impress_domain::PublicationId;
use thiserror::Error;

/// Result type alias for import operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Step of the import at which an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    /// Reading fields out of the document
    Extract,
    /// Adding the draft publication to the repository
    Add,
    /// Creating the representation and copying its file
    Attach,
    /// Transitioning the publication to published
    Publish,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportStage::Extract => "extract",
            ImportStage::Add => "add",
            ImportStage::Attach => "attach",
            ImportStage::Publish => "publish",
        };
        f.write_str(name)
    }
}

/// The closed set of failure kinds an import can end with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingTitle,
    MissingPublicationDate,
    Persistence,
    Attachment,
}

/// Main error type for importing one article
#[derive(Error, Debug)]
pub enum ImportError {
    /// No title-bearing node anywhere in the document
    #[error("{document}: article title missing")]
    MissingTitle { document: String },

    /// No parsable date in the document and no issue date to fall back to
    #[error("{document}: missing publication date")]
    MissingPublicationDate { document: String },

    /// Repository call failed
    #[error("{document}: persistence failed during {stage}: {source}")]
    Persistence {
        document: String,
        stage: ImportStage,
        #[source]
        source: StoreError,
    },

    /// Representation record or file copy failed
    #[error("{document}: attaching the primary representation failed: {source}")]
    Attachment {
        document: String,
        #[source]
        source: AttachmentError,
    },

    /// The publication was added but a later step failed; nothing was rolled back
    #[error("publication {publication_id} persisted but {stage} did not complete: {source}")]
    Incomplete {
        publication_id: PublicationId,
        stage: ImportStage,
        source: Box<ImportError>,
    },
}

impl ImportError {
    /// Wrap an extraction failure with the document it came from
    pub fn extract(document: impl Into<String>, err: ExtractError) -> Self {
        let document = document.into();
        match err {
            ExtractError::MissingTitle => ImportError::MissingTitle { document },
            ExtractError::MissingPublicationDate => ImportError::MissingPublicationDate { document },
        }
    }

    /// Failure kind, looking through `Incomplete`
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::MissingTitle { .. } => ErrorKind::MissingTitle,
            ImportError::MissingPublicationDate { .. } => ErrorKind::MissingPublicationDate,
            ImportError::Persistence { .. } => ErrorKind::Persistence,
            ImportError::Attachment { .. } => ErrorKind::Attachment,
            ImportError::Incomplete { source, .. } => source.kind(),
        }
    }

    /// Stage the import stopped at
    pub fn stage(&self) -> ImportStage {
        match self {
            ImportError::MissingTitle { .. } | ImportError::MissingPublicationDate { .. } => {
                ImportStage::Extract
            }
            ImportError::Persistence { stage, .. } => *stage,
            ImportError::Attachment { .. } => ImportStage::Attach,
            ImportError::Incomplete { stage, .. } => *stage,
        }
    }

    /// Identifier of the document being imported
    pub fn document(&self) -> &str {
        match self {
            ImportError::MissingTitle { document }
            | ImportError::MissingPublicationDate { document }
            | ImportError::Persistence { document, .. }
            | ImportError::Attachment { document, .. } => document,
            ImportError::Incomplete { source, .. } => source.document(),
        }
    }

    /// Id of a publication left persisted by a failed import, if any
    pub fn persisted_publication(&self) -> Option<PublicationId> {
        match self {
            ImportError::Incomplete { publication_id, .. } => Some(*publication_id),
            _ => None,
        }
    }

    /// True when the repository holds a publication that needs remediation
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ImportError::Incomplete { .. })
    }
}

/// Failures of the extraction steps, before any document context is attached
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    #[error("article title missing")]
    MissingTitle,
    #[error("missing publication date")]
    MissingPublicationDate,
}

/// Errors from the publication repository and representation store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from the file store
#[derive(Error, Debug)]
pub enum FileStoreError {
    #[error("source file not found: {0}")]
    SourceMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(String),

    #[error("metadata error: {0}")]
    Metadata(String),
}

/// What went wrong while attaching the primary representation
#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("representation record: {0}")]
    Representation(#[source] StoreError),

    #[error("file copy: {0}")]
    FileCopy(#[from] FileStoreError),
}

/// Errors reading a document into a tree
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("XML parse error at byte {position}: {message}")]
    Xml { position: usize, message: String },

    #[error("document has no root element")]
    Empty,

    /// Element nesting deeper than [`MAX_DEPTH`](crate::document::MAX_DEPTH)
    #[error("element nesting exceeds {limit} levels at byte {position}")]
    TooDeep { position: usize, limit: usize },
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for FileStoreError {
    fn from(err: std::io::Error) -> Self {
        FileStoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FileStoreError {
    fn from(err: serde_json::Error) -> Self {
        FileStoreError::Metadata(err.to_string())
    }
}

impl From<std::io::Error> for DocumentError {
    fn from(err: std::io::Error) -> Self {
        DocumentError::Io(err.to_string())
    }
}
