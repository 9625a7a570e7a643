//! Representation (galley) domain model

use super::{LocaleCode, LocalizedText, PublicationId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label given to the primary rendering of an imported article
pub const PDF_LABEL: &str = "PDF";

/// Identifier assigned to a representation by its store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepresentationId(pub i64);

impl fmt::Display for RepresentationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a file in permanent storage
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub String);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rendered artifact of a publication, linked to a stored file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Representation {
    pub id: Option<RepresentationId>,
    pub publication_id: PublicationId,
    pub name: LocalizedText,
    pub seq: u32,
    pub label: String,
    pub locale: LocaleCode,
    pub file_id: Option<FileId>,
}

impl Representation {
    /// The primary PDF galley of a publication, named after its source file
    pub fn primary_pdf(
        publication_id: PublicationId,
        locale: impl Into<LocaleCode>,
        filename: impl Into<String>,
    ) -> Self {
        let locale = locale.into();
        Self {
            id: None,
            publication_id,
            name: LocalizedText::single(locale.clone(), filename),
            seq: 1,
            label: PDF_LABEL.to_string(),
            locale,
            file_id: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.file_id.is_some()
    }
}
