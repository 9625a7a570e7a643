//! Validation for publications

use super::Publication;
use serde::{Deserialize, Serialize};

/// Severity of a validation error
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// A validation error or warning
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub severity: ValidationSeverity,
}

impl ValidationError {
    fn error(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            severity: ValidationSeverity::Error,
        }
    }

    fn warning(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            severity: ValidationSeverity::Warning,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a publication and return errors/warnings
pub fn validate_publication(publication: &Publication) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Required fields
    if publication.locale.is_empty() {
        errors.push(ValidationError::error("locale", "Locale is required"));
    }

    if !publication.title.has_text() {
        errors.push(ValidationError::error("title", "Title is required"));
    }

    if publication.year_published().is_none() {
        errors.push(ValidationError::error(
            "date_published",
            "Publication date must be an RFC 3339 timestamp",
        ));
    }

    if publication.version == 0 {
        errors.push(ValidationError::error("version", "Version starts at 1"));
    }

    // Warnings for recommended fields
    if !publication.locale.is_empty() && publication.localized_title().is_none() {
        errors.push(ValidationError::warning(
            "title",
            "No title in the publication locale",
        ));
    }

    if publication.authors.is_empty() {
        errors.push(ValidationError::warning("authors", "Authors are recommended"));
    }

    // Identifier validation
    if let Some(doi) = publication.public_id("doi") {
        if !doi.starts_with("10.") {
            errors.push(ValidationError::warning("doi", "DOI should start with '10.'"));
        }
    }

    errors
}
