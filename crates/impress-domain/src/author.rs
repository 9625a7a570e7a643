//! Author representation

use serde::{Deserialize, Serialize};

/// A contributor to a publication
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub id: String,
    pub given_name: Option<String>,
    pub family_name: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub orcid: Option<String>,
    pub affiliation: Option<String>,
    /// Position in the author list, starting at 0
    pub seq: u32,
    pub primary_contact: bool,
}

impl Author {
    /// Create a new author with just a family name
    pub fn new(family_name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            given_name: None,
            family_name,
            suffix: None,
            email: None,
            orcid: None,
            affiliation: None,
            seq: 0,
            primary_contact: false,
        }
    }

    /// Builder method to add given name
    pub fn with_given_name(mut self, given: impl Into<String>) -> Self {
        self.given_name = Some(given.into());
        self
    }

    /// Builder method to add suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Builder method to add ORCID
    pub fn with_orcid(mut self, orcid: impl Into<String>) -> Self {
        self.orcid = Some(orcid.into());
        self
    }

    /// Builder method to add email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Format as "Given Family" for display
    pub fn display_name(&self) -> String {
        let mut name = match &self.given_name {
            Some(given) => format!("{} {}", given, self.family_name),
            None => self.family_name.clone(),
        };
        if let Some(suffix) = &self.suffix {
            name.push_str(", ");
            name.push_str(suffix);
        }
        name
    }
}
