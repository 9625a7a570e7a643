//! Publication domain model

use super::{Author, LocaleCode, LocalizedText, PublicIds};
use chrono::{DateTime, Datelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned to a publication by the repository
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicationId(pub i64);

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editorial status of a publication version
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Queued,
    Scheduled,
    Published,
    Declined,
}

impl PublicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Queued => "queued",
            PublicationStatus::Scheduled => "scheduled",
            PublicationStatus::Published => "published",
            PublicationStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublicationStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(PublicationStatus::Queued),
            "scheduled" => Ok(PublicationStatus::Scheduled),
            "published" => Ok(PublicationStatus::Published),
            "declined" => Ok(PublicationStatus::Declined),
            other => Err(ParseEnumError::PublicationStatus(other.to_string())),
        }
    }
}

/// Reader access policy for a publication
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessStatus {
    /// Follows the journal's default (subscription) policy
    Default,
    Open,
}

impl AccessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessStatus::Default => "default",
            AccessStatus::Open => "open",
        }
    }
}

impl FromStr for AccessStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(AccessStatus::Default),
            "open" => Ok(AccessStatus::Open),
            other => Err(ParseEnumError::AccessStatus(other.to_string())),
        }
    }
}

/// Unknown value when reading a stored enum back
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseEnumError {
    #[error("unknown publication status: {0}")]
    PublicationStatus(String),
    #[error("unknown access status: {0}")]
    AccessStatus(String),
}

/// A version of an article's metadata
///
/// Built as a draft by the importer (`id` is `None`) and given an id by the
/// repository when it is added.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: Option<PublicationId>,
    pub submission_id: i64,
    pub status: PublicationStatus,
    pub version: u32,
    pub seq: i64,
    pub access_status: AccessStatus,
    /// RFC 3339 timestamp with numeric offset
    pub date_published: String,
    pub section_id: i64,
    pub issue_id: i64,
    pub url_path: Option<String>,
    /// "first-last"
    pub pages: Option<String>,

    pub title: LocalizedText,
    pub subtitle: LocalizedText,
    pub abstract_text: LocalizedText,
    pub public_ids: PublicIds,

    pub copyright_holder: LocalizedText,
    pub copyright_notice: LocalizedText,
    pub copyright_year: Option<String>,
    pub license_url: Option<String>,

    /// Canonical locale of the publication
    pub locale: LocaleCode,
    /// ISO 639-1 code derived from `locale`
    pub language: String,

    pub authors: Vec<Author>,
}

impl Publication {
    /// Create a draft with the fixed fields of an imported article: published,
    /// version 1, ordered by submission id, open access and no custom URL path.
    pub fn new(submission_id: i64, section_id: i64, issue_id: i64, date_published: String) -> Self {
        Self {
            id: None,
            submission_id,
            status: PublicationStatus::Published,
            version: 1,
            seq: submission_id,
            access_status: AccessStatus::Open,
            date_published,
            section_id,
            issue_id,
            url_path: None,
            pages: None,
            title: LocalizedText::new(),
            subtitle: LocalizedText::new(),
            abstract_text: LocalizedText::new(),
            public_ids: PublicIds::new(),
            copyright_holder: LocalizedText::new(),
            copyright_notice: LocalizedText::new(),
            copyright_year: None,
            license_url: None,
            locale: LocaleCode::new(),
            language: String::new(),
            authors: Vec::new(),
        }
    }

    /// Set `pages` as "first-last" when both bounds are non-empty
    pub fn set_pages(&mut self, first: Option<&str>, last: Option<&str>) {
        let first = first.map(str::trim).filter(|s| !s.is_empty());
        let last = last.map(str::trim).filter(|s| !s.is_empty());
        self.pages = match (first, last) {
            (Some(first), Some(last)) => Some(format!("{}-{}", first, last)),
            _ => None,
        };
    }

    /// Set the canonical locale and the language derived from it
    pub fn set_locale(&mut self, locale: impl Into<LocaleCode>) {
        self.locale = locale.into();
        self.language = super::iso1_from_locale(&self.locale);
    }

    /// Title in the canonical locale
    pub fn localized_title(&self) -> Option<&str> {
        self.title.get(&self.locale)
    }

    /// Identifier by scheme
    pub fn public_id(&self, scheme: &str) -> Option<&str> {
        self.public_ids.get(scheme)
    }

    /// Identifiers as stored fields (`pub-id::doi` → value)
    pub fn public_id_fields(&self) -> Vec<(String, String)> {
        self.public_ids
            .namespaced()
            .map(|(k, v)| (k, v.to_string()))
            .collect()
    }

    /// Year of `date_published`, if it is a valid timestamp
    pub fn year_published(&self) -> Option<i32> {
        DateTime::parse_from_rfc3339(&self.date_published)
            .ok()
            .map(|d| d.year())
    }
}
