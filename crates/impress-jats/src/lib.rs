//! Impress JATS - Import JATS article front matter as published publications
//!
//! This crate turns one parsed JATS article into a persisted, published
//! publication with its PDF attached:
//!
//! - **Document**: quick-xml backed element tree with path selection
//! - **Locale**: `xml:lang` tag → locale code resolution
//! - **Title**: titles, subtitles and the canonical locale
//! - **Abstracts**: abstracts with inline markup reduced to a small whitelist
//! - **Identifiers**: `article-id` values keyed by lowercase type
//! - **Date**: publication date with online-first preference and issue fallback
//! - **Builder**: assembles a draft [`Publication`](impress_domain::Publication)
//! - **Committer**: add, attach the PDF representation, publish
//! - **Persistence**: SQLite repository (`sqlite` feature) and filesystem file store
//! - **Config**: TOML configuration for locales and file attribution
//!
//! # Import flow
//!
//! ```text
//! JatsDocument → PublicationBuilder → Publication → PublicationCommitter
//!                  (extract fields)                   add → attach → publish
//! ```
//!
//! A failure after the add step leaves the publication stored and is reported
//! as [`ImportError::Incomplete`].

pub mod abstracts;
pub mod builder;
pub mod committer;
pub mod config;
pub mod context;
pub mod contributors;
pub mod date;
pub mod document;
pub mod error;
pub mod extractor;
pub mod file_store;
pub mod identifiers;
pub mod importer;
pub mod locale;
pub mod markup;
#[cfg(feature = "sqlite")]
pub mod persistence;
pub mod store;
pub mod title;

pub use builder::PublicationBuilder;
pub use committer::{CommitSettings, Committed, PublicationCommitter};
pub use config::{ConfigError, ImportConfig};
pub use context::{ImportContext, Issue, SourceFile, Submission};
pub use contributors::{ContributorPopulator, JatsContributors, NoContributors};
pub use document::{Element, JatsDocument};
pub use error::{
    AttachmentError, DocumentError, ErrorKind, ExtractError, FileStoreError, ImportError,
    ImportStage, Result, StoreError,
};
pub use extractor::{ArticleExtractor, PublicationExtractor};
pub use file_store::{FsFileStore, StoredFile};
pub use importer::ArticleImporter;
pub use locale::{LocaleResolver, LocaleTable};
pub use store::{
    AssociationType, FileCopyRequest, FileStage, FileStore, PublicationRepository,
    RepresentationStore,
};
pub use title::ResolvedTitles;

#[cfg(feature = "sqlite")]
pub use persistence::{Schema, SqlitePublicationRepository};
