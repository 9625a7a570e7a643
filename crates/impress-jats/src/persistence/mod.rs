//! SQLite persistence for imported publications
//!
//! Provides a [`SqlitePublicationRepository`] implementing both
//! [`PublicationRepository`](crate::store::PublicationRepository) and
//! [`RepresentationStore`](crate::store::RepresentationStore).

mod repository;
mod schema;

pub use repository::SqlitePublicationRepository;
pub use schema::{Schema, SCHEMA_VERSION};
