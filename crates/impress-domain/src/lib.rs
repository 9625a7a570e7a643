//! Domain types for importing scholarly articles into a journal
//!
//! This crate provides the records produced by the JATS importer:
//! - Publication: the versioned metadata record of an article
//! - Representation: the primary rendered artifact (the PDF galley)
//! - Author: contributors attached to a publication
//! - LocalizedText: locale-keyed text for titles, abstracts and names
//! - PublicIds: typed public identifiers (DOI, publisher id, ...)

pub mod author;
pub mod identifiers;
pub mod localized;
pub mod publication;
pub mod representation;
pub mod validation;

pub use author::*;
pub use identifiers::*;
pub use localized::*;
pub use publication::*;
pub use representation::*;
pub use validation::*;
