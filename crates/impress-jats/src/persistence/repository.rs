//! SQLite-backed publication repository

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use impress_domain::{
    FileId, Publication, PublicationId, Representation, RepresentationId,
};
use rusqlite::{params, Connection, OptionalExtension};

use super::schema::{Schema, SCHEMA_VERSION};
use crate::error::StoreError;
use crate::store::{PublicationRepository, RepresentationStore};

const PUBLICATION_COLUMNS: &str = "id, submission_id, status, version, seq, access_status, \
     date_published, section_id, issue_id, url_path, pages, title, subtitle, abstract, \
     public_ids, copyright_holder, copyright_notice, copyright_year, license_url, locale, \
     language, authors";

const REPRESENTATION_COLUMNS: &str = "id, publication_id, name, seq, label, locale, file_id";

/// SQLite-backed implementation of the publication and representation stores
pub struct SqlitePublicationRepository {
    conn: Mutex<Connection>,
}

impl SqlitePublicationRepository {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Create an in-memory repository (for testing)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|e| StoreError::Storage(e.to_string()))
    }

    /// Number of stored publications
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM publications", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// True once [`PublicationRepository::publish`] succeeded for the publication
    pub fn is_published(&self, id: PublicationId) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let published_at: Option<Option<String>> = conn
            .query_row(
                "SELECT published_at FROM publications WHERE id = ?1",
                [id.0],
                |row| row.get(0),
            )
            .optional()?;
        match published_at {
            Some(published_at) => Ok(published_at.is_some()),
            None => Err(StoreError::NotFound(format!("publication {}", id))),
        }
    }
}

fn initialize(conn: &Connection) -> Result<(), StoreError> {
    let current_version = schema_version(conn).unwrap_or(0);

    if current_version == 0 {
        conn.execute_batch(Schema::create_tables())?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        for version in current_version..SCHEMA_VERSION {
            if let Some(migration) = Schema::migration(version, version + 1) {
                conn.execute_batch(migration)?;
            }
        }
        set_schema_version(conn, SCHEMA_VERSION)?;
    }

    Ok(())
}

fn schema_version(conn: &Connection) -> Option<u32> {
    conn.query_row(
        "SELECT version FROM schema_version ORDER BY applied_at DESC LIMIT 1",
        [],
        |row| row.get(0),
    )
    .ok()
}

fn set_schema_version(conn: &Connection, version: u32) -> Result<(), StoreError> {
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// A publication row before its JSON columns are decoded
struct PublicationRow {
    id: i64,
    submission_id: i64,
    status: String,
    version: u32,
    seq: i64,
    access_status: String,
    date_published: String,
    section_id: i64,
    issue_id: i64,
    url_path: Option<String>,
    pages: Option<String>,
    title: String,
    subtitle: String,
    abstract_text: String,
    public_ids: String,
    copyright_holder: String,
    copyright_notice: String,
    copyright_year: Option<String>,
    license_url: Option<String>,
    locale: String,
    language: String,
    authors: String,
}

impl PublicationRow {
    fn read(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            submission_id: row.get(1)?,
            status: row.get(2)?,
            version: row.get(3)?,
            seq: row.get(4)?,
            access_status: row.get(5)?,
            date_published: row.get(6)?,
            section_id: row.get(7)?,
            issue_id: row.get(8)?,
            url_path: row.get(9)?,
            pages: row.get(10)?,
            title: row.get(11)?,
            subtitle: row.get(12)?,
            abstract_text: row.get(13)?,
            public_ids: row.get(14)?,
            copyright_holder: row.get(15)?,
            copyright_notice: row.get(16)?,
            copyright_year: row.get(17)?,
            license_url: row.get(18)?,
            locale: row.get(19)?,
            language: row.get(20)?,
            authors: row.get(21)?,
        })
    }

    fn into_publication(self) -> Result<Publication, StoreError> {
        let parse_enum = |e: impress_domain::ParseEnumError| StoreError::Serialization(e.to_string());
        Ok(Publication {
            id: Some(PublicationId(self.id)),
            submission_id: self.submission_id,
            status: self.status.parse().map_err(parse_enum)?,
            version: self.version,
            seq: self.seq,
            access_status: self.access_status.parse().map_err(parse_enum)?,
            date_published: self.date_published,
            section_id: self.section_id,
            issue_id: self.issue_id,
            url_path: self.url_path,
            pages: self.pages,
            title: serde_json::from_str(&self.title)?,
            subtitle: serde_json::from_str(&self.subtitle)?,
            abstract_text: serde_json::from_str(&self.abstract_text)?,
            public_ids: serde_json::from_str(&self.public_ids)?,
            copyright_holder: serde_json::from_str(&self.copyright_holder)?,
            copyright_notice: serde_json::from_str(&self.copyright_notice)?,
            copyright_year: self.copyright_year,
            license_url: self.license_url,
            locale: self.locale,
            language: self.language,
            authors: serde_json::from_str(&self.authors)?,
        })
    }
}

fn row_to_representation(row: &rusqlite::Row) -> rusqlite::Result<(Representation, String)> {
    let name: String = row.get(2)?;
    let file_id: Option<String> = row.get(6)?;
    let representation = Representation {
        id: Some(RepresentationId(row.get(0)?)),
        publication_id: PublicationId(row.get(1)?),
        name: Default::default(),
        seq: row.get(3)?,
        label: row.get(4)?,
        locale: row.get(5)?,
        file_id: file_id.map(FileId),
    };
    Ok((representation, name))
}

impl PublicationRepository for SqlitePublicationRepository {
    fn add(&self, publication: &Publication) -> Result<PublicationId, StoreError> {
        if publication.id.is_some() {
            return Err(StoreError::Validation(
                "publication already has an id".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO publications
            (submission_id, status, version, seq, access_status, date_published, section_id,
             issue_id, url_path, pages, title, subtitle, abstract, public_ids, copyright_holder,
             copyright_notice, copyright_year, license_url, locale, language, authors, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)
            "#,
            params![
                publication.submission_id,
                publication.status.as_str(),
                publication.version,
                publication.seq,
                publication.access_status.as_str(),
                publication.date_published,
                publication.section_id,
                publication.issue_id,
                publication.url_path,
                publication.pages,
                serde_json::to_string(&publication.title)?,
                serde_json::to_string(&publication.subtitle)?,
                serde_json::to_string(&publication.abstract_text)?,
                serde_json::to_string(&publication.public_ids)?,
                serde_json::to_string(&publication.copyright_holder)?,
                serde_json::to_string(&publication.copyright_notice)?,
                publication.copyright_year,
                publication.license_url,
                publication.locale,
                publication.language,
                serde_json::to_string(&publication.authors)?,
                Utc::now().to_rfc3339(),
            ],
        )?;

        let id = PublicationId(conn.last_insert_rowid());
        tracing::debug!(publication = %id, submission = publication.submission_id, "inserted publication");
        Ok(id)
    }

    fn publish(&self, publication: &Publication) -> Result<(), StoreError> {
        let id = publication
            .id
            .ok_or_else(|| StoreError::Validation("publication has not been added".to_string()))?;

        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE publications SET status = ?1, published_at = ?2 WHERE id = ?3",
            params![publication.status.as_str(), Utc::now().to_rfc3339(), id.0],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("publication {}", id)));
        }
        Ok(())
    }

    fn get(&self, id: PublicationId) -> Result<Option<Publication>, StoreError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM publications WHERE id = ?1", PUBLICATION_COLUMNS),
                [id.0],
                PublicationRow::read,
            )
            .optional()?;
        row.map(PublicationRow::into_publication).transpose()
    }
}

impl RepresentationStore for SqlitePublicationRepository {
    fn insert_representation(
        &self,
        representation: &Representation,
    ) -> Result<RepresentationId, StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO representations (publication_id, name, seq, label, locale, file_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                representation.publication_id.0,
                serde_json::to_string(&representation.name)?,
                representation.seq,
                representation.label,
                representation.locale,
                representation.file_id.as_ref().map(|f| f.0.as_str()),
            ],
        )?;
        Ok(RepresentationId(conn.last_insert_rowid()))
    }

    fn update_representation(&self, representation: &Representation) -> Result<(), StoreError> {
        let id = representation
            .id
            .ok_or_else(|| StoreError::Validation("representation has not been inserted".to_string()))?;

        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE representations SET name = ?1, seq = ?2, label = ?3, locale = ?4, file_id = ?5 \
             WHERE id = ?6",
            params![
                serde_json::to_string(&representation.name)?,
                representation.seq,
                representation.label,
                representation.locale,
                representation.file_id.as_ref().map(|f| f.0.as_str()),
                id.0,
            ],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(format!("representation {}", id)));
        }
        Ok(())
    }

    fn representations_for(
        &self,
        publication_id: PublicationId,
    ) -> Result<Vec<Representation>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM representations WHERE publication_id = ?1 ORDER BY seq, id",
            REPRESENTATION_COLUMNS
        ))?;
        let rows = stmt
            .query_map([publication_id.0], row_to_representation)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(mut representation, name)| {
                representation.name = serde_json::from_str(&name)?;
                Ok(representation)
            })
            .collect()
    }
}
