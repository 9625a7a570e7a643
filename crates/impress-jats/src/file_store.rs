//! Filesystem-backed file store
//!
//! Files are copied to `<root>/<context>/<submission>/<stage>/<file id>.<ext>`
//! and each copy is described by a JSON record in `<root>/metadata/`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use impress_domain::FileId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ImportConfig;
use crate::error::FileStoreError;
use crate::store::{FileCopyRequest, FileStore};

const METADATA_DIR: &str = "metadata";

/// What the store knows about one copied file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub file_id: FileId,
    pub original_name: String,
    pub path: PathBuf,
    pub stage: String,
    pub uploader_id: i64,
    pub genre_id: i64,
    pub association_type: String,
    pub association_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FsFileStore {
    root: PathBuf,
}

impl FsFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at `storage_root`, if one is configured
    pub fn from_config(config: &ImportConfig) -> Option<Self> {
        config.storage_root.as_ref().map(Self::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up the record of a stored file
    pub fn stored_file(&self, file_id: &FileId) -> Result<Option<StoredFile>, FileStoreError> {
        let path = self.metadata_path(file_id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn metadata_path(&self, file_id: &FileId) -> PathBuf {
        self.root
            .join(METADATA_DIR)
            .join(format!("{}.json", file_id.0))
    }
}

impl FileStore for FsFileStore {
    fn copy(&self, request: &FileCopyRequest<'_>) -> Result<FileId, FileStoreError> {
        let source = request.source_path;
        if !source.is_file() {
            return Err(FileStoreError::SourceMissing(source.to_path_buf()));
        }

        let file_id = FileId(Uuid::new_v4().to_string());
        let dir = self
            .root
            .join(request.context_id.to_string())
            .join(request.submission_id.to_string())
            .join(request.stage.as_str());
        fs::create_dir_all(&dir)?;

        let stored_name = match source.extension() {
            Some(ext) => format!("{}.{}", file_id.0, ext.to_string_lossy()),
            None => file_id.0.clone(),
        };
        let path = dir.join(stored_name);
        fs::copy(source, &path)?;

        let record = StoredFile {
            file_id: file_id.clone(),
            original_name: source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path,
            stage: request.stage.to_string(),
            uploader_id: request.uploader_id,
            genre_id: request.genre_id,
            association_type: request.association_type.as_str().to_string(),
            association_id: request.association_id,
            created_at: Utc::now(),
        };
        let metadata_path = self.metadata_path(&file_id);
        if let Some(parent) = metadata_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&metadata_path, serde_json::to_string_pretty(&record)?)?;

        tracing::debug!(
            file = %file_id,
            source = %source.display(),
            stored = %record.path.display(),
            "copied file into storage"
        );

        Ok(file_id)
    }
}
