//! Local document store using the filesystem
//!
//! Layout under the data directory:
//! - `raw/{millis}-{safe_name}`: uploaded bytes
//! - `{id}.json`: the [`DocumentRecord`]

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{DocumentRecord, DocumentStatus, StoredDocument};

use super::document_store::DocumentStoreProvider;

const RAW_DIR: &str = "raw";
const MAX_NAME_LEN: usize = 180;

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]+").expect("Invalid regex"));

/// Filename reduced to `[A-Za-z0-9_.-]`, other runs replaced with `-`
pub fn safe_name(filename: &str) -> String {
    UNSAFE_CHARS
        .replace_all(filename, "-")
        .chars()
        .take(MAX_NAME_LEN)
        .collect()
}

/// Local document store using filesystem
pub struct LocalDocumentStore {
    /// Root directory for raw bytes and records
    data_dir: PathBuf,
}

impl LocalDocumentStore {
    /// Create a new local document store
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(data_dir.join(RAW_DIR))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get record path for a document
    fn record_path(&self, doc_id: &Uuid) -> PathBuf {
        self.data_dir.join(format!("{}.json", doc_id))
    }

    async fn write_record(&self, record: &DocumentRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::write(self.record_path(&record.id), json)
            .await
            .map_err(|e| Error::storage(format!("Failed to write record {}: {}", record.id, e)))
    }
}

#[async_trait]
impl DocumentStoreProvider for LocalDocumentStore {
    async fn store_document(
        &self,
        doc_id: &Uuid,
        filename: &str,
        mime: &str,
        data: &[u8],
    ) -> Result<String> {
        let storage_path = format!(
            "{}/{}-{}",
            RAW_DIR,
            Utc::now().timestamp_millis(),
            safe_name(filename)
        );

        tokio::fs::write(self.data_dir.join(&storage_path), data)
            .await
            .map_err(|e| Error::storage(format!("Failed to store {}: {}", storage_path, e)))?;

        let record = DocumentRecord::uploaded(
            *doc_id,
            filename.to_string(),
            mime.to_string(),
            data.len() as u64,
            storage_path.clone(),
        );
        self.write_record(&record).await?;

        tracing::debug!("Stored {} ({} bytes) at {}", doc_id, data.len(), storage_path);
        Ok(storage_path)
    }

    async fn fetch_document(&self, doc_id: &Uuid) -> Result<StoredDocument> {
        let record = self.get_record(doc_id).await?;
        let data = tokio::fs::read(self.data_dir.join(&record.storage_path))
            .await
            .map_err(|e| {
                Error::storage(format!(
                    "Storage download failed for {} ({}): {}",
                    doc_id, record.storage_path, e
                ))
            })?;

        Ok(StoredDocument {
            id: record.id,
            filename: record.filename,
            mime: record.mime,
            data,
        })
    }

    async fn persist_result(
        &self,
        doc_id: &Uuid,
        text: Option<&str>,
        status: DocumentStatus,
    ) -> Result<()> {
        let mut record = self.get_record(doc_id).await?;
        record.apply_result(text, status);
        self.write_record(&record).await
    }

    async fn get_record(&self, doc_id: &Uuid) -> Result<DocumentRecord> {
        let content = match tokio::fs::read_to_string(self.record_path(doc_id)).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::DocumentNotFound(doc_id.to_string()))
            }
            Err(e) => {
                return Err(Error::storage(format!("Failed to read record {}: {}", doc_id, e)))
            }
        };
        serde_json::from_str(&content)
            .map_err(|e| Error::storage(format!("Corrupt record {}: {}", doc_id, e)))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.data_dir.join(RAW_DIR).is_dir())
    }

    fn name(&self) -> &str {
        "local-filesystem"
    }
}
