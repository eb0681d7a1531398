//! Document store provider trait for raw bytes and their records

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::{DocumentRecord, DocumentStatus, StoredDocument};

/// Trait for document storage
///
/// Implementations:
/// - `LocalDocumentStore`: Local filesystem
#[async_trait]
pub trait DocumentStoreProvider: Send + Sync {
    /// Store a freshly uploaded document with status `uploaded`
    ///
    /// Returns the storage path of the raw bytes
    async fn store_document(
        &self,
        doc_id: &Uuid,
        filename: &str,
        mime: &str,
        data: &[u8],
    ) -> Result<String>;

    /// Retrieve document bytes and the metadata extraction needs.
    /// Fails with `DocumentNotFound` when no such document exists.
    async fn fetch_document(&self, doc_id: &Uuid) -> Result<StoredDocument>;

    /// Record the result of an extraction
    async fn persist_result(
        &self,
        doc_id: &Uuid,
        text: Option<&str>,
        status: DocumentStatus,
    ) -> Result<()>;

    /// Get the stored record of a document
    async fn get_record(&self, doc_id: &Uuid) -> Result<DocumentRecord>;

    /// Check if the provider is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
