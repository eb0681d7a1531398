//! Application state for the extraction server

use std::sync::Arc;

use crate::config::ExtractConfig;
use crate::error::Result;
use crate::extraction::DocumentExtractor;
use crate::providers::{DocumentStoreProvider, LocalDocumentStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: ExtractConfig,
    /// Raw bytes and document records
    document_store: Arc<dyn DocumentStoreProvider>,
    /// Format dispatcher, shared with blocking extraction tasks
    extractor: Arc<DocumentExtractor>,
}

impl AppState {
    /// Create new application state backed by the local filesystem store
    pub fn new(config: ExtractConfig) -> Result<Self> {
        tracing::info!(
            "Initializing extraction state (data dir: {}, PDF backend: {:?})",
            config.storage.data_dir.display(),
            config.pdf.backend
        );
        let store = LocalDocumentStore::new(config.storage.data_dir.clone())?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Create state around an explicit document store
    pub fn with_store(config: ExtractConfig, document_store: Arc<dyn DocumentStoreProvider>) -> Self {
        let extractor = Arc::new(DocumentExtractor::new(&config.pdf));
        tracing::info!(
            "Document store: {}, PDF backend: {}",
            document_store.name(),
            extractor.pdf_backend()
        );
        Self {
            inner: Arc::new(AppStateInner {
                config,
                document_store,
                extractor,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &ExtractConfig {
        &self.inner.config
    }

    /// Get document store
    pub fn document_store(&self) -> &Arc<dyn DocumentStoreProvider> {
        &self.inner.document_store
    }

    /// Get extractor
    pub fn extractor(&self) -> Arc<DocumentExtractor> {
        Arc::clone(&self.inner.extractor)
    }
}
