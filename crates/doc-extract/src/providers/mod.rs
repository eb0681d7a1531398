//! Provider abstractions for document storage
//!
//! The service talks to storage only through [`DocumentStoreProvider`], so
//! the filesystem store can be swapped for another backend.

pub mod document_store;
pub mod local;

pub use document_store::DocumentStoreProvider;
pub use local::LocalDocumentStore;
