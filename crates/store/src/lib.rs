//! Document store backend for bookshelf.
//!
//! Provides the store-level fault type shared across store implementations
//! and an in-memory keyed collection used by the default store. The
//! collection assigns opaque string identifiers and makes no ordering
//! guarantee when listing documents.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::{Timestamp, Uuid};

/// Fault raised by a document store operation.
///
/// These are infrastructure failures, not domain outcomes: a lookup that
/// matches nothing is `Ok(None)` at the call site, never an error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed document: {0}")]
    Malformed(String),
}

/// In-memory keyed document collection.
///
/// Documents are held under store-assigned string identifiers behind an
/// async read/write lock, so every operation suspends rather than blocking.
pub struct MemoryCollection<T> {
    documents: RwLock<HashMap<String, T>>,
}

impl<T: Clone + Send + Sync> MemoryCollection<T> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Generate a fresh opaque identifier (time-ordered UUID)
    pub fn next_id() -> String {
        let timestamp = Timestamp::now(uuid::NoContext);
        Uuid::new_v7(timestamp).to_string()
    }

    /// List all documents, order unspecified
    pub async fn list(&self) -> Vec<T> {
        self.documents.read().await.values().cloned().collect()
    }

    /// Insert a new document built from a freshly assigned identifier
    pub async fn insert_with(&self, make: impl FnOnce(String) -> T) -> T {
        let id = Self::next_id();
        let document = make(id.clone());
        self.documents
            .write()
            .await
            .insert(id, document.clone());
        document
    }

    /// Fetch a document by identifier
    pub async fn get(&self, id: &str) -> Option<T> {
        self.documents.read().await.get(id).cloned()
    }

    /// Apply an in-place mutation to the document under `id`, returning the
    /// updated document, or `None` if no document matched
    pub async fn update_with(&self, id: &str, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut documents = self.documents.write().await;
        let document = documents.get_mut(id)?;
        apply(document);
        Some(document.clone())
    }

    /// Remove the document under `id`, returning it if it existed
    pub async fn remove(&self, id: &str) -> Option<T> {
        self.documents.write().await.remove(id)
    }

    /// Number of documents currently held
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

impl<T: Clone + Send + Sync> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}
