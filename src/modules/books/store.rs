//! Document store seam for the books module.

use async_trait::async_trait;

use bookshelf_store::{MemoryCollection, StoreError};

use super::models::{BookPatch, BookRecord, NewBookRecord};

/// The persistence boundary for book records.
///
/// Implementations own durability and identifier assignment. Absent results
/// (`Ok(None)`) are domain outcomes; `Err` is reserved for store-level
/// faults, which callers propagate unchanged.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List every record, order as given by the store
    async fn find(&self) -> Result<Vec<BookRecord>, StoreError>;

    /// Insert a candidate, assigning it a fresh identifier
    async fn create(&self, candidate: NewBookRecord) -> Result<BookRecord, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<BookRecord>, StoreError>;

    /// Merge a patch into the record under `id`, returning the updated record
    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: BookPatch,
    ) -> Result<Option<BookRecord>, StoreError>;

    /// Remove the record under `id`, returning it if it existed
    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<BookRecord>, StoreError>;
}

/// In-memory store backing the application by default.
///
/// Does not validate candidates; shape invariants are the service's job.
pub struct MemoryBookStore {
    books: MemoryCollection<BookRecord>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self {
            books: MemoryCollection::new(),
        }
    }
}

impl Default for MemoryBookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryBookStore {
    async fn find(&self) -> Result<Vec<BookRecord>, StoreError> {
        Ok(self.books.list().await)
    }

    async fn create(&self, candidate: NewBookRecord) -> Result<BookRecord, StoreError> {
        let record = self
            .books
            .insert_with(|id| BookRecord {
                id,
                title: candidate.title.unwrap_or_default(),
                description: candidate.description,
                author: candidate.author,
                price: candidate.price,
                category: candidate.category,
            })
            .await;

        tracing::debug!(id = %record.id, "book record created");
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BookRecord>, StoreError> {
        Ok(self.books.get(id).await)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: BookPatch,
    ) -> Result<Option<BookRecord>, StoreError> {
        Ok(self
            .books
            .update_with(id, |record| record.apply_patch(patch))
            .await)
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<BookRecord>, StoreError> {
        Ok(self.books.remove(id).await)
    }
}
