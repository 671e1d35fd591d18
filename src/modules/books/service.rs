//! Validated CRUD facade over the document store.

use std::sync::Arc;

use bookshelf_store::StoreError;

use super::models::{BookPatch, BookRecord, NewBookRecord};
use super::store::DocumentStore;

/// Service enforcing the single domain invariant, title required on create,
/// before delegating to the store. Every other operation is a pure
/// pass-through: results come back unmodified, absent results stay absent,
/// and store faults propagate to the caller untouched.
///
/// Stateless; the store reference is the only field, injected by the
/// constructor.
pub struct BookRecordService {
    store: Arc<dyn DocumentStore>,
}

impl BookRecordService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a record from a candidate.
    ///
    /// A candidate whose title is absent or the empty string yields
    /// `Ok(None)` without any store interaction. This is a soft failure by
    /// contract, not an error. Anything else, whitespace included, counts
    /// as a title and is persisted as given.
    pub async fn create(
        &self,
        candidate: NewBookRecord,
    ) -> Result<Option<BookRecord>, StoreError> {
        let has_title = candidate
            .title
            .as_deref()
            .is_some_and(|title| !title.is_empty());

        if !has_title {
            tracing::debug!("rejecting book candidate without a title");
            return Ok(None);
        }

        let record = self.store.create(candidate).await?;
        Ok(Some(record))
    }

    /// All records, order as given by the store
    pub async fn find_all(&self) -> Result<Vec<BookRecord>, StoreError> {
        self.store.find().await
    }

    /// Record under `id`, if any; the id format is not validated here
    pub async fn find_by_id(&self, id: &str) -> Result<Option<BookRecord>, StoreError> {
        self.store.find_by_id(id).await
    }

    /// Merge `patch` into the record under `id`
    pub async fn update_by_id(
        &self,
        id: &str,
        patch: BookPatch,
    ) -> Result<Option<BookRecord>, StoreError> {
        self.store.find_by_id_and_update(id, patch).await
    }

    /// Delete the record under `id`, returning it if it existed
    pub async fn delete_by_id(&self, id: &str) -> Result<Option<BookRecord>, StoreError> {
        self.store.find_by_id_and_delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::Category;
    use crate::modules::books::store::MemoryBookStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn mock_book() -> BookRecord {
        BookRecord {
            id: "60d6c7e9207bd130b8f8c3a6".to_string(),
            title: "Mock Book Title".to_string(),
            description: Some("This is a mock book for testing purposes.".to_string()),
            author: Some("Mock Author".to_string()),
            price: Some(19.99),
            category: Some(Category::Fantasy),
        }
    }

    /// Canned store recording how often each operation is invoked.
    struct MockStore {
        book: BookRecord,
        create_calls: AtomicUsize,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                book: mock_book(),
                create_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentStore for MockStore {
        async fn find(&self) -> Result<Vec<BookRecord>, StoreError> {
            Ok(vec![self.book.clone()])
        }

        async fn create(&self, _candidate: NewBookRecord) -> Result<BookRecord, StoreError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.book.clone())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<BookRecord>, StoreError> {
            Ok((id == self.book.id).then(|| self.book.clone()))
        }

        async fn find_by_id_and_update(
            &self,
            id: &str,
            patch: BookPatch,
        ) -> Result<Option<BookRecord>, StoreError> {
            Ok((id == self.book.id).then(|| {
                let mut updated = self.book.clone();
                updated.apply_patch(patch);
                updated
            }))
        }

        async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<BookRecord>, StoreError> {
            Ok((id == self.book.id).then(|| self.book.clone()))
        }
    }

    /// Store where every operation faults, for pass-through checks.
    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn find(&self) -> Result<Vec<BookRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn create(&self, _candidate: NewBookRecord) -> Result<BookRecord, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn find_by_id(&self, _id: &str) -> Result<Option<BookRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn find_by_id_and_update(
            &self,
            _id: &str,
            _patch: BookPatch,
        ) -> Result<Option<BookRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn find_by_id_and_delete(
            &self,
            _id: &str,
        ) -> Result<Option<BookRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn service_with_mock() -> (BookRecordService, Arc<MockStore>) {
        let store = Arc::new(MockStore::new());
        (BookRecordService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn create_returns_store_record_for_valid_candidate() {
        let (service, store) = service_with_mock();

        let result = service
            .create(NewBookRecord {
                title: Some("Mock Book Title".to_string()),
                description: Some("This is a mock book for testing purposes.".to_string()),
                author: Some("Mock Author".to_string()),
                price: Some(19.99),
                category: Some(Category::Fantasy),
            })
            .await
            .unwrap();

        assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(result, Some(mock_book()));
    }

    #[tokio::test]
    async fn create_skips_store_when_title_missing() {
        let (service, store) = service_with_mock();

        let result = service
            .create(NewBookRecord {
                title: None,
                description: Some("bonjour.".to_string()),
                author: Some("Mock Author".to_string()),
                price: Some(21.0),
                category: Some(Category::Fantasy),
            })
            .await
            .unwrap();

        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn create_skips_store_when_title_empty() {
        let (service, store) = service_with_mock();

        let result = service
            .create(NewBookRecord {
                title: Some(String::new()),
                ..NewBookRecord::default()
            })
            .await
            .unwrap();

        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn create_persists_whitespace_only_title() {
        // Only absence and the empty string invalidate a candidate; a
        // whitespace title is still a title and reaches the store.
        let (service, store) = service_with_mock();

        let result = service
            .create(NewBookRecord {
                title: Some("   ".to_string()),
                ..NewBookRecord::default()
            })
            .await
            .unwrap();

        assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(result, Some(mock_book()));
    }

    #[tokio::test]
    async fn find_all_passes_store_sequence_through() {
        let (service, _store) = service_with_mock();

        let books = service.find_all().await.unwrap();
        assert_eq!(books, vec![mock_book()]);
    }

    #[tokio::test]
    async fn find_by_id_passes_record_and_absence_through() {
        let (service, _store) = service_with_mock();

        let found = service.find_by_id(&mock_book().id).await.unwrap();
        assert_eq!(found, Some(mock_book()));

        let missing = service.find_by_id("no-such-id").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn update_by_id_returns_store_result_unchanged() {
        let (service, _store) = service_with_mock();

        let updated = service
            .update_by_id(
                &mock_book().id,
                BookPatch {
                    title: Some("Updated Title".to_string()),
                    ..BookPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Updated Title");
        assert_eq!(updated.author, mock_book().author);
    }

    #[tokio::test]
    async fn delete_by_id_returns_store_result_unchanged() {
        let (service, _store) = service_with_mock();

        let deleted = service.delete_by_id(&mock_book().id).await.unwrap();
        assert_eq!(deleted, Some(mock_book()));
    }

    #[tokio::test]
    async fn second_delete_of_same_id_is_absent() {
        // Exercised against the real in-memory store so the idempotence
        // comes from the store, not from the facade.
        let service = BookRecordService::new(Arc::new(MemoryBookStore::new()));

        let created = service
            .create(NewBookRecord {
                title: Some("Mock Book Title".to_string()),
                ..NewBookRecord::default()
            })
            .await
            .unwrap()
            .unwrap();

        let id = created.id.clone();
        let first = service.delete_by_id(&id).await.unwrap();
        assert_eq!(first, Some(created));

        let second = service.delete_by_id(&id).await.unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn store_faults_propagate_unchanged() {
        let service = BookRecordService::new(Arc::new(FailingStore));

        assert!(matches!(
            service.find_all().await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            service
                .create(NewBookRecord {
                    title: Some("Mock Book Title".to_string()),
                    ..NewBookRecord::default()
                })
                .await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            service.delete_by_id("any").await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
