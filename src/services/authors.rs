//! Author catalog service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorQuery, AuthorWithCount, CreateAuthor, UpdateAuthor},
        Page, PageRequest,
    },
    repository::{AuthorFilter, AuthorStore},
};

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn AuthorStore>,
    catalog: CatalogConfig,
}

fn not_found() -> AppError {
    AppError::NotFound("Author not found".to_string())
}

impl AuthorsService {
    pub fn new(store: Arc<dyn AuthorStore>, catalog: CatalogConfig) -> Self {
        Self { store, catalog }
    }

    /// List authors matching the query, one page at a time
    pub async fn list(&self, query: &AuthorQuery) -> AppResult<Page<AuthorWithCount>> {
        let page = PageRequest::new(query.page, query.limit, self.catalog.default_limit);
        let filter = AuthorFilter {
            name_contains: query.q.clone().filter(|q| !q.is_empty()),
        };

        let (authors, count) = self.store.list(&filter, page).await?;
        Ok(Page::new(authors, count, page))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<AuthorWithCount> {
        self.store.get_by_id(id).await?.ok_or_else(not_found)
    }

    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let author = self.store.create(data).await?;
        tracing::info!("Created author {} ({})", author.id, author.name);
        Ok(author)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateAuthor) -> AppResult<Author> {
        self.store.update(id, data).await?.ok_or_else(not_found)
    }

    /// Soft-delete an author; their books follow when cascading is enabled
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let cascade = self.catalog.cascade_author_delete;
        if !self.store.soft_delete(id, cascade).await? {
            return Err(not_found());
        }
        tracing::info!("Deleted author {} (cascade: {})", id, cascade);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockAuthorStore;
    use chrono::Utc;
    use mockall::predicate::{always, eq};

    fn author(name: &str, books_count: i64) -> AuthorWithCount {
        AuthorWithCount {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            books_count,
        }
    }

    fn service(store: MockAuthorStore) -> AuthorsService {
        AuthorsService::new(Arc::new(store), CatalogConfig::default())
    }

    #[tokio::test]
    async fn list_applies_defaults_and_builds_envelope() {
        let mut store = MockAuthorStore::new();
        store
            .expect_list()
            .with(
                eq(AuthorFilter::default()),
                eq(PageRequest { page: 1, limit: 50 }),
            )
            .times(1)
            .returning(|_, _| Ok((vec![author("Ursula K. Le Guin", 3)], 51)));

        let page = service(store).list(&AuthorQuery::default()).await.unwrap();
        assert_eq!(page.result.len(), 1);
        assert_eq!(page.count, 51);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next_page);
        assert!(!page.has_prev_page);
    }

    #[tokio::test]
    async fn empty_search_term_means_no_filter() {
        let mut store = MockAuthorStore::new();
        store
            .expect_list()
            .with(eq(AuthorFilter::default()), always())
            .returning(|_, _| Ok((Vec::new(), 0)));

        let query = AuthorQuery {
            q: Some(String::new()),
            ..Default::default()
        };
        let page = service(store).list(&query).await.unwrap();
        assert_eq!(page.total_pages, 0);
        assert!(page.result.is_empty());
    }

    #[tokio::test]
    async fn search_term_and_paging_reach_the_store() {
        let mut store = MockAuthorStore::new();
        store
            .expect_list()
            .with(
                eq(AuthorFilter {
                    name_contains: Some("tolk".to_string()),
                }),
                eq(PageRequest { page: 2, limit: 10 }),
            )
            .returning(|_, _| Ok((Vec::new(), 12)));

        let query = AuthorQuery {
            q: Some("tolk".to_string()),
            page: Some(2),
            limit: Some(10),
        };
        let page = service(store).list(&query).await.unwrap();
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next_page);
        assert!(page.has_prev_page);
    }

    #[tokio::test]
    async fn missing_author_is_not_found() {
        let mut store = MockAuthorStore::new();
        store.expect_get_by_id().returning(|_| Ok(None));

        let err = service(store).get_by_id(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Author not found"));
    }

    #[tokio::test]
    async fn update_of_missing_author_is_not_found() {
        let mut store = MockAuthorStore::new();
        store.expect_update().returning(|_, _| Ok(None));

        let data = UpdateAuthor {
            name: Some("Renamed".to_string()),
        };
        let err = service(store).update(Uuid::new_v4(), &data).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_passes_cascade_setting_and_reports_repeat_as_not_found() {
        let id = Uuid::new_v4();
        let mut store = MockAuthorStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_soft_delete()
            .with(eq(id), eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(true));
        store
            .expect_soft_delete()
            .with(eq(id), eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(false));

        let service = service(store);
        service.delete(id).await.unwrap();
        let err = service.delete(id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn cascade_can_be_disabled() {
        let mut store = MockAuthorStore::new();
        store
            .expect_soft_delete()
            .with(always(), eq(false))
            .times(1)
            .returning(|_, _| Ok(true));

        let catalog = CatalogConfig {
            cascade_author_delete: false,
            ..CatalogConfig::default()
        };
        let service = AuthorsService::new(Arc::new(store), catalog);
        service.delete(Uuid::new_v4()).await.unwrap();
    }
}
