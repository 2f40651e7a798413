//! Book catalog service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        book::{BookQuery, BookWithAuthor, CreateBook, UpdateBook},
        Page, PageRequest,
    },
    repository::{AuthorStore, BookFilter, BookStore, BookUpdate},
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
    authors: Arc<dyn AuthorStore>,
    catalog: CatalogConfig,
}

fn not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

fn author_not_found() -> AppError {
    AppError::Validation("Author not found".to_string())
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>, authors: Arc<dyn AuthorStore>, catalog: CatalogConfig) -> Self {
        Self {
            store,
            authors,
            catalog,
        }
    }

    /// List books matching the query, one page at a time
    pub async fn list(&self, query: &BookQuery) -> AppResult<Page<BookWithAuthor>> {
        let page = PageRequest::new(query.page, query.limit, self.catalog.default_limit);
        let filter = BookFilter {
            title_contains: query.q.clone().filter(|q| !q.is_empty()),
            author_id: query.author_id,
        };

        let (books, count) = self.store.list(&filter, page).await?;
        Ok(Page::new(books, count, page))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookWithAuthor> {
        self.store.get_by_id(id).await?.ok_or_else(not_found)
    }

    /// Create a book for a live author
    pub async fn create(&self, data: &CreateBook) -> AppResult<BookWithAuthor> {
        if !self.authors.exists(data.author_id).await? {
            return Err(author_not_found());
        }

        let book = self.store.create(data).await?.ok_or_else(author_not_found)?;
        tracing::info!("Created book {} for author {}", book.id, book.author_id);
        Ok(book)
    }

    /// Partially update a book; a new author must be live
    pub async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<BookWithAuthor> {
        if let Some(author_id) = data.author_id {
            if !self.authors.exists(author_id).await? {
                return Err(author_not_found());
            }
        }

        match self.store.update(id, data).await? {
            BookUpdate::Updated(book) => Ok(book),
            BookUpdate::BookNotFound => Err(not_found()),
            BookUpdate::AuthorNotFound => Err(author_not_found()),
        }
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.store.soft_delete(id).await? {
            return Err(not_found());
        }
        tracing::info!("Deleted book {}", id);
        Ok(())
    }
}
