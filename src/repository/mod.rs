//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod soft_delete;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorWithCount, CreateAuthor, UpdateAuthor},
        book::{BookWithAuthor, CreateBook, UpdateBook},
        PageRequest,
    },
};
use soft_delete::Condition;

/// Per-table repositories over one connection pool
#[derive(Clone)]
pub struct Repository {
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool),
        }
    }
}

/// Outcome of a book update
#[derive(Debug, Clone, PartialEq)]
pub enum BookUpdate {
    Updated(BookWithAuthor),
    /// No live book has this id
    BookNotFound,
    /// The new author is missing or was deleted before the write
    AuthorNotFound,
}

/// Filter for the author list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorFilter {
    pub name_contains: Option<String>,
}

impl AuthorFilter {
    pub(crate) fn conditions(&self) -> Vec<Condition> {
        self.name_contains
            .iter()
            .map(|term| Condition::Contains("name", term.clone()))
            .collect()
    }
}

/// Filter for the book list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub title_contains: Option<String>,
    pub author_id: Option<Uuid>,
}

impl BookFilter {
    pub(crate) fn conditions(&self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(term) = &self.title_contains {
            conditions.push(Condition::Contains("title", term.clone()));
        }
        if let Some(author_id) = self.author_id {
            conditions.push(Condition::Equals("author_id", author_id));
        }
        conditions
    }
}

/// Author persistence. Every read sees live rows only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// One page of authors and the total number of matches
    async fn list(&self, filter: &AuthorFilter, page: PageRequest) -> AppResult<(Vec<AuthorWithCount>, i64)>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<AuthorWithCount>>;

    async fn exists(&self, id: Uuid) -> AppResult<bool>;

    async fn create(&self, data: &CreateAuthor) -> AppResult<Author>;

    /// `None` when no live author has this id
    async fn update(&self, id: Uuid, data: &UpdateAuthor) -> AppResult<Option<Author>>;

    /// Mark the author deleted, and their books too when `cascade` is set.
    /// Returns `false` when no live author has this id.
    async fn soft_delete(&self, id: Uuid, cascade: bool) -> AppResult<bool>;
}

/// Book persistence. Every read sees live rows only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// One page of books and the total number of matches
    async fn list(&self, filter: &BookFilter, page: PageRequest) -> AppResult<(Vec<BookWithAuthor>, i64)>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BookWithAuthor>>;

    /// `None` when the referenced author is missing or deleted at insert time
    async fn create(&self, data: &CreateBook) -> AppResult<Option<BookWithAuthor>>;

    /// Nothing is written unless the book is live and a supplied author is live
    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<BookUpdate>;

    /// Returns `false` when no live book has this id
    async fn soft_delete(&self, id: Uuid) -> AppResult<bool>;
}
