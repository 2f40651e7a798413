//! Business logic services

pub mod authors;
pub mod books;

use std::sync::Arc;

use crate::{
    config::CatalogConfig,
    repository::{AuthorStore, BookStore, Repository},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
}

impl Services {
    /// Create all services backed by the Postgres repository
    pub fn new(repository: Repository, catalog: CatalogConfig) -> Self {
        Self::with_stores(Arc::new(repository.authors), Arc::new(repository.books), catalog)
    }

    /// Create all services over arbitrary stores
    pub fn with_stores(authors: Arc<dyn AuthorStore>, books: Arc<dyn BookStore>, catalog: CatalogConfig) -> Self {
        Self {
            authors: authors::AuthorsService::new(authors.clone(), catalog.clone()),
            books: books::BooksService::new(books, authors, catalog),
        }
    }
}
