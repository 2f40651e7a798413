//! Data models for the catalog

pub mod author;
pub mod book;
pub mod pagination;

// Re-export commonly used types
pub use author::{Author, AuthorWithCount};
pub use book::{AuthorName, BookWithAuthor};
pub use pagination::{AuthorPage, BookPage, Page, PageRequest};
