//! Book Club Library
//!
//! A catalog of authors and books: a REST JSON API over Postgres with
//! soft-delete aware paginated listing, plus a typed client with a request
//! cache and the pagination-window renderer used by the browser UI.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
