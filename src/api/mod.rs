//! API handlers for the catalog REST endpoints

pub mod authors;
pub mod books;
pub mod extract;
pub mod health;
pub mod openapi;

use axum::{
    http::{request::Parts, HeaderValue, Uri},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::CorsConfig, AppState};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let catalog = Router::new()
        .route("/health", get(health::health_check))
        // Authors
        .route("/author", get(authors::list_authors).post(authors::create_author))
        .route("/author/", get(authors::list_authors).post(authors::create_author))
        .route(
            "/author/:id",
            get(authors::get_author)
                .patch(authors::update_author)
                .delete(authors::delete_author),
        )
        // Books
        .route("/book", get(books::list_books).post(books::create_book))
        .route("/book/", get(books::list_books).post(books::create_book))
        .route(
            "/book/:id",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state);

    Router::new()
        .merge(catalog)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Browsers may call the API from the configured hosts with any method
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed = config.allowed_hosts.clone();
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| {
            origin_host(origin).is_some_and(|host| allowed.iter().any(|h| h == &host))
        }))
}

fn origin_host(origin: &HeaderValue) -> Option<String> {
    let uri: Uri = origin.to_str().ok()?.parse().ok()?;
    uri.host().map(str::to_string)
}
