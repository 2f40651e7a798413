//! Book endpoints

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use super::extract::{ValidJson, ValidPath, ValidQuery};
use crate::{
    error::{AppResult, ErrorResponse},
    models::{
        book::{BookQuery, BookWithAuthor, CreateBook, UpdateBook},
        BookPage,
    },
    AppState,
};

/// Gets all the available books
#[utoipa::path(
    get,
    path = "/book/",
    tag = "Book",
    params(BookQuery),
    responses(
        (status = 200, description = "One page of books", body = BookPage),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<BookQuery>,
) -> AppResult<Json<BookPage>> {
    let page = state.services.books.list(&query).await?;
    Ok(Json(page))
}

/// Gets a book by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "Book",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookWithAuthor),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<BookWithAuthor>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Creates a new book
#[utoipa::path(
    post,
    path = "/book/",
    tag = "Book",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookWithAuthor),
        (status = 400, description = "Invalid input or author not found", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidJson(data): ValidJson<CreateBook>,
) -> AppResult<(StatusCode, Json<BookWithAuthor>)> {
    let book = state.services.books.create(&data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Partially updates a book by ID
#[utoipa::path(
    patch,
    path = "/book/{id}",
    tag = "Book",
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookWithAuthor),
        (status = 400, description = "Invalid input or author not found", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(data): ValidJson<UpdateBook>,
) -> AppResult<Json<BookWithAuthor>> {
    let book = state.services.books.update(id, &data).await?;
    Ok(Json(book))
}

/// Deletes a book by ID
#[utoipa::path(
    delete,
    path = "/book/{id}",
    tag = "Book",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
