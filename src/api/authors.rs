//! Author endpoints

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use super::extract::{ValidJson, ValidPath, ValidQuery};
use crate::{
    error::{AppResult, ErrorResponse},
    models::{
        author::{Author, AuthorQuery, AuthorWithCount, CreateAuthor, UpdateAuthor},
        AuthorPage,
    },
    AppState,
};

/// Gets all the available authors
#[utoipa::path(
    get,
    path = "/author/",
    tag = "Author",
    params(AuthorQuery),
    responses(
        (status = 200, description = "One page of authors", body = AuthorPage),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<AuthorQuery>,
) -> AppResult<Json<AuthorPage>> {
    let page = state.services.authors.list(&query).await?;
    Ok(Json(page))
}

/// Gets an author by ID
#[utoipa::path(
    get,
    path = "/author/{id}",
    tag = "Author",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorWithCount),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<AuthorWithCount>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(author))
}

/// Creates a new author
#[utoipa::path(
    post,
    path = "/author/",
    tag = "Author",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    ValidJson(data): ValidJson<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let author = state.services.authors.create(&data).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// Partially updates an author by ID
#[utoipa::path(
    patch,
    path = "/author/{id}",
    tag = "Author",
    params(("id" = Uuid, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(data): ValidJson<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.update(id, &data).await?;
    Ok(Json(author))
}

/// Deletes an author by ID
#[utoipa::path(
    delete,
    path = "/author/{id}",
    tag = "Author",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found", body = ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<StatusCode> {
    state.services.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
