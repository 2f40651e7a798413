//! Typed HTTP client for the catalog API
//!
//! Reads go through a [`QueryCache`] owned by the client; every successful
//! mutation invalidates the endpoints whose answers it may have changed.

pub mod cache;
pub mod pagination;
pub mod view;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::ErrorResponse,
    models::{
        author::{CreateAuthor, UpdateAuthor},
        book::{CreateBook, UpdateBook},
        Author, AuthorWithCount, BookWithAuthor, Page,
    },
};

pub use cache::{QueryCache, QueryKey};
pub use pagination::{page_items, Gap, PageItem, Pagination};
pub use view::{DetailView, ListView};

const AUTHORS: &str = "/author/";
const BOOKS: &str = "/book/";

/// Client-side errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status and an `{error}` body
    #[error("{status}: {error}")]
    Api { status: StatusCode, error: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Author list parameters as held by the list screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListParams {
    /// Page defaults to 1 and never goes below it; search defaults to empty
    pub fn normalized(&self) -> Self {
        Self {
            q: Some(self.q.clone().unwrap_or_default()),
            page: Some(self.page.unwrap_or(1).max(1)),
            limit: self.limit,
        }
    }

    fn key(&self, endpoint: &str) -> QueryKey {
        let params = self.normalized();
        let mut key = QueryKey::new(endpoint).param("page", params.page.unwrap_or(1));
        if let Some(q) = params.q.filter(|q| !q.is_empty()) {
            key = key.param("q", q);
        }
        if let Some(limit) = params.limit {
            key = key.param("limit", limit);
        }
        key
    }
}

/// Book list parameters: the author list ones plus an author filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookListParams {
    pub list: ListParams,
    pub author_id: Option<Uuid>,
}

impl BookListParams {
    pub fn normalized(&self) -> Self {
        Self {
            list: self.list.normalized(),
            author_id: self.author_id,
        }
    }

    fn key(&self) -> QueryKey {
        let key = self.list.key(BOOKS);
        match self.author_id {
            Some(author_id) => key.param("authorId", author_id),
            None => key,
        }
    }
}

/// Catalog API client
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    cache: QueryCache,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: QueryCache::new(),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Authors

    pub async fn list_authors(&self, params: &ListParams) -> ClientResult<Page<AuthorWithCount>> {
        self.read(params.key(AUTHORS), false).await
    }

    /// `None` when the author does not exist or was deleted
    pub async fn get_author(&self, id: Uuid) -> ClientResult<Option<AuthorWithCount>> {
        self.read(QueryKey::new(format!("{AUTHORS}{id}")), true).await
    }

    pub async fn create_author(&self, data: &CreateAuthor) -> ClientResult<Author> {
        let author = self
            .write(self.http.post(self.url(AUTHORS)).json(data))
            .await?;
        self.cache.invalidate(AUTHORS);
        Ok(author)
    }

    pub async fn update_author(&self, id: Uuid, data: &UpdateAuthor) -> ClientResult<Author> {
        let author = self
            .write(self.http.patch(self.url(&format!("{AUTHORS}{id}"))).json(data))
            .await?;
        self.invalidate_catalog();
        Ok(author)
    }

    pub async fn delete_author(&self, id: Uuid) -> ClientResult<()> {
        execute(self.http.delete(self.url(&format!("{AUTHORS}{id}")))).await?;
        self.invalidate_catalog();
        Ok(())
    }

    // Books

    pub async fn list_books(&self, params: &BookListParams) -> ClientResult<Page<BookWithAuthor>> {
        self.read(params.key(), false).await
    }

    /// `None` when the book does not exist or was deleted
    pub async fn get_book(&self, id: Uuid) -> ClientResult<Option<BookWithAuthor>> {
        self.read(QueryKey::new(format!("{BOOKS}{id}")), true).await
    }

    pub async fn create_book(&self, data: &CreateBook) -> ClientResult<BookWithAuthor> {
        let book = self.write(self.http.post(self.url(BOOKS)).json(data)).await?;
        self.invalidate_catalog();
        Ok(book)
    }

    pub async fn update_book(&self, id: Uuid, data: &UpdateBook) -> ClientResult<BookWithAuthor> {
        let book = self
            .write(self.http.patch(self.url(&format!("{BOOKS}{id}"))).json(data))
            .await?;
        self.invalidate_catalog();
        Ok(book)
    }

    pub async fn delete_book(&self, id: Uuid) -> ClientResult<()> {
        execute(self.http.delete(self.url(&format!("{BOOKS}{id}")))).await?;
        self.invalidate_catalog();
        Ok(())
    }

    /// Book changes move author book counts, author changes show up in books
    fn invalidate_catalog(&self) {
        self.cache.invalidate(AUTHORS);
        self.cache.invalidate(BOOKS);
    }

    /// Cached GET; with `missing_as_none` a 404 is cached as an absent value
    async fn read<T: DeserializeOwned>(&self, key: QueryKey, missing_as_none: bool) -> ClientResult<T> {
        let url = self.url(key.endpoint());
        let query: Vec<(String, String)> = key
            .params()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let value = self
            .cache
            .get_or_fetch(key, || async move {
                match execute(self.http.get(url).query(&query)).await {
                    Ok(response) => json_body(response).await,
                    Err(e) if missing_as_none && e.is_not_found() => Ok(Value::Null),
                    Err(e) => Err(e),
                }
            })
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    async fn write<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = execute(request).await?;
        Ok(serde_json::from_value(json_body(response).await?)?)
    }
}

/// Send the request, turning non-success answers into [`ClientError::Api`]
async fn execute(request: RequestBuilder) -> ClientResult<Response> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await?;
    let error = serde_json::from_slice::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
    tracing::debug!("API answered {}: {}", status, error);
    Err(ClientError::Api { status, error })
}

async fn json_body(response: Response) -> ClientResult<Value> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
