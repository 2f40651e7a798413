//! Books repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{
    soft_delete::{self, not_deleted, Condition},
    BookFilter, BookStore, BookUpdate,
};
use crate::{
    error::AppResult,
    models::{
        book::{BookWithAuthor, CreateBook, UpdateBook},
        PageRequest,
    },
};

/// Book columns joined with the author name, reading from `books b`.
/// The author join is not scoped: a book stays readable while it is live.
const SELECT_BOOK: &str = r#"
    SELECT b.id, b.title, b.author_id, b.created_at, b.updated_at, a.name
    FROM books b
    JOIN authors a ON a.id = b.author_id"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn is_live(&self, id: Uuid) -> AppResult<bool> {
        let mut select = QueryBuilder::<Postgres>::new("SELECT EXISTS (SELECT 1 FROM books b");
        soft_delete::push_where(&mut select, "b", [Condition::Equals("id", id)]);
        select.push(")");

        let (live,): (bool,) = select.build_query_as::<(bool,)>().fetch_one(&self.pool).await?;
        Ok(live)
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self, filter: &BookFilter, page: PageRequest) -> AppResult<(Vec<BookWithAuthor>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books b");
        soft_delete::push_where(&mut count, "b", filter.conditions());
        let (total,): (i64,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(SELECT_BOOK);
        soft_delete::push_where(&mut select, "b", filter.conditions());
        select
            .push(" ORDER BY b.created_at, b.id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let books = select
            .build_query_as::<BookWithAuthor>()
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BookWithAuthor>> {
        let mut select = QueryBuilder::<Postgres>::new(SELECT_BOOK);
        soft_delete::push_where(&mut select, "b", [Condition::Equals("id", id)]);

        let book = select
            .build_query_as::<BookWithAuthor>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, data: &CreateBook) -> AppResult<Option<BookWithAuthor>> {
        // The author may be deleted between the service check and this insert,
        // so the insert itself only selects a live author.
        let book = sqlx::query_as::<_, BookWithAuthor>(&format!(
            r#"
            WITH inserted AS (
                INSERT INTO books (id, title, author_id, created_at, updated_at)
                SELECT $1, $2, a.id, $3, $3
                FROM authors a
                WHERE a.id = $4 AND {}
                RETURNING id, title, author_id, created_at, updated_at
            )
            SELECT i.id, i.title, i.author_id, i.created_at, i.updated_at, a.name
            FROM inserted i
            JOIN authors a ON a.id = i.author_id
            "#,
            not_deleted("a")
        ))
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(Utc::now())
        .bind(data.author_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<BookUpdate> {
        // A new author is checked inside the write so a concurrent author
        // delete cannot leave a live book pointing at a deleted author.
        let book = sqlx::query_as::<_, BookWithAuthor>(&format!(
            r#"
            WITH updated AS (
                UPDATE books b
                SET title = COALESCE($2, b.title),
                    author_id = COALESCE($3, b.author_id),
                    updated_at = $4
                WHERE b.id = $1 AND {}
                  AND ($3::uuid IS NULL OR EXISTS (
                      SELECT 1 FROM authors a WHERE a.id = $3 AND {}))
                RETURNING b.id, b.title, b.author_id, b.created_at, b.updated_at
            )
            SELECT u.id, u.title, u.author_id, u.created_at, u.updated_at, a.name
            FROM updated u
            JOIN authors a ON a.id = u.author_id
            "#,
            not_deleted("b"),
            not_deleted("a")
        ))
        .bind(id)
        .bind(&data.title)
        .bind(data.author_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(book) = book {
            return Ok(BookUpdate::Updated(book));
        }
        if data.author_id.is_none() || !self.is_live(id).await? {
            return Ok(BookUpdate::BookNotFound);
        }
        Ok(BookUpdate::AuthorNotFound)
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(&format!(
            "UPDATE books b SET deleted = TRUE, deleted_at = $2 WHERE b.id = $1 AND {}",
            not_deleted("b")
        ))
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
