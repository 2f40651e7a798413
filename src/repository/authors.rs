//! Authors repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{
    soft_delete::{self, not_deleted, Condition},
    AuthorFilter, AuthorStore,
};
use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorWithCount, CreateAuthor, UpdateAuthor},
        PageRequest,
    },
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Author columns plus the live book count, reading from `authors a`
    fn select_with_count() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new(format!(
            r#"
            SELECT a.id, a.name, a.created_at, a.updated_at,
                   (SELECT COUNT(*) FROM books b
                    WHERE b.author_id = a.id AND {}) AS books_count
            FROM authors a"#,
            not_deleted("b")
        ))
    }
}

#[async_trait]
impl AuthorStore for AuthorsRepository {
    async fn list(&self, filter: &AuthorFilter, page: PageRequest) -> AppResult<(Vec<AuthorWithCount>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM authors a");
        soft_delete::push_where(&mut count, "a", filter.conditions());
        let (total,): (i64,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut select = Self::select_with_count();
        soft_delete::push_where(&mut select, "a", filter.conditions());
        select
            .push(" ORDER BY a.created_at, a.id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let authors = select
            .build_query_as::<AuthorWithCount>()
            .fetch_all(&self.pool)
            .await?;

        Ok((authors, total))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<AuthorWithCount>> {
        let mut select = Self::select_with_count();
        soft_delete::push_where(&mut select, "a", [Condition::Equals("id", id)]);

        let author = select
            .build_query_as::<AuthorWithCount>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let mut select = QueryBuilder::<Postgres>::new("SELECT EXISTS (SELECT 1 FROM authors a");
        soft_delete::push_where(&mut select, "a", [Condition::Equals("id", id)]);
        select.push(")");

        let (exists,): (bool,) = select.build_query_as::<(bool,)>().fetch_one(&self.pool).await?;
        Ok(exists)
    }

    async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let now = Utc::now();
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    async fn update(&self, id: Uuid, data: &UpdateAuthor) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(&format!(
            r#"
            UPDATE authors a
            SET name = COALESCE($2, a.name), updated_at = $3
            WHERE a.id = $1 AND {}
            RETURNING a.id, a.name, a.created_at, a.updated_at
            "#,
            not_deleted("a")
        ))
        .bind(id)
        .bind(&data.name)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    async fn soft_delete(&self, id: Uuid, cascade: bool) -> AppResult<bool> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(&format!(
            "UPDATE authors a SET deleted = TRUE, deleted_at = $2 WHERE a.id = $1 AND {}",
            not_deleted("a")
        ))
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        if cascade {
            let books = sqlx::query(&format!(
                "UPDATE books b SET deleted = TRUE, deleted_at = $2 WHERE b.author_id = $1 AND {}",
                not_deleted("b")
            ))
            .bind(id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            tracing::debug!("Cascaded delete of author {} to {} book(s)", id, books.rows_affected());
        }

        tx.commit().await?;
        Ok(true)
    }
}
