//! Soft-delete scoping for every catalog read.
//!
//! Rows are never removed; deletion sets `deleted = TRUE` and `deleted_at`.
//! Reads go through [`push_where`], which always emits the live-row predicate
//! for the scanned table before any caller condition, so no read can forget it.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

/// Caller-supplied filter, composed with the live-row predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Case-insensitive substring match on a text column
    Contains(&'static str, String),
    /// Exact match on a uuid column
    Equals(&'static str, Uuid),
}

/// Predicate selecting rows of `alias` that are not soft-deleted
pub fn not_deleted(alias: &str) -> String {
    format!("{alias}.deleted = FALSE")
}

/// Append ` WHERE <live predicate> [AND <condition>]*` for table `alias`.
pub fn push_where<'args, I>(builder: &mut QueryBuilder<'args, Postgres>, alias: &str, conditions: I)
where
    I: IntoIterator<Item = Condition>,
{
    builder.push(" WHERE ").push(not_deleted(alias));

    for condition in conditions {
        builder.push(" AND ");
        match condition {
            Condition::Contains(column, term) => {
                builder
                    .push(format!("{alias}.{column} ILIKE "))
                    .push_bind(format!("%{}%", escape_like(&term)));
            }
            Condition::Equals(column, value) => {
                builder.push(format!("{alias}.{column} = ")).push_bind(value);
            }
        }
    }
}

/// Escape LIKE metacharacters so the search term matches literally
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
