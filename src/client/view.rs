//! What a list or detail screen shows for a given fetch state

use crate::models::Page;

/// State of a paginated list screen
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    Loading,
    /// Nothing matched; the screen shows its empty placeholder
    Empty,
    Ready {
        items: Vec<T>,
        summary: String,
        total_pages: i64,
        page: i64,
    },
}

impl<T> ListView<T> {
    /// Build the view for `page` once the fetch has settled
    pub fn from_page(envelope: Option<Page<T>>, page: i64) -> Self {
        let Some(envelope) = envelope else {
            return ListView::Loading;
        };
        if envelope.result.is_empty() {
            return ListView::Empty;
        }

        let page = page.max(1);
        ListView::Ready {
            summary: summary(envelope.count, page, envelope.total_pages),
            items: envelope.result,
            total_pages: envelope.total_pages,
            page,
        }
    }
}

/// "Showing N results. Page P out of T", where T is never below 1
pub fn summary(count: i64, page: i64, total_pages: i64) -> String {
    format!(
        "Showing {count} results. Page {page} out of {}",
        total_pages.max(1)
    )
}

/// State of a single-entity screen
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<T> {
    Loading,
    NotFound,
    Ready(T),
}

impl<T> DetailView<T> {
    /// `fetched` is `None` while loading, `Some(None)` when the id is unknown
    pub fn from_fetch(fetched: Option<Option<T>>) -> Self {
        match fetched {
            None => DetailView::Loading,
            Some(None) => DetailView::NotFound,
            Some(Some(value)) => DetailView::Ready(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorWithCount, PageRequest};
    use chrono::Utc;
    use uuid::Uuid;

    fn author(name: &str) -> AuthorWithCount {
        AuthorWithCount {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            books_count: 0,
        }
    }

    #[test]
    fn list_states() {
        assert_eq!(ListView::<AuthorWithCount>::from_page(None, 1), ListView::Loading);

        let empty = Page::<AuthorWithCount>::new(vec![], 0, PageRequest { page: 1, limit: 10 });
        assert_eq!(ListView::from_page(Some(empty), 1), ListView::Empty);

        let rows = vec![author("A"), author("B")];
        let page = Page::new(rows.clone(), 12, PageRequest { page: 2, limit: 2 });
        match ListView::from_page(Some(page), 2) {
            ListView::Ready {
                items,
                summary,
                total_pages,
                page,
            } => {
                assert_eq!(items, rows);
                assert_eq!(summary, "Showing 12 results. Page 2 out of 6");
                assert_eq!(total_pages, 6);
                assert_eq!(page, 2);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn summary_never_says_out_of_zero() {
        assert_eq!(summary(0, 1, 0), "Showing 0 results. Page 1 out of 1");
    }

    #[test]
    fn detail_states() {
        assert_eq!(DetailView::<u8>::from_fetch(None), DetailView::Loading);
        assert_eq!(DetailView::<u8>::from_fetch(Some(None)), DetailView::NotFound);
        assert_eq!(DetailView::from_fetch(Some(Some(7u8))), DetailView::Ready(7));
    }
}
