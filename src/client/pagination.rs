//! Pagination window shown under a list view.
//!
//! Rendering is a pure function of `(total_pages, current_page)`; the current
//! page lives with the caller, which is told about navigation through the
//! `on_page_change` callback.

use std::fmt;

/// Which side of the window an ellipsis stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    Start,
    End,
}

/// One renderable element of the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Goes to `target`; `disabled` on the first page
    Previous { target: i64, disabled: bool },
    Page { number: i64, active: bool },
    /// Visual gap marker, not clickable
    Ellipsis(Gap),
    /// Goes to `target`; `disabled` on the last page
    Next { target: i64, disabled: bool },
}

impl PageItem {
    /// Page requested when the item is clicked
    pub fn target(&self) -> Option<i64> {
        match *self {
            PageItem::Previous { target, .. } | PageItem::Next { target, .. } => Some(target),
            PageItem::Page { number, .. } => Some(number),
            PageItem::Ellipsis(_) => None,
        }
    }

    /// Disabled controls stay clickable; this is a styling hint only
    pub fn is_disabled(&self) -> bool {
        matches!(
            self,
            PageItem::Previous { disabled: true, .. } | PageItem::Next { disabled: true, .. }
        )
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PageItem::Page { active: true, .. })
    }

    /// Label announced by screen readers
    pub fn aria_label(&self) -> String {
        match self {
            PageItem::Previous { .. } => "Go to previous page".to_string(),
            PageItem::Next { .. } => "Go to next page".to_string(),
            PageItem::Page { number, .. } => format!("Page {number}"),
            PageItem::Ellipsis(_) => "More pages".to_string(),
        }
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Previous { .. } => f.write_str("Previous"),
            PageItem::Next { .. } => f.write_str("Next"),
            PageItem::Page { number, .. } => write!(f, "{number}"),
            PageItem::Ellipsis(_) => f.write_str("…"),
        }
    }
}

/// Page links and ellipses around `current_page`, without Previous/Next.
/// Empty when there are no pages.
pub fn page_items(total_pages: i64, current_page: i64) -> Vec<PageItem> {
    if total_pages <= 0 {
        return Vec::new();
    }
    let current = current_page.max(1);
    let mut items = vec![PageItem::Page {
        number: 1,
        active: current == 1,
    }];

    if current > 3 {
        items.push(PageItem::Ellipsis(Gap::Start));
    }

    for number in (current - 1).max(2)..=current.saturating_add(1).min(total_pages - 1) {
        items.push(PageItem::Page {
            number,
            active: number == current,
        });
    }

    if current < total_pages - 2 {
        items.push(PageItem::Ellipsis(Gap::End));
    }

    if total_pages > 1 {
        items.push(PageItem::Page {
            number: total_pages,
            active: current == total_pages,
        });
    }

    items
}

/// A pagination bar bound to the caller's page-change handler
pub struct Pagination<F> {
    total_pages: i64,
    current_page: i64,
    on_page_change: F,
}

impl<F> Pagination<F>
where
    F: FnMut(i64),
{
    pub fn new(total_pages: i64, current_page: i64, on_page_change: F) -> Self {
        Self {
            total_pages,
            current_page: current_page.max(1),
            on_page_change,
        }
    }

    /// Full bar: Previous, the page window, Next. Nothing at all without pages.
    pub fn render(&self) -> Vec<PageItem> {
        let pages = page_items(self.total_pages, self.current_page);
        if pages.is_empty() {
            return pages;
        }

        let current = self.current_page;
        let mut items = Vec::with_capacity(pages.len() + 2);
        items.push(PageItem::Previous {
            target: current - 1,
            disabled: current == 1,
        });
        items.extend(pages);
        items.push(PageItem::Next {
            target: current.saturating_add(1),
            disabled: current == self.total_pages,
        });
        items
    }

    /// Dispatch a click on `item` to the page-change handler
    pub fn click(&mut self, item: &PageItem) {
        if let Some(page) = item.target() {
            (self.on_page_change)(page);
        }
    }
}
