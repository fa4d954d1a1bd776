//! Page-number controls shared by every paginated list.

use serde::{Deserialize, Serialize};

/// Page counts up to this are listed in full.
pub const COLLAPSE_THRESHOLD: u32 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageItem {
    Page(u32),
    StartEllipsis,
    EndEllipsis,
}

impl PageItem {
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Page(n) => Some(*n),
            _ => None,
        }
    }
}

/// Page-number sequence for a control showing `current_page` of `total_pages`.
///
/// Out-of-range `current_page` is clamped rather than rejected.
pub fn render_page_list(total_pages: u32, current_page: u32) -> Vec<PageItem> {
    if total_pages <= COLLAPSE_THRESHOLD {
        return (1..=total_pages).map(PageItem::Page).collect();
    }
    let current = current_page.clamp(1, total_pages);
    let mut items: Vec<PageItem> = (1..=3).map(PageItem::Page).collect();
    if current > 5 {
        items.push(PageItem::StartEllipsis);
    }
    let mid_start = current.saturating_sub(1).max(4);
    let mid_end = current.saturating_add(1).min(total_pages - 3);
    if mid_start <= mid_end {
        items.extend((mid_start..=mid_end).map(PageItem::Page));
    }
    if current < total_pages - 4 {
        items.push(PageItem::EndEllipsis);
    }
    items.extend([total_pages - 1, total_pages].map(PageItem::Page));
    items
}

pub fn previous_page(current_page: u32) -> u32 { current_page.saturating_sub(1).max(1) }

pub fn next_page(current_page: u32, total_pages: u32) -> u32 { current_page.saturating_add(1).min(total_pages).max(1) }

pub fn has_previous(current_page: u32) -> bool { current_page > 1 }

pub fn has_next(current_page: u32, total_pages: u32) -> bool { current_page < total_pages }

/// Pagination derived from the last listing response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub pages: u32,
    pub current_page: u32,
}

impl PaginationMeta {
    /// Keeps `current_page` within `1..=pages` when there are pages.
    pub fn new(total: u64, pages: u32, current_page: u32) -> Self {
        let current_page = if pages > 0 { current_page.clamp(1, pages) } else { current_page.max(1) };
        Self { total, pages, current_page }
    }

    pub fn has_more(&self) -> bool { self.current_page < self.pages }
    pub fn items(&self) -> Vec<PageItem> { render_page_list(self.pages, self.current_page) }
    pub fn previous(&self) -> u32 { previous_page(self.current_page) }
    pub fn next(&self) -> u32 { next_page(self.current_page, self.pages) }
}
