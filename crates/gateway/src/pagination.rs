//! Client-side pagination over an already fetched collection.

use serde::Serialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self { Self { page, per_page } }

    /// Clamp to sane defaults and return `(page_index, per_page)`
    pub fn normalize(self) -> (usize, usize) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as usize, per_page as usize)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of results plus the size of the whole collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    pub fn empty(p: Pagination) -> Self {
        let (idx, per) = p.normalize();
        Self { items: Vec::new(), total: 0, page: idx as u32 + 1, per_page: per as u32 }
    }

    pub fn from_items(items: Vec<T>, p: Pagination) -> Self {
        let (idx, per) = p.normalize();
        let total = items.len();
        let items = items.into_iter().skip(idx.saturating_mul(per)).take(per).collect();
        Self { items, total, page: idx as u32 + 1, per_page: per as u32 }
    }

    pub fn total_pages(&self) -> usize {
        if self.per_page == 0 { 0 } else { self.total.div_ceil(self.per_page as usize) }
    }
}
