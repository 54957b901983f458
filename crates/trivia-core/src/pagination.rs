//! Fixed-size pagination over the ordered question list.

/// Number of questions on one page of `GET /questions`.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-based page number together with the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page:     u64,
  per_page: usize,
}

impl PageRequest {
  /// Page `page` of [`QUESTIONS_PER_PAGE`] items. Returns `None` for pages
  /// below 1, which can never hold any items.
  pub fn new(page: i64) -> Option<Self> {
    let page = u64::try_from(page).ok().filter(|p| *p >= 1)?;
    Some(Self { page, per_page: QUESTIONS_PER_PAGE })
  }

  pub fn first() -> Self {
    Self { page: 1, per_page: QUESTIONS_PER_PAGE }
  }

  pub fn limit(&self) -> usize { self.per_page }

  /// Index of the first item on this page. Saturates for absurd page numbers,
  /// which then simply land past the end of the data.
  pub fn offset(&self) -> u64 {
    (self.page - 1).saturating_mul(self.per_page as u64)
  }
}

/// One page of results plus the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
  pub items: Vec<T>,
  /// Total number of items across all pages, not the length of `items`.
  pub total: usize,
}

impl<T> Page<T> {
  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}
