//! Page bookkeeping shared by list and sub-list controllers.
//!
//! The API counts pages from 0, the UI from 1. [`ui_to_api`] and
//! [`api_to_ui`] are the only places that translate between the two.

use crate::api::models::Page;
use crate::core::services::types::{Notice, ServiceError};

/// Convert a 1-based page number from a page control to the API's 0-based index.
pub fn ui_to_api(ui_page: u32) -> Result<u32, ServiceError> {
    ui_page.checked_sub(1).ok_or_else(|| ServiceError::Validation {
        field: "page".to_string(),
        message: "Page numbers start at 1".to_string(),
    })
}

/// Convert the API's 0-based page index to the number shown in the UI.
pub fn api_to_ui(api_page: u32) -> u32 {
    api_page.saturating_add(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 0-based index of the page whose items are held.
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            current: 0,
            page_size,
            total: 0,
        }
    }

    /// 1-based page number for display.
    pub fn display_page(&self) -> u32 {
        api_to_ui(self.current)
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }

    /// 1-based (first, last) row numbers of the current page; `None` when empty.
    pub fn row_range(&self, rows_on_page: usize) -> Option<(u64, u64)> {
        if rows_on_page == 0 {
            return None;
        }
        let first = u64::from(self.current) * u64::from(self.page_size) + 1;
        Some((first, first + rows_on_page as u64 - 1))
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response became the displayed state.
    Applied,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
    /// The request failed; previous items are kept.
    Failed,
    /// The entity does not exist; the view renders its empty state.
    NotFound,
}

/// Items, loading flag and pagination of one paged list, guarded by a
/// monotonic request generation.
#[derive(Debug, Clone)]
pub struct PagedState<T> {
    items: Vec<T>,
    loading: bool,
    pagination: Pagination,
    generation: u64,
    /// 0-based page asked for by the newest request.
    requested_page: u32,
}

impl<T> PagedState<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            pagination: Pagination::new(page_size),
            generation: 0,
            requested_page: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn page_size(&self) -> u32 {
        self.pagination.page_size
    }

    /// Mark a request for `page` (0-based) in flight and return its generation.
    pub fn begin(&mut self, page: u32) -> u64 {
        self.generation += 1;
        self.requested_page = page;
        self.loading = true;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Apply a response issued under `generation`.
    ///
    /// The page shown is the one that was requested; the envelope's
    /// `currentPage` is only checked against it. Returns the notice to
    /// surface when the request failed.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<Page<T>, ServiceError>,
        label: &str,
    ) -> (FetchOutcome, Option<Notice>) {
        if !self.is_current(generation) {
            log::debug!(
                "Discarding stale {} response (generation {} < {})",
                label,
                generation,
                self.generation
            );
            return (FetchOutcome::Stale, None);
        }

        self.loading = false;
        match result {
            Ok(page) => {
                if page.current_page != self.requested_page {
                    log::warn!(
                        "{} response reports page {} for requested page {}",
                        label,
                        page.current_page,
                        self.requested_page
                    );
                }
                self.items = page.items;
                self.pagination.current = self.requested_page;
                self.pagination.total = page.total_items;
                (FetchOutcome::Applied, None)
            }
            Err(e) => {
                log::error!("Failed to load {}: {}", label, e);
                let notice = Notice::error(format!("Failed to load {}: {}", label, e.notice_text()));
                (FetchOutcome::Failed, Some(notice))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: Vec<u32>, current_page: u32, total_items: u64) -> Page<u32> {
        Page {
            items,
            current_page,
            total_pages: 0,
            total_items,
        }
    }

    #[test]
    fn test_ui_api_round_trip() {
        for ui in 1..=50u32 {
            let api = ui_to_api(ui).unwrap();
            assert_eq!(api, ui - 1);
            assert_eq!(api_to_ui(api), ui);
        }
    }

    #[test]
    fn test_ui_page_zero_is_rejected() {
        assert!(matches!(
            ui_to_api(0),
            Err(ServiceError::Validation { field, .. }) if field == "page"
        ));
    }

    #[test]
    fn test_pagination_math() {
        let mut p = Pagination::new(10);
        assert_eq!(p.display_page(), 1);
        assert_eq!(p.total_pages(), 0);
        p.total = 21;
        p.current = 2;
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.display_page(), 3);
        assert_eq!(p.row_range(1), Some((21, 21)));
        assert_eq!(p.row_range(0), None);
        assert_eq!(Pagination::new(0).total_pages(), 0);
    }

    #[test]
    fn test_complete_applies_current_generation() {
        let mut state = PagedState::new(10);
        let generation = state.begin(3);
        assert!(state.is_loading());

        let (outcome, notice) = state.complete(generation, Ok(page(vec![1, 2], 3, 32)), "doctors");
        assert_eq!(outcome, FetchOutcome::Applied);
        assert!(notice.is_none());
        assert!(!state.is_loading());
        assert_eq!(state.items(), &[1, 2]);
        assert_eq!(state.pagination().current, 3);
        assert_eq!(state.pagination().total, 32);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = PagedState::new(10);
        let first = state.begin(0);
        let second = state.begin(1);

        let (outcome, _) = state.complete(second, Ok(page(vec![20], 1, 11)), "doctors");
        assert_eq!(outcome, FetchOutcome::Applied);

        let (outcome, notice) = state.complete(first, Ok(page(vec![10], 0, 11)), "doctors");
        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(notice.is_none());
        assert_eq!(state.items(), &[20]);
        assert_eq!(state.pagination().current, 1);
    }

    #[test]
    fn test_stale_response_keeps_newer_request_loading() {
        let mut state: PagedState<u32> = PagedState::new(10);
        let first = state.begin(0);
        let _second = state.begin(0);
        let (outcome, _) = state.complete(first, Ok(page(vec![1], 0, 1)), "hospitals");
        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(state.is_loading());
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_items() {
        let mut state = PagedState::new(10);
        let generation = state.begin(0);
        state.complete(generation, Ok(page(vec![7], 0, 1)), "hospitals");

        let generation = state.begin(1);
        let err = ServiceError::Validation {
            field: "page".to_string(),
            message: "bad".to_string(),
        };
        let (outcome, notice) = state.complete(generation, Err(err), "hospitals");
        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(notice.unwrap().message.starts_with("Failed to load hospitals"));
        assert_eq!(state.items(), &[7]);
        assert!(!state.is_loading());
        assert_eq!(state.pagination().current, 0);
    }

    #[test]
    fn test_requested_page_wins_over_envelope() {
        let mut state = PagedState::new(10);
        let generation = state.begin(2);
        // Envelope without `currentPage` deserializes it as 0.
        let (outcome, _) = state.complete(generation, Ok(page(vec![5], 0, 40)), "doctors");
        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(state.pagination().current, 2);
        assert_eq!(state.pagination().display_page(), 3);
    }
}
