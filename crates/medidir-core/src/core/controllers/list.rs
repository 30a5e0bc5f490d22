//! Filterable, paged list controller shared by the Doctors, Hospitals and
//! Institutes pages.
//!
//! A fetch can be driven in one step with [`ListController::load_page`], or
//! split into [`ListController::begin_fetch`] and
//! [`ListController::complete`] when several requests may overlap. Every
//! request carries a generation and only the newest one may touch the
//! displayed state.

use crate::api::filters::Filters;
use crate::api::models::Page;
use crate::core::controllers::pagination::{
    FetchOutcome, PagedState, Pagination, api_to_ui, ui_to_api,
};
use crate::core::services::reference_service::FilterOptions;
use crate::core::services::traits::{OptionsSource, PageFetcher};
use crate::core::services::types::{LoadState, Notice, ServiceError};
use std::sync::Arc;

/// A page fetch captured at issue time.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest<F> {
    pub generation: u64,
    /// 0-based.
    pub page: u32,
    pub size: u32,
    pub filters: F,
}

pub struct ListController<T, F: Filters> {
    label: &'static str,
    fetcher: Arc<dyn PageFetcher<T, F>>,
    options_source: Option<Arc<dyn OptionsSource>>,
    state: PagedState<T>,
    filters: F,
    options: LoadState<FilterOptions>,
    notices: Vec<Notice>,
}

impl<T, F: Filters> ListController<T, F> {
    /// `label` is the plural resource name used in notices, e.g. "doctors".
    pub fn new(label: &'static str, fetcher: Arc<dyn PageFetcher<T, F>>, page_size: u32) -> Self {
        Self {
            label,
            fetcher,
            options_source: None,
            state: PagedState::new(page_size),
            filters: F::default(),
            options: LoadState::Idle,
            notices: Vec::new(),
        }
    }

    /// Attach the source of the filter form's dropdown lists.
    pub fn with_options(mut self, source: Arc<dyn OptionsSource>) -> Self {
        self.options_source = Some(source);
        self
    }

    /// Start from `filters` instead of the cleared form. Nothing is fetched.
    pub fn with_filters(mut self, filters: F) -> Self {
        self.filters = filters;
        self
    }

    pub fn items(&self) -> &[T] {
        self.state.items()
    }

    pub fn loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn pagination(&self) -> Pagination {
        self.state.pagination()
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn options(&self) -> &LoadState<FilterOptions> {
        &self.options
    }

    pub fn loading_filters(&self) -> bool {
        self.options.is_loading()
    }

    /// Page number shown to the user (1-based).
    pub fn display_page(&self) -> u32 {
        api_to_ui(self.state.pagination().current)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Issue a request for `page` (0-based) under the current filters.
    pub fn begin_fetch(&mut self, page: u32) -> PageRequest<F> {
        let generation = self.state.begin(page);
        log::debug!(
            "Fetching {} page {} (generation {})",
            self.label,
            page,
            generation
        );
        PageRequest {
            generation,
            page,
            size: self.state.page_size(),
            filters: self.filters.clone(),
        }
    }

    /// Apply the response to `request`; stale responses are dropped.
    pub fn complete(
        &mut self,
        request: &PageRequest<F>,
        result: Result<Page<T>, ServiceError>,
    ) -> FetchOutcome {
        let (outcome, notice) = self.state.complete(request.generation, result, self.label);
        if let Some(notice) = notice {
            self.notices.push(notice);
        }
        outcome
    }

    /// Run the fetcher for a previously issued request.
    pub async fn run(&self, request: &PageRequest<F>) -> Result<Page<T>, ServiceError> {
        self.fetcher
            .fetch_page(request.page, request.size, &request.filters)
            .await
    }

    /// Fetch `page` (0-based) and apply it.
    pub async fn load_page(&mut self, page: u32) -> FetchOutcome {
        let request = self.begin_fetch(page);
        let result = self.run(&request).await;
        self.complete(&request, result)
    }

    /// Load the filter dropdowns and the first page concurrently.
    pub async fn mount(&mut self) -> FetchOutcome {
        let request = self.begin_fetch(0);
        let options_source = self.options_source.clone();
        if options_source.is_some() {
            self.options = LoadState::Loading;
        }

        let fetcher = Arc::clone(&self.fetcher);
        let page_future = fetcher.fetch_page(request.page, request.size, &request.filters);
        let options_future = async {
            match &options_source {
                Some(source) => Some(source.load_options(F::REFERENCE_LISTS).await),
                None => None,
            }
        };
        let (result, options) = futures::join!(page_future, options_future);

        if let Some(options) = options {
            for (list, reason) in &options.failed {
                self.notices.push(Notice::error(format!(
                    "Failed to load {:?} filter options: {}",
                    list, reason
                )));
            }
            self.options = LoadState::Loaded(options);
        }
        self.complete(&request, result)
    }

    /// Replace the filters and reload from the first page.
    pub async fn submit_filters(&mut self, filters: F) -> FetchOutcome {
        self.filters = filters;
        self.load_page(0).await
    }

    pub async fn clear_filters(&mut self) -> FetchOutcome {
        self.filters = F::default();
        self.load_page(0).await
    }

    /// Jump to a 1-based page, keeping the current filters.
    pub async fn change_page(&mut self, ui_page: u32) -> Result<FetchOutcome, ServiceError> {
        let page = ui_to_api(ui_page)?;
        Ok(self.load_page(page).await)
    }
}
