//! Record Store
//!
//! Canonical in-memory copy of one domain's list: the full record set from
//! the last fetch, the filtered view over it and the current page window.
//! One store exists per domain; stores share nothing.

use tracing::debug;

use crate::domain::Record;
use crate::error::{GatewayError, GatewayResult};
use crate::listing::{Filter, Filterable, Page, PageInfo, PageRequest};

/// Lifecycle of a record set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Empty,
    Loading,
    Loaded,
    /// The last fetch failed. Previously loaded records stay visible.
    LoadError(String),
}

/// Identifies one issued fetch. Only the most recently issued ticket is
/// allowed to replace the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// What `finish_fetch` did with a response
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was issued after this one; the response was dropped.
    Stale,
    Failed(GatewayError),
}

/// Result of a page change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNavigation {
    /// The window moved over records already held locally.
    Local,
    /// The page must be fetched from the backend.
    Remote(PageRequest),
    OutOfRange,
}

#[derive(Debug, Clone)]
pub struct RecordStore<T: Record + Filterable> {
    records: Vec<T>,
    view: Vec<T>,
    filter: Filter,
    server_info: PageInfo,
    page_size: u64,
    local_page: u64,
    state: LoadState,
    last_error: Option<GatewayError>,
    issued: u64,
}

impl<T: Record + Filterable> RecordStore<T> {
    pub fn new(page_size: u64) -> Self {
        Self {
            records: Vec::new(),
            view: Vec::new(),
            filter: Filter::default(),
            server_info: PageInfo::default(),
            page_size: page_size.max(1),
            local_page: 0,
            state: LoadState::Empty,
            last_error: None,
            issued: 0,
        }
    }

    // ========================
    // Fetch lifecycle
    // ========================

    /// Marks the store as loading and issues a ticket for the new request.
    /// Calling this again (retry, rapid filter changes) supersedes every
    /// earlier ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.state = LoadState::Loading;
        FetchTicket(self.issued)
    }

    /// Applies a fetch response.
    ///
    /// Success fully replaces the record set and clears any filter. Failure
    /// keeps the previous records and records the error.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: GatewayResult<Page<T>>) -> FetchOutcome {
        if ticket.0 != self.issued {
            debug!("Dropping stale fetch response (ticket {} < {})", ticket.0, self.issued);
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                self.server_info = page.info();
                self.local_page = if self.records_cover(page.content.len(), page.total_elements) {
                    0
                } else {
                    page.page_index
                };
                self.view = page.content.clone();
                self.records = page.content;
                self.filter = Filter::default();
                self.state = LoadState::Loaded;
                self.last_error = None;
                FetchOutcome::Applied
            }
            Err(error) => {
                self.state = LoadState::LoadError(error.user_message());
                self.last_error = Some(error.clone());
                FetchOutcome::Failed(error)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    // ========================
    // Filtering
    // ========================

    /// Recomputes the view from the full record set and returns to the
    /// first page.
    pub fn apply_filter(&mut self, filter: Filter) {
        self.view = filter.apply(&self.records);
        self.filter = filter;
        self.local_page = 0;
    }

    /// Restores the unfiltered view.
    pub fn reset_filter(&mut self) {
        self.apply_filter(Filter::default());
    }

    // ========================
    // Mutation echo
    // ========================

    /// Replaces the record with the same id in the full set and in the view.
    /// Returns `false` when no such record is held. Totals never change.
    pub fn optimistic_merge(&mut self, updated: T) -> bool {
        let id = updated.id();
        if let Some(slot) = self.view.iter_mut().find(|r| r.id() == id) {
            *slot = updated.clone();
        }
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    // ========================
    // Paging
    // ========================

    /// Records on the current page.
    pub fn visible(&self) -> &[T] {
        if !self.windows_locally() {
            return &self.view;
        }
        let len = self.view.len();
        let start = (self.local_page.saturating_mul(self.page_size) as usize).min(len);
        let end = start.saturating_add(self.page_size as usize).min(len);
        &self.view[start..end]
    }

    pub fn page_info(&self) -> PageInfo {
        if self.windows_locally() {
            PageInfo::for_total(self.local_page, self.page_size, self.view.len() as u64)
        } else {
            self.server_info
        }
    }

    /// The request for page `index`, if it exists.
    pub fn page_request(&self, index: u64) -> Option<PageRequest> {
        (index < self.page_info().total_pages).then(|| PageRequest::new(index, self.page_size))
    }

    /// Request that reloads the page currently shown.
    pub fn current_request(&self) -> PageRequest {
        if self.windows_locally() {
            PageRequest::first(self.page_size)
        } else {
            PageRequest::new(self.server_info.page_index, self.page_size)
        }
    }

    pub fn go_to_page(&mut self, index: u64) -> PageNavigation {
        let Some(request) = self.page_request(index) else {
            return PageNavigation::OutOfRange;
        };
        if self.windows_locally() {
            self.local_page = index;
            PageNavigation::Local
        } else {
            PageNavigation::Remote(request)
        }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Paging happens over the local view when a filter is narrowing it, or
    /// when the backend handed over the whole collection in one response.
    fn windows_locally(&self) -> bool {
        !self.filter.is_empty() || self.records_cover(self.records.len(), self.server_info.total_elements)
    }

    fn records_cover(&self, held: usize, total: u64) -> bool {
        let held = held as u64;
        held > self.page_size && held >= total
    }

    // ========================
    // Accessors
    // ========================

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|r| &r.id() == id)
    }

    /// Full record set from the last successful fetch.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Filtered view, all pages.
    pub fn view(&self) -> &[T] {
        &self.view
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Total reported by the backend for the last successful fetch.
    pub fn server_total(&self) -> u64 {
        self.server_info.total_elements
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn last_error(&self) -> Option<&GatewayError> {
        self.last_error.as_ref()
    }
}

impl<T: Record + Filterable> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MvpRecord;

    fn mvp(id: u64, title: &str) -> MvpRecord {
        MvpRecord::new(id, title)
    }

    fn loaded(page: Page<MvpRecord>, page_size: u64) -> RecordStore<MvpRecord> {
        let mut store = RecordStore::new(page_size);
        let ticket = store.begin_fetch();
        assert_eq!(store.finish_fetch(ticket, Ok(page)), FetchOutcome::Applied);
        store
    }

    fn whole_array(count: u64, page_size: u64) -> Page<MvpRecord> {
        let items = (1..=count).map(|i| mvp(i, &format!("Request {}", i))).collect();
        Page::from_items(items, PageRequest::first(page_size))
    }

    #[test]
    fn test_state_transitions() {
        let mut store: RecordStore<MvpRecord> = RecordStore::new(5);
        assert_eq!(store.state(), &LoadState::Empty);

        let ticket = store.begin_fetch();
        assert!(store.is_loading());
        store.finish_fetch(ticket, Ok(whole_array(3, 5)));
        assert_eq!(store.state(), &LoadState::Loaded);
        assert_eq!(store.records().len(), 3);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_records() {
        let mut store = loaded(whole_array(3, 5), 5);
        let ticket = store.begin_fetch();
        let outcome = store.finish_fetch(ticket, Err(GatewayError::Network { message: "offline".into() }));

        assert!(matches!(outcome, FetchOutcome::Failed(GatewayError::Network { .. })));
        assert!(matches!(store.state(), LoadState::LoadError(_)));
        assert_eq!(store.records().len(), 3);
        assert_eq!(store.visible().len(), 3);
        assert!(store.last_error().is_some());

        // retry
        let ticket = store.begin_fetch();
        store.finish_fetch(ticket, Ok(whole_array(4, 5)));
        assert_eq!(store.state(), &LoadState::Loaded);
        assert!(store.last_error().is_none());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut store: RecordStore<MvpRecord> = RecordStore::new(5);
        let slow = store.begin_fetch();
        let fast = store.begin_fetch();

        assert_eq!(store.finish_fetch(fast, Ok(whole_array(2, 5))), FetchOutcome::Applied);
        assert_eq!(store.finish_fetch(slow, Ok(whole_array(9, 5))), FetchOutcome::Stale);
        assert_eq!(store.records().len(), 2);
    }

    #[test]
    fn test_whole_array_is_windowed_locally() {
        let mut store = loaded(whole_array(23, 5), 5);
        let info = store.page_info();
        assert_eq!(info.total_pages, 5);
        assert_eq!(info.total_elements, 23);
        assert_eq!(store.visible().len(), 5);

        assert_eq!(store.go_to_page(4), PageNavigation::Local);
        assert_eq!(store.visible().len(), 3);
        assert_eq!(store.visible()[0].id, 21);

        assert_eq!(store.go_to_page(5), PageNavigation::OutOfRange);
        assert_eq!(store.page_info().page_index, 4);
    }

    #[test]
    fn test_server_page_navigates_remotely() {
        let page = Page {
            content: (1..=10).map(|i| mvp(i, "r")).collect(),
            page_index: 0,
            page_size: 10,
            total_elements: 42,
            total_pages: 5,
        };
        let mut store = loaded(page, 10);
        assert_eq!(store.visible().len(), 10);
        assert_eq!(store.page_info().total_pages, 5);
        assert_eq!(store.go_to_page(3), PageNavigation::Remote(PageRequest::new(3, 10)));
        assert_eq!(store.go_to_page(5), PageNavigation::OutOfRange);
        assert_eq!(store.current_request(), PageRequest::new(0, 10));
        assert_eq!(store.server_total(), 42);
    }

    #[test]
    fn test_filter_resets_page_and_reset_restores_totals() {
        let mut store = loaded(whole_array(23, 5), 5);
        store.go_to_page(2);

        store.apply_filter(Filter::new().contains("title", "request 1"));
        // 1, 10..=19
        assert_eq!(store.view().len(), 11);
        assert_eq!(store.page_info().page_index, 0);
        assert_eq!(store.page_info().total_pages, 3);

        store.reset_filter();
        assert_eq!(store.view().len(), 23);
        assert_eq!(store.page_info().total_pages, 5);
        assert_eq!(store.page_info().total_elements, 23);
    }

    #[test]
    fn test_reapplying_filter_does_not_compound() {
        let mut store = loaded(whole_array(23, 5), 5);
        let filter = Filter::new().contains("title", "2");

        store.apply_filter(filter.clone());
        let first: Vec<u64> = store.view().iter().map(|r| r.id).collect();
        store.apply_filter(Filter::new().contains("title", "22"));
        store.reset_filter();
        store.apply_filter(filter);
        let second: Vec<u64> = store.view().iter().map(|r| r.id).collect();

        assert_eq!(first, second);
        assert_eq!(first, vec![2, 12, 20, 21, 22, 23]);
    }

    #[test]
    fn test_refetch_clears_filter() {
        let mut store = loaded(whole_array(8, 5), 5);
        store.apply_filter(Filter::new().exact("id", "3"));
        assert_eq!(store.view().len(), 1);

        let ticket = store.begin_fetch();
        store.finish_fetch(ticket, Ok(whole_array(8, 5)));
        assert!(store.filter().is_empty());
        assert_eq!(store.view().len(), 8);
    }

    #[test]
    fn test_optimistic_merge_replaces_in_place() {
        let mut store = loaded(whole_array(6, 5), 5);
        store.apply_filter(Filter::new().contains("title", "request"));
        let before = store.page_info();

        let mut updated = store.get(&2).cloned().unwrap();
        updated.set_progress(100);
        assert!(store.optimistic_merge(updated));

        let ids: Vec<u64> = store.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(store.records()[1].progress, 100);
        assert_eq!(store.view()[1].progress, 100);
        assert_eq!(store.page_info().total_elements, before.total_elements);

        assert!(!store.optimistic_merge(mvp(99, "ghost")));
        assert_eq!(store.records().len(), 6);
    }
}
