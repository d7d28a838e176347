//! The owning container of one list.
//!
//! [`ListController`] holds the only copy of a list's [`QueryState`] and the
//! last fetch result. State changes come in through its operations (filter,
//! search, sort, paginate, reload); each one that actually changes the query
//! hands back a [`PendingFetch`] for the caller to run, typically on a spawned
//! task. The finished [`FetchOutcome`] is handed back to
//! [`ListController::apply`], which installs it only if no newer fetch has
//! been issued in the meantime.
//!
//! ```ignore
//! let mut list = ListController::new(source, ListConfig::default(), "due_date-desc");
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!
//! let spawn = |pending: PendingFetch<_>| {
//!     let tx = tx.clone();
//!     tokio::spawn(async move { let _ = tx.send(pending.run().await); });
//! };
//!
//! spawn(list.load());
//! if let Some(pending) = list.set_filter("status", "paid") {
//!     spawn(pending);
//! }
//! while let Some(outcome) = rx.recv().await {
//!     if list.apply(outcome) {
//!         redraw(list.state());
//!     }
//! }
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::ListConfig;
use crate::error::FetchError;
use crate::pagination::PageRequest;
use crate::pagination::PaginationView;
use crate::query::Direction;
use crate::query::FilterValue;
use crate::query::PageResult;
use crate::query::QueryState;
use crate::query::SortState;
use crate::sort::SortController;
use crate::source::ListDataSource;

/// What a list currently shows, in priority order.
#[derive(Debug)]
pub enum ListState<'a, T> {
    /// A fetch is in flight, or nothing has been fetched yet.
    Loading,
    /// The last fetch failed.
    Failed(&'a FetchError),
    /// The last fetch returned no items.
    Empty,
    /// The last fetch returned items.
    Ready(&'a PageResult<T>),
}

/// A fetch issued by a [`ListController`], not yet run.
pub struct PendingFetch<T = Value> {
    seq: u64,
    query: QueryState,
    source: Arc<ListDataSource<T>>,
    cancel: CancellationToken,
}

impl<T> PendingFetch<T> {
    /// Returns the sequence number of this fetch.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Returns the query snapshot this fetch will send.
    pub fn query(&self) -> &QueryState {
        &self.query
    }
}

impl<T: DeserializeOwned> PendingFetch<T> {
    /// Runs the fetch.
    ///
    /// Resolves to a cancelled outcome as soon as a newer fetch is issued or
    /// the controller is dropped.
    pub async fn run(self) -> FetchOutcome<T> {
        let result = self
            .source
            .fetch_cancellable(&self.query, &self.cancel)
            .await;
        FetchOutcome {
            seq: self.seq,
            result,
        }
    }
}

/// The result of a [`PendingFetch`], tagged with its sequence number.
#[derive(Debug)]
pub struct FetchOutcome<T = Value> {
    seq: u64,
    result: Result<PageResult<T>, FetchError>,
}

impl<T> FetchOutcome<T> {
    #[cfg(test)]
    pub(crate) fn new(seq: u64, result: Result<PageResult<T>, FetchError>) -> Self {
        Self { seq, result }
    }

    /// Returns the sequence number of the fetch that produced this outcome.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Returns the fetch result.
    pub fn result(&self) -> &Result<PageResult<T>, FetchError> {
        &self.result
    }
}

/// Owns the query and result of one paginated list.
///
/// Every fetch gets a monotonically increasing sequence number; only the
/// outcome of the most recently issued fetch is ever applied, so a slow,
/// older response can never overwrite newer state. Issuing a fetch cancels
/// the one in flight, and dropping the controller cancels everything it
/// issued.
pub struct ListController<T = Value> {
    source: Arc<ListDataSource<T>>,
    config: ListConfig,
    query: QueryState,
    sort: SortController,
    page: Option<PageResult<T>>,
    error: Option<FetchError>,
    loading: bool,
    issued: u64,
    in_flight: Option<CancellationToken>,
    root: CancellationToken,
}

impl<T: DeserializeOwned> ListController<T> {
    /// Creates a controller with the page size of `config` and an initial
    /// `"field-direction"` sort.
    ///
    /// Nothing is fetched until [`load`](Self::load) is called.
    pub fn new(source: ListDataSource<T>, config: ListConfig, default_sort: &str) -> Self {
        let sort = SortController::new(default_sort);
        let query = QueryState::new(config.page_size).with_sort(sort.state().clone());
        Self {
            source: Arc::new(source),
            config,
            query,
            sort,
            page: None,
            error: None,
            loading: false,
            issued: 0,
            in_flight: None,
            root: CancellationToken::new(),
        }
    }

    /// Sets an initial filter without issuing a fetch.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.query.set_filter(key, value);
        self
    }

    /// Sets the initial page without issuing a fetch.
    pub fn with_page(mut self, page: u32) -> Self {
        self.query.set_page(page);
        self
    }

    /// Returns the current query.
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Returns the current sort.
    pub fn sort(&self) -> &SortState {
        self.sort.state()
    }

    /// Returns the list configuration.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Returns the data source.
    pub fn source(&self) -> &ListDataSource<T> {
        &self.source
    }

    /// Returns the last successfully fetched page.
    pub fn page(&self) -> Option<&PageResult<T>> {
        self.page.as_ref()
    }

    /// Returns the error of the last fetch, if it failed.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Returns `true` while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the sequence number of the most recently issued fetch.
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Returns what the list should show.
    pub fn state(&self) -> ListState<'_, T> {
        if self.loading {
            return ListState::Loading;
        }
        if let Some(error) = &self.error {
            return ListState::Failed(error);
        }
        match &self.page {
            None => ListState::Loading,
            Some(page) if page.is_empty() => ListState::Empty,
            Some(page) => ListState::Ready(page),
        }
    }

    /// Returns the pagination view over the current query and page.
    pub fn pagination(&self) -> PaginationView {
        let total_pages = self.page.as_ref().map_or(1, PageResult::total_pages);
        PaginationView::new(self.query.page(), total_pages, self.query.page_size())
            .with_page_size_options(self.config.page_size_options.clone())
    }

    /// Issues the initial fetch.
    pub fn load(&mut self) -> PendingFetch<T> {
        self.begin()
    }

    /// Refetches the current query, e.g. after a record was edited elsewhere
    /// or to retry a failed fetch.
    pub fn reload(&mut self) -> PendingFetch<T> {
        self.begin()
    }

    /// Sets a filter; a blank value removes it.
    pub fn set_filter(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Option<PendingFetch<T>> {
        self.query.set_filter(key, value).then(|| self.begin())
    }

    /// Removes a filter.
    pub fn remove_filter(&mut self, key: &str) -> Option<PendingFetch<T>> {
        self.query.remove_filter(key).then(|| self.begin())
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) -> Option<PendingFetch<T>> {
        self.query.clear_filters().then(|| self.begin())
    }

    /// Applies a settled search term, e.g. from a
    /// [`FilterDebouncer`](crate::debounce::FilterDebouncer). An empty term
    /// stops searching.
    pub fn apply_search(&mut self, term: &str) -> Option<PendingFetch<T>> {
        let param = self.config.search_param.clone();
        self.set_filter(param, term)
    }

    /// Handles a click on a sortable column header.
    ///
    /// Always resets to page 1 and refetches.
    pub fn sort_by(&mut self, column: &str, default_direction: Option<Direction>) -> PendingFetch<T> {
        let sort = self.sort.request(column, default_direction).clone();
        self.query.set_sort(sort);
        self.query.set_page(1);
        self.begin()
    }

    /// Moves to the previous page; no-op on the first page.
    pub fn go_to_prev(&mut self) -> Option<PendingFetch<T>> {
        let request = self.pagination().go_to_prev()?;
        self.request(request)
    }

    /// Moves to the next page; no-op on the last page.
    pub fn go_to_next(&mut self) -> Option<PendingFetch<T>> {
        let request = self.pagination().go_to_next()?;
        self.request(request)
    }

    /// Moves to `page`, clamped into the known page range.
    pub fn go_to_page(&mut self, page: u32) -> Option<PendingFetch<T>> {
        let request = self.pagination().go_to_page(page)?;
        self.request(request)
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: u32) -> Option<PendingFetch<T>> {
        let request = self.pagination().set_page_size(page_size)?;
        self.request(request)
    }

    /// Applies a [`PageRequest`] from the pagination view.
    pub fn request(&mut self, request: PageRequest) -> Option<PendingFetch<T>> {
        let changed = match request {
            PageRequest::Page(page) => self.query.set_page(page),
            PageRequest::PageSize(size) => self.query.set_page_size(size),
        };
        changed.then(|| self.begin())
    }

    /// Installs a finished fetch.
    ///
    /// Returns `true` if the outcome belonged to the latest fetch and changed
    /// what the list shows. Outcomes of superseded fetches and cancellations
    /// are discarded.
    pub fn apply(&mut self, outcome: FetchOutcome<T>) -> bool {
        if outcome.seq != self.issued {
            log::debug!(
                "{}: discarding stale response #{} (latest #{})",
                self.source.endpoint(),
                outcome.seq,
                self.issued
            );
            return false;
        }

        match outcome.result {
            Err(FetchError::Cancelled) => {
                log::debug!("{}: fetch #{} cancelled", self.source.endpoint(), outcome.seq);
                false
            }
            Ok(page) => {
                self.finish();
                self.query.set_page(page.current_page());
                self.error = None;
                self.page = Some(page);
                true
            }
            Err(error) => {
                self.finish();
                log::warn!("{}: fetch #{} failed: {}", self.source.endpoint(), outcome.seq, error);
                self.page = None;
                self.error = Some(error);
                true
            }
        }
    }

    /// Runs a fetch of the current query to completion and applies it.
    pub async fn refresh(&mut self) -> bool {
        let outcome = self.begin().run().await;
        self.apply(outcome)
    }

    fn begin(&mut self) -> PendingFetch<T> {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }

        self.issued += 1;
        self.loading = true;
        let cancel = self.root.child_token();
        self.in_flight = Some(cancel.clone());

        log::debug!(
            "{}: issuing fetch #{} ({})",
            self.source.endpoint(),
            self.issued,
            self.query.to_query_string()
        );

        PendingFetch {
            seq: self.issued,
            query: self.query.clone(),
            source: Arc::clone(&self.source),
            cancel,
        }
    }

    fn finish(&mut self) {
        self.in_flight = None;
        self.loading = false;
    }
}

impl<T> Drop for ListController<T> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
