//! State machine behind a single records table.
//!
//! Every fetch is issued with a monotonically increasing token. Only the
//! resolution carrying the latest token is applied; anything older lost the
//! race and is dropped, so a slow response never overwrites newer data.

use std::collections::HashSet;
use std::fmt::Display;

use crate::domain::types::RecordId;
use crate::services::source::DataSource;
use crate::table::filter::ListQuery;
use crate::table::record::Record;
use crate::table::sort::{SortState, sort_records};
use crate::table::view::{Layout, MOBILE_BREAKPOINT, RowView, TableView};

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<R> {
    Loading,
    Failed(String),
    Ready(Vec<R>),
}

/// A fetch the caller must perform and hand back through
/// [`TableController::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub struct FetchTicket<R: Record> {
    pub token: u64,
    pub query: ListQuery<R>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

#[derive(Clone, Debug)]
pub struct TableController<R: Record> {
    query: ListQuery<R>,
    sort: SortState,
    state: LoadState<R>,
    layout: Layout,
    breakpoint: u32,
    expanded: HashSet<RecordId>,
    issued: u64,
}

impl<R: Record> Default for TableController<R> {
    fn default() -> Self {
        Self::new(MOBILE_BREAKPOINT)
    }
}

impl<R: Record> TableController<R> {
    pub fn new(breakpoint: u32) -> Self {
        Self {
            query: ListQuery::new(),
            sort: SortState::default(),
            state: LoadState::Loading,
            layout: Layout::default(),
            breakpoint,
            expanded: HashSet::new(),
            issued: 0,
        }
    }

    /// Sets the initial query without issuing a fetch.
    pub fn with_query(mut self, query: ListQuery<R>) -> Self {
        self.query = query;
        self
    }

    pub fn query(&self) -> &ListQuery<R> {
        &self.query
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn state(&self) -> &LoadState<R> {
        &self.state
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of fetches issued so far.
    pub fn fetches_issued(&self) -> u64 {
        self.issued
    }

    /// Enters the loading state and issues a ticket for the current query.
    pub fn begin_fetch(&mut self) -> FetchTicket<R> {
        self.issued += 1;
        self.state = LoadState::Loading;
        FetchTicket {
            token: self.issued,
            query: self.query.clone(),
        }
    }

    pub fn set_query(&mut self, query: ListQuery<R>) -> FetchTicket<R> {
        self.query = query;
        self.begin_fetch()
    }

    pub fn clear_filters(&mut self) -> FetchTicket<R> {
        self.set_query(ListQuery::new())
    }

    /// Reissues the identical query after a failure.
    pub fn retry(&mut self) -> FetchTicket<R> {
        self.begin_fetch()
    }

    /// Applies a fetch outcome unless a newer fetch was issued since.
    pub fn resolve<E: Display>(&mut self, token: u64, result: Result<Vec<R>, E>) -> Resolution {
        if token != self.issued {
            log::debug!(
                "Dropping stale {} response {token}, latest is {}",
                R::NOUN,
                self.issued
            );
            return Resolution::Stale;
        }

        self.state = match result {
            Ok(records) => LoadState::Ready(records),
            Err(err) => LoadState::Failed(err.to_string()),
        };
        Resolution::Applied
    }

    /// Fetches the current query from `source` and applies the result.
    pub async fn refresh<S>(&mut self, source: &S) -> Resolution
    where
        S: DataSource<R> + ?Sized,
    {
        let ticket = self.begin_fetch();
        let result = source.fetch_list(&ticket.query).await;
        self.resolve(ticket.token, result)
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Re-sorts the loaded records; never refetches.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort.toggle(field);
    }

    /// Loaded records in display order.
    pub fn rows(&self) -> Vec<&R> {
        match &self.state {
            LoadState::Ready(records) => sort_records(records, &self.sort),
            LoadState::Loading | LoadState::Failed(_) => Vec::new(),
        }
    }

    /// Flips one row's expansion; returns the new state.
    pub fn toggle_row(&mut self, id: &RecordId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Expands a row; an already expanded row stays expanded.
    pub fn expand_row(&mut self, id: &RecordId) {
        self.expanded.insert(id.clone());
    }

    pub fn is_expanded(&self, id: &RecordId) -> bool {
        self.expanded.contains(id)
    }

    /// Re-derives the layout from a viewport width. Returns true when the
    /// layout changed. Data is kept as is.
    pub fn resize(&mut self, width: u32) -> bool {
        let layout = Layout::for_width(width, self.breakpoint);
        let changed = layout != self.layout;
        self.layout = layout;
        changed
    }

    pub fn view(&self) -> TableView<'_, R> {
        match &self.state {
            LoadState::Loading => TableView::Loading {
                skeleton_rows: self.layout.skeleton_rows(),
            },
            LoadState::Failed(message) => TableView::Error { message },
            LoadState::Ready(records) if records.is_empty() => TableView::Empty {
                filtered: self.query.is_filtered(),
            },
            LoadState::Ready(_) => TableView::Populated {
                layout: self.layout,
                rows: self
                    .rows()
                    .into_iter()
                    .map(|record| RowView {
                        record,
                        expanded: self.is_expanded(record.id()),
                    })
                    .collect(),
            },
        }
    }
}
