//! Search and categorical filter criteria.

use crate::table::record::Record;

/// Criteria a list fetch is issued with.
///
/// A blank search term and an absent categorical value both mean "no
/// constraint".
#[derive(Debug)]
pub struct ListQuery<R: Record> {
    pub search_term: Option<String>,
    pub status: Option<R::Status>,
    pub kind: Option<R::Kind>,
}

impl<R: Record> Clone for ListQuery<R> {
    fn clone(&self) -> Self {
        Self {
            search_term: self.search_term.clone(),
            status: self.status,
            kind: self.kind,
        }
    }
}

impl<R: Record> PartialEq for ListQuery<R> {
    fn eq(&self, other: &Self) -> bool {
        self.search_term == other.search_term
            && self.status == other.status
            && self.kind == other.kind
    }
}

impl<R: Record> Eq for ListQuery<R> {}

impl<R: Record> Default for ListQuery<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ListQuery<R> {
    pub fn new() -> Self {
        Self {
            search_term: None,
            status: None,
            kind: None,
        }
    }

    /// Sets the free-text term; whitespace-only input clears it.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    pub fn status(mut self, status: R::Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn kind(mut self, kind: R::Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        let trimmed = term.trim();
        self.search_term = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    /// True when any constraint is active.
    pub fn is_filtered(&self) -> bool {
        self.search_term.is_some() || self.status.is_some() || self.kind.is_some()
    }

    pub fn matches(&self, record: &R) -> bool {
        if self.status.is_some_and(|status| record.status() != status) {
            return false;
        }

        if self.kind.is_some_and(|kind| record.kind() != Some(kind)) {
            return false;
        }

        match &self.search_term {
            Some(term) => record.matches_search(&term.to_lowercase()),
            None => true,
        }
    }

    /// Keeps the records satisfying every active constraint, preserving order.
    pub fn apply(&self, records: impl IntoIterator<Item = R>) -> Vec<R> {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}
