//! The contract every table row type fulfils.

use std::cmp::Ordering;
use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::types::{Categorical, RecordId};

/// Comparable leaf value extracted from a record for sorting.
#[derive(Clone, Debug, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
}

impl SortValue {
    /// Walks a dotted path (`insurance.status`) into a serialized record.
    ///
    /// Missing intermediate keys, nulls, arrays and objects resolve to `None`.
    pub fn resolve(root: &Value, path: &str) -> Option<Self> {
        let leaf = path
            .split('.')
            .try_fold(root, |node, key| node.as_object()?.get(key))?;

        match leaf {
            Value::String(text) => Some(
                DateTime::parse_from_rfc3339(text)
                    .map(|date| SortValue::Date(date.with_timezone(&Utc)))
                    .unwrap_or_else(|_| SortValue::Text(text.clone())),
            ),
            Value::Number(number) => number.as_f64().map(SortValue::Number),
            Value::Bool(flag) => Some(SortValue::Number(if *flag { 1.0 } else { 0.0 })),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Number(_) => 0,
            SortValue::Date(_) => 1,
            SortValue::Text(_) => 2,
        }
    }

    /// Total order: text case-insensitively, numbers and dates by value.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => compare_text(a, b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

/// Case-folded comparison with a deterministic tie-break on the raw text.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Orders optional keys so that a missing value is the lowest value.
pub fn compare_keys(a: Option<&SortValue>, b: Option<&SortValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(b),
    }
}

/// A domain record that can be listed, filtered and sorted in a table.
pub trait Record: Clone + Debug + Serialize + Send + Sync + 'static {
    /// Primary categorical filter.
    type Status: Categorical;
    /// Secondary categorical filter; [`crate::domain::types::Uncategorized`] when absent.
    type Kind: Categorical;

    /// Plural noun used in user-facing messages ("calls").
    const NOUN: &'static str;

    fn id(&self) -> &RecordId;

    fn status(&self) -> Self::Status;

    fn kind(&self) -> Option<Self::Kind> {
        None
    }

    /// Fields searched by free-text filtering.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match; `needle` must already be lower-cased.
    fn matches_search(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    /// Resolves a (possibly dotted) serialized field path to a sort key.
    fn sort_value(&self, path: &str) -> Option<SortValue> {
        let value = serde_json::to_value(self).ok()?;
        SortValue::resolve(&value, path)
    }

    /// Fixed order in which the data source returns records.
    fn default_order(a: &Self, b: &Self) -> Ordering;
}

/// A record the data source can fabricate from a creation payload.
pub trait Creatable: Record {
    type Draft: Debug + Send + 'static;

    /// Prefix and length of fabricated identifiers.
    const ID_PREFIX: Option<&'static str> = None;
    const ID_LEN: usize = 7;

    fn from_draft(id: RecordId, draft: Self::Draft, now: DateTime<Utc>) -> Self;
}
