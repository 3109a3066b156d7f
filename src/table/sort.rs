//! Single-column sort state and the comparator applied to fetched rows.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::types::TypeConstraintError;
use crate::table::record::{Record, compare_keys};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Orients an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(TypeConstraintError::UnknownValue(other.to_string())),
        }
    }
}

/// At most one column is sorted at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SortState {
    #[default]
    Unsorted,
    Sorted {
        field: String,
        direction: SortDirection,
    },
}

impl SortState {
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        SortState::Sorted {
            field: field.into(),
            direction,
        }
    }

    /// Clicking a column: a new column sorts ascending, the same column flips.
    pub fn toggle(&mut self, field: &str) {
        *self = match std::mem::take(self) {
            SortState::Sorted {
                field: current,
                direction,
            } if current == field => SortState::Sorted {
                field: current,
                direction: direction.flip(),
            },
            _ => SortState::by(field, SortDirection::Ascending),
        };
    }

    /// Direction for `field` when it is the sorted column.
    pub fn direction_of(&self, field: &str) -> Option<SortDirection> {
        match self {
            SortState::Sorted {
                field: current,
                direction,
            } if current == field => Some(*direction),
            _ => None,
        }
    }
}

/// Stable sort of `records` by the active column; unsorted keeps fetch order.
pub fn sort_records<'a, R: Record>(records: &'a [R], state: &SortState) -> Vec<&'a R> {
    let SortState::Sorted { field, direction } = state else {
        return records.iter().collect();
    };

    let mut keyed: Vec<_> = records
        .iter()
        .map(|record| (record.sort_value(field), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| direction.apply(compare_keys(a.as_ref(), b.as_ref())));

    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::Client;
    use crate::repository::seed;

    fn ids<'a>(clients: impl IntoIterator<Item = &'a Client>) -> Vec<&'a str> {
        clients.into_iter().map(|client| client.id.as_str()).collect()
    }

    #[test]
    fn toggle_cycles_ascending_then_descending() {
        let mut state = SortState::default();

        state.toggle("name");
        assert_eq!(state, SortState::by("name", SortDirection::Ascending));
        state.toggle("name");
        assert_eq!(state, SortState::by("name", SortDirection::Descending));
        state.toggle("completion");
        assert_eq!(state, SortState::by("completion", SortDirection::Ascending));
        assert_eq!(state.direction_of("name"), None);
    }

    #[test]
    fn descending_is_reverse_of_ascending() {
        let clients = seed::clients().unwrap();

        let ascending = sort_records(&clients, &SortState::by("name", SortDirection::Ascending));
        let descending = sort_records(&clients, &SortState::by("name", SortDirection::Descending));

        let mut reversed = ids(ascending.iter().copied());
        reversed.reverse();
        assert_eq!(ids(descending.iter().copied()), reversed);
        assert_eq!(ascending[0].name, "Emma Johnson");
    }

    #[test]
    fn nested_numeric_paths_sort_by_value() {
        let clients = seed::clients().unwrap();
        let state = SortState::by("timeline.days", SortDirection::Ascending);
        let sorted = sort_records(&clients, &state);

        let days: Vec<u32> = sorted.iter().map(|client| client.timeline.days).collect();
        let mut expected = days.clone();
        expected.sort();
        assert_eq!(days, expected);
    }

    #[test]
    fn missing_values_sort_first_ascending_and_last_descending() {
        let clients = seed::clients().unwrap();
        let path = "insurance.verificationDate";
        let missing = clients
            .iter()
            .filter(|client| client.insurance.verification_date.is_none())
            .count();
        assert!(missing > 0);

        let ascending = sort_records(&clients, &SortState::by(path, SortDirection::Ascending));
        assert!(ascending[..missing]
            .iter()
            .all(|client| client.insurance.verification_date.is_none()));

        let descending = sort_records(&clients, &SortState::by(path, SortDirection::Descending));
        assert!(descending[clients.len() - missing..]
            .iter()
            .all(|client| client.insurance.verification_date.is_none()));
    }

    #[test]
    fn unsorted_keeps_fetch_order() {
        let clients = seed::clients().unwrap();
        let unsorted = sort_records(&clients, &SortState::Unsorted);
        assert_eq!(ids(unsorted.iter().copied()), ids(&clients));
    }

    #[test]
    fn parses_direction() {
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Descending));
        assert!("down".parse::<SortDirection>().is_err());
    }
}
