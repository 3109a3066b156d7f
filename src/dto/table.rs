use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::types::{Categorical, RecordId, TypeConstraintError};
use crate::table::controller::TableController;
use crate::table::filter::ListQuery;
use crate::table::record::{Record, SortValue};
use crate::table::sort::{SortDirection, SortState};
use crate::table::view::{Layout, RowRenderer, TableView};

/// Query string of a listing page or API call.
///
/// Empty strings are treated as absent so that `<select>` "All" options and
/// cleared inputs mean "no constraint".
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TableParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Ids of mobile cards rendered open.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

fn parse_categorical<C: Categorical>(
    value: &Option<String>,
) -> Result<Option<C>, TypeConstraintError> {
    present(value).map(str::parse::<C>).transpose()
}

impl TableParams {
    pub fn list_query<R: Record>(&self) -> Result<ListQuery<R>, TypeConstraintError> {
        let mut query = ListQuery::new();
        if let Some(search) = present(&self.search) {
            query.set_search(search);
        }
        query.status = parse_categorical::<R::Status>(&self.status)?;
        query.kind = parse_categorical::<R::Kind>(&self.kind)?;
        Ok(query)
    }

    /// Only sortable columns of `R` are accepted.
    pub fn sort_state<R: RowRenderer>(&self) -> Result<SortState, TypeConstraintError> {
        let Some(field) = present(&self.sort) else {
            return Ok(SortState::Unsorted);
        };
        if !R::COLUMNS
            .iter()
            .any(|column| column.sortable && column.key == field)
        {
            return Err(TypeConstraintError::UnknownValue(field.to_string()));
        }
        let direction = match present(&self.dir) {
            Some(dir) => dir.parse::<SortDirection>()?,
            None => SortDirection::Ascending,
        };
        Ok(SortState::by(field, direction))
    }

    /// Distinct valid ids from `expand`, in order of first appearance.
    pub fn expanded_ids(&self) -> Vec<RecordId> {
        let mut seen = HashSet::new();
        self.expand
            .iter()
            .filter_map(|id| RecordId::new(id.as_str()).ok())
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }

    /// Parameters after clicking the header of `field`.
    fn sorted_by(&self, sort: &SortState, field: &str) -> Self {
        let mut next_sort = sort.clone();
        next_sort.toggle(field);

        let mut params = self.clone();
        if let SortState::Sorted { field, direction } = next_sort {
            params.sort = Some(field);
            params.dir = Some(direction.as_str().to_string());
        }
        params
    }

    /// Keeps layout and sort, drops every filter.
    fn cleared(&self) -> Self {
        Self {
            sort: self.sort.clone(),
            dir: self.dir.clone(),
            width: self.width,
            ..Self::default()
        }
    }

    /// Link to `base_path` carrying these parameters. `base_path` may already
    /// have a query string of its own.
    pub fn href(&self, base_path: &str) -> String {
        let separator = if base_path.contains('?') { '&' } else { '?' };
        match serde_html_form::to_string(self) {
            Ok(query) if query.is_empty() => base_path.to_string(),
            Ok(query) => format!("{base_path}{separator}{query}"),
            Err(err) => {
                log::error!("Failed to encode table parameters: {err}");
                base_path.to_string()
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HeaderCell {
    pub key: &'static str,
    pub title: &'static str,
    pub sortable: bool,
    /// `asc`/`desc` on the sorted column.
    pub direction: Option<&'static str>,
    pub href: Option<String>,
}

/// Key the browser sorts a column by: `number` (dates as epoch millis) or
/// `text`. A cell without one holds a missing value.
#[derive(Debug, PartialEq, Serialize)]
pub struct CellSortKey {
    pub kind: &'static str,
    pub value: String,
}

impl From<SortValue> for CellSortKey {
    fn from(value: SortValue) -> Self {
        match value {
            SortValue::Number(number) => Self {
                kind: "number",
                value: number.to_string(),
            },
            SortValue::Date(date) => Self {
                kind: "number",
                value: date.timestamp_millis().to_string(),
            },
            SortValue::Text(text) => Self { kind: "text", value: text },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CellData {
    pub text: String,
    pub sort: Option<CellSortKey>,
}

/// One record, rendered for both layouts.
#[derive(Debug, Serialize)]
pub struct RowData {
    pub id: String,
    pub cells: Vec<CellData>,
    pub headline: String,
    pub summary: String,
    pub details: Vec<(&'static str, String)>,
    /// Whether the mobile card starts open.
    pub expanded: bool,
}

fn row_data<R: RowRenderer>(record: &R, expanded: bool) -> RowData {
    let cells = record
        .cells()
        .into_iter()
        .zip(R::COLUMNS)
        .map(|(text, column)| CellData {
            text,
            sort: column
                .sortable
                .then(|| record.sort_value(column.key))
                .flatten()
                .map(CellSortKey::from),
        })
        .collect();

    RowData {
        id: record.id().to_string(),
        cells,
        headline: record.headline(),
        summary: record.summary(),
        details: record.details(),
        expanded,
    }
}

#[derive(Debug, Serialize)]
pub struct FilterOption {
    pub value: &'static str,
    pub selected: bool,
}

/// Everything `partials/table.html` needs to render one of the four table
/// states.
///
/// A populated page carries both layouts. `layout` only picks the one shown
/// first; the browser switches layouts, sorts and expands cards over these
/// rows without another request.
#[derive(Debug, Serialize)]
pub struct TablePage {
    /// `loading`, `error`, `empty` or `populated`.
    pub view: &'static str,
    pub layout: Layout,
    pub skeleton_rows: usize,
    pub error: Option<String>,
    pub filtered: bool,
    pub columns: Vec<HeaderCell>,
    pub rows: Vec<RowData>,
    pub search: String,
    pub status_options: Vec<FilterOption>,
    pub kind_options: Vec<FilterOption>,
    pub base_path: String,
    pub retry_href: String,
    pub clear_href: String,
}

fn options<C: Categorical>(selected: Option<C>) -> Vec<FilterOption> {
    C::ALL
        .iter()
        .map(|member| FilterOption {
            value: member.as_str(),
            selected: selected == Some(*member),
        })
        .collect()
}

impl TablePage {
    pub fn build<R: RowRenderer>(
        base_path: &str,
        params: &TableParams,
        controller: &TableController<R>,
    ) -> Self {
        let sort = controller.sort();
        let query = controller.query();

        let columns = R::COLUMNS
            .iter()
            .map(|column| HeaderCell {
                key: column.key,
                title: column.title,
                sortable: column.sortable,
                direction: sort
                    .direction_of(column.key)
                    .map(|direction| direction.as_str()),
                href: column
                    .sortable
                    .then(|| params.sorted_by(sort, column.key).href(base_path)),
            })
            .collect();

        let mut page = Self {
            view: "",
            layout: controller.layout(),
            skeleton_rows: controller.layout().skeleton_rows(),
            error: None,
            filtered: query.is_filtered(),
            columns,
            rows: Vec::new(),
            search: query.search_term.clone().unwrap_or_default(),
            status_options: options(query.status),
            kind_options: options(query.kind),
            base_path: base_path.to_string(),
            retry_href: params.href(base_path),
            clear_href: params.cleared().href(base_path),
        };

        let view = controller.view();
        page.view = view.name();
        match view {
            TableView::Loading { skeleton_rows } => page.skeleton_rows = skeleton_rows,
            TableView::Error { message } => page.error = Some(message.to_string()),
            TableView::Empty { filtered } => page.filtered = filtered,
            TableView::Populated { layout, rows } => {
                page.layout = layout;
                page.rows = rows
                    .into_iter()
                    .map(|row| row_data(row.record, row.expanded))
                    .collect();
            }
        }

        page
    }
}
