//! Render model produced from the table state.

use serde::Serialize;

use crate::table::record::Record;

/// Widths below this render as stacked cards.
pub const MOBILE_BREAKPOINT: u32 = 768;

pub const DESKTOP_SKELETON_ROWS: usize = 5;
pub const MOBILE_SKELETON_CARDS: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Desktop,
    Mobile,
}

impl Layout {
    pub fn for_width(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            Layout::Mobile
        } else {
            Layout::Desktop
        }
    }

    pub fn skeleton_rows(self) -> usize {
        match self {
            Layout::Desktop => DESKTOP_SKELETON_ROWS,
            Layout::Mobile => MOBILE_SKELETON_CARDS,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct RowView<'a, R> {
    pub record: &'a R,
    /// Only meaningful for mobile cards.
    pub expanded: bool,
}

/// Exactly one of these is shown at a time.
#[derive(Debug, PartialEq)]
pub enum TableView<'a, R> {
    Loading { skeleton_rows: usize },
    Error { message: &'a str },
    /// `filtered` offers the clear-filters action.
    Empty { filtered: bool },
    Populated {
        layout: Layout,
        rows: Vec<RowView<'a, R>>,
    },
}

impl<R> TableView<'_, R> {
    pub fn name(&self) -> &'static str {
        match self {
            TableView::Loading { .. } => "loading",
            TableView::Error { .. } => "error",
            TableView::Empty { .. } => "empty",
            TableView::Populated { .. } => "populated",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Dotted field path used as the sort key.
    pub key: &'static str,
    pub title: &'static str,
    pub sortable: bool,
}

impl Column {
    pub const fn sortable(key: &'static str, title: &'static str) -> Self {
        Self {
            key,
            title,
            sortable: true,
        }
    }

    pub const fn fixed(key: &'static str, title: &'static str) -> Self {
        Self {
            key,
            title,
            sortable: false,
        }
    }
}

/// Per-domain presentation of a record.
pub trait RowRenderer: Record {
    const COLUMNS: &'static [Column];

    /// One display string per entry of `COLUMNS`.
    fn cells(&self) -> Vec<String>;

    /// Mobile card title.
    fn headline(&self) -> String;

    /// Mobile card subtitle, always visible.
    fn summary(&self) -> String;

    /// Label/value pairs revealed when a card is expanded.
    fn details(&self) -> Vec<(&'static str, String)>;
}
