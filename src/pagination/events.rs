//! Outbound events and derived views of the pagination state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Emitted after every navigation that actually changed the visible page.
///
/// The snapshot is taken once the mutation is fully applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEvent {
    /// The current page index.
    pub page_index: usize,

    /// Index of the page that was visible before the change.
    pub previous_page_index: usize,

    /// The current page size.
    pub page_size: usize,

    /// Total number of items being paged.
    pub length: usize,
}

/// Derived state returned by every mutator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub page_index: usize,
    pub page_size: usize,
    pub length: usize,

    /// Zero-based index of the last page, `-1` when there is none.
    pub last_page_index: i64,

    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub displayed_page_size_options: Vec<usize>,
    pub hide_page_size: bool,
    pub show_first_last_buttons: bool,
}

impl PageView {
    /// Whether `page_index` points past the last page.
    ///
    /// Direct assignment of the index or length is not re-validated, so a
    /// host can end up here after shrinking `length`. An emptied list only
    /// accepts page 0.
    pub fn is_out_of_range(&self) -> bool {
        let page_index = i64::try_from(self.page_index).unwrap_or(i64::MAX);
        self.page_size != 0 && page_index > self.last_page_index.max(0)
    }
}

/// A loosely typed property update coming from the host.
///
/// Values are coerced by [`crate::coerce`] before they touch the state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PaginatorInput {
    PageIndex(Value),
    Length(Value),
    PageSize(Value),
    PageSizeOptions(Value),
    HidePageSize(Value),
    ShowFirstLastButtons(Value),
}
