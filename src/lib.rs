//! paginator
//!
//! Pagination state for hosts that render page buttons and a page-size
//! selector themselves. The crate owns the arithmetic: the last page index,
//! which navigation moves are legal, and where to land when the page size
//! changes mid-browse.
//!
//! Public API:
//! - `PaginationState` - page index, page size, length and size options
//! - `PageEvent` / `PageView` - change notification and derived view
//! - `PaginatorInput` - raw host updates, coerced on the way in
//! - `PaginatorIntl` - label provider whose changes trigger re-renders
//! - `PaginatorConfig` - default options from file and environment

pub mod coerce;
pub mod config;
pub mod errors;
pub mod intl;
pub mod pagination;

pub use config::PaginatorConfig;
pub use errors::{PaginatorError, PaginatorResult};
pub use intl::{IntlLabels, IntlSubscription, PaginatorIntl};
pub use pagination::{PageEvent, PageView, PaginationState, PaginatorInput, DEFAULT_PAGE_SIZE};
