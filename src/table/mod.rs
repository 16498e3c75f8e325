//! # Tabular Data Engine
//!
//! Generic filter + sort + paginate + format over any `Record` type. Knows
//! nothing about terminals or the fund API: callers hand in records, column
//! descriptors, a `ViewConfig` and a `ViewState`, and get back the rows to
//! show.
//!
//! ```text
//!  records[] ──┐
//!  columns[] ──┼──▶ compute_view() ──▶ ComputedView { visible_rows, totals }
//!  config ─────┤                              │
//!  state ──────┘                              ▼
//!                                    render_cell() per visible cell
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Record` trait and the `Value` cell type
//! - [`column`]: column descriptors (accessor, type, sort, filter options)
//! - [`options`]: `ViewConfig`, row actions, table/cards mode
//! - [`state`]: transient `ViewState` and its paging side effects
//! - [`pipeline`]: `compute_view()`
//! - [`format`]: `render_cell()` and per-type formatting
//! - [`pager`]: the bounded page-number window

pub mod column;
pub mod format;
pub mod options;
pub mod pager;
pub mod pipeline;
pub mod state;
pub mod value;

pub use column::{Accessor, Column, ColumnType, FilterOption, FilterType};
pub use format::{Badge, CellContent, CellFormatter, render_cell};
pub use options::{RowAction, ViewConfig, ViewMode};
pub use pager::{PageItem, page_window};
pub use pipeline::{ComputedView, EmptyState, compute_view, process};
pub use state::{FILTER_ALL, SortConfig, SortDirection, ViewState};
pub use value::{Record, Value};
