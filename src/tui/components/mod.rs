//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar with resource tabs and status
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep persistent state in `TuiState` and are wrapped per
//! frame for rendering:
//! - `DataTable`: One resource run through the table engine
//! - `FilterPanel`: Overlay for column filters
//! - `RecordDetail`: Overlay showing one record
//!
//! Each component file holds its state type, event type, rendering,
//! event handling and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (Top status bar)
//! ├── data_table.rs     (Table / card view)
//! ├── filter_panel.rs   (Filter overlay)
//! └── record_detail.rs  (Detail overlay)
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

pub mod data_table;
pub mod filter_panel;
pub mod record_detail;
mod title_bar;

pub use data_table::{DataTable, DataTableState, TableEvent};
pub use filter_panel::{FilterEvent, FilterPanel, FilterPanelState};
pub use record_detail::{DetailEvent, RecordDetail, RecordDetailState};
pub use title_bar::TitleBar;

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
