//! # View Pipeline
//!
//! ```text
//! records ─▶ search ─▶ filter ─▶ sort ─▶ paginate ─▶ visible_rows
//! ```
//!
//! The order is fixed: both narrowing steps run before the sort, and the
//! sort runs before slicing. The whole pipeline is recomputed from scratch
//! on every call; it is a pure function of its inputs.

use log::debug;

use super::column::Column;
use super::options::ViewConfig;
use super::state::{SortDirection, ViewState};
use super::value::Record;

/// Why a view has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing was supplied at all.
    NoData,
    /// Records exist (or may exist) but search/filters exclude all of them.
    NoMatches,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoData => "No records yet.",
            EmptyState::NoMatches => "No records match the current search or filters.",
        }
    }

    pub fn offers_clear_filters(self) -> bool {
        matches!(self, EmptyState::NoMatches)
    }
}

#[derive(Debug)]
pub struct ComputedView<'a, R> {
    pub visible_rows: Vec<&'a R>,
    pub total_filtered_count: usize,
    /// 0 when pagination is on and nothing matched; 1 when pagination is off.
    pub total_pages: usize,
    pub current_page: usize,
    pub empty_state: Option<EmptyState>,
}

impl<R: Record> ComputedView<'_, R> {
    pub fn page_ids(&self) -> Vec<R::Id> {
        self.visible_rows.iter().map(|r| r.id()).collect()
    }
}

/// Search, filter and sort without slicing.
pub fn process<'a, R: Record>(
    records: &'a [R],
    columns: &[Column<R>],
    config: &ViewConfig,
    state: &ViewState<R::Id>,
) -> Vec<&'a R> {
    let mut rows: Vec<&R> = records.iter().collect();

    if config.searchable && !state.search_term.is_empty() {
        let needle = state.search_term.to_lowercase();
        rows.retain(|record| {
            columns
                .iter()
                .any(|col| col.extract(record).folded().contains(&needle))
        });
    }

    let active: Vec<(&Column<R>, &str)> = state
        .filters
        .keys()
        .filter_map(|key| {
            let value = state.filter_value(key)?;
            let column = columns.iter().find(|c| &c.key == key)?;
            Some((column, value))
        })
        .collect();
    if !active.is_empty() {
        rows.retain(|record| {
            active
                .iter()
                .all(|(column, value)| column.matches_filter(record, value))
        });
    }

    if config.sortable
        && let Some(key) = state.sort.key.as_deref()
        && let Some(column) = columns.iter().find(|c| c.key == key)
    {
        let direction = state.sort.direction;
        // `sort_by` is stable: ties keep their input order in both directions
        rows.sort_by(|a, b| {
            let (va, vb) = (column.extract(a), column.extract(b));
            match &column.sort_fn {
                Some(sort_fn) => sort_fn(&va, &vb, direction),
                None => {
                    let ord = va.compare(&vb);
                    match direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                }
            }
        });
    }

    rows
}

pub fn compute_view<'a, R: Record>(
    records: &'a [R],
    columns: &[Column<R>],
    config: &ViewConfig,
    state: &ViewState<R::Id>,
) -> ComputedView<'a, R> {
    let rows = process(records, columns, config, state);
    let total_filtered_count = rows.len();

    let (visible_rows, total_pages) = if config.pagination {
        let per_page = config.page_size();
        let start = state.current_page.saturating_sub(1).saturating_mul(per_page);
        let visible = rows.into_iter().skip(start).take(per_page).collect();
        (visible, total_filtered_count.div_ceil(per_page))
    } else {
        (rows, 1)
    };

    // A search term only narrows when search is switched on
    let narrowed =
        (config.searchable && !state.search_term.is_empty()) || state.has_active_filters();
    let empty_state = (total_filtered_count == 0).then(|| {
        if narrowed && !records.is_empty() {
            EmptyState::NoMatches
        } else {
            EmptyState::NoData
        }
    });

    debug!(
        "compute_view: {} records -> {} filtered, page {}/{}",
        records.len(),
        total_filtered_count,
        state.current_page,
        total_pages
    );

    ComputedView {
        visible_rows,
        total_filtered_count,
        total_pages,
        current_page: state.current_page,
        empty_state,
    }
}
