//! # View State
//!
//! Transient UI state owned by one table instance: search term, active
//! filters, sort, current page and selection. Created with the table and
//! dropped with it; never persisted.
//!
//! Every mutation goes through a method so the paging side effects stay in
//! one place:
//!
//! - new search term or filter value → back to page 1
//! - new sort column → page untouched
//! - `clear_filters()` → search, filters and page reset together

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

/// Sentinel filter value meaning "no filter".
pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub key: Option<String>,
    pub direction: SortDirection,
}

#[derive(Debug, Clone)]
pub struct ViewState<Id> {
    pub search_term: String,
    /// Column key → selected filter value. Ordered so recomputation is
    /// deterministic.
    pub filters: BTreeMap<String, String>,
    pub sort: SortConfig,
    /// 1-based.
    pub current_page: usize,
    pub selected: HashSet<Id>,
}

impl<Id> Default for ViewState<Id> {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            filters: BTreeMap::new(),
            sort: SortConfig::default(),
            current_page: 1,
            selected: HashSet::new(),
        }
    }
}

impl<Id: Clone + Eq + Hash> ViewState<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    /// Set a column filter. Empty or `"all"` removes it.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() || value == FILTER_ALL {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value);
        }
        self.current_page = 1;
    }

    /// The active (non-empty, non-"all") value for a column, if any.
    pub fn filter_value(&self, key: &str) -> Option<&str> {
        self.filters
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty() && *v != FILTER_ALL)
    }

    /// Sort by `key`. Re-sorting the active column flips direction; a new
    /// column starts ascending.
    pub fn sort_by(&mut self, key: &str) {
        if self.sort.key.as_deref() == Some(key) {
            self.sort.direction = self.sort.direction.toggle();
        } else {
            self.sort = SortConfig {
                key: Some(key.to_string()),
                direction: SortDirection::Asc,
            };
        }
    }

    pub fn clear_filters(&mut self) {
        self.search_term.clear();
        self.filters.clear();
        self.current_page = 1;
    }

    /// True when search or any filter is narrowing the records.
    pub fn is_narrowed(&self) -> bool {
        !self.search_term.is_empty() || self.has_active_filters()
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.keys().any(|k| self.filter_value(k).is_some())
    }

    /// Move to `page`, clamped to `1..=total_pages` (page 1 when there are none).
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.current_page < total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn toggle_select_row(&mut self, id: Id) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Page-scoped select-all: if every id on the page is already selected,
    /// deselect exactly those; otherwise select them all. Selections on
    /// other pages are left alone.
    pub fn toggle_select_all(&mut self, page_ids: &[Id]) {
        let all_selected =
            !page_ids.is_empty() && page_ids.iter().all(|id| self.selected.contains(id));
        if all_selected {
            for id in page_ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(page_ids.iter().cloned());
        }
    }

    /// Forget selections whose records are gone (e.g. after a refresh).
    pub fn retain_selected(&mut self, live: impl Fn(&Id) -> bool) {
        self.selected.retain(|id| live(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ViewState::<i64>::new();
        assert_eq!(state.search_term, "");
        assert!(state.filters.is_empty());
        assert_eq!(state.sort, SortConfig { key: None, direction: SortDirection::Asc });
        assert_eq!(state.current_page, 1);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = ViewState::<i64>::new();
        state.current_page = 3;
        state.set_search("khan");
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_filter_resets_page_and_all_removes() {
        let mut state = ViewState::<i64>::new();
        state.current_page = 2;
        state.set_filter("status", "active");
        assert_eq!(state.current_page, 1);
        assert_eq!(state.filter_value("status"), Some("active"));

        state.current_page = 2;
        state.set_filter("status", FILTER_ALL);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.filter_value("status"), None);
        assert!(!state.is_narrowed());
    }

    #[test]
    fn test_sort_keeps_page_and_toggles() {
        let mut state = ViewState::<i64>::new();
        state.current_page = 2;
        state.sort_by("family_name");
        assert_eq!(state.current_page, 2);
        assert_eq!(state.sort.direction, SortDirection::Asc);
        state.sort_by("family_name");
        assert_eq!(state.sort.direction, SortDirection::Desc);
        state.sort_by("status");
        assert_eq!(state.sort.key.as_deref(), Some("status"));
        assert_eq!(state.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_clear_filters_is_atomic() {
        let mut state = ViewState::<i64>::new();
        state.set_search("x");
        state.set_filter("status", "active");
        state.current_page = 4;
        state.clear_filters();
        assert_eq!(state.search_term, "");
        assert!(state.filters.is_empty());
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut state = ViewState::<i64>::new();
        state.set_page(9, 3);
        assert_eq!(state.current_page, 3);
        state.set_page(0, 3);
        assert_eq!(state.current_page, 1);
        state.set_page(5, 0);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_toggle_select_all_is_page_scoped() {
        let mut state = ViewState::<i64>::new();
        let page: Vec<i64> = (1..=10).collect();
        state.selected.extend([1, 2, 3, 99]);

        state.toggle_select_all(&page);
        assert!(page.iter().all(|id| state.selected.contains(id)));

        state.toggle_select_all(&page);
        assert!(page.iter().all(|id| !state.selected.contains(id)));
        // Off-page selection survives
        assert!(state.selected.contains(&99));
    }

    #[test]
    fn test_count_coincidence_does_not_deselect() {
        // Ten ids selected elsewhere must not count as "this page is selected"
        let mut state = ViewState::<i64>::new();
        state.selected.extend(11..=20);
        let page: Vec<i64> = (1..=10).collect();
        state.toggle_select_all(&page);
        assert_eq!(state.selected.len(), 20);
    }

    #[test]
    fn test_toggle_select_row() {
        let mut state = ViewState::<i64>::new();
        state.toggle_select_row(7);
        assert!(state.selected.contains(&7));
        state.toggle_select_row(7);
        assert!(!state.selected.contains(&7));
    }
}
