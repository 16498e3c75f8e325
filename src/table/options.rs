//! View configuration: which engine features a table instance turns on.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    View,
    Edit,
    Delete,
    Add,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            RowAction::View => "view",
            RowAction::Edit => "edit",
            RowAction::Delete => "delete",
            RowAction::Add => "add",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Table => ViewMode::Cards,
            ViewMode::Cards => ViewMode::Table,
        }
    }
}

/// Unknown keys are ignored when deserializing; missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewConfig {
    pub searchable: bool,
    pub filterable: bool,
    pub sortable: bool,
    pub pagination: bool,
    pub items_per_page: usize,
    pub actions: BTreeSet<RowAction>,
    pub mobile_view: ViewMode,
    pub exportable: bool,
    pub refreshable: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            searchable: false,
            filterable: false,
            sortable: false,
            pagination: true,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            actions: BTreeSet::new(),
            mobile_view: ViewMode::Table,
            exportable: false,
            refreshable: false,
        }
    }
}

impl ViewConfig {
    pub fn allows(&self, action: RowAction) -> bool {
        self.actions.contains(&action)
    }

    /// Page size, never zero.
    pub fn page_size(&self) -> usize {
        self.items_per_page.max(1)
    }
}
