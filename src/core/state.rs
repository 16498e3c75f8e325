//! # Application State
//!
//! Core business state for Aidboard. This module contains domain logic only -
//! no TUI-specific types. Presentation state (search boxes, selections,
//! current page) lives with the table views in the `tui` module.
//!
//! ```text
//! App
//! ├── api: Arc<dyn FundApi>        // remote fund API
//! ├── session: Session             // credentials, passed to every call
//! ├── resource: Resource           // collection on screen
//! ├── data: Datasets               // last fetched records per resource
//! ├── catalog: Catalog             // column sets per resource
//! ├── items_per_page / view_mode   // table defaults
//! ├── formatter: CellFormatter     // currency and date display
//! ├── status_message: String       // status bar text
//! ├── is_loading: bool             // waiting for the API
//! ├── error: Option<String>        // fetch failure for the current view
//! └── exports_dir: Option<PathBuf> // where exports are written
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{Dataset, Family, FundApi, Member, Register, Resource, Support};
use crate::core::config::{ResolvedConfig, app_dir};
use crate::core::resources::{Catalog, view_config};
use crate::core::session::Session;
use crate::table::options::DEFAULT_ITEMS_PER_PAGE;
use crate::table::{CellFormatter, ViewConfig, ViewMode};

/// Records fetched so far, one slot per resource. The API is the source of
/// truth; these are replaced wholesale on every fetch.
#[derive(Debug, Default)]
pub struct Datasets {
    pub families: Vec<Family>,
    pub members: Vec<Member>,
    pub registers: Vec<Register>,
    pub supports: Vec<Support>,
    loaded: HashSet<Resource>,
}

impl Datasets {
    pub fn store(&mut self, dataset: Dataset) {
        self.loaded.insert(dataset.resource());
        match dataset {
            Dataset::Families(v) => self.families = v,
            Dataset::Members(v) => self.members = v,
            Dataset::Registers(v) => self.registers = v,
            Dataset::Supports(v) => self.supports = v,
        }
    }

    pub fn is_loaded(&self, resource: Resource) -> bool {
        self.loaded.contains(&resource)
    }

    pub fn len(&self, resource: Resource) -> usize {
        match resource {
            Resource::Families => self.families.len(),
            Resource::Members => self.members.len(),
            Resource::Registers => self.registers.len(),
            Resource::Supports => self.supports.len(),
        }
    }

    /// Current status of a family or member, if present.
    pub fn status_of(&self, resource: Resource, id: i64) -> Option<&str> {
        match resource {
            Resource::Families => self.families.iter().find(|f| f.id == id).map(|f| f.status.as_str()),
            Resource::Members => self.members.iter().find(|m| m.id == id).map(|m| m.status.as_str()),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct App {
    pub api: Arc<dyn FundApi>,
    pub session: Session,
    pub resource: Resource,
    pub data: Datasets,
    pub catalog: Catalog,
    pub items_per_page: usize,
    pub view_mode: ViewMode,
    pub formatter: CellFormatter,
    pub status_message: String,
    pub is_loading: bool,
    pub error: Option<String>,
    pub exports_dir: Option<PathBuf>,
}

impl App {
    pub fn new(api: Arc<dyn FundApi>, session: Session) -> Self {
        Self {
            api,
            session,
            resource: Resource::default(),
            data: Datasets::default(),
            catalog: Catalog::new(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            view_mode: ViewMode::default(),
            formatter: CellFormatter::default(),
            status_message: String::from("Welcome to Aidboard"),
            is_loading: false,
            error: None,
            exports_dir: app_dir().map(|d| d.join("exports")),
        }
    }

    pub fn from_config(api: Arc<dyn FundApi>, config: &ResolvedConfig) -> Self {
        let session = Session::new(config.api_token.clone(), config.api_user.clone());
        Self {
            resource: config.resource,
            items_per_page: config.items_per_page,
            view_mode: config.view_mode,
            formatter: config.formatter.clone(),
            ..Self::new(api, session)
        }
    }

    pub fn view_config(&self, resource: Resource) -> ViewConfig {
        view_config(resource, self.items_per_page, self.view_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{family, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Aidboard");
        assert!(!app.is_loading);
        assert_eq!(app.resource, Resource::Families);
        assert!(!app.data.is_loaded(Resource::Families));
    }

    #[test]
    fn test_datasets_store_and_status() {
        let mut data = Datasets::default();
        data.store(Dataset::Families(vec![family(1, "Ansari", "active")]));
        assert!(data.is_loaded(Resource::Families));
        assert_eq!(data.len(Resource::Families), 1);
        assert_eq!(data.status_of(Resource::Families, 1), Some("active"));
        assert_eq!(data.status_of(Resource::Families, 2), None);
        data.clear();
        assert!(!data.is_loaded(Resource::Families));
    }
}
