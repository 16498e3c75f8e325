//! # Actions
//!
//! Everything that can happen in Aidboard becomes an `Action`.
//! User presses `r`? That's `Action::Refresh`.
//! API responds? That's `Action::Loaded(dataset)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` describing any I/O the caller must
//! perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::path::PathBuf;

use chrono::Local;
use log::{debug, info, warn};

use crate::api::{Dataset, Resource};
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    Quit,
    SwitchResource(Resource),
    Refresh,
    Loaded(Dataset),
    Failed(String),
    Delete { resource: Resource, id: i64 },
    Deleted { resource: Resource, id: i64 },
    /// Flip a family or member between active and inactive.
    ToggleStatus { resource: Resource, id: i64 },
    StatusChanged { resource: Resource, id: i64, status: String },
    /// Open this month's dues register.
    OpenRegister,
    RegisterOpened(String),
    Exported { path: PathBuf, count: usize },
    SignOut,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Fetch(Resource),
    Delete { resource: Resource, id: i64 },
    SetStatus { resource: Resource, id: i64, status: String },
    OpenRegister(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Quit => Effect::Quit,
        Action::SwitchResource(resource) => {
            app.resource = resource;
            app.error = None;
            if app.data.is_loaded(resource) {
                app.status_message = format!("{} ({})", resource.title(), app.data.len(resource));
                Effect::None
            } else {
                fetch(app, resource)
            }
        }
        Action::Refresh => fetch(app, app.resource),
        Action::Loaded(dataset) => {
            let resource = dataset.resource();
            let count = dataset.len();
            app.data.store(dataset);
            app.is_loading = false;
            if resource == app.resource {
                app.error = None;
            }
            app.status_message = format!("Loaded {count} {resource}");
            Effect::None
        }
        Action::Failed(message) => {
            warn!("Operation failed: {}", message);
            app.is_loading = false;
            if !app.data.is_loaded(app.resource) {
                app.error = Some(message.clone());
            }
            app.status_message = format!("Error: {message}");
            Effect::None
        }
        Action::Delete { resource, id } => {
            app.status_message = format!("Deleting #{id}...");
            Effect::Delete { resource, id }
        }
        Action::Deleted { resource, id } => {
            info!("Deleted {} {}", resource, id);
            app.status_message = format!("Deleted #{id}");
            fetch(app, resource)
        }
        Action::ToggleStatus { resource, id } => match app.data.status_of(resource, id) {
            Some(current) => {
                let status = if current.eq_ignore_ascii_case("active") {
                    "inactive"
                } else {
                    "active"
                };
                app.status_message = format!("Marking #{id} {status}...");
                Effect::SetStatus {
                    resource,
                    id,
                    status: status.to_string(),
                }
            }
            None => {
                app.status_message = format!("Cannot edit {resource} #{id}");
                Effect::None
            }
        },
        Action::StatusChanged { resource, id, status } => {
            app.status_message = format!("#{id} is now {status}");
            fetch(app, resource)
        }
        Action::OpenRegister => {
            let month = Local::now().format("%Y-%m").to_string();
            app.status_message = format!("Opening register for {month}...");
            Effect::OpenRegister(month)
        }
        Action::RegisterOpened(month) => {
            app.status_message = format!("Register for {month} opened");
            fetch(app, Resource::Registers)
        }
        Action::Exported { path, count } => {
            app.status_message = format!("Exported {count} rows to {}", path.display());
            Effect::None
        }
        Action::SignOut => {
            app.session.clear();
            app.data.clear();
            app.error = None;
            app.status_message = String::from("Signed out");
            Effect::None
        }
    }
}

fn fetch(app: &mut App, resource: Resource) -> Effect {
    app.is_loading = true;
    app.status_message = format!("Loading {resource}...");
    Effect::Fetch(resource)
}
