//! # Core Application Logic
//!
//! This module contains Aidboard's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Resource schemas     │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Fund API  │
//!     │  Adapter   │                          │  (reqwest) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`resources`]: Column sets and view configs per resource
//! - [`config`]: `~/.aidboard/config.toml` loading and resolution
//! - [`session`]: Credentials handed to every API call
//! - [`export`]: Writing selected rows to disk

pub mod action;
pub mod config;
pub mod export;
pub mod resources;
pub mod session;
pub mod state;
