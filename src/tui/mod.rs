//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! key press ─▶ overlay? ─▶ global keys? ─▶ DataTable ─▶ TableEvent ─▶ Action
//!                                                                       │
//!          ┌──────────── Action (mpsc) ◀── tokio task ◀── Effect ◀── update()
//!          ▼
//!       update()
//! ```
//!
//! API calls run as tokio tasks and report back over a channel, so the loop
//! never blocks on the network. While a call is in flight the loop redraws
//! every ~80ms to animate the spinner; otherwise it only redraws on input.

/// Run `$body` with the records and column set of `$resource` bound to the
/// given names.
macro_rules! with_table {
    ($app:expr, $resource:expr, |$records:ident, $columns:ident| $body:expr) => {
        match $resource {
            $crate::api::Resource::Families => {
                let ($records, $columns) =
                    ($app.data.families.as_slice(), $app.catalog.families.as_slice());
                $body
            }
            $crate::api::Resource::Members => {
                let ($records, $columns) =
                    ($app.data.members.as_slice(), $app.catalog.members.as_slice());
                $body
            }
            $crate::api::Resource::Registers => {
                let ($records, $columns) =
                    ($app.data.registers.as_slice(), $app.catalog.registers.as_slice());
                $body
            }
            $crate::api::Resource::Supports => {
                let ($records, $columns) =
                    ($app.data.supports.as_slice(), $app.catalog.supports.as_slice());
                $body
            }
        }
    };
}

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::io;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use ratatui::DefaultTerminal;

use crate::api::{FundApi, HttpFundApi, Resource};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::export::{export_records, selected_records};
use crate::core::state::App;
use crate::table::{Record, RowAction, ViewMode};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DataTable, DataTableState, DetailEvent, FilterEvent, FilterPanelState, RecordDetailState,
    TableEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// API calls that take longer than this are reported as failed.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Modal overlays drawn above the table.
pub enum Overlay {
    Filters(FilterPanelState),
    Detail(RecordDetailState),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    tables: HashMap<Resource, DataTableState>,
    default_mode: ViewMode,
    pub overlay: Option<Overlay>,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(default_mode: ViewMode) -> Self {
        Self {
            tables: HashMap::new(),
            default_mode,
            overlay: None,
            spinner_frame: 0,
        }
    }

    /// Table state for a resource, created on first use.
    pub fn table_mut(&mut self, resource: Resource) -> &mut DataTableState {
        let mode = self.default_mode;
        self.tables
            .entry(resource)
            .or_insert_with(|| DataTableState::new(mode))
    }

    /// Forget every search, filter, sort and selection.
    pub fn reset_tables(&mut self) {
        self.tables.clear();
        self.overlay = None;
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let api: Arc<dyn FundApi> = Arc::new(
        HttpFundApi::new(config.api_base_url.clone())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
    );
    let mut app = App::from_config(api, &config);
    let mut tui = TuiState::new(app.view_mode);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let effect = update(&mut app, Action::Refresh);
    run_effect(&app, effect, &tx);

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &mut tui, &tx, &rx);
    ratatui::restore();
    info!("Aidboard shutting down");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
    rx: &mpsc::Receiver<Action>,
) -> io::Result<()> {
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        if app.is_loading {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        // Short timeout while animating the spinner, long when idle
        let timeout = if app.is_loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(app, tui, event, tx) {
                return Ok(());
            }
        }

        // Handle results from background API calls
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let loaded = match &action {
                Action::Loaded(dataset) => Some(dataset.resource()),
                _ => None,
            };
            let effect = update(app, action);
            if let Some(resource) = loaded {
                prune_selection(app, tui, resource);
            }
            if run_effect(app, effect, tx) {
                return Ok(());
            }
        }
    }
}

/// Route one key press. Returns true when the app should quit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        TuiEvent::Resize => return false,
        // ForceQuit (Ctrl+C) always quits regardless of focus
        TuiEvent::ForceQuit => {
            let effect = update(app, Action::Quit);
            return run_effect(app, effect, tx);
        }
        _ => {}
    }

    let resource = app.resource;

    // When an overlay is open, route all events to it
    if let Some(mut overlay) = tui.overlay.take() {
        let keep_open = match &mut overlay {
            Overlay::Filters(panel) => match panel.handle_event(&event) {
                Some(FilterEvent::Set { key, value }) => {
                    let table = tui.table_mut(resource);
                    table.view.set_filter(key, value);
                    table.cursor = 0;
                    true
                }
                Some(FilterEvent::ClearAll) => {
                    let table = tui.table_mut(resource);
                    table.view.clear_filters();
                    table.cursor = 0;
                    true
                }
                Some(FilterEvent::Dismiss) => false,
                None => true,
            },
            Overlay::Detail(detail) => {
                !matches!(detail.handle_event(&event), Some(DetailEvent::Dismiss))
            }
        };
        if keep_open {
            tui.overlay = Some(overlay);
        }
        return false;
    }

    // Global keys, unless the search line is taking input
    if !tui.table_mut(resource).is_capturing_text() {
        let action = match event {
            TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::NextResource => Some(Action::SwitchResource(resource.next())),
            TuiEvent::PrevResource => Some(Action::SwitchResource(resource.prev())),
            TuiEvent::InputChar('O') => {
                tui.reset_tables();
                Some(Action::SignOut)
            }
            _ => None,
        };
        if let Some(action) = action {
            let effect = update(app, action);
            return run_effect(app, effect, tx);
        }
    }

    let config = app.view_config(resource);
    let state = tui.table_mut(resource);
    let table_event = with_table!(app, resource, |records, columns| {
        DataTable::new(state, records, columns, &config, &app.formatter).handle_event(&event)
    });
    let Some(table_event) = table_event else {
        return false;
    };
    debug!("Table event on {}: {:?}", resource, table_event);

    let action = match table_event {
        TableEvent::Row(RowAction::View, id) => {
            open_detail(app, tui, resource, id);
            None
        }
        TableEvent::Row(RowAction::Edit, id) => Some(Action::ToggleStatus { resource, id }),
        TableEvent::Row(RowAction::Delete, id) => Some(Action::Delete { resource, id }),
        TableEvent::Row(RowAction::Add, _) | TableEvent::Add => {
            (resource == Resource::Registers).then_some(Action::OpenRegister)
        }
        TableEvent::Export => Some(export_selection(app, tui, resource)),
        TableEvent::Refresh => Some(Action::Refresh),
        TableEvent::OpenFilters => {
            let view = &tui.table_mut(resource).view;
            let panel = with_table!(app, resource, |_records, columns| {
                FilterPanelState::new(columns, view)
            });
            tui.overlay = Some(Overlay::Filters(panel));
            None
        }
    };

    match action {
        Some(action) => {
            let effect = update(app, action);
            run_effect(app, effect, tx)
        }
        None => false,
    }
}

fn open_detail(app: &App, tui: &mut TuiState, resource: Resource, id: i64) {
    let detail = with_table!(app, resource, |records, columns| {
        records.iter().find(|r| r.id() == id).map(|record| {
            RecordDetailState::new(
                format!("{} #{id}", resource.title()),
                record,
                columns,
                &app.formatter,
            )
        })
    });
    if detail.is_none() {
        warn!("No {} record with id {}", resource, id);
    }
    tui.overlay = detail.map(Overlay::Detail);
}

/// Write the selected rows of the current table to the exports directory.
fn export_selection(app: &App, tui: &mut TuiState, resource: Resource) -> Action {
    let Some(dir) = app.exports_dir.clone() else {
        return Action::Failed("export failed: no home directory".to_string());
    };
    let config = app.view_config(resource);
    let view = &tui.table_mut(resource).view;
    let result = with_table!(app, resource, |records, columns| {
        let chosen = selected_records(records, columns, &config, view);
        let count = chosen.len();
        if count == 0 {
            return Action::Failed("nothing to export: selected rows are filtered out".to_string());
        }
        export_records(&dir, resource, chosen).map(|path| (path, count))
    });
    match result {
        Ok((path, count)) => Action::Exported { path, count },
        Err(e) => Action::Failed(format!("export failed: {e}")),
    }
}

/// Drop selections whose records disappeared in the latest fetch.
fn prune_selection(app: &App, tui: &mut TuiState, resource: Resource) {
    let state = tui.table_mut(resource);
    with_table!(app, resource, |records, _columns| {
        let live: HashSet<i64> = records.iter().map(|r| r.id()).collect();
        state.view.retain_selected(|id| live.contains(id));
    });
}

/// Perform the I/O an `update()` asked for. Returns true on quit.
fn run_effect(app: &App, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    let api = app.api.clone();
    let session = app.session.clone();
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::Fetch(resource) => spawn_call(tx.clone(), async move {
            match api.fetch(resource, &session).await {
                Ok(dataset) => Action::Loaded(dataset),
                Err(e) => Action::Failed(e.to_string()),
            }
        }),
        Effect::Delete { resource, id } => spawn_call(tx.clone(), async move {
            match api.delete(resource, id, &session).await {
                Ok(()) => Action::Deleted { resource, id },
                Err(e) => Action::Failed(e.to_string()),
            }
        }),
        Effect::SetStatus { resource, id, status } => spawn_call(tx.clone(), async move {
            match api.set_status(resource, id, &status, &session).await {
                Ok(()) => Action::StatusChanged { resource, id, status },
                Err(e) => Action::Failed(e.to_string()),
            }
        }),
        Effect::OpenRegister(month) => spawn_call(tx.clone(), async move {
            match api.open_register(&month, &session).await {
                Ok(()) => Action::RegisterOpened(month),
                Err(e) => Action::Failed(e.to_string()),
            }
        }),
    }
    false
}

fn spawn_call<F>(tx: mpsc::Sender<Action>, call: F)
where
    F: Future<Output = Action> + Send + 'static,
{
    tokio::spawn(async move {
        let action = match tokio::time::timeout(REQUEST_TIMEOUT, call).await {
            Ok(action) => action,
            Err(_) => {
                warn!("API call timed out after {:?}", REQUEST_TIMEOUT);
                Action::Failed(format!("request timed out after {}s", REQUEST_TIMEOUT.as_secs()))
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to send API result: receiver dropped");
        }
    });
}
