//! # Filter Panel Component
//!
//! Overlay listing every filterable column of the current table. Opened
//! with `f`, dismissed with Esc.
//!
//! Select columns cycle through `All` and their options with ←/→ or Enter.
//! Text and date columns open an inline editor on Enter; the value is
//! applied when Enter is pressed again.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FilterPanelState` lives in `TuiState` while the overlay is open
//! - `FilterPanel` is created each frame with borrowed state

use std::collections::BTreeMap;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use super::centered_rect;
use crate::table::{Column, FILTER_ALL, FilterType, Record, ViewState};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// One filterable column, detached from its record type.
#[derive(Debug, Clone)]
pub struct FilterField {
    pub key: String,
    pub header: String,
    pub filter_type: FilterType,
    /// `(value, label)` pairs.
    pub options: Vec<(String, String)>,
}

impl FilterField {
    fn cycles(&self) -> bool {
        self.filter_type == FilterType::Select && !self.options.is_empty()
    }
}

/// Persistent state for the filter overlay.
pub struct FilterPanelState {
    pub fields: Vec<FilterField>,
    /// Mirror of the table's active filters.
    pub values: BTreeMap<String, String>,
    pub selected: usize,
    /// Text being typed for a text/date field.
    pub editing: Option<String>,
    list_state: ListState,
}

impl FilterPanelState {
    pub fn new<R: Record>(columns: &[Column<R>], view: &ViewState<R::Id>) -> Self {
        let fields: Vec<FilterField> = columns
            .iter()
            .filter(|c| c.filterable)
            .map(|c| FilterField {
                key: c.key.clone(),
                header: c.header.clone(),
                filter_type: c.filter_type,
                options: c
                    .filter_options
                    .iter()
                    .map(|o| (o.value.clone(), o.label.clone()))
                    .collect(),
            })
            .collect();
        let mut list_state = ListState::default();
        if !fields.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            fields,
            values: view.filters.clone(),
            selected: 0,
            editing: None,
            list_state,
        }
    }

    fn current_value(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or(FILTER_ALL)
    }

    /// Display label for a field's current value.
    pub fn value_label(&self, field: &FilterField) -> String {
        let value = self.current_value(&field.key);
        if value == FILTER_ALL {
            return "All".to_string();
        }
        field
            .options
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, label)| label.clone())
            .unwrap_or_else(|| value.to_string())
    }

    fn set(&mut self, key: String, value: String) -> FilterEvent {
        if value.is_empty() || value == FILTER_ALL {
            self.values.remove(&key);
        } else {
            self.values.insert(key.clone(), value.clone());
        }
        FilterEvent::Set { key, value }
    }

    fn step(&mut self, forward: bool) -> Option<FilterEvent> {
        let field = self.fields.get(self.selected)?.clone();
        if !field.cycles() {
            return None;
        }
        let mut values = vec![FILTER_ALL.to_string()];
        values.extend(field.options.iter().map(|(v, _)| v.clone()));
        let current = self.current_value(&field.key);
        let pos = values.iter().position(|v| v == current).unwrap_or(0);
        let next = if forward {
            (pos + 1) % values.len()
        } else {
            (pos + values.len() - 1) % values.len()
        };
        Some(self.set(field.key, values[next].clone()))
    }

    fn move_selection(&mut self, down: bool) {
        if self.fields.is_empty() {
            return;
        }
        self.selected = if down {
            (self.selected + 1).min(self.fields.len() - 1)
        } else {
            self.selected.saturating_sub(1)
        };
        self.list_state.select(Some(self.selected));
    }
}

/// Events emitted by the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Set { key: String, value: String },
    ClearAll,
    Dismiss,
}

impl EventHandler for FilterPanelState {
    type Event = FilterEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FilterEvent> {
        if let Some(buffer) = self.editing.as_mut() {
            match event {
                TuiEvent::InputChar(c) => buffer.push(*c),
                TuiEvent::Backspace => {
                    buffer.pop();
                }
                TuiEvent::Submit => {
                    let value = buffer.trim().to_string();
                    self.editing = None;
                    let key = self.fields.get(self.selected)?.key.clone();
                    return Some(self.set(key, value));
                }
                TuiEvent::Escape => self.editing = None,
                _ => {}
            }
            return None;
        }

        match event {
            TuiEvent::Escape => Some(FilterEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.move_selection(false);
                None
            }
            TuiEvent::CursorDown => {
                self.move_selection(true);
                None
            }
            TuiEvent::PagePrev => self.step(false),
            TuiEvent::PageNext => self.step(true),
            TuiEvent::Submit => {
                let field = self.fields.get(self.selected)?;
                if field.cycles() {
                    return self.step(true);
                }
                let current = self.current_value(&field.key);
                let start = if current == FILTER_ALL { "" } else { current };
                self.editing = Some(start.to_string());
                None
            }
            TuiEvent::Backspace => {
                let key = self.fields.get(self.selected)?.key.clone();
                Some(self.set(key, FILTER_ALL.to_string()))
            }
            TuiEvent::InputChar('c') => {
                self.values.clear();
                Some(FilterEvent::ClearAll)
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the filter overlay.
pub struct FilterPanel<'a> {
    state: &'a mut FilterPanelState,
}

impl<'a> FilterPanel<'a> {
    pub fn new(state: &'a mut FilterPanelState) -> Self {
        Self { state }
    }
}

impl Component for FilterPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 60, area);
        frame.render_widget(Clear, overlay);

        let help_text = if self.state.editing.is_some() {
            " Enter Apply | Esc Cancel "
        } else {
            " ←→ Change  Enter Edit  Bksp Reset  c Clear all  Esc Close "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Filters ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.state.fields.is_empty() {
            let empty = Paragraph::new("No filterable columns.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let label_width = self
            .state
            .fields
            .iter()
            .map(|f| f.header.len())
            .max()
            .unwrap_or(0);

        let items: Vec<ListItem> = self
            .state
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let is_selected = i == self.state.selected;
                let value = match (&self.state.editing, is_selected) {
                    (Some(buffer), true) => format!("{buffer}█"),
                    _ => self.state.value_label(field),
                };
                let hint = match field.filter_type {
                    FilterType::Date => "  (YYYY-MM-DD)",
                    FilterType::Text => "  (contains)",
                    FilterType::Select => "",
                };
                let style = if is_selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<label_width$}  ", field.header), style),
                    Span::styled(value, style),
                    Span::styled(hint, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}
