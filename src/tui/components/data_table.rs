//! # DataTable Component
//!
//! Shows one resource through the table engine: a search line, the rows
//! (as a table or as cards), and a footer with the record count, selection
//! and page strip.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `DataTableState` lives in `TuiState`, one per resource
//! - `DataTable` is created per frame (and per key press) with borrowed
//!   state, records and columns
//!
//! ## Keys
//!
//! ```text
//! /        search (Enter/Esc to leave)    ↑ ↓      move cursor
//! f        filter panel                   ← →      previous / next page
//! s        cycle the quick filter         Home/End first / last page
//! c        clear search and filters       space    select row
//! 1-9      sort by column                 a        select page
//! v Enter  view    e edit    d d delete   n        add
//! x        export selection               r        refresh
//! m        table / cards
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::table::{
    Badge, CellContent, CellFormatter, Column, ComputedView, EmptyState, FILTER_ALL, PageItem,
    Record, RowAction, SortDirection, ViewConfig, ViewMode, ViewState, compute_view, page_window,
};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Columns shown on a card, counting the title column.
const CARD_FIELDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Rows,
    Search,
}

/// Persistent per-resource table state.
pub struct DataTableState {
    pub view: ViewState<i64>,
    /// Index into the visible page.
    pub cursor: usize,
    pub focus: Focus,
    pub mode: ViewMode,
    pub confirm_delete: bool,
    table_state: TableState,
}

impl DataTableState {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            view: ViewState::new(),
            cursor: 0,
            focus: Focus::Rows,
            mode,
            confirm_delete: false,
            table_state: TableState::default(),
        }
    }

    /// True while the search line is taking keystrokes.
    pub fn is_capturing_text(&self) -> bool {
        self.focus == Focus::Search
    }
}

/// Events emitted by the table for the event loop to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    Row(RowAction, i64),
    Add,
    Export,
    Refresh,
    OpenFilters,
}

/// Transient wrapper binding table state to one resource's data.
pub struct DataTable<'a, R: Record<Id = i64>> {
    state: &'a mut DataTableState,
    records: &'a [R],
    columns: &'a [Column<R>],
    config: &'a ViewConfig,
    formatter: &'a CellFormatter,
    loading: bool,
}

impl<'a, R: Record<Id = i64>> DataTable<'a, R> {
    pub fn new(
        state: &'a mut DataTableState,
        records: &'a [R],
        columns: &'a [Column<R>],
        config: &'a ViewConfig,
        formatter: &'a CellFormatter,
    ) -> Self {
        Self {
            state,
            records,
            columns,
            config,
            formatter,
            loading: false,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn view(&self) -> ComputedView<'a, R> {
        compute_view(self.records, self.columns, self.config, &self.state.view)
    }

    /// Compute the view, pulling the page and cursor back into range when
    /// the data shrank underneath them.
    fn clamped_view(&mut self) -> ComputedView<'a, R> {
        let mut view = self.view();
        if view.current_page > view.total_pages.max(1) {
            self.state.view.set_page(view.total_pages, view.total_pages);
            view = self.view();
        }
        self.state.cursor = self
            .state
            .cursor
            .min(view.visible_rows.len().saturating_sub(1));
        view
    }

    fn handle_search(&mut self, event: &TuiEvent) {
        match event {
            TuiEvent::InputChar(c) => {
                let mut term = self.state.view.search_term.clone();
                term.push(*c);
                self.state.view.set_search(term);
                self.state.cursor = 0;
            }
            TuiEvent::Backspace => {
                let mut term = self.state.view.search_term.clone();
                term.pop();
                self.state.view.set_search(term);
                self.state.cursor = 0;
            }
            TuiEvent::Submit | TuiEvent::Escape => self.state.focus = Focus::Rows,
            _ => {}
        }
    }

    /// Step the first quick-filter column through `all` and its options.
    fn cycle_quick_filter(&mut self) {
        let columns = self.columns;
        let Some(column) = columns.iter().find(|c| c.filterable && c.quick_filter) else {
            return;
        };
        let mut values = vec![FILTER_ALL];
        values.extend(column.filter_options.iter().map(|o| o.value.as_str()));
        let current = self
            .state
            .view
            .filter_value(&column.key)
            .unwrap_or(FILTER_ALL);
        let pos = values.iter().position(|v| *v == current).unwrap_or(0);
        let next = values[(pos + 1) % values.len()];
        self.state.view.set_filter(column.key.clone(), next);
        self.state.cursor = 0;
    }

    fn header_label(&self, column: &Column<R>) -> String {
        match self.state.view.sort.key.as_deref() {
            Some(key) if self.config.sortable && key == column.key => {
                let arrow = match self.state.view.sort.direction {
                    SortDirection::Asc => "▲",
                    SortDirection::Desc => "▼",
                };
                format!("{} {arrow}", column.header)
            }
            _ => column.header.clone(),
        }
    }

    fn search_line(&self) -> Line<'static> {
        let dim = Style::default().fg(Color::DarkGray);
        let mut spans = Vec::new();
        if self.config.searchable {
            let focused = self.state.focus == Focus::Search;
            let label_style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                dim
            };
            spans.push(Span::styled("Search: ", label_style));
            let term = &self.state.view.search_term;
            if term.is_empty() && !focused {
                spans.push(Span::styled("press / to search", dim));
            } else {
                spans.push(Span::raw(term.clone()));
                if focused {
                    spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
                }
            }
        }
        for (key, value) in &self.state.view.filters {
            let (header, label) = self
                .columns
                .iter()
                .find(|c| &c.key == key)
                .map(|c| (c.header.as_str(), c.option_label(value)))
                .unwrap_or((key.as_str(), value.as_str()));
            spans.push(Span::styled(
                format!("  [{header}: {label}]"),
                Style::default().fg(Color::Cyan),
            ));
        }
        Line::from(spans)
    }

    fn footer_line(&self, view: &ComputedView<'a, R>) -> Line<'static> {
        let dim = Style::default().fg(Color::DarkGray);
        let total = view.total_filtered_count;
        let summary = if total == 0 || view.visible_rows.is_empty() {
            format!("{total} records")
        } else if self.config.pagination {
            let first = (view.current_page - 1) * self.config.page_size() + 1;
            let last = first + view.visible_rows.len() - 1;
            format!("Showing {first}-{last} of {total}")
        } else {
            format!("{total} records")
        };
        let mut spans = vec![Span::styled(summary, dim)];

        let selected = self.state.view.selected.len();
        if selected > 0 {
            spans.push(Span::styled(
                format!("  {selected} selected"),
                Style::default().fg(Color::Cyan),
            ));
        }

        if self.config.pagination && view.total_pages > 1 {
            spans.push(Span::styled("   ‹ ", dim));
            for item in page_window(view.current_page, view.total_pages) {
                match item {
                    PageItem::Page(p) if p == view.current_page => spans.push(Span::styled(
                        p.to_string(),
                        Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
                    )),
                    PageItem::Page(p) => spans.push(Span::raw(p.to_string())),
                    PageItem::Ellipsis => spans.push(Span::styled("…", dim)),
                }
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled("›", dim));
        }

        if self.state.confirm_delete {
            spans.push(Span::styled(
                "  press d again to delete",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, empty: Option<EmptyState>) {
        let dim = Style::default().fg(Color::DarkGray);
        let mut lines = vec![Line::raw("")];
        if self.loading && self.records.is_empty() {
            lines.push(Line::styled("Loading...", dim));
        } else if let Some(empty) = empty {
            lines.push(Line::raw(empty.message()));
            if empty.offers_clear_filters() {
                lines.push(Line::styled("Press c to clear search and filters", dim));
            } else if self.config.refreshable {
                lines.push(Line::styled("Press r to refresh", dim));
            }
        }
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, view: &ComputedView<'a, R>) {
        let page_ids = view.page_ids();
        let selected = &self.state.view.selected;
        let on_page = page_ids.iter().filter(|id| selected.contains(id)).count();
        let head_box = match on_page {
            0 => "[ ]",
            n if n == page_ids.len() => "[x]",
            _ => "[-]",
        };

        // Selection only feeds export
        let checkboxes = self.config.exportable;
        let hints = action_hints(self.config);
        let dim = Style::default().fg(Color::DarkGray);

        let mut header_cells = Vec::new();
        if checkboxes {
            header_cells.push(Cell::from(head_box));
        }
        header_cells.extend(self.columns.iter().map(|c| Cell::from(self.header_label(c))));
        if !hints.is_empty() {
            header_cells.push(Cell::from("Actions"));
        }
        let header = Row::new(header_cells).style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = view
            .visible_rows
            .iter()
            .map(|record| {
                let mut cells = Vec::new();
                if checkboxes {
                    let mark = if selected.contains(&record.id()) { "[x]" } else { "[ ]" };
                    cells.push(Cell::from(mark));
                }
                cells.extend(
                    self.columns
                        .iter()
                        .map(|col| styled_cell(self.formatter.render_cell(*record, col))),
                );
                if !hints.is_empty() {
                    cells.push(Cell::from(Span::styled(hints.clone(), dim)));
                }
                Row::new(cells)
            })
            .collect();

        let mut widths = Vec::new();
        if checkboxes {
            widths.push(Constraint::Length(3));
        }
        widths.extend(self.columns.iter().map(|_| Constraint::Fill(1)));
        if !hints.is_empty() {
            widths.push(Constraint::Length(hints.width() as u16));
        }

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::TOP | Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .row_highlight_style(self.highlight_style())
            .column_spacing(1);

        self.state.table_state.select(Some(self.state.cursor));
        frame.render_stateful_widget(table, area, &mut self.state.table_state);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, view: &ComputedView<'a, R>) {
        let Some((title_col, body_cols)) = self.columns.split_first() else {
            return;
        };
        let body_cols = &body_cols[..body_cols.len().min(CARD_FIELDS - 1)];
        let card_height = body_cols.len() as u16 + 3;
        let fit = usize::from((area.height / card_height).max(1));
        let start = self.state.cursor.saturating_sub(fit - 1);
        let inner_width = usize::from(area.width.saturating_sub(2));
        let hints = action_hints(self.config);

        let slots = Layout::vertical(vec![Constraint::Length(card_height); fit]).split(area);
        for (slot, (idx, record)) in view
            .visible_rows
            .iter()
            .enumerate()
            .skip(start)
            .take(fit)
            .enumerate()
        {
            let mark = match (self.config.exportable, self.state.view.selected.contains(&record.id())) {
                (false, _) => "",
                (true, true) => "[x] ",
                (true, false) => "[ ] ",
            };
            let title = self.formatter.render_cell(*record, title_col).text;
            let border_style = if idx == self.state.cursor {
                self.highlight_style()
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let mut lines: Vec<Line> = body_cols
                .iter()
                .map(|col| {
                    let content = self.formatter.render_cell(*record, col);
                    let label = format!("{}: ", col.header);
                    let room = inner_width.saturating_sub(label.width());
                    Line::from(vec![
                        Span::styled(label, Style::default().fg(Color::DarkGray)),
                        Span::styled(truncate(&content.text, room), cell_style(&content)),
                    ])
                })
                .collect();
            lines.push(Line::styled(
                truncate(&hints, inner_width),
                Style::default().fg(Color::DarkGray),
            ));

            let block = Block::bordered()
                .title(format!(" {mark}{} ", truncate(&title, inner_width.saturating_sub(8))))
                .border_style(border_style);
            frame.render_widget(Paragraph::new(lines).block(block), slots[slot]);
        }
    }

    fn highlight_style(&self) -> Style {
        if self.state.confirm_delete {
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        }
    }
}

impl<R: Record<Id = i64>> EventHandler for DataTable<'_, R> {
    type Event = TableEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<TableEvent> {
        if self.state.focus == Focus::Search {
            self.handle_search(event);
            return None;
        }

        // Delete needs two presses in a row
        if !matches!(event, TuiEvent::InputChar('d')) {
            self.state.confirm_delete = false;
        }

        let view = self.clamped_view();
        let page_ids = view.page_ids();
        let total_pages = view.total_pages;
        let current = page_ids.get(self.state.cursor).copied();
        let config = self.config;
        let row_event = |action: RowAction| {
            current
                .filter(|_| config.allows(action))
                .map(|id| TableEvent::Row(action, id))
        };

        match event {
            TuiEvent::InputChar('/') if config.searchable => {
                self.state.focus = Focus::Search;
                None
            }
            TuiEvent::InputChar('f')
                if config.filterable && self.columns.iter().any(|c| c.filterable) =>
            {
                Some(TableEvent::OpenFilters)
            }
            TuiEvent::InputChar('s') if config.filterable => {
                self.cycle_quick_filter();
                None
            }
            TuiEvent::InputChar('c') => {
                self.state.view.clear_filters();
                self.state.cursor = 0;
                None
            }
            TuiEvent::InputChar(c @ '1'..='9') if config.sortable => {
                let idx = (*c as usize) - ('1' as usize);
                if let Some(column) = self.columns.get(idx) {
                    self.state.view.sort_by(&column.key);
                }
                None
            }
            TuiEvent::CursorUp => {
                if self.state.cursor > 0 {
                    self.state.cursor -= 1;
                } else if config.pagination && self.state.view.prev_page() {
                    self.state.cursor = config.page_size() - 1;
                }
                None
            }
            TuiEvent::CursorDown => {
                if self.state.cursor + 1 < page_ids.len() {
                    self.state.cursor += 1;
                } else if config.pagination && self.state.view.next_page(total_pages) {
                    self.state.cursor = 0;
                }
                None
            }
            TuiEvent::PagePrev => {
                if self.state.view.prev_page() {
                    self.state.cursor = 0;
                }
                None
            }
            TuiEvent::PageNext => {
                if self.state.view.next_page(total_pages) {
                    self.state.cursor = 0;
                }
                None
            }
            TuiEvent::FirstPage => {
                self.state.view.set_page(1, total_pages);
                self.state.cursor = 0;
                None
            }
            TuiEvent::LastPage => {
                self.state.view.set_page(total_pages, total_pages);
                self.state.cursor = 0;
                None
            }
            TuiEvent::InputChar(' ') => {
                if let Some(id) = current {
                    self.state.view.toggle_select_row(id);
                }
                None
            }
            TuiEvent::InputChar('a') => {
                self.state.view.toggle_select_all(&page_ids);
                None
            }
            TuiEvent::InputChar('v') | TuiEvent::Submit => row_event(RowAction::View),
            TuiEvent::InputChar('e') => row_event(RowAction::Edit),
            TuiEvent::InputChar('d') => {
                let event = row_event(RowAction::Delete)?;
                if self.state.confirm_delete {
                    self.state.confirm_delete = false;
                    Some(event)
                } else {
                    self.state.confirm_delete = true;
                    None
                }
            }
            TuiEvent::InputChar('n') if config.allows(RowAction::Add) => Some(TableEvent::Add),
            TuiEvent::InputChar('x') if config.exportable && !self.state.view.selected.is_empty() => {
                Some(TableEvent::Export)
            }
            TuiEvent::InputChar('r') if config.refreshable => Some(TableEvent::Refresh),
            TuiEvent::InputChar('m') => {
                self.state.mode = self.state.mode.toggle();
                None
            }
            _ => None,
        }
    }
}

impl<R: Record<Id = i64>> Component for DataTable<'_, R> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let view = self.clamped_view();
        let [search_area, body_area, footer_area] =
            Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);

        frame.render_widget(self.search_line(), search_area);
        if view.visible_rows.is_empty() {
            self.render_empty(frame, body_area, view.empty_state);
        } else {
            match self.state.mode {
                ViewMode::Table => self.render_table(frame, body_area, &view),
                ViewMode::Cards => self.render_cards(frame, body_area, &view),
            }
        }
        frame.render_widget(self.footer_line(&view), footer_area);
    }
}

/// Foreground color for a status badge.
pub fn badge_style(badge: Badge) -> Style {
    match badge {
        Badge::Active => Style::default().fg(Color::Green),
        Badge::Inactive => Style::default().fg(Color::Red),
        Badge::Pending => Style::default().fg(Color::Yellow),
        Badge::Default => Style::default().fg(Color::Gray),
    }
}

pub fn cell_style(content: &CellContent) -> Style {
    content.badge.map(badge_style).unwrap_or_default()
}

fn styled_cell(content: CellContent) -> Cell<'static> {
    let style = cell_style(&content);
    Cell::from(Span::styled(content.text, style))
}

/// Per-row key hints for the actions this table allows.
fn action_hints(config: &ViewConfig) -> String {
    config
        .actions
        .iter()
        .filter_map(|action| {
            let key = match action {
                RowAction::View => 'v',
                RowAction::Edit => 'e',
                RowAction::Delete => 'd',
                RowAction::Add => return None,
            };
            Some(format!("{key} {}", action.label()))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Cut `text` to at most `width` display columns, ending in `…` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Family, Resource};
    use crate::core::resources::{family_columns, view_config};
    use crate::test_support::family;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    struct Fixture {
        state: DataTableState,
        records: Vec<Family>,
        columns: Vec<Column<Family>>,
        config: ViewConfig,
        formatter: CellFormatter,
    }

    impl Fixture {
        fn new(records: Vec<Family>) -> Self {
            Self {
                state: DataTableState::new(ViewMode::Table),
                records,
                columns: family_columns(),
                config: view_config(Resource::Families, 10, ViewMode::Table),
                formatter: CellFormatter::default(),
            }
        }

        fn press(&mut self, event: TuiEvent) -> Option<TableEvent> {
            DataTable::new(
                &mut self.state,
                &self.records,
                &self.columns,
                &self.config,
                &self.formatter,
            )
            .handle_event(&event)
        }

        fn type_str(&mut self, text: &str) {
            for c in text.chars() {
                self.press(TuiEvent::InputChar(c));
            }
        }

        fn draw(&mut self, width: u16, height: u16) -> String {
            let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
            terminal
                .draw(|f| {
                    DataTable::new(
                        &mut self.state,
                        &self.records,
                        &self.columns,
                        &self.config,
                        &self.formatter,
                    )
                    .render(f, f.area());
                })
                .unwrap();
            terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(|c| c.symbol())
                .collect::<String>()
        }

        fn visible_ids(&self) -> Vec<i64> {
            compute_view(&self.records, &self.columns, &self.config, &self.state.view).page_ids()
        }
    }

    fn sample() -> Vec<Family> {
        vec![
            family(1, "Qureshi", "active"),
            family(2, "Ansari", "inactive"),
            family(3, "Memon", "active"),
        ]
    }

    #[test]
    fn test_search_focus_captures_keys() {
        let mut fx = Fixture::new(sample());
        fx.press(TuiEvent::InputChar('/'));
        assert!(fx.state.is_capturing_text());
        fx.type_str("ans");
        assert_eq!(fx.state.view.search_term, "ans");
        assert_eq!(fx.visible_ids(), vec![2]);
        fx.press(TuiEvent::Backspace);
        assert_eq!(fx.state.view.search_term, "an");
        fx.press(TuiEvent::Submit);
        assert!(!fx.state.is_capturing_text());
    }

    #[test]
    fn test_number_keys_sort_and_toggle() {
        let mut fx = Fixture::new(sample());
        fx.press(TuiEvent::InputChar('1'));
        assert_eq!(fx.visible_ids(), vec![2, 3, 1]);
        fx.press(TuiEvent::InputChar('1'));
        assert_eq!(fx.visible_ids(), vec![1, 3, 2]);
    }

    #[test]
    fn test_quick_filter_cycles_through_options() {
        let mut fx = Fixture::new(sample());
        fx.press(TuiEvent::InputChar('s'));
        assert_eq!(fx.state.view.filter_value("status"), Some("active"));
        assert_eq!(fx.visible_ids(), vec![1, 3]);
        fx.press(TuiEvent::InputChar('s'));
        assert_eq!(fx.state.view.filter_value("status"), Some("inactive"));
        fx.press(TuiEvent::InputChar('s'));
        assert_eq!(fx.state.view.filter_value("status"), None);
        assert_eq!(fx.visible_ids().len(), 3);
    }

    #[test]
    fn test_select_row_and_page() {
        let mut fx = Fixture::new(sample());
        fx.press(TuiEvent::CursorDown);
        fx.press(TuiEvent::InputChar(' '));
        assert!(fx.state.view.selected.contains(&2));
        fx.press(TuiEvent::InputChar('a'));
        assert_eq!(fx.state.view.selected.len(), 3);
        fx.press(TuiEvent::InputChar('a'));
        assert!(fx.state.view.selected.is_empty());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut fx = Fixture::new(sample());
        assert_eq!(fx.press(TuiEvent::InputChar('d')), None);
        assert!(fx.state.confirm_delete);
        assert_eq!(
            fx.press(TuiEvent::InputChar('d')),
            Some(TableEvent::Row(RowAction::Delete, 1))
        );

        // Any other key cancels the pending confirmation
        fx.press(TuiEvent::InputChar('d'));
        fx.press(TuiEvent::CursorDown);
        assert!(!fx.state.confirm_delete);
    }

    #[test]
    fn test_actions_respect_config() {
        let mut fx = Fixture::new(sample());
        assert_eq!(fx.press(TuiEvent::InputChar('n')), None);
        assert_eq!(fx.press(TuiEvent::Submit), Some(TableEvent::Row(RowAction::View, 1)));
        assert_eq!(fx.press(TuiEvent::InputChar('e')), Some(TableEvent::Row(RowAction::Edit, 1)));
        // Export needs a selection
        assert_eq!(fx.press(TuiEvent::InputChar('x')), None);
        fx.press(TuiEvent::InputChar(' '));
        assert_eq!(fx.press(TuiEvent::InputChar('x')), Some(TableEvent::Export));

        fx.config.actions.clear();
        assert_eq!(fx.press(TuiEvent::Submit), None);
    }

    #[test]
    fn test_cursor_walks_across_pages() {
        let records: Vec<Family> = (1..=12).map(|i| family(i, "F", "active")).collect();
        let mut fx = Fixture::new(records);
        for _ in 0..10 {
            fx.press(TuiEvent::CursorDown);
        }
        assert_eq!(fx.state.view.current_page, 2);
        assert_eq!(fx.state.cursor, 0);
        fx.press(TuiEvent::CursorUp);
        assert_eq!(fx.state.view.current_page, 1);
        assert_eq!(fx.state.cursor, 9);
        fx.press(TuiEvent::LastPage);
        assert_eq!(fx.state.view.current_page, 2);
    }

    #[test]
    fn test_render_shows_rows_and_summary() {
        let mut fx = Fixture::new(sample());
        let text = fx.draw(120, 10);
        assert!(text.contains("Family"));
        assert!(text.contains("Qureshi"));
        assert!(text.contains("Inactive"));
        assert!(text.contains("Showing 1-3 of 3"));
    }

    #[test]
    fn test_render_clamps_page_after_data_shrinks() {
        let records: Vec<Family> = (1..=25).map(|i| family(i, "F", "active")).collect();
        let mut fx = Fixture::new(records);
        fx.press(TuiEvent::LastPage);
        assert_eq!(fx.state.view.current_page, 3);
        fx.records.truncate(5);
        fx.draw(120, 16);
        assert_eq!(fx.state.view.current_page, 1);
    }

    #[test]
    fn test_render_empty_states() {
        let mut fx = Fixture::new(Vec::new());
        assert!(fx.draw(80, 6).contains("No records yet."));

        let mut fx = Fixture::new(sample());
        fx.press(TuiEvent::InputChar('/'));
        fx.type_str("zzz");
        let text = fx.draw(80, 6);
        assert!(text.contains("No records match"));
        assert!(text.contains("Press c to clear"));
    }

    #[test]
    fn test_render_cards() {
        let mut fx = Fixture::new(sample());
        fx.press(TuiEvent::InputChar('m'));
        assert_eq!(fx.state.mode, ViewMode::Cards);
        let text = fx.draw(60, 20);
        assert!(text.contains("Qureshi"));
        assert!(text.contains("v view"));
    }

    #[test]
    fn test_card_shows_three_columns() {
        let mut record = family(1, "Qureshi", "active");
        record.head_name = Some("Zubair".to_string());
        record.members_count = Some(4);
        let mut fx = Fixture::new(vec![record]);
        fx.press(TuiEvent::InputChar('m'));
        let text = fx.draw(160, 20);
        assert!(text.contains("Qureshi"));
        assert!(text.contains("Head: Zubair"));
        assert!(text.contains("Status: Active"));
        assert!(!text.contains("4 members"));
        assert!(text.contains("[ ] Qureshi"));
    }

    #[test]
    fn test_table_has_trailing_action_column() {
        let mut fx = Fixture::new(vec![family(1, "Qureshi", "active")]);
        let text = fx.draw(160, 20);
        assert!(text.contains("Actions"));
        assert!(text.contains("v view  e edit  d delete"));

        fx.config.actions.clear();
        let text = fx.draw(160, 20);
        assert!(!text.contains("Actions"));
        assert!(!text.contains("v view"));
    }

    #[test]
    fn test_checkboxes_only_when_exportable() {
        let mut fx = Fixture::new(vec![family(1, "Qureshi", "active")]);
        assert!(fx.draw(160, 20).contains("[ ]"));

        fx.config.exportable = false;
        assert!(!fx.draw(160, 20).contains("[ ]"));
        fx.press(TuiEvent::InputChar('m'));
        let text = fx.draw(160, 20);
        assert!(text.contains("Qureshi"));
        assert!(!text.contains("[ ]"));
    }

    #[test]
    fn test_action_hints_use_labels() {
        let config = view_config(Resource::Supports, 10, ViewMode::Table);
        assert_eq!(action_hints(&config), "v view  d delete");
        assert_eq!(RowAction::Edit.label(), "edit");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Ansari", 10), "Ansari");
        assert_eq!(truncate("Siddiqui", 5), "Sidd…");
        assert_eq!(truncate("abc", 0), "");
    }
}
