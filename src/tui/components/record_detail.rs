//! # Record Detail Component
//!
//! Read-only overlay showing every column of one record, formatted the
//! same way the table formats it. Opened with `v` or Enter on a row.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use super::centered_rect;
use super::data_table::cell_style;
use crate::table::{CellContent, CellFormatter, Column, Record};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub struct RecordDetailState {
    pub title: String,
    pub fields: Vec<(String, CellContent)>,
    pub scroll: u16,
}

impl RecordDetailState {
    pub fn new<R: Record>(
        title: impl Into<String>,
        record: &R,
        columns: &[Column<R>],
        formatter: &CellFormatter,
    ) -> Self {
        Self {
            title: title.into(),
            fields: columns
                .iter()
                .map(|col| (col.header.clone(), formatter.render_cell(record, col)))
                .collect(),
            scroll: 0,
        }
    }
}

pub enum DetailEvent {
    Dismiss,
}

impl EventHandler for RecordDetailState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Submit | TuiEvent::InputChar('v' | 'q') => {
                Some(DetailEvent::Dismiss)
            }
            TuiEvent::CursorUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                let max = u16::try_from(self.fields.len().saturating_sub(1)).unwrap_or(u16::MAX);
                self.scroll = (self.scroll + 1).min(max);
                None
            }
            _ => None,
        }
    }
}

pub struct RecordDetail<'a> {
    state: &'a RecordDetailState,
}

impl<'a> RecordDetail<'a> {
    pub fn new(state: &'a RecordDetailState) -> Self {
        Self { state }
    }
}

impl Component for RecordDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 70, area);
        frame.render_widget(Clear, overlay);

        let label_width = self
            .state
            .fields
            .iter()
            .map(|(header, _)| header.len())
            .max()
            .unwrap_or(0);

        let lines: Vec<Line> = self
            .state
            .fields
            .iter()
            .map(|(header, content)| {
                Line::from(vec![
                    Span::styled(
                        format!("{header:<label_width$}  "),
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(content.text.clone(), cell_style(content)),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.state.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Esc Close ").centered())
            .padding(Padding::horizontal(1));

        let body = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll, 0));
        frame.render_widget(body, overlay);
    }
}
