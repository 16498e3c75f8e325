use crate::core::state::App;
use crate::table::{RowAction, ViewConfig};
use crate::tui::component::Component;
use crate::tui::components::data_table::Focus;
use crate::tui::components::{DataTable, FilterPanel, RecordDetail, TitleBar};
use crate::tui::{Overlay, TuiState};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(app.resource, app.session.user(), &app.status_message)
        .loading(app.is_loading, tui.spinner_frame)
        .render(frame, title_area);

    // Main area - show error OR the table
    let config = app.view_config(app.resource);
    if let Some(error_msg) = &app.error {
        draw_error_view(frame, main_area, error_msg);
    } else {
        draw_table(frame, main_area, app, tui, &config);
    }

    let focus = tui.table_mut(app.resource).focus;
    frame.render_widget(help_line(&config, focus, tui.overlay.is_some()), help_area);

    match &mut tui.overlay {
        Some(Overlay::Filters(panel)) => FilterPanel::new(panel).render(frame, main_area),
        Some(Overlay::Detail(detail)) => RecordDetail::new(detail).render(frame, main_area),
        None => {}
    }
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let lines = vec![
        Line::from(error_msg.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to retry",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let error_paragraph = Paragraph::new(lines)
        .block(Block::bordered().title("ERROR"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

fn draw_table(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, config: &ViewConfig) {
    let resource = app.resource;
    let block = Block::bordered()
        .title(format!(" {} ", resource.title()))
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = tui.table_mut(resource);
    with_table!(app, resource, |records, columns| {
        DataTable::new(state, records, columns, config, &app.formatter)
            .loading(app.is_loading)
            .render(frame, inner)
    });
}

/// Key hints for whatever currently has focus.
fn help_line(config: &ViewConfig, focus: Focus, overlay_open: bool) -> Line<'static> {
    let hints: Vec<&str> = if overlay_open {
        vec!["Esc Close"]
    } else if focus == Focus::Search {
        vec!["Type to search", "Enter/Esc Done"]
    } else {
        let mut hints = vec!["Tab Next", "←→ Page"];
        if config.searchable {
            hints.push("/ Search");
        }
        if config.filterable {
            hints.push("f Filters");
        }
        if config.sortable {
            hints.push("1-9 Sort");
        }
        if config.allows(RowAction::Add) {
            hints.push("n New");
        }
        if config.exportable {
            hints.extend(["Spc Select", "x Export"]);
        }
        if config.refreshable {
            hints.push("r Refresh");
        }
        hints.push("m Cards");
        hints.push("O Logout");
        hints.push("q Quit");
        hints
    };
    Line::from(Span::styled(
        format!(" {}", hints.join("  ")),
        Style::default().fg(Color::DarkGray),
    ))
}
