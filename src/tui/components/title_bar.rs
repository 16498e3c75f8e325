//! # TitleBar Component
//!
//! Top status bar: app name, one tab per resource, who is signed in, and
//! the current status message with a spinner while the API is busy.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.resource, app.session.user(), &app.status_message)
//!     .loading(app.is_loading, tui.spinner_frame);
//! title_bar.render(frame, area);
//! ```

use crate::api::Resource;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar<'a> {
    pub resource: Resource,
    pub user: Option<&'a str>,
    pub status_message: &'a str,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> TitleBar<'a> {
    pub fn new(resource: Resource, user: Option<&'a str>, status_message: &'a str) -> Self {
        Self {
            resource,
            user,
            status_message,
            is_loading: false,
            spinner_frame: 0,
        }
    }

    pub fn loading(mut self, is_loading: bool, spinner_frame: usize) -> Self {
        self.is_loading = is_loading;
        self.spinner_frame = spinner_frame;
        self
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " Aidboard ",
            Style::default().add_modifier(Modifier::BOLD),
        )];

        for resource in Resource::ALL {
            let style = if resource == self.resource {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(resource.title(), style));
        }

        let user = self.user.unwrap_or("signed out");
        spans.push(Span::styled(format!(" | {user}"), Style::default().fg(Color::DarkGray)));

        if self.is_loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::styled(format!(" | {spinner}"), Style::default().fg(Color::Yellow)));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
