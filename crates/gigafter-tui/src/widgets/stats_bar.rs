//! Stats bar: the one-line strip at the top of the screen.
//!
//! Shows who is signed in, the dashboard counts, and either the last status
//! message (export result, command error) or the keybinding hints.

use crate::theme::Theme;
use gigafter_core::facets::SignupStats;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A transient message shown on the right of the stats bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct StatsBar<'a> {
    identity: &'a str,
    stats: Option<SignupStats>,
    showing: (usize, usize),
    status: Option<&'a Status>,
    theme: &'a Theme,
}

impl<'a> StatsBar<'a> {
    pub fn new(
        identity: &'a str,
        stats: Option<SignupStats>,
        showing: (usize, usize),
        status: Option<&'a Status>,
        theme: &'a Theme,
    ) -> Self {
        Self { identity, stats, showing, status, theme }
    }
}

impl Widget for StatsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut spans = vec![
            Span::styled(" GigAfter waitlist ", bold),
            Span::styled(format!("· {} ", self.identity), self.theme.table_muted),
        ];
        if let Some(stats) = self.stats {
            spans.push(Span::raw(format!(
                "│ {} signups · {} today · {} states ",
                stats.total, stats.today, stats.states
            )));
        }
        let (visible, total) = self.showing;
        spans.push(Span::raw(format!("│ showing {visible} of {total}")));
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let (text, style) = match self.status {
            Some(Status::Info(msg)) => (format!(" {msg} "), self.theme.status_info),
            Some(Status::Error(msg)) => (format!(" {msg} "), self.theme.status_error),
            None => (" q:quit  ?:help ".to_string(), Style::default().add_modifier(Modifier::DIM)),
        };
        let width = text.chars().count() as u16;
        let x = area.right().saturating_sub(width).max(area.x);
        buf.set_string(x, area.y, text, style);
    }
}
