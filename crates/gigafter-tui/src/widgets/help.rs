//! `?` overlay: the key bindings, grouped by what they act on.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const KEY_COLUMN: usize = 20;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Moving around",
        &[
            ("j k / arrows", "Move selection"),
            ("PgUp PgDn", "Move one page"),
            ("g G", "First / last row"),
            ("Enter", "Signup details and beta feedback"),
            ("Tab  /", "Search bar; Esc returns to the table"),
        ],
    ),
    (
        "Filtering",
        &[
            ("s", "Next state"),
            ("f", "Next source"),
            ("x", "Clear search and filters"),
        ],
    ),
    (
        "Other",
        &[
            ("e", "Export visible rows as CSV"),
            (":", "Command line (:state TX, :source all, :export, :logout)"),
            ("?", "Close this help"),
            ("q  Ctrl+c", "Quit"),
        ],
    ),
];

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default().add_modifier(Modifier::UNDERLINED);
    let key = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for (i, (title, bindings)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*title, heading)));
        lines.extend(bindings.iter().map(|(keys, what)| {
            Line::from(vec![Span::styled(format!(" {keys:<KEY_COLUMN$}"), key), Span::raw(*what)])
        }));
    }
    lines
}

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = help_lines();
        let popup = centered_rect(80, lines.len() as u16 + 2, area);
        Clear.render(popup, buf);
        let frame = Block::bordered().title(" keys ").border_style(self.theme.border_focused);
        Paragraph::new(lines).block(frame).render(popup, buf);
    }
}

/// `width` x `height` box in the middle of `area`, clipped to it.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
