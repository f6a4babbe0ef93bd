//! Signup table: the scrollable list of visible signups.
//!
//! # Navigation (when focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k`, `↓` / `j` | Move the cursor one row |
//! | `PageUp` / `Ctrl+u`, `PageDown` / `Ctrl+d` | Move one page |
//! | `g` / `G` | Jump to first / last row |
//! | `Enter` | Open the feedback popup for the selected row |
//!
//! `cursor` is an index into the visible rows; `top` is the first row drawn.
//! Every filter change resets both to zero.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use chrono::FixedOffset;
use gigafter_core::export::SIGNUP_DATE_FORMAT;
use gigafter_core::SignupRecord;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;

/// (title, width) for the fixed-width columns; `Source` takes the rest.
const COLUMNS: [(&str, usize); 6] = [
    ("Signed up", 16),
    ("Venue", 24),
    ("Contact", 18),
    ("Email", 28),
    ("City", 14),
    ("State", 5),
];

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct SignupTableState {
    pub cursor: usize,
    pub top: usize,
    /// Body height from the last render, so `handle()` can page correctly.
    last_height: Cell<usize>,
}

impl Default for SignupTableState {
    fn default() -> Self {
        Self { cursor: 0, top: 0, last_height: Cell::new(20) }
    }
}

impl SignupTableState {
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.top = 0;
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Handle a navigation event over a table of `len` visible rows.
    pub fn handle(&mut self, event: &AppEvent, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        let last = len - 1;

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => self.cursor = (self.cursor + PAGE_STEP).min(last),
            AppEvent::ScrollToTop => self.cursor = 0,
            AppEvent::ScrollToBottom => self.cursor = last,
            _ => return,
        }

        self.cursor = self.cursor.min(last);
        if self.cursor < self.top {
            self.top = self.cursor;
        } else if self.cursor >= self.top + self.height() {
            self.top = self.cursor + 1 - self.height();
        }
        tracing::debug!(cursor = self.cursor, top = self.top, "table: cursor moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SignupTable<'a> {
    state: &'a SignupTableState,
    rows: &'a [&'a SignupRecord],
    total: usize,
    search: &'a str,
    offset: FixedOffset,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SignupTable<'a> {
    pub fn new(
        state: &'a SignupTableState,
        rows: &'a [&'a SignupRecord],
        total: usize,
        search: &'a str,
        offset: FixedOffset,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, rows, total, search, offset, focused, theme }
    }
}

impl Widget for SignupTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Signups ({} of {}) ", self.rows.len(), self.total);
        let block = Block::bordered().title(title).border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        // First inner row is the header; the rest is the body.
        let body_height = inner.height.saturating_sub(1) as usize;
        self.state.last_height.set(body_height);

        let text_width = inner.width.saturating_sub(1) as usize;
        let mut lines: Vec<Line> = vec![header_line(text_width, self.theme)];

        if self.rows.is_empty() {
            let msg = if self.total == 0 {
                "No signups yet"
            } else {
                "No signups match the current filters (x to clear)"
            };
            lines.push(Line::from(Span::styled(msg, self.theme.table_muted)));
        }

        let start = self.state.top.min(self.rows.len());
        let end = (start + body_height).min(self.rows.len());
        for (i, record) in self.rows[start..end].iter().enumerate() {
            let selected = self.focused && start + i == self.state.cursor;
            let mut line = row_line(record, self.offset, self.search, text_width, self.theme);
            if selected {
                line = line.patch_style(self.theme.table_selected);
            }
            lines.push(line);
        }

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        Paragraph::new(lines).render(text_area, buf);

        if self.rows.len() > body_height {
            let sb_area = Rect {
                x: inner.right().saturating_sub(1),
                y: inner.y + 1,
                width: 1,
                height: inner.height - 1,
            };
            let mut sb_state = ScrollbarState::new(self.rows.len())
                .position(start)
                .viewport_content_length(body_height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Row rendering
// ---------------------------------------------------------------------------

fn header_line(width: usize, theme: &Theme) -> Line<'static> {
    let mut text = String::new();
    for (title, w) in COLUMNS {
        text.push_str(&fit(title, w));
        text.push(' ');
    }
    text.push_str("Source");
    Line::from(Span::styled(fit(&text, width), theme.table_header))
}

fn row_line(
    record: &SignupRecord,
    offset: FixedOffset,
    search: &str,
    width: usize,
    theme: &Theme,
) -> Line<'static> {
    let date = record.created_at.with_timezone(&offset).format(SIGNUP_DATE_FORMAT).to_string();
    let source = record.how_heard_about_us.as_deref().unwrap_or("—");

    let mut spans: Vec<Span<'static>> = Vec::new();
    spans.push(Span::styled(fit(&date, COLUMNS[0].1), theme.table_muted));
    spans.push(Span::raw(" "));
    // Only the searchable columns get match highlighting.
    for (value, (_, w)) in [
        (record.establishment_name.as_str(), COLUMNS[1]),
        (record.contact_name.as_str(), COLUMNS[2]),
        (record.email.as_str(), COLUMNS[3]),
        (record.city.as_str(), COLUMNS[4]),
    ] {
        spans.extend(highlighted(&fit(value, w), search, theme.search_highlight));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(fit(&record.state, COLUMNS[5].1), theme.state_style(&record.state)));
    spans.push(Span::raw(" "));

    let used: usize = COLUMNS.iter().map(|(_, w)| w + 1).sum();
    let style = if record.how_heard_about_us.is_some() {
        Style::default()
    } else {
        theme.table_muted
    };
    spans.push(Span::styled(fit(source, width.saturating_sub(used)), style));
    Line::from(spans)
}

/// Pad or truncate `text` to exactly `width` characters.
pub(crate) fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{text:<width$}")
    } else if width == 0 {
        String::new()
    } else {
        let mut s: String = text.chars().take(width - 1).collect();
        s.push('…');
        s
    }
}

/// Split `text` into spans with the first case-insensitive match of `needle`
/// styled with `hl`.
fn highlighted(text: &str, needle: &str, hl: Style) -> Vec<Span<'static>> {
    if needle.is_empty() {
        return vec![Span::raw(text.to_string())];
    }
    let lower = text.to_lowercase();
    // Byte offsets only line up when lowercasing kept every char's width.
    if lower.len() != text.len() {
        return vec![Span::raw(text.to_string())];
    }
    let needle = needle.to_lowercase();
    match lower.find(&needle) {
        Some(at) if text.is_char_boundary(at) && text.is_char_boundary(at + needle.len()) => {
            let end = at + needle.len();
            vec![
                Span::raw(text[..at].to_string()),
                Span::styled(text[at..end].to_string(), hl.add_modifier(Modifier::BOLD)),
                Span::raw(text[end..].to_string()),
            ]
        }
        _ => vec![Span::raw(text.to_string())],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
