//! Search bar: text input plus the current facet selections.
//!
//! Editing goes through [`LineInput`]. [`SearchBarState::handle`] reports
//! whether the text changed so the app shell only recomputes the table when
//! it has to.

use super::line_input::{Edit, LineInput};
use crate::event::AppEvent;
use crate::theme::Theme;
use gigafter_core::FilterCriteria;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    input: LineInput,
}

impl SearchBarState {
    pub fn query(&self) -> &str {
        self.input.text()
    }

    /// Apply an editing event. Returns `true` when the query changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        let changed = self.input.apply(event) == Edit::Changed;
        if changed {
            tracing::debug!(query = %self.input.text(), "search text edited");
        }
        changed
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    criteria: &'a FilterCriteria,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(
        state: &'a SearchBarState,
        criteria: &'a FilterCriteria,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, criteria, focused, theme }
    }

    /// Absolute terminal position of the text cursor within `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = area.x + 1 + self.state.input.cursor() as u16;
        (col.min(area.right().saturating_sub(1)), area.y + 1)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Search").border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(40)])
            .split(inner);

        let query_line = if self.state.input.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search venue, contact, email or city",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.query())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let facet_style = |active: bool| {
            if active {
                self.theme.search_highlight
            } else {
                self.theme.table_muted
            }
        };
        let facets = Line::from(vec![
            Span::raw("state:"),
            Span::styled(
                self.criteria.state_filter.to_string(),
                facet_style(!self.criteria.state_filter.is_all()),
            ),
            Span::raw("  source:"),
            Span::styled(
                self.criteria.source_filter.to_string(),
                facet_style(!self.criteria.source_filter.is_all()),
            ),
        ]);
        Paragraph::new(facets).render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Direction;

    #[test]
    fn reports_only_text_changes() {
        let mut s = SearchBarState::default();
        assert!(s.handle(&AppEvent::Char('j')));
        assert!(s.handle(&AppEvent::Char('z')));
        assert!(!s.handle(&AppEvent::Nav(Direction::Left)));
        assert!(s.handle(&AppEvent::Char('a')));
        assert_eq!(s.query(), "jaz");
        assert!(!s.handle(&AppEvent::Enter));
    }

    #[test]
    fn cursor_column_tracks_chars() {
        let mut s = SearchBarState::default();
        for c in "né".chars() {
            s.handle(&AppEvent::Char(c));
        }
        let criteria = FilterCriteria::default();
        let theme = Theme::load_default();
        let bar = SearchBar::new(&s, &criteria, true, &theme);
        assert_eq!(bar.cursor_position(Rect::new(0, 10, 80, 3)), (3, 11));
    }
}
