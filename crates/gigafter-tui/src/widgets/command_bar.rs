//! Vim-style command bar: a single-line overlay at the bottom of the screen.
//!
//! Activated by pressing `:` outside the search bar. `Enter` parses the
//! input with [`Command::parse`]; `Escape` cancels. A parse error stays on
//! screen until the next key.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `state <XX\|all>` | Set the state filter |
//! | `source <name\|all>` | Set the source filter |
//! | `clear` | Reset search and filters |
//! | `export`, `w` | Write the visible rows as CSV |
//! | `stats` | Toggle the stats strip |
//! | `logout` | Sign out and quit |

use super::line_input::LineInput;
use crate::commands::Command;
use crate::event::AppEvent;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// What the app shell should do after a key reaches the command bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarOutcome {
    /// Keep the bar open.
    Pending,
    /// Close the bar without acting.
    Cancel,
    /// Close the bar and run the command.
    Run(Command),
}

#[derive(Debug, Default)]
pub struct CommandBarState {
    /// Text typed after the `:` prompt.
    pub input: LineInput,
    /// Why the last `Enter` was rejected; dropped on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    /// Blank input, no error. Called each time the bar opens.
    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }

    pub fn handle(&mut self, event: &AppEvent) -> BarOutcome {
        self.error = None;

        match event {
            AppEvent::Escape => {
                self.clear();
                BarOutcome::Cancel
            }
            AppEvent::Enter => {
                let outcome = match Command::parse(self.input.text()) {
                    Ok(cmd) => BarOutcome::Run(cmd),
                    Err(msg) if msg.is_empty() => BarOutcome::Cancel,
                    Err(msg) => {
                        tracing::debug!(input = %self.input.text(), error = %msg, "command rejected");
                        self.error = Some(msg);
                        return BarOutcome::Pending;
                    }
                };
                self.clear();
                outcome
            }
            other => {
                self.input.apply(other);
                BarOutcome::Pending
            }
        }
    }

    /// Terminal column for the text cursor, one past the `:` prompt.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        (area.x + 1 + self.input.cursor() as u16).min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Single-row overlay. The caller passes a 1-row `Rect` at the bottom of
/// the terminal.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = match &self.state.error {
            Some(err) => Line::from(Span::styled(format!("E  {err}"), self.theme.status_error)),
            None => Line::from(vec![
                Span::styled(":", self.theme.border_command_bar.add_modifier(Modifier::BOLD)),
                Span::styled(self.state.input.text(), Style::default()),
            ]),
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
