//! Key handling: crossterm events become [`AppEvent`]s, so widgets never see
//! crossterm types.
//!
//! Translation depends on [`Mode`]. In [`Mode::Normal`] (table focused) the
//! single-letter shortcuts below are live. In [`Mode::Insert`] (search bar or
//! command bar focused) letters are text, and only the editing keys plus
//! `Ctrl+c` keep a meaning.
//!
//! | Key(s)                  | Normal mode                       |
//! |-------------------------|-----------------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                            |
//! | `/`                     | `SearchFocus`                     |
//! | `s` / `f`               | `CycleState` / `CycleSource`      |
//! | `x`                     | `ClearFilters`                    |
//! | `e`                     | `Export`                          |
//! | `PageUp`/`Ctrl+u`, `PageDown`/`Ctrl+d` | `ScrollUp`, `ScrollDown` |
//! | `g`/`Home`, `G`/`End`   | `ScrollToTop`, `ScrollToBottom`   |
//! | `k` `j` `h` `l`         | `Nav(..)`, same as the arrow keys |
//!
//! Both modes: arrows, `Tab`, `Enter`, `Esc`, `Backspace`, printable chars
//! and terminal resizes.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Move keyboard focus between the table and the search bar.
    FocusNext,
    SearchFocus,
    /// Advance the state facet to the next state present in the data.
    CycleState,
    /// Advance the source facet to the next known source.
    CycleSource,
    ClearFilters,
    /// Write the visible rows to a CSV file.
    Export,
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    Nav(Direction),
    Char(char),
    Backspace,
    Enter,
    Resize(u16, u16),
    Escape,
}

/// `None` for mouse, focus and paste events and for unbound keys.
pub fn translate(event: Event, mode: Mode) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => translate_key(key, mode),
        _ => None,
    }
}

fn translate_key(key: KeyEvent, mode: Mode) -> Option<AppEvent> {
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        return Some(AppEvent::Quit);
    }
    if mode == Mode::Normal {
        if let Some(ev) = shortcut(key) {
            return Some(ev);
        }
    }
    editing(key)
}

/// Normal-mode bindings that shadow plain text input.
fn shortcut(key: KeyEvent) -> Option<AppEvent> {
    let ev = match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => AppEvent::ScrollUp,
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => AppEvent::ScrollDown,
        (_, KeyCode::PageUp) => AppEvent::ScrollUp,
        (_, KeyCode::PageDown) => AppEvent::ScrollDown,
        (_, KeyCode::Home) => AppEvent::ScrollToTop,
        // Some terminals report `G` with SHIFT, some without.
        (_, KeyCode::End | KeyCode::Char('G')) => AppEvent::ScrollToBottom,
        (KeyModifiers::NONE, KeyCode::Char(c)) => match c {
            'q' => AppEvent::Quit,
            '/' => AppEvent::SearchFocus,
            's' => AppEvent::CycleState,
            'f' => AppEvent::CycleSource,
            'x' => AppEvent::ClearFilters,
            'e' => AppEvent::Export,
            'g' => AppEvent::ScrollToTop,
            'k' => AppEvent::Nav(Direction::Up),
            'j' => AppEvent::Nav(Direction::Down),
            'h' => AppEvent::Nav(Direction::Left),
            'l' => AppEvent::Nav(Direction::Right),
            _ => return None,
        },
        _ => return None,
    };
    Some(ev)
}

fn editing(key: KeyEvent) -> Option<AppEvent> {
    let plain = key.modifiers == KeyModifiers::NONE;
    Some(match key.code {
        KeyCode::Up => AppEvent::Nav(Direction::Up),
        KeyCode::Down => AppEvent::Nav(Direction::Down),
        KeyCode::Left => AppEvent::Nav(Direction::Left),
        KeyCode::Right => AppEvent::Nav(Direction::Right),
        KeyCode::Esc => AppEvent::Escape,
        KeyCode::Tab if plain => AppEvent::FocusNext,
        KeyCode::Enter if plain => AppEvent::Enter,
        KeyCode::Backspace if plain => AppEvent::Backspace,
        KeyCode::Char(c) if plain || key.modifiers == KeyModifiers::SHIFT => AppEvent::Char(c),
        _ => return None,
    })
}
