//! Colour theme for the admin console.
//!
//! Two themes ship inside the binary (`default` and `gruvbox`). Each is a
//! TOML document with a flat `[styles]` table, one entry per screen role,
//! plus a `state_palette` list. Colour strings use ratatui's own parser, so
//! names (`light_red`), hex (`#fabd2f`) and 256-colour indices (`208`) all
//! work.
//!
//! State codes hash to a palette slot, so a state keeps its colour however
//! the rows are sorted or filtered.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_SRC: &str = include_str!("themes/gruvbox_dark.toml");

/// One `[styles]` entry as written in the theme file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StyleSpec {
    fg: Option<String>,
    bg: Option<String>,
    modifiers: Vec<String>,
}

fn color(value: &str) -> Option<Color> {
    match value.parse::<Color>() {
        Ok(c) => Some(c),
        Err(_) => {
            tracing::warn!(color = value, "unrecognised colour in theme; ignored");
            None
        }
    }
}

fn modifier(name: &str) -> Modifier {
    match name.to_ascii_lowercase().as_str() {
        "bold" => Modifier::BOLD,
        "dim" => Modifier::DIM,
        "italic" => Modifier::ITALIC,
        "underlined" | "underline" => Modifier::UNDERLINED,
        "reversed" => Modifier::REVERSED,
        other => {
            tracing::warn!(modifier = other, "unrecognised modifier in theme; ignored");
            Modifier::empty()
        }
    }
}

impl From<StyleSpec> for Style {
    fn from(spec: StyleSpec) -> Self {
        let mut style = Style::default();
        if let Some(fg) = spec.fg.as_deref().and_then(color) {
            style = style.fg(fg);
        }
        if let Some(bg) = spec.bg.as_deref().and_then(color) {
            style = style.bg(bg);
        }
        let mods = spec.modifiers.iter().fold(Modifier::empty(), |acc, m| acc | modifier(m));
        style.add_modifier(mods)
    }
}

#[derive(Debug, Deserialize)]
struct StyleTable {
    table_header: StyleSpec,
    table_selected: StyleSpec,
    #[serde(default)]
    table_muted: StyleSpec,
    border_focused: StyleSpec,
    #[serde(default)]
    border_unfocused: StyleSpec,
    #[serde(default)]
    border_command_bar: StyleSpec,
    search_highlight: StyleSpec,
    #[serde(default)]
    status_info: StyleSpec,
    status_error: StyleSpec,
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    state_palette: Vec<String>,
    styles: StyleTable,
}

/// Resolved styles, built once and copied into widgets at render time.
#[derive(Debug, Clone)]
pub struct Theme {
    pub table_header: Style,
    pub table_selected: Style,
    pub table_muted: Style,
    pub border_focused: Style,
    pub border_unfocused: Style,
    pub border_command_bar: Style,
    /// Matched search text inside a table cell.
    pub search_highlight: Style,
    pub status_info: Style,
    pub status_error: Style,
    state_palette: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::load_default()
    }
}

impl Theme {
    fn builtin(src: &str) -> Self {
        match Self::from_toml_str(src) {
            Ok(theme) => theme,
            // Only reachable if a shipped theme file is broken.
            Err(err) => panic!("built-in theme does not parse: {err}"),
        }
    }

    pub fn load_default() -> Self {
        Self::builtin(DEFAULT_SRC)
    }

    pub fn load_gruvbox_dark() -> Self {
        Self::builtin(GRUVBOX_SRC)
    }

    /// Look up a theme by its `[ui] theme` / `:theme` name. Unknown names
    /// log a warning and give the default theme.
    pub fn named(name: &str) -> Self {
        let key = name.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "default" => Self::load_default(),
            "gruvbox" | "gruvbox_dark" => Self::load_gruvbox_dark(),
            _ => {
                tracing::warn!(theme = name, "no such theme; using default");
                Self::load_default()
            }
        }
    }

    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let file: ThemeFile = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        let s = file.styles;

        Ok(Self {
            table_header: s.table_header.into(),
            table_selected: s.table_selected.into(),
            table_muted: s.table_muted.into(),
            border_focused: s.border_focused.into(),
            border_unfocused: s.border_unfocused.into(),
            border_command_bar: s.border_command_bar.into(),
            search_highlight: s.search_highlight.into(),
            status_info: s.status_info.into(),
            status_error: s.status_error.into(),
            state_palette: file.state_palette.iter().filter_map(|c| color(c)).collect(),
        })
    }

    pub fn state_style(&self, state: &str) -> Style {
        match self.state_palette.len() {
            0 => Style::default(),
            n => Style::default().fg(self.state_palette[palette_slot(state, n)]),
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}

/// FNV-1a over the state code, reduced to `0..n`. Stable across runs.
fn palette_slot(state: &str, n: usize) -> usize {
    let hash = state
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325u64, |h, b| (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3));
    (hash % n as u64) as usize
}
