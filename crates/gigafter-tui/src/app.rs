//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. All filtering goes
//! through the [`AdminView`] controller; the widgets only render what it
//! exposes.

use crate::{
    commands::Command,
    event::{self, AppEvent, Mode},
    theme::Theme,
    widgets::{
        command_bar::{BarOutcome, CommandBar, CommandBarState},
        feedback_popup::FeedbackPopup,
        help::HelpPopup,
        search_bar::{SearchBar, SearchBarState},
        signup_table::{SignupTable, SignupTableState},
        stats_bar::{StatsBar, Status},
    },
};
use chrono::Utc;
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gigafter_core::{admin::AdminView, auth::AuthProvider, config::Config, Facet, FilterCriteria};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Search,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub view: AdminView,
    pub auth: Arc<dyn AuthProvider>,
    pub table: SignupTableState,
    pub search: SearchBarState,
    pub command_bar: CommandBarState,
    pub focus: Focus,
    /// Focus before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    /// Visible-row index of the record shown in the feedback popup.
    pub detail: Option<usize>,
    pub status: Option<Status>,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(view: AdminView, auth: Arc<dyn AuthProvider>, config: Config, theme: Theme) -> Self {
        let state = AppState {
            view,
            auth,
            table: SignupTableState::default(),
            search: SearchBarState::default(),
            command_bar: CommandBarState::default(),
            focus: Focus::Table,
            prev_focus: Focus::Table,
            theme,
            config,
            show_help: false,
            detail: None,
            status: None,
            quit: false,
        };
        App { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if !ct_event::poll(Duration::from_millis(16))? {
                continue;
            }
            let raw = ct_event::read()?;
            if let Event::Key(key) = &raw {
                if key.kind != crossterm::event::KeyEventKind::Press {
                    continue;
                }
            }
            if let Some(ev) = event::translate(raw, input_mode(self.state.focus)) {
                tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                self.handle(ev);
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        if let AppEvent::Resize(_, _) = event {
            return;
        }

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                s.show_help = false;
            }
            return;
        }

        if s.detail.is_some() {
            if matches!(event, AppEvent::Enter | AppEvent::Escape | AppEvent::Quit) {
                s.detail = None;
            }
            return;
        }

        match s.focus {
            Focus::Command => {
                match s.command_bar.handle(&event) {
                    BarOutcome::Pending => {}
                    BarOutcome::Cancel => s.focus = s.prev_focus,
                    BarOutcome::Run(cmd) => {
                        s.focus = s.prev_focus;
                        execute_command(s, cmd);
                    }
                }
                return;
            }
            Focus::Search => {
                match event {
                    AppEvent::Quit => s.quit = true,
                    AppEvent::Escape | AppEvent::Enter | AppEvent::FocusNext => {
                        tracing::debug!("focus: Search -> Table");
                        s.focus = Focus::Table;
                    }
                    other => {
                        if s.search.handle(&other) {
                            s.view.set_search(s.search.query().to_string());
                            s.table.reset();
                        }
                    }
                }
                return;
            }
            Focus::Table => {}
        }

        s.status = None;
        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!("entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }
            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }
            AppEvent::FocusNext | AppEvent::SearchFocus => {
                tracing::debug!("focus: Table -> Search");
                s.focus = Focus::Search;
            }
            AppEvent::CycleState => {
                let options = state_options(s);
                let next = next_facet(&current_criteria(s).state_filter, &options);
                set_state(s, next);
            }
            AppEvent::CycleSource => {
                let options: Vec<String> = s
                    .view
                    .context()
                    .map(|ctx| ctx.sources().iter().cloned().collect())
                    .unwrap_or_default();
                let next = next_facet(&current_criteria(s).source_filter, &options);
                set_source(s, next);
            }
            AppEvent::ClearFilters => clear_filters(s),
            AppEvent::Export => export_csv(s),
            AppEvent::Enter => {
                if s.view.context().is_some_and(|ctx| ctx.visible_len() > 0) {
                    s.detail = Some(s.table.cursor);
                }
            }
            other => {
                let len = s.view.context().map_or(0, |ctx| ctx.visible_len());
                s.table.handle(&other, len);
            }
        }
    }
}

/// Letters type into the search and command bars; elsewhere they are shortcuts.
fn input_mode(focus: Focus) -> Mode {
    match focus {
        Focus::Search | Focus::Command => Mode::Insert,
        Focus::Table => Mode::Normal,
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

fn current_criteria(s: &AppState) -> FilterCriteria {
    s.view.context().map(|ctx| ctx.criteria().clone()).unwrap_or_default()
}

/// Distinct state codes present in the record set, sorted.
fn state_options(s: &AppState) -> Vec<String> {
    s.view
        .context()
        .map(|ctx| {
            ctx.records().iter().map(|r| r.state.clone()).collect::<BTreeSet<_>>()
        })
        .unwrap_or_default()
        .into_iter()
        .collect()
}

/// `All → first → … → last → All`. A value no longer in `options` resets to
/// `All`.
fn next_facet(current: &Facet, options: &[String]) -> Facet {
    let next = match current.value() {
        None => options.first(),
        Some(v) => options
            .iter()
            .position(|o| o == v)
            .and_then(|i| options.get(i + 1)),
    };
    next.map_or(Facet::All, |v| Facet::Only(v.clone()))
}

fn set_state(s: &mut AppState, facet: Facet) {
    tracing::debug!(state = %facet, "state filter changed");
    s.view.set_state_filter(facet);
    s.table.reset();
}

fn set_source(s: &mut AppState, facet: Facet) {
    tracing::debug!(source = %facet, "source filter changed");
    s.view.set_source_filter(facet);
    s.table.reset();
}

fn clear_filters(s: &mut AppState) {
    s.view.clear_filters();
    s.search.clear();
    s.table.reset();
}

fn export_csv(s: &mut AppState) {
    let offset = s.config.display.offset();
    let today = Utc::now().with_timezone(&offset).date_naive();
    let Some(export) = s.view.export(offset, today) else {
        s.status = Some(Status::Error("nothing to export".to_string()));
        return;
    };
    let rows = s.view.context().map_or(0, |ctx| ctx.visible_len());
    let path = s.config.ui.export_dir.join(&export.filename);

    s.status = Some(match std::fs::write(&path, export.body.as_bytes()) {
        Ok(()) => {
            tracing::info!(rows, path = %path.display(), "exported signups");
            Status::Info(format!("exported {rows} rows to {}", path.display()))
        }
        Err(err) => {
            tracing::error!(error = %err, path = %path.display(), "export failed");
            Status::Error(format!("export failed: {err}"))
        }
    });
}

/// Execute a parsed [`Command`] against the application state.
fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => s.theme = Theme::named(&name),
        Command::State(facet) => set_state(s, facet),
        Command::Source(facet) => set_source(s, facet),
        Command::Clear => clear_filters(s),
        Command::Export => export_csv(s),
        Command::Stats => s.config.ui.show_stats = !s.config.ui.show_stats,
        Command::Logout => {
            s.view.sign_out(s.auth.as_ref());
            s.quit = true;
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line stats bar | table | 3-line search bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(3)])
        .split(area);

    let offset = state.config.display.offset();
    let identity = state.view.session().map_or("", |s| s.identity.as_str());

    let Some(ctx) = state.view.context() else {
        let msg = state.view.error_message().unwrap_or("Not signed in");
        frame.render_widget(StatsBar::new(identity, None, (0, 0), None, &state.theme), vert[0]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(msg, state.theme.status_error)))
                .block(Block::bordered().title(" Signups ")),
            vert[1],
        );
        return;
    };

    let stats = state.config.ui.show_stats.then(|| ctx.stats(Utc::now(), offset));
    frame.render_widget(
        StatsBar::new(identity, stats, ctx.showing(), state.status.as_ref(), &state.theme),
        vert[0],
    );

    let rows = ctx.visible();
    frame.render_widget(
        SignupTable::new(
            &state.table,
            &rows,
            ctx.total(),
            &ctx.criteria().search_text,
            offset,
            state.focus == Focus::Table,
            &state.theme,
        ),
        vert[1],
    );

    let search = SearchBar::new(
        &state.search,
        ctx.criteria(),
        state.focus == Focus::Search,
        &state.theme,
    );
    let cursor = search.cursor_position(vert[2]);
    frame.render_widget(search, vert[2]);

    if let Some(record) = state.detail.and_then(|i| ctx.visible_record(i)) {
        frame.render_widget(FeedbackPopup::new(record, offset, &state.theme), area);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        frame.set_cursor_position((state.command_bar.cursor_col(cmd_area), cmd_area.y));
        return;
    }

    if state.focus == Focus::Search {
        frame.set_cursor_position(cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
