//! gigafter TUI: ratatui admin console over the signup table.
//!
//! The caller authorizes and loads an [`AdminView`] before handing it over;
//! the console never talks to the record store itself.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use gigafter_core::{admin::AdminView, auth::AuthProvider, config::Config};
use std::sync::Arc;

/// Run the console until the user quits or signs out.
pub fn run(view: AdminView, auth: Arc<dyn AuthProvider>, config: Config) -> anyhow::Result<()> {
    let theme = theme::Theme::named(&config.ui.theme);
    tracing::info!(phase = ?view.phase(), theme = %config.ui.theme, "starting admin console");
    App::new(view, auth, config, theme).run()
}
