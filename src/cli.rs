//! Command line: `gigafter serve`, `gigafter admin`, `gigafter export`.

use crate::server::{self, ServerState};
use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use gigafter_core::{
    admin::AdminView,
    auth::{AuthProvider, TokenAuth},
    config::Config,
    Facet, FilterCriteria,
};
use gigafter_store::open_store;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

const DEBUG_LOG: &str = "/tmp/gigafter-debug.log";

#[derive(Parser, Debug)]
#[command(name = "gigafter", about = "GigAfter venue waitlist: signup service and admin tools")]
pub struct Cli {
    /// Write debug logs to /tmp/gigafter-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file to use instead of ~/.config/gigafter/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the signup form and the admin API.
    Serve {
        /// Address to bind, overriding `[server] bind`.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Open the admin console.
    Admin {
        /// Admin bearer token from `[[admin.keys]]`.
        #[arg(long, env = "GIGAFTER_TOKEN")]
        token: String,
    },
    /// Write the filtered signups as CSV.
    Export {
        #[arg(long, env = "GIGAFTER_TOKEN")]
        token: String,
        /// Case-insensitive text matched against venue, contact, email, city.
        #[arg(long, default_value = "")]
        search: String,
        /// Two-letter state code, or `all`.
        #[arg(long, default_value = "all")]
        state: String,
        /// "How did you hear about us" value, or `all`.
        #[arg(long, default_value = "all")]
        source: String,
        /// Output file; `-` writes to stdout. Defaults to the dated filename
        /// in `[ui] export_dir`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Serve { .. } => "serve",
            Command::Admin { .. } => "admin",
            Command::Export { .. } => "export",
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli)?;
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!(command = cli.command.name(), store = ?config.store.backend, "config loaded");

    let rt = tokio::runtime::Runtime::new()?;
    match cli.command {
        Command::Serve { bind } => rt.block_on(serve(config, bind)),
        Command::Admin { token } => {
            let auth: Arc<dyn AuthProvider> =
                Arc::new(TokenAuth::new(Arc::new(config.admin.registry()), Some(token)));
            let view = rt.block_on(open_view(&config, auth.as_ref()))?;
            // The console owns the terminal; the runtime is no longer needed.
            drop(rt);
            gigafter_tui::run(view, auth, config)
        }
        Command::Export { token, search, state, source, output } => {
            let auth = TokenAuth::new(Arc::new(config.admin.registry()), Some(token));
            let mut view = rt.block_on(open_view(&config, &auth))?;
            view.set_criteria(FilterCriteria::new(search, state_facet(&state), Facet::parse(&source)));
            export(&view, &config, output)
        }
    }
}

/// State codes are matched upper-case; `all` in any case means no filter.
fn state_facet(value: &str) -> Facet {
    if value.eq_ignore_ascii_case("all") {
        Facet::All
    } else {
        Facet::parse(&value.to_ascii_uppercase())
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn env_filter(default: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
}

/// `--debug` logs to a file so the TUI keeps the terminal. Without it, only
/// `serve` logs, to stderr.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    if cli.debug {
        let file = std::fs::OpenOptions::new().create(true).append(true).open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(env_filter("debug"))
            .init();
        tracing::info!("gigafter debug log started; tail -f {DEBUG_LOG}");
    } else if matches!(cli.command, Command::Serve { .. }) {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter("info"))
            .init();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

async fn serve(config: Config, bind: Option<String>) -> anyhow::Result<()> {
    let store = open_store(&config.store)?;
    let registry = config.admin.registry();
    if registry.is_empty() {
        tracing::warn!("no [[admin.keys]] configured; admin API will reject every request");
    }
    let state = ServerState {
        store,
        registry: Arc::new(registry),
        offset: config.display.offset(),
    };
    let addr = bind.unwrap_or(config.server.bind);
    server::serve(&addr, state).await
}

/// Authorize `auth` and load every record.
async fn open_view(config: &Config, auth: &dyn AuthProvider) -> anyhow::Result<AdminView> {
    let store = open_store(&config.store)?;
    let mut view = AdminView::new();
    if let Err(err) = view.authorize(auth) {
        bail!("{err}");
    }
    view.load(store.as_ref()).await;
    if let Some(message) = view.error_message() {
        bail!("{message}");
    }
    Ok(view)
}

fn export(view: &AdminView, config: &Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    let offset = config.display.offset();
    let today = Utc::now().with_timezone(&offset).date_naive();
    let export = view.export(offset, today).context("signups are not loaded")?;
    let rows = view.context().map_or(0, |ctx| ctx.visible_len());

    match output {
        Some(path) if path.as_os_str() == "-" => {
            std::io::stdout().lock().write_all(export.body.as_bytes())?;
        }
        other => {
            let path = other.unwrap_or_else(|| config.ui.export_dir.join(&export.filename));
            std::fs::write(&path, &export.body)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("wrote {rows} signups to {}", path.display());
        }
    }
    tracing::info!(rows, "cli csv export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_export_flags() {
        let cli = Cli::parse_from([
            "gigafter", "--debug", "export", "--token", "t", "--state", "tx", "-o", "-",
        ]);
        assert!(cli.debug);
        match cli.command {
            Command::Export { token, state, source, output, .. } => {
                assert_eq!(token, "t");
                assert_eq!(state, "tx");
                assert_eq!(source, "all");
                assert_eq!(output, Some(PathBuf::from("-")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn serve_bind_is_optional() {
        let cli = Cli::parse_from(["gigafter", "serve"]);
        assert!(matches!(cli.command, Command::Serve { bind: None }));
        assert!(!cli.debug);
    }

    #[test]
    fn state_flag_is_case_insensitive() {
        assert_eq!(state_facet("ALL"), Facet::All);
        assert_eq!(state_facet(""), Facet::All);
        assert_eq!(state_facet("tx"), Facet::parse("TX"));
    }

    #[test]
    fn command_is_required() {
        assert!(Cli::try_parse_from(["gigafter"]).is_err());
    }
}
