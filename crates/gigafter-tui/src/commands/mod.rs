//! `:` commands typed into the command bar.

use gigafter_core::Facet;

/// A parsed, validated `:` command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    /// Set the state facet directly (`all` resets it).
    State(Facet),
    /// Set the source facet directly (`all` resets it).
    Source(Facet),
    /// Reset search, state and source.
    Clear,
    Export,
    /// Toggle the stats strip.
    Stats,
    /// End the admin session and leave the console.
    Logout,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// An empty string returns `Err("")` as a sentinel meaning "close
    /// without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "export" | "w" => Ok(Command::Export),
            "stats" => Ok(Command::Stats),
            "logout" => Ok(Command::Logout),
            "theme" if rest.is_empty() => Err("usage: theme <default|gruvbox>".to_string()),
            "theme" => Ok(Command::Theme(rest.to_string())),
            "state" => {
                if rest.is_empty() {
                    return Err("usage: state <XX|all>".to_string());
                }
                if rest.eq_ignore_ascii_case("all") {
                    return Ok(Command::State(Facet::All));
                }
                let code = rest.to_ascii_uppercase();
                if gigafter_core::types::is_us_state(&code) {
                    Ok(Command::State(Facet::Only(code)))
                } else {
                    Err(format!("unknown state: {rest}"))
                }
            }
            "source" if rest.is_empty() => Err("usage: source <name|all>".to_string()),
            "source" => Ok(Command::Source(Facet::parse(rest))),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
