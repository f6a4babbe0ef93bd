//! Ratatui widgets for the admin console.

pub mod command_bar;
pub mod feedback_popup;
pub mod help;
pub mod line_input;
pub mod search_bar;
pub mod signup_table;
pub mod stats_bar;
