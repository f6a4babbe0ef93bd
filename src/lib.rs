//! gigafter: venue waitlist signups, admin console, and CSV export.
//!
//! The domain logic lives in the workspace crates; this crate wires them into
//! the three surfaces the binary exposes.
//!
//! # Architecture
//!
//! ```text
//!  signup form ──► validate ──► RecordStore ◄── AdminView ──► filter / facets / export
//!   (server)      (core)        (store)          (core)            │
//!                                                  ▲               ▼
//!                                       server admin API     TUI console / CLI export
//! ```
//!
//! [`server`] serves the public form and the admin JSON/CSV API. [`cli`]
//! parses the command line and dispatches to the server, the TUI console, or
//! a one-shot CSV export.

pub mod cli;
pub mod server;
