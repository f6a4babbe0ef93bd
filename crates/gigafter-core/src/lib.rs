//! gigafter-core: GigAfter waitlist core library.
//!
//! This crate holds the signup pipeline shared by the HTTP service, the
//! admin console, and the headless exporter, plus the shared types.
//!
//! # Architecture
//!
//! ```text
//!  form ──► validate ──► RecordStore::insert
//!
//!  RecordStore::list ──► AdminView ──► filter ──► visible rows ──► export (CSV)
//!                            │
//!                            └──► facets (sources, stats)
//! ```
//!
//! Everything except the store calls is synchronous and pure.

pub mod admin;
pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod facets;
pub mod filter;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{AuthorizationError, Field, StoreError, ValidationError, ValidationErrors};
pub use filter::{Facet, FilterCriteria};
pub use types::{NewSignup, SignupId, SignupRecord};
