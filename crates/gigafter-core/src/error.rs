//! Error taxonomy shared by the pipeline, the store backends, and the
//! admin controller.
//!
//! Each error is recovered at the boundary where it occurs: validation
//! errors next to the form, store errors as a user notification, and
//! authorization errors as a redirect.

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Form field a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ContactName,
    Email,
    EstablishmentName,
    AddressLine1,
    City,
    State,
    ZipCode,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::ContactName => "contact_name",
            Field::Email => "email",
            Field::EstablishmentName => "establishment_name",
            Field::AddressLine1 => "address_line1",
            Field::City => "city",
            Field::State => "state",
            Field::ZipCode => "zip_code",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rejected form field with a message fit for display next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: &'static str,
}

/// Every violation found in a submitted form, at most one per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{} invalid field(s)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// The error reported for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// A failed fetch or insert against the record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The request never produced a response (connection refused, reset, …).
    #[error("store unreachable: {0}")]
    Transport(String),
    /// The store answered with a non-success status.
    #[error("store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The response body did not match the record schema.
    #[error("could not decode store response: {0}")]
    Decode(String),
    /// The configured store URL cannot be used by this client.
    #[error("unsupported store url: {0}")]
    UnsupportedUrl(String),
    /// The store is deliberately unavailable (e.g. a fault-injected test store).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// Access to the admin view was refused. Treated as a routing decision: the
/// caller navigates to [`AuthorizationError::redirect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("sign in required")]
    Unauthenticated,
    #[error("You don't have admin access")]
    NotPrivileged,
}

impl AuthorizationError {
    /// Where the user is sent instead of the admin view.
    pub fn redirect(self) -> &'static str {
        match self {
            AuthorizationError::Unauthenticated => "/admin/login",
            AuthorizationError::NotPrivileged => "/",
        }
    }
}
