//! Auth collaborator: who is looking at the admin view, and may they?
//!
//! The admin controller only needs [`AuthProvider::current_session`] and
//! [`AuthProvider::sign_out`]. [`TokenAuth`] implements both on top of a
//! [`KeyRegistry`] of configured bearer tokens: the HTTP service builds one
//! per request from the `Authorization` header, the admin console builds one
//! from `--token`.

use serde::Deserialize;
use std::sync::{Arc, Mutex};
use subtle::ConstantTimeEq;

/// An authenticated identity and whether it may use the admin view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: String,
    pub is_privileged: bool,
}

pub trait AuthProvider: Send + Sync {
    /// The signed-in session, or `None` when nobody is signed in.
    fn current_session(&self) -> Option<Session>;

    /// End the current session. Subsequent calls to
    /// [`current_session`](Self::current_session) return `None`.
    fn sign_out(&self);
}

// ---------------------------------------------------------------------------
// Key registry
// ---------------------------------------------------------------------------

/// One `[[admin.keys]]` entry in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminKey {
    pub identity: String,
    pub token: String,
    /// Keys default to privileged; set `false` for read-only operators that
    /// should be turned away from the admin view.
    #[serde(default = "default_privileged")]
    pub privileged: bool,
}

fn default_privileged() -> bool { true }

/// The set of bearer tokens accepted by the admin surfaces.
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    keys: Vec<AdminKey>,
}

impl KeyRegistry {
    pub fn new(keys: Vec<AdminKey>) -> Self {
        // Empty tokens would match an empty Authorization header.
        let keys = keys.into_iter().filter(|k| !k.token.is_empty()).collect();
        Self { keys }
    }

    /// Resolve a presented token to a session.
    pub fn session_for(&self, token: &str) -> Option<Session> {
        self.keys.iter().find(|k| constant_time_eq(&k.token, token)).map(|k| Session {
            identity: k.identity.clone(),
            is_privileged: k.privileged,
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Unequal lengths compare false without inspecting the bytes.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

// ---------------------------------------------------------------------------
// TokenAuth
// ---------------------------------------------------------------------------

/// An [`AuthProvider`] holding one presented bearer token.
pub struct TokenAuth {
    registry: Arc<KeyRegistry>,
    presented: Mutex<Option<String>>,
}

impl TokenAuth {
    pub fn new(registry: Arc<KeyRegistry>, token: Option<String>) -> Self {
        Self { registry, presented: Mutex::new(token) }
    }

    /// Build from an `Authorization` header value (`Bearer <token>`).
    pub fn from_authorization(registry: Arc<KeyRegistry>, header: Option<&str>) -> Self {
        let token = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string());
        Self::new(registry, token)
    }
}

impl AuthProvider for TokenAuth {
    fn current_session(&self) -> Option<Session> {
        let presented = self.presented.lock().unwrap_or_else(|e| e.into_inner());
        presented.as_deref().and_then(|t| self.registry.session_for(t))
    }

    fn sign_out(&self) {
        let mut presented = self.presented.lock().unwrap_or_else(|e| e.into_inner());
        if presented.take().is_some() {
            tracing::info!("admin session signed out");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
