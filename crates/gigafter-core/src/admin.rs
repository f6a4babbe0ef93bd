//! Admin view controller: the state machine behind the signup table.
//!
//! ```text
//! Unauthenticated ──authorize──► Loading ──finish_load(Ok)──► Ready
//!        ▲                          │
//!        │                          └──finish_load(Err)──► Error
//!        └──────────── sign_out (from any state) ◄─────────────┘
//! ```
//!
//! Once `Ready`, the controller owns an [`AdminContext`]: the full record
//! set fetched once from the store, the current [`FilterCriteria`], and the
//! derived list of visible rows. Every criteria change recomputes the
//! visible rows synchronously; nothing goes back to the store.
//!
//! The context is created on entering `Ready` and dropped on sign-out, so no
//! admin state outlives the session.

use crate::auth::{AuthProvider, Session};
use crate::error::{AuthorizationError, StoreError};
use crate::export::CsvExport;
use crate::facets::{distinct_sources, SignupStats};
use crate::filter::{filter_indices, Facet, FilterCriteria};
use crate::store::RecordStore;
use crate::types::SignupRecord;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::collections::BTreeSet;

/// Externally visible phase of an [`AdminView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPhase {
    Unauthenticated,
    Loading,
    Ready,
    Error,
}

enum ViewState {
    Unauthenticated,
    Loading { session: Session },
    Ready(AdminContext),
    Error { session: Session, message: String },
}

// ---------------------------------------------------------------------------
// AdminContext
// ---------------------------------------------------------------------------

/// Everything the admin view holds while `Ready`.
pub struct AdminContext {
    session: Session,
    records: Vec<SignupRecord>,
    criteria: FilterCriteria,
    /// Indices into `records` of the rows passing `criteria`.
    visible: Vec<usize>,
    sources: BTreeSet<String>,
}

impl AdminContext {
    fn new(session: Session, records: Vec<SignupRecord>) -> Self {
        let sources = distinct_sources(&records);
        let visible = (0..records.len()).collect();
        Self { session, records, criteria: FilterCriteria::default(), visible, sources }
    }

    fn recompute(&mut self) {
        self.visible = filter_indices(&self.records, &self.criteria);
        tracing::debug!(
            search = %self.criteria.search_text,
            state = %self.criteria.state_filter,
            source = %self.criteria.source_filter,
            visible = self.visible.len(),
            total = self.records.len(),
            "admin view recomputed"
        );
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The full, unfiltered record set (newest first, as fetched).
    pub fn records(&self) -> &[SignupRecord] {
        &self.records
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Records passing the current criteria, in fetch order.
    pub fn visible(&self) -> Vec<&SignupRecord> {
        self.visible.iter().map(|&i| &self.records[i]).collect()
    }

    /// The `n`th visible record.
    pub fn visible_record(&self, n: usize) -> Option<&SignupRecord> {
        self.visible.get(n).map(|&i| &self.records[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// "Showing N of M" counts as `(visible, total)`.
    pub fn showing(&self) -> (usize, usize) {
        (self.visible.len(), self.records.len())
    }

    /// Distinct sources across the full record set, for the source selector.
    pub fn sources(&self) -> &BTreeSet<String> {
        &self.sources
    }

    pub fn stats(&self, now: DateTime<Utc>, offset: FixedOffset) -> SignupStats {
        SignupStats::compute(&self.records, now, offset)
    }

    /// CSV of the visible rows.
    pub fn export(&self, offset: FixedOffset, today: NaiveDate) -> CsvExport {
        CsvExport::new(&self.visible(), offset, today)
    }
}

// ---------------------------------------------------------------------------
// AdminView
// ---------------------------------------------------------------------------

/// Controller for one admin session.
pub struct AdminView {
    state: ViewState,
}

impl Default for AdminView {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminView {
    pub fn new() -> Self {
        Self { state: ViewState::Unauthenticated }
    }

    pub fn phase(&self) -> AdminPhase {
        match self.state {
            ViewState::Unauthenticated => AdminPhase::Unauthenticated,
            ViewState::Loading { .. } => AdminPhase::Loading,
            ViewState::Ready(_) => AdminPhase::Ready,
            ViewState::Error { .. } => AdminPhase::Error,
        }
    }

    /// The signed-in session, in every phase but `Unauthenticated`.
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            ViewState::Unauthenticated => None,
            ViewState::Loading { session } | ViewState::Error { session, .. } => Some(session),
            ViewState::Ready(ctx) => Some(&ctx.session),
        }
    }

    /// User-facing message of a failed load.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            ViewState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&AdminContext> {
        match &self.state {
            ViewState::Ready(ctx) => Some(ctx),
            _ => None,
        }
    }

    fn context_mut(&mut self) -> Option<&mut AdminContext> {
        match &mut self.state {
            ViewState::Ready(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// Confirm a privileged session with `auth`.
    ///
    /// From `Unauthenticated` this moves to `Loading`. In any other phase it
    /// re-checks the session and tears the view down if it is gone.
    pub fn authorize(&mut self, auth: &dyn AuthProvider) -> Result<(), AuthorizationError> {
        let session = match auth.current_session() {
            None => {
                self.state = ViewState::Unauthenticated;
                return Err(AuthorizationError::Unauthenticated);
            }
            Some(s) if !s.is_privileged => {
                tracing::warn!(identity = %s.identity, "admin access denied: not privileged");
                self.state = ViewState::Unauthenticated;
                return Err(AuthorizationError::NotPrivileged);
            }
            Some(s) => s,
        };

        if matches!(self.state, ViewState::Unauthenticated) {
            tracing::info!(identity = %session.identity, "admin session authorized");
            self.state = ViewState::Loading { session };
        }
        Ok(())
    }

    /// Complete the initial fetch. Ignored outside `Loading`.
    pub fn finish_load(&mut self, result: Result<Vec<SignupRecord>, StoreError>) {
        let session = match std::mem::replace(&mut self.state, ViewState::Unauthenticated) {
            ViewState::Loading { session } => session,
            other => {
                tracing::warn!("finish_load called outside Loading; ignored");
                self.state = other;
                return;
            }
        };

        self.state = match result {
            Ok(records) => {
                tracing::info!(count = records.len(), "admin records loaded");
                ViewState::Ready(AdminContext::new(session, records))
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load signups");
                ViewState::Error { session, message: "Failed to load signups".to_string() }
            }
        };
    }

    /// Fetch every record from `store` and complete the load.
    pub async fn load<S>(&mut self, store: &S)
    where
        S: RecordStore + ?Sized,
    {
        if self.phase() != AdminPhase::Loading {
            return;
        }
        let result = store.list().await;
        self.finish_load(result);
    }

    /// Replace the search text. No-op unless `Ready`.
    pub fn set_search(&mut self, text: impl Into<String>) {
        if let Some(ctx) = self.context_mut() {
            ctx.criteria.search_text = text.into();
            ctx.recompute();
        }
    }

    pub fn set_state_filter(&mut self, facet: Facet) {
        if let Some(ctx) = self.context_mut() {
            ctx.criteria.state_filter = facet;
            ctx.recompute();
        }
    }

    pub fn set_source_filter(&mut self, facet: Facet) {
        if let Some(ctx) = self.context_mut() {
            ctx.criteria.source_filter = facet;
            ctx.recompute();
        }
    }

    /// Replace all criteria at once.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if let Some(ctx) = self.context_mut() {
            ctx.criteria = criteria;
            ctx.recompute();
        }
    }

    pub fn clear_filters(&mut self) {
        if let Some(ctx) = self.context_mut() {
            ctx.criteria.clear();
            ctx.recompute();
        }
    }

    /// CSV of the visible rows, when `Ready`.
    pub fn export(&self, offset: FixedOffset, today: NaiveDate) -> Option<CsvExport> {
        self.context().map(|ctx| ctx.export(offset, today))
    }

    /// Sign out through `auth` and drop all session state.
    pub fn sign_out(&mut self, auth: &dyn AuthProvider) {
        auth.sign_out();
        self.state = ViewState::Unauthenticated;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
