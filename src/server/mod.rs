//! HTTP service: signup submission, the admin JSON/CSV endpoints, and the
//! static pages.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /` | landing page |
//! | `GET /signup` | signup form page |
//! | `GET /signup/success` | confirmation page |
//! | `GET /terms`, `GET /privacy` | legal pages |
//! | `GET /healthz` | `ok` |
//! | `POST /api/signups` | validate then insert |
//! | `GET /api/admin/signups` | filtered records + facets + stats |
//! | `GET /api/admin/signups.csv` | CSV download of the filtered records |
//!
//! Each admin request builds its own [`AdminView`](gigafter_core::admin::AdminView)
//! from the `Authorization` header; only the store is shared.

pub mod handlers;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::FixedOffset;
use gigafter_core::auth::KeyRegistry;
use gigafter_core::store::RecordStore;
use std::sync::Arc;
use tokio::net::TcpListener;

/// State shared by every handler.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn RecordStore>,
    pub registry: Arc<KeyRegistry>,
    /// Display offset for signup dates in exports and "today" counts.
    pub offset: FixedOffset,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(pages::landing))
        .route("/signup", get(pages::signup_form))
        .route("/signup/success", get(pages::signup_success))
        .route("/terms", get(pages::terms))
        .route("/privacy", get(pages::privacy))
        .route("/healthz", get(handlers::healthz))
        .route("/api/signups", post(handlers::create_signup))
        .route("/api/admin/signups", get(handlers::list_signups))
        .route("/api/admin/signups.csv", get(handlers::export_signups))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: ServerState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        store = state.store.backend_tag(),
        admin_keys = state.registry.len(),
        "gigafter listening"
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
