//! Route handlers for the signup and admin APIs.

use super::ServerState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{
        header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use gigafter_core::{
    admin::{AdminPhase, AdminView},
    auth::TokenAuth,
    facets::SignupStats,
    validate::{validate, RawSignupForm},
    AuthorizationError, FilterCriteria, SignupRecord,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeSet;

/// Shown to the applicant when the store rejects or cannot take a signup.
pub const SUBMIT_FAILED: &str = "Something went wrong. Please try again.";

pub async fn healthz() -> &'static str {
    "ok"
}

// ---------------------------------------------------------------------------
// Signup submission
// ---------------------------------------------------------------------------

/// `POST /api/signups`: validate, then insert. Invalid forms never reach the
/// store. A body that is not a JSON object gets a JSON error body with the
/// extractor's status.
pub async fn create_signup(
    State(state): State<ServerState>,
    payload: Result<Json<RawSignupForm>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            tracing::info!(status = %rejection.status(), reason = %rejection.body_text(), "signup body rejected");
            return (rejection.status(), Json(json!({ "error": rejection.body_text() })))
                .into_response();
        }
    };

    let signup = match validate(&form) {
        Ok(signup) => signup,
        Err(errors) => {
            let fields: Vec<&str> = errors.errors.iter().map(|e| e.field.as_str()).collect();
            tracing::info!(?fields, "signup rejected by validation");
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response();
        }
    };

    match state.store.insert(signup).await {
        Ok(record) => {
            tracing::info!(id = %record.id, state = %record.state, "signup stored");
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, store = state.store.backend_tag(), "signup insert failed");
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": SUBMIT_FAILED }))).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct AdminListing<'a> {
    total: usize,
    showing: usize,
    criteria: &'a FilterCriteria,
    sources: &'a BTreeSet<String>,
    stats: SignupStats,
    records: Vec<&'a SignupRecord>,
}

/// `GET /api/admin/signups?search=&state=&source=`
pub async fn list_signups(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Query(criteria): Query<FilterCriteria>,
) -> Response {
    let view = match open_admin_view(&state, &headers, criteria).await {
        Ok(view) => view,
        Err(resp) => return resp,
    };
    let Some(ctx) = view.context() else {
        return load_failed(&view);
    };

    let (showing, total) = ctx.showing();
    let listing = AdminListing {
        total,
        showing,
        criteria: ctx.criteria(),
        sources: ctx.sources(),
        stats: ctx.stats(Utc::now(), state.offset),
        records: ctx.visible(),
    };
    Json(listing).into_response()
}

/// `GET /api/admin/signups.csv?search=&state=&source=`
pub async fn export_signups(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Query(criteria): Query<FilterCriteria>,
) -> Response {
    let view = match open_admin_view(&state, &headers, criteria).await {
        Ok(view) => view,
        Err(resp) => return resp,
    };

    let today = Utc::now().with_timezone(&state.offset).date_naive();
    let Some(export) = view.export(state.offset, today) else {
        return load_failed(&view);
    };

    tracing::info!(
        filename = %export.filename,
        rows = view.context().map_or(0, |ctx| ctx.visible_len()),
        "admin csv export"
    );
    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    (
        [(CONTENT_TYPE, export.content_type.to_string()), (CONTENT_DISPOSITION, disposition)],
        export.body,
    )
        .into_response()
}

/// Authorize the bearer token, load every record, and apply `criteria`.
async fn open_admin_view(
    state: &ServerState,
    headers: &HeaderMap,
    criteria: FilterCriteria,
) -> Result<AdminView, Response> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let auth = TokenAuth::from_authorization(state.registry.clone(), header);

    let mut view = AdminView::new();
    view.authorize(&auth).map_err(authorization_response)?;
    view.load(state.store.as_ref()).await;
    view.set_criteria(criteria);
    Ok(view)
}

fn authorization_response(err: AuthorizationError) -> Response {
    let status = match err {
        AuthorizationError::Unauthenticated => StatusCode::UNAUTHORIZED,
        AuthorizationError::NotPrivileged => StatusCode::FORBIDDEN,
    };
    let body = json!({ "error": err.to_string(), "redirect": err.redirect() });
    (status, Json(body)).into_response()
}

fn load_failed(view: &AdminView) -> Response {
    debug_assert_eq!(view.phase(), AdminPhase::Error);
    let message = view.error_message().unwrap_or("Failed to load signups");
    (StatusCode::BAD_GATEWAY, Json(json!({ "error": message }))).into_response()
}
