//! Fake PostgREST server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `GET /rest/v1/{table}`: the seeded rows, as given
//! - `POST /rest/v1/{table}`: appends the posted row with an assigned `id`
//!   and `created_at`, answering `201` with a one-element array
//!
//! Every request is recorded so tests can assert on headers, query strings,
//! and bodies. [`FakePostgrest::fail_with`] makes every later request answer
//! with an error status and a `{"message"}` body.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakePostgrest::start().await.unwrap();
//! api.seed(serde_json::to_value(&record).unwrap()).await;
//! let store = RestStore::new(&api.base_url(), "anon-key", "waitlist_signups").unwrap();
//! ```

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Timestamp given to every row inserted through the fake.
pub const INSERTED_AT: &str = "2025-03-14T18:30:00Z";

/// One request as the fake saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub table: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Default)]
struct ApiState {
    rows: Vec<Value>,
    requests: Vec<RecordedRequest>,
    failure: Option<(StatusCode, String)>,
    next_id: usize,
}

/// Handle to the running fake server.
pub struct FakePostgrest {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakePostgrest {
    /// Start the fake server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/rest/v1/{table}", get(list_rows).post(insert_row))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the task a moment to register.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Add a row returned by later `GET`s.
    pub async fn seed(&self, row: Value) {
        self.state.lock().await.rows.push(row);
    }

    /// Answer every later request with `status` and `{"message": message}`.
    pub async fn fail_with(&self, status: StatusCode, message: &str) {
        self.state.lock().await.failure = Some((status, message.to_string()));
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn rows(&self) -> Vec<Value> {
        self.state.lock().await.rows.clone()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn failure_response(failure: &(StatusCode, String)) -> Response {
    (failure.0, Json(json!({ "message": failure.1 }))).into_response()
}

async fn list_rows(
    State(state): State<Arc<Mutex<ApiState>>>,
    Path(table): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let mut s = state.lock().await;
    s.requests.push(RecordedRequest { method: Method::GET, table, query, headers, body: None });
    if let Some(failure) = &s.failure {
        return failure_response(failure);
    }
    Json(Value::Array(s.rows.clone())).into_response()
}

async fn insert_row(
    State(state): State<Arc<Mutex<ApiState>>>,
    Path(table): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().await;
    s.requests.push(RecordedRequest {
        method: Method::POST,
        table,
        query,
        headers,
        body: Some(body.clone()),
    });
    if let Some(failure) = &s.failure {
        return failure_response(failure);
    }

    s.next_id += 1;
    let mut row = body;
    if let Value::Object(map) = &mut row {
        map.insert("id".to_string(), json!(format!("pg-{}", s.next_id)));
        map.insert("created_at".to_string(), json!(INSERTED_AT));
    }
    s.rows.push(row.clone());
    (StatusCode::CREATED, Json(json!([row]))).into_response()
}
