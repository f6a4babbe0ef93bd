//! gigafter-store: record store backends for GigAfter.
//!
//! [`RestStore`] talks to a PostgREST-style hosted database over HTTP/1.1:
//! `GET /rest/v1/<table>` lists, `POST /rest/v1/<table>` inserts.
//! [`open_store`] picks a backend from `[store]` config.
//!
//! Both `https://` (rustls, webpki roots) and plain `http://` URLs are
//! accepted. Any other scheme is rejected up front.

use async_trait::async_trait;
use bytes::Bytes;
use gigafter_core::config::{StoreBackend, StoreConfig};
use gigafter_core::store::{MemoryStore, RecordStore};
use gigafter_core::{NewSignup, SignupRecord, StoreError};
use http_body_util::{BodyExt, Full};
use hyper::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, Request, StatusCode, Uri};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Open the backend named by `config.backend`.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn RecordStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory record store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Rest => {
            let store = RestStore::new(&config.url, &config.api_key, &config.table)?;
            tracing::info!(base = %store.base, table = %store.table, "using REST record store");
            Ok(Arc::new(store))
        }
    }
}

// ---------------------------------------------------------------------------
// RestStore
// ---------------------------------------------------------------------------

pub struct RestStore {
    client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    base: String,
    api_key: String,
    table: String,
}

/// Error body returned by the REST layer, e.g. `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl RestStore {
    pub fn new(url: &str, api_key: &str, table: &str) -> Result<Self, StoreError> {
        let base = url.trim().trim_end_matches('/').to_string();
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(StoreError::UnsupportedUrl(url.to_string()));
        }
        base.parse::<Uri>().map_err(|e| StoreError::UnsupportedUrl(format!("{url}: {e}")))?;

        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(connector);
        Ok(Self {
            client,
            base,
            api_key: api_key.to_string(),
            table: table.to_string(),
        })
    }

    fn list_uri(&self) -> String {
        format!("{}/rest/v1/{}?select=*&order=created_at.desc", self.base, self.table)
    }

    fn insert_uri(&self) -> String {
        format!("{}/rest/v1/{}", self.base, self.table)
    }

    fn request(&self, method: Method, uri: &str, body: Bytes) -> Result<Request<Full<Bytes>>, StoreError> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if !self.api_key.is_empty() {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| StoreError::UnsupportedUrl(format!("invalid api key: {e}")))?;
            builder = builder.header("apikey", self.api_key.as_str()).header(AUTHORIZATION, bearer);
        }

        builder
            .body(Full::new(body))
            .map_err(|e| StoreError::UnsupportedUrl(e.to_string()))
    }

    /// Send `req` and return the body of a 2xx response.
    async fn send(&self, req: Request<Full<Bytes>>) -> Result<Bytes, StoreError> {
        let response = tokio::time::timeout(REQUEST_TIMEOUT, self.client.request(req))
            .await
            .map_err(|_| StoreError::Transport("request timed out".to_string()))?
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?
            .to_bytes();

        if !status.is_success() {
            return Err(rejection(status, &body));
        }
        Ok(body)
    }
}

fn rejection(status: StatusCode, body: &[u8]) -> StoreError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            status.canonical_reason().unwrap_or("request failed").to_string()
        });
    StoreError::Rejected { status: status.as_u16(), message }
}

#[async_trait]
impl RecordStore for RestStore {
    fn backend_tag(&self) -> &'static str {
        "rest"
    }

    async fn list(&self) -> Result<Vec<SignupRecord>, StoreError> {
        let req = self.request(Method::GET, &self.list_uri(), Bytes::new())?;
        let body = self.send(req).await?;
        let records: Vec<SignupRecord> =
            serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        tracing::debug!(count = records.len(), "rest store: listed signups");
        Ok(records)
    }

    async fn insert(&self, signup: NewSignup) -> Result<SignupRecord, StoreError> {
        let payload = serde_json::to_vec(&signup).map_err(|e| StoreError::Decode(e.to_string()))?;
        let mut req = self.request(Method::POST, &self.insert_uri(), Bytes::from(payload))?;
        req.headers_mut().insert("prefer", HeaderValue::from_static("return=representation"));

        let body = self.send(req).await?;
        // `return=representation` answers with the inserted rows as an array.
        let mut rows: Vec<SignupRecord> =
            serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        let record = rows
            .pop()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))?;
        tracing::debug!(id = %record.id, "rest store: inserted signup");
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
