#![allow(unused)]
//! Hosted REST store integration harness.
//!
//! # What this covers
//!
//! - **List**: query string (`select=*`, newest first), auth headers, and
//!   decoding of rows with absent optionals.
//! - **Insert**: JSON body, `prefer: return=representation`, and the
//!   assigned `id` / `created_at` coming back.
//! - **Failures**: error statuses surface as `StoreError::Rejected` with the
//!   server's message; a dead port is a `Transport` error; a malformed body
//!   is a `Decode` error.
//!
//! Runs against `common::fake_postgrest` on a random local port.
//!
//! # Running
//!
//! ```sh
//! cargo test --test rest_store_harness
//! ```

mod common;
use common::fake_postgrest::{FakePostgrest, INSERTED_AT};
use common::*;

use axum::http::{Method, StatusCode};
use gigafter_core::store::RecordStore;
use gigafter_core::validate::validate;
use gigafter_core::StoreError;
use gigafter_store::RestStore;
use pretty_assertions::assert_eq;

const TABLE: &str = "waitlist_signups";

async fn store_for(api: &FakePostgrest, key: &str) -> RestStore {
    RestStore::new(&api.base_url(), key, TABLE).unwrap()
}

#[tokio::test]
async fn list_returns_rows_in_server_order() {
    let api = FakePostgrest::start().await.unwrap();
    for record in two_venues() {
        api.seed(serde_json::to_value(&record).unwrap()).await;
    }

    let records = store_for(&api, "anon-key").await.list().await.unwrap();
    assert_eq!(records, two_venues());
}

#[tokio::test]
async fn list_sends_query_and_auth_headers() {
    let api = FakePostgrest::start().await.unwrap();
    store_for(&api, "anon-key").await.list().await.unwrap();

    let requests = api.requests().await;
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.table, TABLE);
    assert_eq!(req.query.as_deref(), Some("select=*&order=created_at.desc"));
    assert_eq!(req.header("apikey"), Some("anon-key"));
    assert_eq!(req.header("authorization"), Some("Bearer anon-key"));
    assert_eq!(req.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn empty_key_sends_no_auth_headers() {
    let api = FakePostgrest::start().await.unwrap();
    store_for(&api, "").await.list().await.unwrap();

    let req = &api.requests().await[0];
    assert_eq!(req.header("apikey"), None);
    assert_eq!(req.header("authorization"), None);
}

#[tokio::test]
async fn rows_without_optional_columns_decode() {
    let api = FakePostgrest::start().await.unwrap();
    api.seed(serde_json::json!({
        "id": "7",
        "created_at": "2025-03-14T18:30:00+00:00",
        "contact_name": "Sarah Mitchell",
        "email": "sarah@bluenote.com",
        "establishment_name": "Blue Note",
        "address_line1": "100 Main Street",
        "city": "Austin",
        "state": "TX",
        "zip_code": "78701",
        "phone": null
    }))
    .await;

    let records = store_for(&api, "k").await.list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].phone, None);
    assert_eq!(records[0].how_heard_about_us, None);
}

#[tokio::test]
async fn insert_posts_signup_and_returns_stored_record() {
    let api = FakePostgrest::start().await.unwrap();
    let signup = validate(&RawFormBuilder::valid().source("Other").build()).unwrap();

    let record = store_for(&api, "k").await.insert(signup.clone()).await.unwrap();
    assert_eq!(record.id.0, "pg-1");
    assert_eq!(record.created_at.to_rfc3339(), "2025-03-14T18:30:00+00:00");
    assert_eq!(record.establishment_name, signup.establishment_name);
    assert_eq!(record.how_heard_about_us.as_deref(), Some("Other"));

    let req = &api.requests().await[0];
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.query, None);
    assert_eq!(req.header("prefer"), Some("return=representation"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.body.as_ref(), Some(&serde_json::to_value(&signup).unwrap()));
    assert_eq!(api.rows().await.len(), 1);
}

#[tokio::test]
async fn error_status_is_rejected_with_server_message() {
    let api = FakePostgrest::start().await.unwrap();
    api.fail_with(StatusCode::UNAUTHORIZED, "Invalid API key").await;
    let store = store_for(&api, "wrong").await;

    assert_eq!(
        store.list().await.unwrap_err(),
        StoreError::Rejected { status: 401, message: "Invalid API key".into() }
    );
    let signup = validate(&RawFormBuilder::valid().build()).unwrap();
    assert!(matches!(
        store.insert(signup).await,
        Err(StoreError::Rejected { status: 401, .. })
    ));
}

#[tokio::test]
async fn unreachable_store_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let store = RestStore::new(&format!("http://127.0.0.1:{port}"), "k", TABLE).unwrap();
    assert!(matches!(store.list().await, Err(StoreError::Transport(_))));
}

#[tokio::test]
async fn malformed_rows_are_a_decode_error() {
    let api = FakePostgrest::start().await.unwrap();
    api.seed(serde_json::json!({ "id": "1" })).await;
    assert!(matches!(
        store_for(&api, "k").await.list().await,
        Err(StoreError::Decode(_))
    ));
}
