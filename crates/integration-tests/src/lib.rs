//! Integration tests for StoreDesk.
//!
//! Tests drive the full admin router in-process, so no server or network is
//! needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storedesk-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `admin_catalog` - Products, orders, dashboard and analytics
//! - `admin_notifications` - Feed, read-all, delivery preferences
//! - `admin_settings` - Payments, security, team, integrations
//! - `admin_layout` - Sidebar settings persistence, navigation, tables

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use storedesk_admin::{
    app,
    config::AdminConfig,
    db::FileSettingsStore,
    state::{AppState, SharedSettingsStore},
};
use storedesk_core::MemorySettingsStore;

const MAX_BODY: usize = 1024 * 1024;

/// A seeded admin app and the state behind it.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    state: AppState,
}

impl TestApp {
    /// App backed by an in-memory settings store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemorySettingsStore::new()))
    }

    /// App whose settings live in files under `dir`.
    #[must_use]
    pub fn with_settings_dir(dir: &Path) -> Self {
        Self::with_store(Arc::new(FileSettingsStore::new(dir.to_path_buf())))
    }

    /// App backed by the given settings store.
    #[must_use]
    pub fn with_store(store: SharedSettingsStore) -> Self {
        let state = AppState::seeded(AdminConfig::default(), store).expect("seed data loads");
        Self {
            router: app(state.clone()),
            state,
        }
    }

    /// Shared state, for asserting on collections directly.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Send a request and decode the JSON response.
    ///
    /// Empty bodies decode as `Value::Null`; non-JSON bodies as a string.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), MAX_BODY)
            .await
            .expect("readable body");

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::POST, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Values of `field` across the `items` of a list response.
#[must_use]
pub fn field_values<'a>(list: &'a Value, field: &str) -> Vec<&'a Value> {
    list["items"]
        .as_array()
        .map(|items| items.iter().filter_map(|item| item.get(field)).collect())
        .unwrap_or_default()
}
