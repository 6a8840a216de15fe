//! Integration tests for the settings pages: payments, security, team and
//! integrations.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use storedesk_integration_tests::TestApp;

fn default_ids(list: &Value) -> Vec<i64> {
    list["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["is_default"] == true)
        .filter_map(|m| m["id"].as_i64())
        .collect()
}

// ============================================================================
// Payment methods
// ============================================================================

#[tokio::test]
async fn test_make_default_keeps_a_single_default() {
    let app = TestApp::new();

    let (status, method) = app.post("/api/payments/2/default").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(method["is_default"], true);

    let (_, list) = app.get("/api/payments").await;
    assert_eq!(default_ids(&list), vec![2]);
}

#[tokio::test]
async fn test_make_default_activates_inactive_method() {
    let app = TestApp::new();

    let (_, method) = app.post("/api/payments/3/default").await;
    assert_eq!(method["status"], "active");
    assert_eq!(method["is_default"], true);

    let (_, list) = app.get("/api/payments").await;
    assert_eq!(default_ids(&list), vec![3]);
}

#[tokio::test]
async fn test_make_default_unknown_leaves_default_alone() {
    let app = TestApp::new();

    let (status, _) = app.post("/api/payments/99/default").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app.get("/api/payments").await;
    assert_eq!(default_ids(&list), vec![1]);
}

#[tokio::test]
async fn test_deactivating_default_clears_it() {
    let app = TestApp::new();

    let (status, method) = app.post("/api/payments/1/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(method["status"], "inactive");
    assert_eq!(method["is_default"], false);

    let (_, list) = app.get("/api/payments").await;
    assert!(default_ids(&list).is_empty());
}

#[tokio::test]
async fn test_add_payment_method() {
    let app = TestApp::new();

    let (status, method) = app
        .post_json(
            "/api/payments",
            json!({"name": "Klarna", "kind": "wallet", "fee_percent": "3.29"}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(method["id"], 6);
    assert_eq!(method["status"], "inactive");
    assert_eq!(method["is_default"], false);
}

#[tokio::test]
async fn test_add_payment_method_validates_fee() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json(
            "/api/payments",
            json!({"name": "Expensive", "kind": "card", "fee_percent": "150"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post_json(
            "/api/payments",
            json!({"name": "Card", "kind": "card", "last_four": "12a4"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_default_leaves_no_default() {
    let app = TestApp::new();

    let (status, _) = app.delete("/api/payments/1").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = app.get("/api/payments").await;
    assert_eq!(list["total"], 4);
    assert!(default_ids(&list).is_empty());
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_sign_out_others_keeps_current_session() {
    let app = TestApp::new();

    let (status, result) = app.post("/api/security/sessions/sign-out-others").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["affected"], 2);

    let (_, sessions) = app.get("/api/security/sessions").await;
    let sessions = sessions.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions.first().unwrap()["current"], true);
}

#[tokio::test]
async fn test_current_session_cannot_be_revoked() {
    let app = TestApp::new();

    let (status, body) = app.delete("/api/security/sessions/1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().is_some());

    let (status, _) = app.delete("/api/security/sessions/2").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, sessions) = app.get("/api/security/sessions").await;
    assert_eq!(sessions.as_array().unwrap().len(), 2);
}

// ============================================================================
// Moderators
// ============================================================================

#[tokio::test]
async fn test_invite_moderator() {
    let app = TestApp::new();

    let (status, moderator) = app
        .post_json(
            "/api/moderators",
            json!({"name": "Iris Novak", "email": "Iris@StoreDesk.io", "role": "editor"}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(moderator["id"], 5);
    assert_eq!(moderator["active"], true);
    let permissions = moderator["permissions"].as_array().unwrap();
    assert!(permissions.contains(&json!("manage_products")));
    assert!(!permissions.contains(&json!("manage_settings")));
}

#[tokio::test]
async fn test_invite_rejects_taken_email() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json(
            "/api/moderators",
            json!({"name": "Ava Again", "email": "ava@storedesk.io"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));

    let (_, team) = app.get("/api/moderators").await;
    assert_eq!(team["total"], 4);
}

#[tokio::test]
async fn test_toggle_moderator_permission() {
    let app = TestApp::new();

    let (status, moderator) = app
        .post("/api/moderators/4/permissions/manage_orders")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        moderator["permissions"]
            .as_array()
            .unwrap()
            .contains(&json!("manage_orders"))
    );

    let (_, moderator) = app
        .post("/api/moderators/4/permissions/manage_orders")
        .await;
    assert!(
        !moderator["permissions"]
            .as_array()
            .unwrap()
            .contains(&json!("manage_orders"))
    );
}

#[tokio::test]
async fn test_toggle_moderator_active_unknown_is_404() {
    let app = TestApp::new();

    let (status, _) = app.post("/api/moderators/77/active").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/api/moderators/77").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// ============================================================================
// Integrations
// ============================================================================

#[tokio::test]
async fn test_toggle_integration_connection() {
    let app = TestApp::new();

    let (status, integration) = app.post("/api/integrations/2/connection").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(integration["connected"], true);
    assert!(integration["connected_at"].is_string());

    let (_, integration) = app.post("/api/integrations/2/connection").await;
    assert_eq!(integration["connected"], false);
    assert!(integration["connected_at"].is_null());
}

#[tokio::test]
async fn test_blank_settings_filters_are_ignored() {
    let app = TestApp::new();

    let (status, list) = app.get("/api/payments?status=&kind=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["count"], 5);

    let (status, team) = app.get("/api/moderators?role=&active=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(team["count"], 4);

    let (status, apps) = app.get("/api/integrations?category=&connected=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(apps["count"], 6);
}

#[tokio::test]
async fn test_integration_filters() {
    let app = TestApp::new();

    let (status, list) = app.get("/api/integrations?connected=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["count"], 3);
    assert_eq!(list["total"], 6);
}
