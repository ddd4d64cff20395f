// crates/garden-gate-mcp/tests/auth_flow.rs
// ============================================================================
// Module: Gateway Auth Flow Tests
// Description: End-to-end tests for credential checks on the dispatch path.
// Purpose: Validate fail-closed token handling and fault precedence.
// Dependencies: garden-gate-mcp, garden-gate-core, jsonwebtoken
// ============================================================================

//! Credential handling tests across the full HTTP dispatch pipeline.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions use unwrap for clarity."
)]

use axum::http::StatusCode;
use garden_gate_core::Role;
use garden_gate_core::Timestamp;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::encode;
use serde_json::json;

mod common;

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let router = common::gateway_router();
    let body = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"});
    let (status, decoded) = common::rpc(&router, "gardens", None, &body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(decoded["error"]["code"], json!(-32000));
    assert_eq!(decoded["id"], json!(1));
    assert!(decoded["error"]["data"]["correlation_id"].as_str().unwrap().starts_with("gg-"));
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let router = common::gateway_router();
    let now = Timestamp::now().as_unix_seconds();
    let token = common::mint_claims(&json!({
        "sub": "user-1",
        "email": "ana@example.com",
        "role": "gardener",
        "iat": now - 1_200,
        "exp": now - 600,
    }));
    let body = json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"});
    let (status, decoded) = common::rpc(&router, "gardens", Some(&token), &body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(decoded["error"]["code"], json!(-32000));
}

#[tokio::test]
async fn token_signed_with_wrong_secret_is_unauthorized() {
    let router = common::gateway_router();
    let now = Timestamp::now().as_unix_seconds();
    let claims = json!({
        "sub": "user-1",
        "email": "ana@example.com",
        "role": "gardener",
        "iat": now,
        "exp": now + 600,
    });
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"an-entirely-different-signing-secret"),
    )
    .expect("token minted");
    let body = json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"});
    let (status, decoded) = common::rpc(&router, "commerce", Some(&token), &body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(decoded["error"]["code"], json!(-32000));
}

#[tokio::test]
async fn unknown_role_claim_is_unauthorized() {
    let router = common::gateway_router();
    let now = Timestamp::now().as_unix_seconds();
    let token = common::mint_claims(&json!({
        "sub": "user-1",
        "email": "ana@example.com",
        "role": "superuser",
        "iat": now,
        "exp": now + 600,
    }));
    let body = json!({"jsonrpc": "2.0", "id": 4, "method": "tools/list"});
    let (status, _decoded) = common::rpc(&router, "gardens", Some(&token), &body).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_body_is_answered_before_auth() {
    let router = common::gateway_router();
    // No token at all: a malformed envelope must still map to invalid
    // params, not unauthorized.
    let body = json!(["not", "an", "object"]);
    let (status, decoded) = common::rpc(&router, "gardens", None, &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(decoded["error"]["code"], json!(-32602));
}

#[tokio::test]
async fn non_object_params_are_rejected_before_auth() {
    let router = common::gateway_router();
    // No token at all: a params payload that is not an object must fail the
    // envelope check, not authentication.
    let body = json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call", "params": 5});
    let (status, decoded) = common::rpc(&router, "gardens", None, &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(decoded["error"]["code"], json!(-32602));
    assert_eq!(decoded["id"], json!(9));
}

#[tokio::test]
async fn wrong_jsonrpc_version_is_invalid_params() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Gardener);
    let body = json!({"jsonrpc": "1.0", "id": 5, "method": "tools/list"});
    let (status, decoded) = common::rpc(&router, "gardens", Some(&token), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(decoded["error"]["code"], json!(-32602));
    assert_eq!(decoded["id"], json!(5));
}

#[tokio::test]
async fn unknown_surface_path_is_not_found() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Gardener);
    let body = json!({"jsonrpc": "2.0", "id": 6, "method": "tools/list"});
    let (status, decoded) = common::rpc(&router, "weather", Some(&token), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(decoded["error"]["code"], json!(-32601));
}
