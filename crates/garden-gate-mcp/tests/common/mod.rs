// crates/garden-gate-mcp/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared fixtures for gateway integration tests.
// Purpose: Provide routers, minted tokens, and a JSON-RPC request helper.
// Dependencies: garden-gate-config, garden-gate-core, garden-gate-mcp
// ============================================================================

//! ## Overview
//! Shared fixtures for exercising the full HTTP dispatch pipeline: a gateway
//! router over seeded in-memory stores, HS256 token minting in the shape the
//! product's identity service uses, and a one-shot JSON-RPC helper.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use garden_gate_config::GardenGateConfig;
use garden_gate_config::SigningSecret;
use garden_gate_core::InMemoryCommerceStore;
use garden_gate_core::InMemoryDirectoryStore;
use garden_gate_core::InMemoryGardenStore;
use garden_gate_core::Role;
use garden_gate_core::Timestamp;
use garden_gate_mcp::GatewayServer;
use garden_gate_mcp::GatewayStores;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::encode;
use serde_json::Value;
use serde_json::json;
use tower::ServiceExt;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Signing secret shared by all integration fixtures.
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Builds a gateway router over seeded in-memory stores.
#[must_use]
pub fn gateway_router() -> Router {
    let mut config = GardenGateConfig::default();
    config.auth.signing_secret = SigningSecret::new(TEST_SECRET.to_string());
    config.server.audit = false;
    let stores = GatewayStores {
        directories: Arc::new(InMemoryDirectoryStore::seeded()),
        gardens: Arc::new(InMemoryGardenStore::new()),
        commerce: Arc::new(InMemoryCommerceStore::seeded()),
    };
    GatewayServer::from_config(config, stores).expect("gateway built").router()
}

/// Mints a valid token for the given role.
#[must_use]
pub fn token_for(role: Role) -> String {
    let now = Timestamp::now().as_unix_seconds();
    mint_claims(&json!({
        "sub": format!("user-{}", role.as_str()),
        "email": format!("{}@example.com", role.as_str()),
        "role": role.as_str(),
        "locale": "hr",
        "iat": now,
        "exp": now + 600,
    }))
}

/// Mints a token from raw claims with the fixture secret.
#[must_use]
pub fn mint_claims(claims: &Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token minted")
}

// ============================================================================
// SECTION: Request Helper
// ============================================================================

/// Sends one JSON-RPC request and returns the status and decoded body.
pub async fn rpc(
    router: &Router,
    surface: &str,
    token: Option<&str>,
    body: &Value,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("/{surface}"))
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).expect("request built");
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body read");
    let decoded: Value = serde_json::from_slice(&bytes).expect("json body");
    (status, decoded)
}

/// Builds a `tools/call` envelope.
#[must_use]
pub fn call_envelope(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {
            "name": name,
            "arguments": arguments,
        },
    })
}
