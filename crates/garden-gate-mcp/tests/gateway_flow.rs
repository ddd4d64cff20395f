// crates/garden-gate-mcp/tests/gateway_flow.rs
// ============================================================================
// Module: Gateway Dispatch Flow Tests
// Description: End-to-end JSON-RPC flows across the three surfaces.
// Purpose: Validate method dispatch, permissions, and result payload shapes.
// Dependencies: garden-gate-mcp, garden-gate-core
// ============================================================================

//! Full dispatch-pipeline tests: listing, calling, permission gates, and the
//! advertised-versus-callable tool catalog.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions use unwrap for clarity."
)]

use axum::http::StatusCode;
use garden_gate_core::Role;
use serde_json::json;

mod common;

#[tokio::test]
async fn initialize_is_idempotent() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Gardener);
    let body = json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"});
    let (status_a, first) = common::rpc(&router, "gardens", Some(&token), &body).await;
    let (status_b, second) = common::rpc(&router, "gardens", Some(&token), &body).await;
    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(first["result"], second["result"]);
    assert_eq!(first["result"]["serverInfo"]["name"], json!("garden-gate"));
}

#[tokio::test]
async fn initialized_notification_returns_null_result() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Gardener);
    let body = json!({"jsonrpc": "2.0", "id": 2, "method": "notifications/initialized"});
    let (status, decoded) = common::rpc(&router, "gardens", Some(&token), &body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(decoded["result"].is_null());
    assert!(decoded.get("error").is_none());
}

#[tokio::test]
async fn catalog_methods_are_empty_but_present() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Viewer);
    for (method, key) in [
        ("prompts/list", "prompts"),
        ("resources/list", "resources"),
        ("resources/templates/list", "resourceTemplates"),
    ] {
        let body = json!({"jsonrpc": "2.0", "id": 3, "method": method});
        let (status, decoded) = common::rpc(&router, "directories", Some(&token), &body).await;
        assert_eq!(status, StatusCode::OK, "method {method}");
        assert_eq!(decoded["result"][key], json!([]), "method {method}");
    }
}

#[tokio::test]
async fn unknown_method_is_method_not_found() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Gardener);
    let body = json!({"jsonrpc": "2.0", "id": 4, "method": "shutdown"});
    let (status, decoded) = common::rpc(&router, "gardens", Some(&token), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(decoded["error"]["code"], json!(-32601));
}

#[tokio::test]
async fn create_garden_round_trip() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Gardener);
    let envelope = common::call_envelope(
        5,
        "gardens/create-garden",
        json!({"name": "Vrt kraj kuće", "bed_count": 4}),
    );
    let (status, decoded) = common::rpc(&router, "gardens", Some(&token), &envelope).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decoded["result"]["success"], json!(true));
    assert_eq!(decoded["result"]["garden"]["name"], json!("Vrt kraj kuće"));
    assert_eq!(decoded["result"]["garden"]["beds"].as_array().unwrap().len(), 4);

    let list = json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {
        "name": "gardens/get-gardens", "arguments": {}}});
    let (_status, listed) = common::rpc(&router, "gardens", Some(&token), &list).await;
    assert_eq!(listed["result"]["count"], json!(1));
}

#[tokio::test]
async fn viewer_write_is_forbidden() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Viewer);
    let envelope =
        common::call_envelope(7, "gardens/create-garden", json!({"name": "Tuđi vrt"}));
    let (status, decoded) = common::rpc(&router, "gardens", Some(&token), &envelope).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(decoded["error"]["code"], json!(-32001));
    assert_eq!(decoded["id"], json!(7));
}

#[tokio::test]
async fn invalid_arguments_report_every_violation() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Gardener);
    let envelope = common::call_envelope(
        8,
        "directories-search-entities",
        json!({"limit": 0, "locale": "de"}),
    );
    let (status, decoded) = common::rpc(&router, "directories", Some(&token), &envelope).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(decoded["error"]["code"], json!(-32602));
    let violations = decoded["error"]["data"]["violations"].as_array().unwrap();
    let fields: Vec<&str> =
        violations.iter().map(|violation| violation["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["query", "limit", "locale"]);
}

#[tokio::test]
async fn every_listed_tool_is_callable() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Admin);
    for surface in ["directories", "gardens", "commerce"] {
        let list = json!({"jsonrpc": "2.0", "id": 9, "method": "tools/list"});
        let (status, decoded) = common::rpc(&router, surface, Some(&token), &list).await;
        assert_eq!(status, StatusCode::OK);
        let tools = decoded["result"]["tools"].as_array().unwrap();
        assert!(!tools.is_empty(), "surface {surface} lists no tools");
        for tool in tools {
            let name = tool["name"].as_str().unwrap();
            let envelope = common::call_envelope(10, name, json!({}));
            let (_status, called) = common::rpc(&router, surface, Some(&token), &envelope).await;
            // A listed tool must never dangle: calls resolve and either
            // succeed or fail argument validation, not tool lookup.
            if let Some(error) = called.get("error") {
                assert_eq!(error["code"], json!(-32602), "tool {name} dangles");
            }
        }
    }
}

#[tokio::test]
async fn cross_surface_tool_call_does_not_resolve() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Admin);
    let envelope = common::call_envelope(11, "commerce/get-cart", json!({}));
    let (status, decoded) = common::rpc(&router, "gardens", Some(&token), &envelope).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(decoded["error"]["code"], json!(-32601));
}

#[tokio::test]
async fn out_of_stock_is_a_payload_rejection_not_a_fault() {
    let router = common::gateway_router();
    let token = common::token_for(Role::Gardener);
    let envelope = common::call_envelope(
        12,
        "commerce/add-to-cart",
        json!({"product_id": "product-hand-trowel", "quantity": 99, "locale": "en"}),
    );
    let (status, decoded) = common::rpc(&router, "commerce", Some(&token), &envelope).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decoded["result"]["success"], json!(false));
    assert_eq!(decoded["result"]["kind"], json!("out_of_stock"));
}

#[tokio::test]
async fn surface_descriptor_lists_canonical_tools() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let router = common::gateway_router();
    let request =
        Request::builder().method("GET").uri("/commerce").body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let decoded: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(decoded["surface"], json!("commerce"));
    assert_eq!(decoded["tools"].as_array().unwrap().len(), 8);
}
