// crates/garden-gate-mcp/src/server.rs
// ============================================================================
// Module: Gateway Server
// Description: HTTP JSON-RPC 2.0 server for the three tool surfaces.
// Purpose: Parse, authenticate, authorize, and dispatch surface requests.
// Dependencies: garden-gate-config, garden-gate-contract, axum, tokio
// ============================================================================

//! ## Overview
//! Each surface is served under its own path: `POST /{surface}` carries the
//! JSON-RPC envelope and `GET /{surface}` returns a small descriptor for
//! health checks. The pipeline order is fixed: body parsing faults before
//! authentication, authentication before the surface permission gate, and
//! the gate before any method branch. Every response carries a server
//! correlation identifier in its fault data, and every decision is audited.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::routing::get;
use garden_gate_config::GardenGateConfig;
use garden_gate_contract::Surface;
use garden_gate_contract::surface_tools;
use garden_gate_contract::tool_definitions;
use garden_gate_core::CommerceStore;
use garden_gate_core::DirectoryStore;
use garden_gate_core::GardenStore;
use garden_gate_core::Locale;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::audit::AuditSink;
use crate::audit::GatewayAuditEvent;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::auth::Identity;
use crate::auth::TokenVerifier;
use crate::auth::parse_bearer_token;
use crate::correlation::CorrelationIdGenerator;
use crate::errors::GatewayFault;
use crate::permissions::PermissionRegistry;
use crate::telemetry::GatewayMetrics;
use crate::telemetry::NoopMetrics;
use crate::telemetry::RequestMethod;
use crate::telemetry::RequestMetricEvent;
use crate::telemetry::RequestOutcome;
use crate::tools::ToolInvoker;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Protocol version advertised by `initialize`.
const PROTOCOL_VERSION: &str = "2025-03-26";
/// Server name advertised by `initialize`.
const SERVER_NAME: &str = "garden-gate";
/// Correlation ID prefix for this server.
const CORRELATION_PREFIX: &str = "gg";

// ============================================================================
// SECTION: Server
// ============================================================================

/// Store collaborators backing the gateway.
pub struct GatewayStores {
    /// Directory catalog store.
    pub directories: Arc<dyn DirectoryStore>,
    /// Garden store.
    pub gardens: Arc<dyn GardenStore>,
    /// Commerce store.
    pub commerce: Arc<dyn CommerceStore>,
}

/// Gateway server instance.
pub struct GatewayServer {
    /// Validated configuration.
    config: GardenGateConfig,
    /// Shared request state.
    state: Arc<AppState>,
}

/// Shared state for request handlers.
struct AppState {
    /// Tool call dispatcher.
    invoker: ToolInvoker,
    /// Bearer-token verifier.
    verifier: TokenVerifier,
    /// Audit sink for request decisions.
    audit: Arc<dyn AuditSink>,
    /// Metrics sink.
    metrics: Arc<dyn GatewayMetrics>,
    /// Correlation ID generator.
    correlation: CorrelationIdGenerator,
    /// Locale used for faults raised before authentication.
    default_locale: Locale,
    /// Maximum accepted request body size.
    max_body_bytes: usize,
}

impl GatewayServer {
    /// Builds a gateway server from configuration and store collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayServerError`] when the configuration is invalid.
    pub fn from_config(
        config: GardenGateConfig,
        stores: GatewayStores,
    ) -> Result<Self, GatewayServerError> {
        config.validate().map_err(|err| GatewayServerError::Config(err.to_string()))?;
        let verifier = TokenVerifier::from_config(&config.auth);
        let permissions = Arc::new(PermissionRegistry::default_table());
        let invoker =
            ToolInvoker::new(stores.directories, stores.gardens, stores.commerce, permissions);
        let audit: Arc<dyn AuditSink> = if config.server.audit {
            Arc::new(StderrAuditSink)
        } else {
            Arc::new(NoopAuditSink)
        };
        let state = Arc::new(AppState {
            invoker,
            verifier,
            audit,
            metrics: Arc::new(NoopMetrics),
            correlation: CorrelationIdGenerator::new(CORRELATION_PREFIX),
            default_locale: config.locale.default,
            max_body_bytes: config.server.max_body_bytes,
        });
        Ok(Self {
            config,
            state,
        })
    }

    /// Returns the axum router serving all three surfaces.
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .route("/{surface}", get(describe_surface).post(handle_rpc))
            .with_state(Arc::clone(&self.state))
    }

    /// Binds the configured address and serves requests until shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), GatewayServerError> {
        let addr: SocketAddr = self
            .config
            .bind_addr()
            .map_err(|err| GatewayServerError::Config(err.to_string()))?;
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| GatewayServerError::Transport("bind failed".to_string()))?;
        axum::serve(listener, app)
            .await
            .map_err(|_| GatewayServerError::Transport("server failed".to_string()))
    }
}

// ============================================================================
// SECTION: JSON-RPC Envelope
// ============================================================================

/// Incoming JSON-RPC request payload.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: String,
    /// Request identifier; absent for notifications.
    #[serde(default)]
    id: Option<Value>,
    /// Method name.
    method: String,
    /// Optional parameters payload.
    #[serde(default)]
    params: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
}

impl JsonRpcResponse {
    /// Builds a success response.
    fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Builds a fault response.
    fn fault(id: Value, fault: &GatewayFault, locale: Locale, correlation_id: &str) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(fault.to_error_value(locale, correlation_id)),
        }
    }
}

/// Tool call parameters for `tools/call`.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    /// Tool name as sent by the client.
    name: String,
    /// Raw JSON arguments.
    #[serde(default)]
    arguments: Value,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Handles `GET /{surface}`: a small descriptor for health checks.
async fn describe_surface(Path(segment): Path<String>) -> impl IntoResponse {
    let Some(surface) = Surface::parse(&segment) else {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "unknown surface"})));
    };
    let tools: Vec<&'static str> =
        surface_tools(surface).into_iter().map(|tool| tool.canonical_name()).collect();
    (
        StatusCode::OK,
        Json(json!({
            "surface": surface.as_str(),
            "status": "ok",
            "protocol": "json-rpc-2.0",
            "protocolVersion": PROTOCOL_VERSION,
            "tools": tools,
        })),
    )
}

/// Handles `POST /{surface}`: the JSON-RPC dispatch pipeline.
async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Path(segment): Path<String>,
    headers: HeaderMap,
    bytes: Bytes,
) -> impl IntoResponse {
    let correlation_id = state.correlation.issue();
    let Some(surface) = Surface::parse(&segment) else {
        let fault = GatewayFault::MethodNotFound;
        let response =
            JsonRpcResponse::fault(Value::Null, &fault, state.default_locale, &correlation_id);
        return (fault.http_status(), Json(response));
    };
    let started = Instant::now();
    let (status, method, outcome, response) =
        dispatch(&state, surface, &headers, &bytes, started, &correlation_id).await;
    let event = RequestMetricEvent {
        surface,
        method,
        outcome,
        error_code: response.error.as_ref().and_then(|error| error["code"].as_i64()),
    };
    state.metrics.record_request(event.clone());
    state.metrics.record_latency(event, started.elapsed());
    (status, Json(response))
}

/// Runs the fixed pipeline for one surface request.
async fn dispatch(
    state: &AppState,
    surface: Surface,
    headers: &HeaderMap,
    bytes: &Bytes,
    started: Instant,
    correlation_id: &str,
) -> (StatusCode, RequestMethod, RequestOutcome, JsonRpcResponse) {
    // Envelope faults are answered before authentication so malformed
    // payloads cannot probe credential validity.
    let request = match parse_envelope(state, bytes) {
        Ok(request) => request,
        Err((id, fault)) => {
            let response =
                JsonRpcResponse::fault(id, &fault, state.default_locale, correlation_id);
            let event = GatewayAuditEvent::denied(
                surface,
                "invalid",
                None,
                fault.label(),
                elapsed_ms(started),
                correlation_id,
            );
            state.audit.record(&event);
            return (fault.http_status(), RequestMethod::Invalid, RequestOutcome::Error, response);
        }
    };
    let id = request.id.clone().unwrap_or(Value::Null);
    let method = classify_method(&request.method);
    let identity = match authenticate(state, headers) {
        Ok(identity) => identity,
        Err(label) => {
            let fault = GatewayFault::Unauthorized;
            let response =
                JsonRpcResponse::fault(id, &fault, state.default_locale, correlation_id);
            let event = GatewayAuditEvent::denied(
                surface,
                request.method,
                None,
                label,
                elapsed_ms(started),
                correlation_id,
            );
            state.audit.record(&event);
            return (fault.http_status(), method, RequestOutcome::Error, response);
        }
    };
    if !state.invoker.permissions().is_allowed(identity.role, surface.read_permission()) {
        let fault = GatewayFault::Forbidden;
        let response = JsonRpcResponse::fault(id, &fault, identity.locale, correlation_id);
        let event = GatewayAuditEvent::denied(
            surface,
            request.method,
            Some(&identity),
            fault.label(),
            elapsed_ms(started),
            correlation_id,
        );
        state.audit.record(&event);
        return (fault.http_status(), method, RequestOutcome::Error, response);
    }
    let action = action_label(&request);
    match run_method(state, surface, &identity, request).await {
        Ok(result) => {
            let event = GatewayAuditEvent::allowed(
                surface,
                action,
                &identity,
                elapsed_ms(started),
                correlation_id,
            );
            state.audit.record(&event);
            (StatusCode::OK, method, RequestOutcome::Ok, JsonRpcResponse::ok(id, result))
        }
        Err(fault) => {
            let response = JsonRpcResponse::fault(id, &fault, identity.locale, correlation_id);
            let event = GatewayAuditEvent::denied(
                surface,
                action,
                Some(&identity),
                fault.label(),
                elapsed_ms(started),
                correlation_id,
            );
            state.audit.record(&event);
            (fault.http_status(), method, RequestOutcome::Error, response)
        }
    }
}

/// Parses and size-checks the request envelope.
///
/// Faults carry the request `id` when one was parsed so the response can
/// echo it; unparseable bodies fall back to a null id.
fn parse_envelope(
    state: &AppState,
    bytes: &Bytes,
) -> Result<JsonRpcRequest, (Value, GatewayFault)> {
    if bytes.len() > state.max_body_bytes {
        return Err((Value::Null, GatewayFault::invalid_request()));
    }
    let request: JsonRpcRequest = serde_json::from_slice(bytes.as_ref())
        .map_err(|_| (Value::Null, GatewayFault::invalid_request()))?;
    let id = request.id.clone().unwrap_or(Value::Null);
    if request.jsonrpc != "2.0" {
        return Err((id, GatewayFault::invalid_request()));
    }
    // Params shape is an envelope concern: reject non-object params here so
    // the fault is raised before authentication.
    if let Some(params) = &request.params
        && !params.is_null()
        && !params.is_object()
    {
        return Err((id, GatewayFault::invalid_request()));
    }
    Ok(request)
}

/// Verifies the bearer token, returning an audit label on failure.
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Identity, &'static str> {
    let header = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());
    let token = parse_bearer_token(header).map_err(|failure| failure.label())?;
    state.verifier.verify(&token).map_err(|failure| failure.label())
}

/// Dispatches a parsed, authenticated request to its method branch.
async fn run_method(
    state: &AppState,
    surface: Surface,
    identity: &Identity,
    request: JsonRpcRequest,
) -> Result<Value, GatewayFault> {
    match request.method.as_str() {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": {
                "tools": {},
            },
        })),
        "notifications/initialized" => Ok(Value::Null),
        "tools/list" => Ok(json!({
            "tools": tool_definitions(surface),
        })),
        "tools/call" => {
            let params = request.params.unwrap_or(Value::Null);
            let call: ToolCallParams = serde_json::from_value(params)
                .map_err(|_| GatewayFault::invalid_request())?;
            state.invoker.handle_call(surface, identity, &call.name, &call.arguments).await
        }
        "prompts/list" => Ok(json!({"prompts": []})),
        "resources/list" => Ok(json!({"resources": []})),
        "resources/templates/list" => Ok(json!({"resourceTemplates": []})),
        _ => Err(GatewayFault::MethodNotFound),
    }
}

/// Classifies a method for telemetry labels.
fn classify_method(method: &str) -> RequestMethod {
    match method {
        "initialize" => RequestMethod::Initialize,
        "tools/list" => RequestMethod::ToolsList,
        "tools/call" => RequestMethod::ToolsCall,
        "prompts/list" | "resources/list" | "resources/templates/list" => RequestMethod::Catalog,
        _ => RequestMethod::Other,
    }
}

/// Returns elapsed milliseconds since `started` for audit events.
fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Returns the audit action label: the tool name for calls, else the method.
fn action_label(request: &JsonRpcRequest) -> String {
    if request.method == "tools/call"
        && let Some(params) = &request.params
        && let Some(name) = params.get("name").and_then(Value::as_str)
    {
        return name.to_string();
    }
    request.method.clone()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Gateway server errors.
#[derive(Debug, Error)]
pub enum GatewayServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
