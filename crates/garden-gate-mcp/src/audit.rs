// crates/garden-gate-mcp/src/audit.rs
// ============================================================================
// Module: Gateway Audit
// Description: Structured JSON audit events for request decisions.
// Purpose: Record allow/deny decisions without leaking credentials.
// Dependencies: garden-gate-contract, serde, serde_json
// ============================================================================

//! ## Overview
//! Every dispatched request produces one audit event: allow or deny, with the
//! surface, method, caller subject, and correlation identifier. Events are
//! serialized as single JSON lines to stderr. Raw bearer tokens never appear;
//! bearer callers are identified by a SHA-256 fingerprint.

// ============================================================================
// SECTION: Imports
// ============================================================================

use garden_gate_contract::Surface;
use serde::Serialize;

use crate::auth::Identity;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Request audit event payload.
#[derive(Debug, Serialize)]
pub struct GatewayAuditEvent {
    /// Event identifier.
    event: &'static str,
    /// Decision outcome.
    decision: &'static str,
    /// Surface handling the request.
    surface: &'static str,
    /// JSON-RPC method, or the tool name for tool calls.
    action: String,
    /// Caller subject when authenticated.
    subject: Option<String>,
    /// Caller role label when authenticated.
    role: Option<&'static str>,
    /// Bearer token fingerprint (sha256).
    token_fingerprint: Option<String>,
    /// Failure label for deny events.
    reason: Option<&'static str>,
    /// Request handling duration in milliseconds.
    duration_ms: u64,
    /// Server correlation identifier.
    correlation_id: String,
}

impl GatewayAuditEvent {
    /// Builds an allow event.
    #[must_use]
    pub fn allowed(
        surface: Surface,
        action: impl Into<String>,
        identity: &Identity,
        duration_ms: u64,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            event: "gateway_request",
            decision: "allow",
            surface: surface.as_str(),
            action: action.into(),
            subject: Some(identity.user_id.as_str().to_string()),
            role: Some(identity.role.as_str()),
            token_fingerprint: Some(identity.token_fingerprint.clone()),
            reason: None,
            duration_ms,
            correlation_id: correlation_id.into(),
        }
    }

    /// Builds a deny event.
    #[must_use]
    pub fn denied(
        surface: Surface,
        action: impl Into<String>,
        identity: Option<&Identity>,
        reason: &'static str,
        duration_ms: u64,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            event: "gateway_request",
            decision: "deny",
            surface: surface.as_str(),
            action: action.into(),
            subject: identity.map(|caller| caller.user_id.as_str().to_string()),
            role: identity.map(|caller| caller.role.as_str()),
            token_fingerprint: identity.map(|caller| caller.token_fingerprint.clone()),
            reason: Some(reason),
            duration_ms,
            correlation_id: correlation_id.into(),
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for request decisions.
pub trait AuditSink: Send + Sync {
    /// Records a request audit event.
    fn record(&self, event: &GatewayAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &GatewayAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            eprintln!("{payload}");
        }
    }
}

/// No-op audit sink for tests and disabled deployments.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &GatewayAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
