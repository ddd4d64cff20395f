// crates/garden-gate-mcp/src/telemetry.rs
// ============================================================================
// Module: Gateway Telemetry
// Description: Observability hooks for request dispatch.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: garden-gate-contract
// ============================================================================

//! ## Overview
//! A thin metrics interface for request counters and latency histograms,
//! intentionally dependency-light so deployments can plug in Prometheus or
//! OpenTelemetry without redesign. Labels are fixed enums; nothing
//! caller-controlled ever becomes a label value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use garden_gate_contract::Surface;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default latency buckets in milliseconds for request histograms.
pub const LATENCY_BUCKETS_MS: &[u64] =
    &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000];

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Request method classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    /// JSON-RPC initialize.
    Initialize,
    /// JSON-RPC tools/list.
    ToolsList,
    /// JSON-RPC tools/call.
    ToolsCall,
    /// Empty-catalog listing methods (prompts, resources).
    Catalog,
    /// Invalid or malformed JSON-RPC request.
    Invalid,
    /// Unsupported JSON-RPC method.
    Other,
}

impl RequestMethod {
    /// Returns a stable label for the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::ToolsList => "tools/list",
            Self::ToolsCall => "tools/call",
            Self::Catalog => "catalog",
            Self::Invalid => "invalid",
            Self::Other => "other",
        }
    }
}

/// Request outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Successful request.
    Ok,
    /// Failed request.
    Error,
}

/// Request metric event payload.
#[derive(Debug, Clone)]
pub struct RequestMetricEvent {
    /// Surface handling the request.
    pub surface: Surface,
    /// JSON-RPC method classification.
    pub method: RequestMethod,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for gateway requests and latencies.
pub trait GatewayMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: RequestMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: RequestMetricEvent, latency: Duration);
}

/// No-op metrics sink.
pub struct NoopMetrics;

impl GatewayMetrics for NoopMetrics {
    fn record_request(&self, _event: RequestMetricEvent) {}

    fn record_latency(&self, _event: RequestMetricEvent, _latency: Duration) {}
}
