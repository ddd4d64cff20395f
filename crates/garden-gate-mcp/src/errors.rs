// crates/garden-gate-mcp/src/errors.rs
// ============================================================================
// Module: Protocol Faults
// Description: The closed fault table mapped to JSON-RPC codes and statuses.
// Purpose: Keep fault codes, HTTP statuses, and localized wording in one place.
// Dependencies: garden-gate-contract, garden-gate-core, axum, serde_json
// ============================================================================

//! ## Overview
//! Faults at the protocol layer form a closed table: unauthorized, forbidden,
//! method not found, invalid params, and internal. Each fault owns exactly
//! one JSON-RPC code and one HTTP status; handlers never invent codes. Fault
//! payloads carry the server correlation identifier and, for invalid params,
//! the complete field violation list. Internal fault details stay server-side.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::StatusCode;
use garden_gate_contract::FieldViolation;
use garden_gate_contract::messages;
use garden_gate_core::Locale;
use garden_gate_core::StoreError;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Fault Table
// ============================================================================

/// Closed protocol fault set.
#[derive(Debug)]
pub enum GatewayFault {
    /// Missing, malformed, expired, or unverifiable credential.
    Unauthorized,
    /// Authenticated caller lacks the required permission.
    Forbidden,
    /// Unknown method or unknown tool name.
    MethodNotFound,
    /// Malformed request or invalid tool arguments.
    InvalidParams {
        /// Complete per-field violation list; empty for envelope faults.
        violations: Vec<FieldViolation>,
    },
    /// Unexpected fault; the reason is logged, never disclosed.
    Internal,
}

impl GatewayFault {
    /// Builds an invalid-params fault without field detail.
    #[must_use]
    pub const fn invalid_request() -> Self {
        Self::InvalidParams {
            violations: Vec::new(),
        }
    }

    /// Returns the JSON-RPC error code for this fault.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Unauthorized => -32_000,
            Self::Forbidden => -32_001,
            Self::MethodNotFound => -32_601,
            Self::InvalidParams {
                ..
            } => -32_602,
            Self::Internal => -32_603,
        }
    }

    /// Returns the HTTP status paired with this fault.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::MethodNotFound
            | Self::InvalidParams {
                ..
            } => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a stable label for audit events.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::MethodNotFound => "method_not_found",
            Self::InvalidParams {
                ..
            } => "invalid_params",
            Self::Internal => "internal",
        }
    }

    /// Returns the localized fault message.
    #[must_use]
    pub const fn message(&self, locale: Locale) -> &'static str {
        match self {
            Self::Unauthorized => messages::UNAUTHORIZED.text(locale),
            Self::Forbidden => messages::FORBIDDEN.text(locale),
            Self::MethodNotFound => messages::METHOD_NOT_FOUND.text(locale),
            Self::InvalidParams {
                ..
            } => messages::INVALID_PARAMS.text(locale),
            Self::Internal => messages::INTERNAL.text(locale),
        }
    }

    /// Renders the JSON-RPC error object for this fault.
    #[must_use]
    pub fn to_error_value(&self, locale: Locale, correlation_id: &str) -> Value {
        let mut data = json!({
            "correlation_id": correlation_id,
        });
        if let Self::InvalidParams {
            violations,
        } = self
            && !violations.is_empty()
            && let Some(object) = data.as_object_mut()
        {
            object.insert(
                "violations".to_string(),
                serde_json::to_value(violations).unwrap_or(Value::Null),
            );
        }
        json!({
            "code": self.code(),
            "message": self.message(locale),
            "data": data,
        })
    }
}

impl From<StoreError> for GatewayFault {
    fn from(_err: StoreError) -> Self {
        Self::Internal
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use axum::http::StatusCode;
    use garden_gate_contract::FieldViolation;
    use garden_gate_core::Locale;

    use super::GatewayFault;

    #[test]
    fn fault_table_is_stable() {
        assert_eq!(GatewayFault::Unauthorized.code(), -32_000);
        assert_eq!(GatewayFault::Forbidden.code(), -32_001);
        assert_eq!(GatewayFault::MethodNotFound.code(), -32_601);
        assert_eq!(GatewayFault::invalid_request().code(), -32_602);
        assert_eq!(GatewayFault::Internal.code(), -32_603);
        assert_eq!(GatewayFault::Unauthorized.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(GatewayFault::Forbidden.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(GatewayFault::MethodNotFound.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(GatewayFault::Internal.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn violations_appear_in_error_data() {
        let fault = GatewayFault::InvalidParams {
            violations: vec![FieldViolation::new("limit", "must be at least 1")],
        };
        let error = fault.to_error_value(Locale::En, "gg-1");
        assert_eq!(error["data"]["correlation_id"], "gg-1");
        assert_eq!(error["data"]["violations"][0]["field"], "limit");
    }

    #[test]
    fn messages_are_localized() {
        let fault = GatewayFault::Forbidden;
        assert_ne!(fault.message(Locale::Hr), fault.message(Locale::En));
    }
}
