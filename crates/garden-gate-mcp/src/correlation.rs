// crates/garden-gate-mcp/src/correlation.rs
// ============================================================================
// Module: Correlation Identifiers
// Description: Server-issued correlation IDs for responses and audit lines.
// Purpose: Tie every response and audit event to one opaque identifier.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! Every request is assigned a server correlation identifier built from a
//! boot-scoped random seed plus a monotonic counter. The identifier appears
//! in fault payloads and audit events so operators can join the two without
//! the gateway ever echoing client-controlled values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use rand::RngCore;
use rand::rngs::OsRng;

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Boot-scoped correlation ID generator.
///
/// # Invariants
/// - Issued identifiers are unique within the process lifetime.
#[derive(Debug)]
pub struct CorrelationIdGenerator {
    /// Prefix included in every generated correlation ID.
    prefix: &'static str,
    /// Boot-scoped random identifier for entropy.
    boot_id: u64,
    /// Monotonic counter for IDs issued in this process.
    counter: AtomicU64,
}

impl CorrelationIdGenerator {
    /// Creates a new generator with the given prefix.
    #[must_use]
    pub fn new(prefix: &'static str) -> Self {
        let mut bytes = [0u8; 8];
        OsRng.fill_bytes(&mut bytes);
        Self {
            prefix,
            boot_id: u64::from_be_bytes(bytes),
            counter: AtomicU64::new(1),
        }
    }

    /// Issues a new server correlation ID.
    #[must_use]
    pub fn issue(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{:016x}-{:016x}", self.prefix, self.boot_id, seq)
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

    use super::CorrelationIdGenerator;

    #[test]
    fn issued_ids_are_unique_and_prefixed() {
        let generator = CorrelationIdGenerator::new("gg");
        let first = generator.issue();
        let second = generator.issue();
        assert!(first.starts_with("gg-"));
        assert_ne!(first, second);
    }
}
