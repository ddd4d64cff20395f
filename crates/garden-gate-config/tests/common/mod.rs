// crates/garden-gate-config/tests/common/mod.rs
// ============================================================================
// Module: Config Test Fixtures
// Description: Shared fixtures for configuration integration tests.
// Purpose: Provide a minimal valid configuration for mutation-style tests.
// ============================================================================

use garden_gate_config::GardenGateConfig;
use garden_gate_config::SigningSecret;

/// Secret long enough to satisfy the minimum length requirement.
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Returns a minimal configuration that passes validation.
#[must_use]
pub fn minimal_config() -> GardenGateConfig {
    let mut config = GardenGateConfig::default();
    config.auth.signing_secret = SigningSecret::new(TEST_SECRET.to_string());
    config
}
