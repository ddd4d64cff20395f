//! Config defaults and core validation tests for garden-gate-config.
// crates/garden-gate-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults and Core Validation Tests
// Description: Validate default behavior and core config invariants.
// Purpose: Ensure minimal config is valid and critical invariants are enforced.
// =============================================================================

use std::io::Write;
use std::path::Path;

use garden_gate_config::ConfigError;
use garden_gate_config::GardenGateConfig;
use garden_gate_core::Locale;

mod common;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn minimal_config_validates() -> TestResult {
    let config = common::minimal_config();
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn default_locale_is_croatian() -> TestResult {
    let config = common::minimal_config();
    if config.locale.default != Locale::Hr {
        return Err("locale.default should be hr".to_string());
    }
    Ok(())
}

#[test]
fn missing_signing_secret_is_rejected() -> TestResult {
    let config = GardenGateConfig::default();
    assert_invalid(config.validate(), "auth.signing_secret")?;
    Ok(())
}

#[test]
fn short_signing_secret_is_rejected() -> TestResult {
    let mut config = common::minimal_config();
    config.auth.signing_secret = garden_gate_config::SigningSecret::new("short".to_string());
    assert_invalid(config.validate(), "auth.signing_secret")?;
    Ok(())
}

#[test]
fn zero_body_limit_is_rejected() -> TestResult {
    let mut config = common::minimal_config();
    config.server.max_body_bytes = 0;
    assert_invalid(config.validate(), "server.max_body_bytes")?;
    Ok(())
}

#[test]
fn non_socket_bind_is_rejected() -> TestResult {
    let mut config = common::minimal_config();
    config.server.bind = "not-an-address".to_string();
    assert_invalid(config.validate(), "server.bind")?;
    Ok(())
}

#[test]
fn negative_token_age_is_rejected() -> TestResult {
    let mut config = common::minimal_config();
    config.auth.max_token_age_secs = -1;
    assert_invalid(config.validate(), "auth.max_token_age_secs")?;
    Ok(())
}

#[test]
fn explicit_file_loads_and_validates() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("garden-gate.toml");
    let mut file = std::fs::File::create(&path).map_err(|err| err.to_string())?;
    writeln!(
        file,
        "[server]\nbind = \"127.0.0.1:9090\"\n\n[auth]\nsigning_secret = \"{}\"\n\n[locale]\ndefault = \"en\"",
        common::TEST_SECRET
    )
    .map_err(|err| err.to_string())?;
    let config = GardenGateConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config.server.bind != "127.0.0.1:9090" {
        return Err("server.bind not loaded from file".to_string());
    }
    if config.locale.default != Locale::En {
        return Err("locale.default not loaded from file".to_string());
    }
    Ok(())
}

#[test]
fn invalid_file_fails_closed() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("garden-gate.toml");
    std::fs::write(&path, "[auth]\nsigning_secret = \"short\"\n")
        .map_err(|err| err.to_string())?;
    let result = GardenGateConfig::load(Some(&path));
    if result.is_ok() {
        return Err("short secret should fail load".to_string());
    }
    Ok(())
}

#[test]
fn missing_explicit_file_is_an_io_error() -> TestResult {
    let result = GardenGateConfig::load(Some(Path::new("/nonexistent/garden-gate.toml")));
    match result {
        Err(ConfigError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}
