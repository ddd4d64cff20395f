// crates/garden-gate-config/src/config.rs
// ============================================================================
// Module: Garden Gate Configuration
// Description: Configuration loading and validation for Garden Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: garden-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing configuration falls back to defaults; a present-but-invalid file
//! fails closed. The token signing secret is redacted from debug output so it
//! never reaches audit lines.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use garden_gate_core::Locale;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "garden-gate.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "GARDEN_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default bind address for the gateway.
const DEFAULT_BIND: &str = "127.0.0.1:8787";
/// Default maximum request body size in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
/// Maximum allowed request body size in bytes.
const MAX_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;
/// Minimum signing secret length in bytes.
const MIN_SECRET_LENGTH: usize = 32;
/// Maximum signing secret length in bytes.
const MAX_SECRET_LENGTH: usize = 1024;
/// Default maximum accepted token age in seconds.
const DEFAULT_MAX_TOKEN_AGE_SECS: i64 = 24 * 60 * 60;
/// Maximum allowed token age bound in seconds.
const MAX_MAX_TOKEN_AGE_SECS: i64 = 30 * 24 * 60 * 60;
/// Default clock skew leeway for expiry checks in seconds.
const DEFAULT_CLOCK_SKEW_SECS: u64 = 30;
/// Maximum allowed clock skew leeway in seconds.
const MAX_CLOCK_SKEW_SECS: u64 = 300;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Garden Gate gateway configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GardenGateConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Token verification configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Locale configuration.
    #[serde(default)]
    pub locale: LocaleConfig,
}

impl GardenGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// When no path is given and neither the environment override nor the
    /// default filename exists, defaults are used. Validation still runs on
    /// the result, so a deployment without a signing secret refuses to start.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path)? else {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        };
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Returns the parsed socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bind address does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|_| ConfigError::Invalid("invalid bind address".to_string()))
    }
}

/// Server configuration for the HTTP transport.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Whether audit events are emitted to stderr.
    #[serde(default = "default_audit_enabled")]
    pub audit: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
            audit: default_audit_enabled(),
        }
    }
}

impl ServerConfig {
    /// Validates server transport configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_body_bytes > MAX_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes exceeds the hard limit".to_string(),
            ));
        }
        let bind = self.bind.trim();
        if bind.is_empty() {
            return Err(ConfigError::Invalid("server.bind must be set".to_string()));
        }
        let _: SocketAddr = bind
            .parse()
            .map_err(|_| ConfigError::Invalid("server.bind is not a socket address".to_string()))?;
        Ok(())
    }
}

/// Token verification configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret for bearer tokens.
    #[serde(default)]
    pub signing_secret: SigningSecret,
    /// Maximum accepted token age in seconds.
    #[serde(default = "default_max_token_age_secs")]
    pub max_token_age_secs: i64,
    /// Clock skew leeway for expiry checks in seconds.
    #[serde(default = "default_clock_skew_secs")]
    pub clock_skew_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_secret: SigningSecret::default(),
            max_token_age_secs: default_max_token_age_secs(),
            clock_skew_secs: default_clock_skew_secs(),
        }
    }
}

impl AuthConfig {
    /// Validates token verification configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let length = self.signing_secret.expose().len();
        if length < MIN_SECRET_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "auth.signing_secret must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }
        if length > MAX_SECRET_LENGTH {
            return Err(ConfigError::Invalid(
                "auth.signing_secret exceeds the hard limit".to_string(),
            ));
        }
        if self.max_token_age_secs <= 0 {
            return Err(ConfigError::Invalid(
                "auth.max_token_age_secs must be positive".to_string(),
            ));
        }
        if self.max_token_age_secs > MAX_MAX_TOKEN_AGE_SECS {
            return Err(ConfigError::Invalid(
                "auth.max_token_age_secs exceeds the hard limit".to_string(),
            ));
        }
        if self.clock_skew_secs > MAX_CLOCK_SKEW_SECS {
            return Err(ConfigError::Invalid(
                "auth.clock_skew_secs exceeds the hard limit".to_string(),
            ));
        }
        Ok(())
    }
}

/// Locale configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocaleConfig {
    /// Default response locale when a token carries none.
    #[serde(default)]
    pub default: Locale,
}

// ============================================================================
// SECTION: Signing Secret
// ============================================================================

/// Bearer-token signing secret with redacted debug output.
///
/// # Invariants
/// - The secret value never appears in `Debug` formatting.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct SigningSecret(String);

impl SigningSecret {
    /// Wraps a raw secret string.
    #[must_use]
    pub const fn new(secret: String) -> Self {
        Self(secret)
    }

    /// Returns the raw secret bytes for key construction.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Default for SigningSecret {
    fn default() -> Self {
        Self(String::new())
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("SigningSecret(redacted)")
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem error while reading the config file.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Validation failure with a stable message.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default maximum request body size.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Audit defaults to enabled.
const fn default_audit_enabled() -> bool {
    true
}

/// Default maximum accepted token age.
const fn default_max_token_age_secs() -> i64 {
    DEFAULT_MAX_TOKEN_AGE_SECS
}

/// Default clock skew leeway.
const fn default_clock_skew_secs() -> u64 {
    DEFAULT_CLOCK_SKEW_SECS
}

// ============================================================================
// SECTION: Path Resolution
// ============================================================================

/// Resolves the effective config path, if any file should be read.
///
/// Explicit paths and the environment override must exist; the default
/// filename is optional.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(explicit) = path {
        return Ok(Some(explicit.to_path_buf()));
    }
    if let Ok(from_env) = env::var(CONFIG_ENV_VAR) {
        let trimmed = from_env.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid(format!("{CONFIG_ENV_VAR} is set but empty")));
        }
        return Ok(Some(PathBuf::from(trimmed)));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    if default.exists() {
        Ok(Some(default))
    } else {
        Ok(None)
    }
}

/// Validates a config path against traversal and length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let raw = path.as_os_str();
    if raw.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds length limit".to_string()));
    }
    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(ConfigError::Invalid(
                    "config path must not contain parent traversal".to_string(),
                ));
            }
            Component::Normal(part) => {
                if part.len() > MAX_PATH_COMPONENT_LENGTH {
                    return Err(ConfigError::Invalid(
                        "config path component exceeds length limit".to_string(),
                    ));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
