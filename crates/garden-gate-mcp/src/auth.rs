// crates/garden-gate-mcp/src/auth.rs
// ============================================================================
// Module: Gateway Authentication
// Description: Bearer-token verification and caller identity extraction.
// Purpose: Provide strict, fail-closed token checks for every request.
// Dependencies: garden-gate-config, garden-gate-core, jsonwebtoken, sha2
// ============================================================================

//! ## Overview
//! Every request to a surface must carry a signed bearer token. Tokens are
//! HMAC-SHA256 JWTs minted by the product's identity service; the gateway
//! verifies the signature, expiry, and claim shape before building a caller
//! [`Identity`]. All failures collapse to a single unauthorized fault at the
//! protocol layer. The raw token never reaches logs; audit events carry a
//! SHA-256 fingerprint instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use garden_gate_config::AuthConfig;
use garden_gate_core::Locale;
use garden_gate_core::Role;
use garden_gate_core::Timestamp;
use garden_gate_core::UserId;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use serde::Deserialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted authorization header size in bytes.
const MAX_AUTH_HEADER_BYTES: usize = 8 * 1024;
/// Maximum accepted email claim length.
const MAX_EMAIL_LENGTH: usize = 254;

// ============================================================================
// SECTION: Claims
// ============================================================================

/// Raw claim payload carried by a bearer token.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    /// Subject: opaque user identifier.
    sub: String,
    /// Account email address.
    email: String,
    /// Role label granted at sign-in.
    role: Role,
    /// Preferred response locale, defaulting to Croatian.
    #[serde(default)]
    locale: Option<String>,
    /// Issued-at time in unix seconds.
    #[serde(default)]
    iat: Option<i64>,
    /// Expiry time in unix seconds.
    exp: i64,
}

/// Authenticated caller identity derived from a verified token.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Opaque user identifier from the subject claim.
    pub user_id: UserId,
    /// Account email address.
    pub email: String,
    /// Role granted at sign-in.
    pub role: Role,
    /// Preferred response locale.
    pub locale: Locale,
    /// SHA-256 fingerprint of the presented token (hex).
    pub token_fingerprint: String,
}

// ============================================================================
// SECTION: Failures
// ============================================================================

/// Token verification failures.
///
/// All variants map to one unauthorized protocol fault; the distinction
/// exists for audit labeling only.
#[derive(Debug, Error)]
pub enum AuthFailure {
    /// No authorization header was presented.
    #[error("missing bearer token")]
    Missing,
    /// Header or token shape is not parseable.
    #[error("malformed bearer token")]
    Malformed,
    /// Token expiry has passed.
    #[error("expired bearer token")]
    Expired,
    /// Signature does not verify against the configured secret.
    #[error("invalid token signature")]
    InvalidSignature,
    /// Claims are present but fail shape checks.
    #[error("invalid token claims: {0}")]
    InvalidClaims(String),
}

impl AuthFailure {
    /// Returns a stable label for audit events.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::Expired => "expired",
            Self::InvalidSignature => "invalid_signature",
            Self::InvalidClaims(_) => "invalid_claims",
        }
    }
}

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// HS256 bearer-token verifier.
pub struct TokenVerifier {
    /// Decoding key derived from the configured signing secret.
    key: DecodingKey,
    /// Signature and expiry validation settings.
    validation: Validation,
    /// Maximum accepted token age in seconds.
    max_token_age_secs: i64,
    /// Clock skew leeway in seconds.
    clock_skew_secs: i64,
}

impl TokenVerifier {
    /// Builds a verifier from auth configuration.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.clock_skew_secs;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            key: DecodingKey::from_secret(config.signing_secret.expose().as_bytes()),
            validation,
            max_token_age_secs: config.max_token_age_secs,
            clock_skew_secs: i64::try_from(config.clock_skew_secs).unwrap_or(0),
        }
    }

    /// Verifies a raw bearer token and builds the caller identity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure`] when the token is missing required claims,
    /// expired, or fails signature verification.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthFailure> {
        let data = decode::<TokenClaims>(token, &self.key, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => AuthFailure::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthFailure::InvalidSignature
                }
                _ => AuthFailure::Malformed,
            }
        })?;
        let claims = data.claims;
        let now = Timestamp::now().as_unix_seconds();
        // The library already checks expiry; this check stays as a backstop
        // so a validation misconfiguration cannot admit stale tokens.
        if claims.exp + self.clock_skew_secs < now {
            return Err(AuthFailure::Expired);
        }
        if let Some(issued_at) = claims.iat {
            if issued_at > now + self.clock_skew_secs {
                return Err(AuthFailure::InvalidClaims("token issued in the future".to_string()));
            }
            if now - issued_at > self.max_token_age_secs {
                return Err(AuthFailure::Expired);
            }
        }
        let subject = claims.sub.trim();
        if subject.is_empty() {
            return Err(AuthFailure::InvalidClaims("empty subject".to_string()));
        }
        validate_email(&claims.email)?;
        let locale = Locale::parse_or_default(claims.locale.as_deref());
        Ok(Identity {
            user_id: UserId::new(subject),
            email: claims.email,
            role: claims.role,
            locale,
            token_fingerprint: fingerprint(token),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Extracts the raw token from an `Authorization: Bearer` header value.
///
/// # Errors
///
/// Returns [`AuthFailure`] when the header is absent, oversized, or does not
/// carry a bearer scheme.
pub fn parse_bearer_token(auth_header: Option<&str>) -> Result<String, AuthFailure> {
    let header = auth_header.ok_or(AuthFailure::Missing)?;
    if header.len() > MAX_AUTH_HEADER_BYTES {
        return Err(AuthFailure::Malformed);
    }
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default().trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthFailure::Malformed);
    }
    Ok(token.to_string())
}

/// Checks minimal email shape without full RFC parsing.
fn validate_email(email: &str) -> Result<(), AuthFailure> {
    let trimmed = email.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(AuthFailure::InvalidClaims("invalid email claim".to_string()));
    }
    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(AuthFailure::InvalidClaims("invalid email claim".to_string()));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AuthFailure::InvalidClaims("invalid email claim".to_string()));
    }
    Ok(())
}

/// Returns the hex SHA-256 fingerprint of a token.
fn fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let mut rendered = String::with_capacity(digest.len() * 2);
    for byte in digest {
        rendered.push_str(&format!("{byte:02x}"));
    }
    rendered
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

    use garden_gate_config::AuthConfig;
    use garden_gate_config::SigningSecret;
    use garden_gate_core::Locale;
    use garden_gate_core::Role;
    use garden_gate_core::Timestamp;
    use jsonwebtoken::Algorithm;
    use jsonwebtoken::EncodingKey;
    use jsonwebtoken::Header;
    use jsonwebtoken::encode;
    use serde_json::json;

    use super::AuthFailure;
    use super::TokenVerifier;
    use super::parse_bearer_token;

    const SECRET: &str = "unit-test-secret-0123456789abcdefghij";

    fn verifier() -> TokenVerifier {
        let mut config = AuthConfig::default();
        config.signing_secret = SigningSecret::new(SECRET.to_string());
        TokenVerifier::from_config(&config)
    }

    fn mint(claims: &serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("token minted")
    }

    fn valid_claims() -> serde_json::Value {
        let now = Timestamp::now().as_unix_seconds();
        json!({
            "sub": "user-1",
            "email": "ana@example.com",
            "role": "gardener",
            "locale": "en",
            "iat": now,
            "exp": now + 600,
        })
    }

    #[test]
    fn valid_token_yields_identity() {
        let token = mint(&valid_claims());
        let identity = verifier().verify(&token).expect("identity");
        assert_eq!(identity.user_id.as_str(), "user-1");
        assert_eq!(identity.role, Role::Gardener);
        assert_eq!(identity.locale, Locale::En);
        assert_eq!(identity.token_fingerprint.len(), 64);
    }

    #[test]
    fn missing_locale_defaults_to_croatian() {
        let mut claims = valid_claims();
        claims.as_object_mut().unwrap().remove("locale");
        let token = mint(&claims);
        let identity = verifier().verify(&token).expect("identity");
        assert_eq!(identity.locale, Locale::Hr);
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Timestamp::now().as_unix_seconds();
        let mut claims = valid_claims();
        claims["iat"] = json!(now - 1_200);
        claims["exp"] = json!(now - 600);
        let token = mint(&claims);
        assert!(matches!(verifier().verify(&token), Err(AuthFailure::Expired)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = valid_claims();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"a-completely-different-secret-value"),
        )
        .expect("token minted");
        assert!(matches!(verifier().verify(&token), Err(AuthFailure::InvalidSignature)));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut claims = valid_claims();
        claims["role"] = json!("superuser");
        let token = mint(&claims);
        assert!(matches!(verifier().verify(&token), Err(AuthFailure::Malformed)));
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut claims = valid_claims();
        claims["email"] = json!("not-an-email");
        let token = mint(&claims);
        assert!(matches!(verifier().verify(&token), Err(AuthFailure::InvalidClaims(_))));
    }

    #[test]
    fn bearer_header_parsing_is_strict() {
        assert!(matches!(parse_bearer_token(None), Err(AuthFailure::Missing)));
        assert!(matches!(parse_bearer_token(Some("Token abc")), Err(AuthFailure::Malformed)));
        assert!(matches!(parse_bearer_token(Some("Bearer ")), Err(AuthFailure::Malformed)));
        assert_eq!(parse_bearer_token(Some("bearer abc")).unwrap(), "abc");
    }
}
