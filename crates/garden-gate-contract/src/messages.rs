// crates/garden-gate-contract/src/messages.rs
// ============================================================================
// Module: Localized Fault Messages
// Description: Croatian/English message catalog for protocol faults.
// Purpose: Keep human-facing fault wording out of dispatch logic.
// Dependencies: garden-gate-core
// ============================================================================

//! ## Overview
//! Protocol fault messages ship in both product locales. Croatian is the
//! product default; English is selected only when the caller's locale claim
//! resolves to `en`. The catalog is closed: dispatchers pick a constant
//! instead of formatting ad-hoc strings, so wording stays consistent across
//! surfaces.

// ============================================================================
// SECTION: Imports
// ============================================================================

use garden_gate_core::Locale;

// ============================================================================
// SECTION: Fault Message
// ============================================================================

/// Localized message pair for one protocol fault.
///
/// # Invariants
/// - Both locale texts are non-empty and semantically equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultMessage {
    /// Croatian text.
    pub hr: &'static str,
    /// English text.
    pub en: &'static str,
}

impl FaultMessage {
    /// Returns the text for the requested locale.
    #[must_use]
    pub const fn text(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Hr => self.hr,
            Locale::En => self.en,
        }
    }
}

/// Missing, malformed, expired, or unverifiable credential.
pub const UNAUTHORIZED: FaultMessage = FaultMessage {
    hr: "Pristup nije odobren. Prijavite se ponovno.",
    en: "Access was not granted. Please sign in again.",
};

/// Authenticated caller lacks the required permission.
pub const FORBIDDEN: FaultMessage = FaultMessage {
    hr: "Nemate ovlasti za ovu radnju.",
    en: "You do not have permission for this action.",
};

/// Unknown method or unknown tool name.
pub const METHOD_NOT_FOUND: FaultMessage = FaultMessage {
    hr: "Tražena metoda ne postoji.",
    en: "The requested method does not exist.",
};

/// Malformed request body or invalid tool arguments.
pub const INVALID_PARAMS: FaultMessage = FaultMessage {
    hr: "Zahtjev sadrži neispravne parametre.",
    en: "The request contains invalid parameters.",
};

/// Unexpected internal fault; details stay server-side.
pub const INTERNAL: FaultMessage = FaultMessage {
    hr: "Došlo je do pogreške na poslužitelju. Pokušajte ponovno.",
    en: "A server error occurred. Please try again.",
};

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

    use garden_gate_core::Locale;

    use super::FORBIDDEN;
    use super::FaultMessage;
    use super::INTERNAL;
    use super::INVALID_PARAMS;
    use super::METHOD_NOT_FOUND;
    use super::UNAUTHORIZED;

    const CATALOG: [FaultMessage; 5] =
        [UNAUTHORIZED, FORBIDDEN, METHOD_NOT_FOUND, INVALID_PARAMS, INTERNAL];

    #[test]
    fn every_fault_has_text_in_both_locales() {
        for message in CATALOG {
            assert!(!message.text(Locale::Hr).is_empty());
            assert!(!message.text(Locale::En).is_empty());
            assert_ne!(message.text(Locale::Hr), message.text(Locale::En));
        }
    }

    #[test]
    fn croatian_is_the_default_locale_text() {
        assert_eq!(UNAUTHORIZED.text(Locale::default()), UNAUTHORIZED.hr);
    }
}
