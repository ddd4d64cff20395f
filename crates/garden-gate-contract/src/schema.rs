// crates/garden-gate-contract/src/schema.rs
// ============================================================================
// Module: Declarative Input Schemas
// Description: Field specifications and the generic argument validator.
// Purpose: Validate tool arguments with a complete per-field violation list.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Tool inputs are described declaratively: an ordered set of fields with a
//! kind, constraints, and an optional default. One generic validator consumes
//! the description, fills defaults, and reports **every** offending field
//! rather than stopping at the first. The same description renders to JSON
//! Schema for `tools/list`, so validation and the advertised catalog cannot
//! drift apart.
//! Security posture: tool arguments are untrusted input and are validated
//! fail closed before any handler runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Field Kinds
// ============================================================================

/// Field kind with inline constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 string with an optional maximum length in characters.
    Str {
        /// Maximum length in characters.
        max_len: Option<usize>,
    },
    /// Integer with optional inclusive bounds.
    Int {
        /// Inclusive lower bound.
        min: Option<i64>,
        /// Inclusive upper bound.
        max: Option<i64>,
    },
    /// Boolean flag.
    Bool,
    /// String restricted to a closed set of values.
    Enum {
        /// Allowed values in catalog order.
        values: &'static [&'static str],
    },
}

// ============================================================================
// SECTION: Field Specifications
// ============================================================================

/// One field in a tool input schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears in tool arguments.
    pub name: &'static str,
    /// Field kind and constraints.
    pub kind: FieldKind,
    /// Whether the field must be present.
    pub required: bool,
    /// Default filled in when the field is absent.
    pub default: Option<Value>,
    /// One-line description for the rendered schema.
    pub description: &'static str,
}

impl FieldSpec {
    /// Creates an optional string field.
    #[must_use]
    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Str {
                max_len: None,
            },
            required: false,
            default: None,
            description,
        }
    }

    /// Creates an optional integer field.
    #[must_use]
    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Int {
                min: None,
                max: None,
            },
            required: false,
            default: None,
            description,
        }
    }

    /// Creates an optional enum field.
    #[must_use]
    pub const fn enumeration(
        name: &'static str,
        values: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Enum {
                values,
            },
            required: false,
            default: None,
            description,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the maximum string length.
    #[must_use]
    pub const fn max_len(mut self, limit: usize) -> Self {
        if let FieldKind::Str {
            max_len,
        } = &mut self.kind
        {
            *max_len = Some(limit);
        }
        self
    }

    /// Sets inclusive integer bounds.
    #[must_use]
    pub const fn bounds(mut self, lower: i64, upper: i64) -> Self {
        if let FieldKind::Int {
            min,
            max,
        } = &mut self.kind
        {
            *min = Some(lower);
            *max = Some(upper);
        }
        self
    }

    /// Sets an integer default.
    #[must_use]
    pub fn default_int(mut self, value: i64) -> Self {
        self.default = Some(Value::from(value));
        self
    }

    /// Sets a string default.
    #[must_use]
    pub fn default_str(mut self, value: &'static str) -> Self {
        self.default = Some(Value::from(value));
        self
    }
}

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Single validation violation naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Offending field name.
    pub field: String,
    /// Human-readable violation reason.
    pub reason: String,
}

impl FieldViolation {
    /// Creates a violation for a field.
    #[must_use]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Validated, default-filled tool arguments.
pub type ValidatedArgs = Map<String, Value>;

// ============================================================================
// SECTION: Input Schema
// ============================================================================

/// Ordered declarative input schema for one tool.
///
/// # Invariants
/// - Field order is stable; it is preserved in rendered JSON Schema output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSchema {
    /// Fields in declaration order.
    fields: Vec<FieldSpec>,
}

impl InputSchema {
    /// Creates a schema from ordered field specifications.
    #[must_use]
    pub const fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
        }
    }

    /// Returns the ordered field specifications.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Validates raw arguments, filling defaults.
    ///
    /// Unknown argument fields are ignored; the schema owns only its declared
    /// fields. The violation list names every offending field.
    ///
    /// # Errors
    ///
    /// Returns the complete list of [`FieldViolation`]s when any field is
    /// missing, mistyped, or out of bounds.
    pub fn validate(&self, args: &Value) -> Result<ValidatedArgs, Vec<FieldViolation>> {
        let empty = Map::new();
        let object = match args {
            Value::Null => &empty,
            Value::Object(map) => map,
            _ => {
                return Err(vec![FieldViolation::new(
                    "arguments",
                    "arguments must be a JSON object",
                )]);
            }
        };
        let mut validated = Map::new();
        let mut violations = Vec::new();
        for spec in &self.fields {
            match object.get(spec.name) {
                None | Some(Value::Null) => {
                    if spec.required {
                        violations.push(FieldViolation::new(spec.name, "required field missing"));
                    } else if let Some(default) = &spec.default {
                        validated.insert(spec.name.to_string(), default.clone());
                    }
                }
                Some(value) => match check_field(spec, value) {
                    Ok(()) => {
                        validated.insert(spec.name.to_string(), value.clone());
                    }
                    Err(violation) => violations.push(violation),
                },
            }
        }
        if violations.is_empty() {
            Ok(validated)
        } else {
            Err(violations)
        }
    }

    /// Renders the schema as a JSON Schema object for `tools/list`.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for spec in &self.fields {
            properties.insert(spec.name.to_string(), render_field(spec));
            if spec.required {
                required.push(Value::from(spec.name));
            }
        }
        json!({
            "type": "object",
            "properties": Value::Object(properties),
            "required": required,
            "additionalProperties": true,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Checks one present argument value against its specification.
fn check_field(spec: &FieldSpec, value: &Value) -> Result<(), FieldViolation> {
    match &spec.kind {
        FieldKind::Str {
            max_len,
        } => {
            let Some(text) = value.as_str() else {
                return Err(FieldViolation::new(spec.name, "must be a string"));
            };
            if text.is_empty() && spec.required {
                return Err(FieldViolation::new(spec.name, "must not be empty"));
            }
            if let Some(limit) = max_len
                && text.chars().count() > *limit
            {
                return Err(FieldViolation::new(
                    spec.name,
                    format!("must be at most {limit} characters"),
                ));
            }
            Ok(())
        }
        FieldKind::Int {
            min,
            max,
        } => {
            let Some(number) = value.as_i64() else {
                return Err(FieldViolation::new(spec.name, "must be an integer"));
            };
            if let Some(lower) = min
                && number < *lower
            {
                return Err(FieldViolation::new(spec.name, format!("must be at least {lower}")));
            }
            if let Some(upper) = max
                && number > *upper
            {
                return Err(FieldViolation::new(spec.name, format!("must be at most {upper}")));
            }
            Ok(())
        }
        FieldKind::Bool => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(FieldViolation::new(spec.name, "must be a boolean"))
            }
        }
        FieldKind::Enum {
            values,
        } => {
            let Some(text) = value.as_str() else {
                return Err(FieldViolation::new(spec.name, "must be a string"));
            };
            if values.contains(&text) {
                Ok(())
            } else {
                Err(FieldViolation::new(
                    spec.name,
                    format!("must be one of: {}", values.join(", ")),
                ))
            }
        }
    }
}

/// Renders one field specification as a JSON Schema property.
fn render_field(spec: &FieldSpec) -> Value {
    let mut property = Map::new();
    match &spec.kind {
        FieldKind::Str {
            max_len,
        } => {
            property.insert("type".to_string(), Value::from("string"));
            if let Some(limit) = max_len {
                property.insert("maxLength".to_string(), Value::from(*limit));
            }
        }
        FieldKind::Int {
            min,
            max,
        } => {
            property.insert("type".to_string(), Value::from("integer"));
            if let Some(lower) = min {
                property.insert("minimum".to_string(), Value::from(*lower));
            }
            if let Some(upper) = max {
                property.insert("maximum".to_string(), Value::from(*upper));
            }
        }
        FieldKind::Bool => {
            property.insert("type".to_string(), Value::from("boolean"));
        }
        FieldKind::Enum {
            values,
        } => {
            property.insert("type".to_string(), Value::from("string"));
            property.insert(
                "enum".to_string(),
                Value::Array(values.iter().map(|value| Value::from(*value)).collect()),
            );
        }
    }
    if let Some(default) = &spec.default {
        property.insert("default".to_string(), default.clone());
    }
    property.insert("description".to_string(), Value::from(spec.description));
    Value::Object(property)
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

    use serde_json::json;

    use super::FieldSpec;
    use super::InputSchema;

    /// Schema used across the validation tests.
    fn sample_schema() -> InputSchema {
        InputSchema::new(vec![
            FieldSpec::string("query", "free-text query").required().max_len(10),
            FieldSpec::integer("limit", "page size").bounds(1, 100).default_int(20),
            FieldSpec::enumeration("locale", &["hr", "en"], "response locale").default_str("hr"),
        ])
    }

    #[test]
    fn defaults_are_filled_for_absent_fields() {
        let schema = sample_schema();
        let validated = schema.validate(&json!({"query": "mrkva"})).unwrap();
        assert_eq!(validated.get("limit"), Some(&json!(20)));
        assert_eq!(validated.get("locale"), Some(&json!("hr")));
    }

    #[test]
    fn every_offending_field_is_reported() {
        let schema = sample_schema();
        let violations =
            schema.validate(&json!({"limit": 0, "locale": "de"})).unwrap_err();
        let fields: Vec<&str> =
            violations.iter().map(|violation| violation.field.as_str()).collect();
        assert_eq!(fields, vec!["query", "limit", "locale"]);
    }

    #[test]
    fn limit_bounds_are_inclusive() {
        let schema = sample_schema();
        assert!(schema.validate(&json!({"query": "a", "limit": 1})).is_ok());
        assert!(schema.validate(&json!({"query": "a", "limit": 100})).is_ok());
        assert!(schema.validate(&json!({"query": "a", "limit": 0})).is_err());
        assert!(schema.validate(&json!({"query": "a", "limit": 101})).is_err());
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let schema = sample_schema();
        let violations = schema.validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "arguments");
    }

    #[test]
    fn null_arguments_use_defaults_but_keep_required_checks() {
        let schema = sample_schema();
        let violations = schema.validate(&serde_json::Value::Null).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "query");
    }

    #[test]
    fn overlong_string_is_rejected() {
        let schema = sample_schema();
        let violations =
            schema.validate(&json!({"query": "predugačak upit"})).unwrap_err();
        assert_eq!(violations[0].field, "query");
    }

    #[test]
    fn rendered_schema_lists_required_fields() {
        let schema = sample_schema().to_json_schema();
        assert_eq!(schema["required"], json!(["query"]));
        assert_eq!(schema["properties"]["limit"]["minimum"], json!(1));
        assert_eq!(schema["properties"]["limit"]["maximum"], json!(100));
        assert_eq!(schema["properties"]["locale"]["enum"], json!(["hr", "en"]));
    }
}
