//! Insert payload validation
//!
//! Validation semantics:
//! - All fields required on insert are present
//! - Present values match the declared semantic type exactly
//! - `null` only for nullable fields, and kept as `null`
//! - Absent fields with a declared default receive it
//! - Undeclared keys (a caller-supplied `id` included) are stripped or rejected
//!   according to [`UnknownFieldPolicy`]
//!
//! The validator never mutates its input and is deterministic: issues are
//! reported in declared field order, undeclared keys last.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{FieldIssue, IssueKind, ValidationError, ValidationResult};
use super::types::{EntitySchema, FieldDef, FieldType, DATE_FORMAT};

/// What to do with payload keys outside the insertable shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Drop them from the normalized payload
    #[default]
    Strip,
    /// Fail validation with an unknown-field issue
    Reject,
}

/// Validates insert payloads against one entity declaration.
#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator {
    schema: &'static EntitySchema,
    unknown_fields: UnknownFieldPolicy,
}

impl SchemaValidator {
    /// Creates a validator that strips undeclared keys.
    pub fn new(schema: &'static EntitySchema) -> Self {
        Self {
            schema,
            unknown_fields: UnknownFieldPolicy::default(),
        }
    }

    /// Sets the policy for undeclared keys.
    pub fn with_policy(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Returns the declaration this validator enforces.
    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    /// Validates a payload and returns it normalized.
    ///
    /// The normalized payload holds every supplied insertable field plus the
    /// defaults of absent defaulted fields. It never holds the generated
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` listing every missing, mistyped or (under
    /// [`UnknownFieldPolicy::Reject`]) undeclared field.
    pub fn validate(&self, payload: &Value) -> ValidationResult<Map<String, Value>> {
        let entity = self.schema.entity;

        let obj = payload.as_object().ok_or_else(|| {
            ValidationError::new(
                entity,
                vec![FieldIssue::new(
                    "$root",
                    IssueKind::NotAnObject {
                        actual: json_type_name(payload),
                    },
                )],
            )
        })?;

        let mut normalized = Map::new();
        let mut issues = Vec::new();

        for field in self.schema.insertable_fields() {
            match obj.get(field.name) {
                Some(value) => match check_value(field, value) {
                    Some(kind) => issues.push(FieldIssue::new(field.name, kind)),
                    None => {
                        normalized.insert(field.name.to_string(), value.clone());
                    }
                },
                None => {
                    if let Some(default) = field.default {
                        normalized.insert(field.name.to_string(), default.to_json());
                    } else if field.is_required_on_insert() {
                        issues.push(FieldIssue::missing(field.name));
                    }
                }
            }
        }

        for key in obj.keys() {
            let declared = self
                .schema
                .field(key)
                .map_or(false, |f| !f.generated);
            if declared {
                continue;
            }
            match self.unknown_fields {
                UnknownFieldPolicy::Strip => {
                    tracing::debug!(entity, field = %key, "stripped undeclared field");
                }
                UnknownFieldPolicy::Reject => {
                    issues.push(FieldIssue::new(key.as_str(), IssueKind::UnknownField));
                }
            }
        }

        if !issues.is_empty() {
            tracing::debug!(entity, issues = issues.len(), "insert payload rejected");
            return Err(ValidationError::new(entity, issues));
        }

        tracing::debug!(entity, fields = normalized.len(), "insert payload validated");
        Ok(normalized)
    }

    /// Validates a payload and decodes the normalized result into `T`.
    pub fn validate_into<T: DeserializeOwned>(&self, payload: &Value) -> ValidationResult<T> {
        let normalized = self.validate(payload)?;
        serde_json::from_value(Value::Object(normalized)).map_err(|e| {
            ValidationError::new(
                self.schema.entity,
                vec![FieldIssue::new(
                    "$root",
                    IssueKind::Undecodable {
                        message: e.to_string(),
                    },
                )],
            )
        })
    }
}

/// Checks one present value against its declaration.
fn check_value(field: &FieldDef, value: &Value) -> Option<IssueKind> {
    if value.is_null() {
        return if field.nullable {
            None
        } else {
            Some(IssueKind::NullNotAllowed)
        };
    }

    let expected = field.field_type.type_name();
    let mismatch = || IssueKind::TypeMismatch {
        expected,
        actual: json_type_name(value),
    };

    match field.field_type {
        FieldType::Text => (!value.is_string()).then(mismatch),
        FieldType::Boolean => (!value.is_boolean()).then(mismatch),
        // Integers are acceptable reals
        FieldType::Real => (!value.is_number()).then(mismatch),
        FieldType::Integer => {
            if let Some(i) = value.as_i64() {
                i32::try_from(i).err().map(|_| IssueKind::OutOfRange {
                    value: i.to_string(),
                })
            } else if let Some(u) = value.as_u64() {
                Some(IssueKind::OutOfRange {
                    value: u.to_string(),
                })
            } else {
                Some(mismatch())
            }
        }
        FieldType::Date => match value.as_str() {
            // chrono's parser is lenient; accept only the canonical form
            Some(s) => match NaiveDate::parse_from_str(s, DATE_FORMAT) {
                Ok(date) if date.format(DATE_FORMAT).to_string() == s => None,
                _ => Some(IssueKind::InvalidDate {
                    value: s.to_string(),
                }),
            },
            None => Some(mismatch()),
        },
    }
}

/// Returns the semantic type name of a JSON value for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "real"
            }
        }
        Value::String(_) => "text",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::DefaultValue;
    use serde_json::json;

    const fn field(
        name: &'static str,
        column: &'static str,
        field_type: FieldType,
        nullable: bool,
        default: Option<DefaultValue>,
    ) -> FieldDef {
        FieldDef {
            name,
            column,
            field_type,
            nullable,
            default,
            unique: false,
            generated: false,
        }
    }

    static FIELDS: [FieldDef; 7] = [
        FieldDef::generated_id(),
        field("title", "title", FieldType::Text, false, None),
        field("score", "score", FieldType::Real, false, None),
        field("rank", "rank", FieldType::Integer, true, None),
        field("heldOn", "held_on", FieldType::Date, false, None),
        field("kind", "kind", FieldType::Text, true, Some(DefaultValue::Text("general"))),
        field("open", "open", FieldType::Boolean, false, Some(DefaultValue::Boolean(true))),
    ];

    static EVENTS: EntitySchema = EntitySchema {
        entity: "Event",
        table: "events",
        fields: &FIELDS,
    };

    fn valid_payload() -> Value {
        json!({
            "title": "Annual",
            "score": 7.5,
            "heldOn": "2024-03-01"
        })
    }

    #[test]
    fn test_valid_payload_passes_with_defaults() {
        let normalized = SchemaValidator::new(&EVENTS).validate(&valid_payload()).unwrap();
        assert_eq!(normalized["title"], "Annual");
        assert_eq!(normalized["kind"], "general");
        assert_eq!(normalized["open"], true);
        assert!(!normalized.contains_key("rank"));
        assert!(!normalized.contains_key("id"));
    }

    #[test]
    fn test_supplied_value_wins_over_default() {
        let mut payload = valid_payload();
        payload["kind"] = json!("holiday");
        payload["open"] = json!(false);
        let normalized = SchemaValidator::new(&EVENTS).validate(&payload).unwrap();
        assert_eq!(normalized["kind"], "holiday");
        assert_eq!(normalized["open"], false);
    }

    #[test]
    fn test_missing_required_fields_all_reported() {
        let err = SchemaValidator::new(&EVENTS)
            .validate(&json!({ "score": 1 }))
            .unwrap_err();
        assert_eq!(err.code(), "MADRASA_VALIDATION_FAILED");
        assert_eq!(err.missing_fields(), vec!["title", "heldOn"]);
    }

    #[test]
    fn test_type_mismatch_fails() {
        let mut payload = valid_payload();
        payload["title"] = json!(123);
        let err = SchemaValidator::new(&EVENTS).validate(&payload).unwrap_err();
        assert_eq!(
            err.issues()[0],
            FieldIssue::type_mismatch("title", "text", "integer")
        );
    }

    #[test]
    fn test_real_accepts_integers() {
        let mut payload = valid_payload();
        payload["score"] = json!(100);
        assert!(SchemaValidator::new(&EVENTS).validate(&payload).is_ok());
    }

    #[test]
    fn test_integer_rejects_fractions_and_overflow() {
        let validator = SchemaValidator::new(&EVENTS);

        let mut payload = valid_payload();
        payload["rank"] = json!(1.5);
        let err = validator.validate(&payload).unwrap_err();
        assert_eq!(err.issues()[0].kind.code(), "type_mismatch");

        payload["rank"] = json!(4_000_000_000_i64);
        let err = validator.validate(&payload).unwrap_err();
        assert_eq!(err.issues()[0].kind.code(), "out_of_range");

        payload["rank"] = json!(-3);
        assert!(validator.validate(&payload).is_ok());
    }

    #[test]
    fn test_null_allowed_only_when_nullable() {
        let validator = SchemaValidator::new(&EVENTS);

        let mut payload = valid_payload();
        payload["rank"] = Value::Null;
        payload["kind"] = Value::Null;
        let normalized = validator.validate(&payload).unwrap();
        assert!(normalized["rank"].is_null());
        // explicit null is not replaced by the default
        assert!(normalized["kind"].is_null());

        payload["open"] = Value::Null;
        let err = validator.validate(&payload).unwrap_err();
        assert_eq!(err.issues()[0].field, "open");
        assert_eq!(err.issues()[0].kind, IssueKind::NullNotAllowed);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let validator = SchemaValidator::new(&EVENTS);
        for bad in [
            "2024-02-30",
            "10/01/2024",
            "",
            "2024-1-5",
            " 2024-01-10",
            "+2024-01-10",
        ] {
            let mut payload = valid_payload();
            payload["heldOn"] = json!(bad);
            let err = validator.validate(&payload).unwrap_err();
            assert_eq!(err.field(), "heldOn");
            assert_eq!(err.issues()[0].kind.code(), "invalid_date");
        }
    }

    #[test]
    fn test_unknown_fields_stripped_by_default() {
        let mut payload = valid_payload();
        payload["id"] = json!(42);
        payload["extra"] = json!("x");
        let normalized = SchemaValidator::new(&EVENTS).validate(&payload).unwrap();
        assert!(!normalized.contains_key("id"));
        assert!(!normalized.contains_key("extra"));
    }

    #[test]
    fn test_unknown_fields_rejected_under_policy() {
        let mut payload = valid_payload();
        payload["id"] = json!(42);
        let err = SchemaValidator::new(&EVENTS)
            .with_policy(UnknownFieldPolicy::Reject)
            .validate(&payload)
            .unwrap_err();
        assert_eq!(err.issues()[0].field, "id");
        assert_eq!(err.issues()[0].kind, IssueKind::UnknownField);
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let err = SchemaValidator::new(&EVENTS)
            .validate(&json!(["title"]))
            .unwrap_err();
        assert_eq!(err.field(), "$root");
        assert_eq!(err.issues()[0].kind, IssueKind::NotAnObject { actual: "array" });
    }

    #[test]
    fn test_validate_into_typed() {
        #[derive(Deserialize)]
        struct InsertEvent {
            title: String,
            #[serde(rename = "heldOn")]
            held_on: NaiveDate,
            kind: Option<String>,
        }

        let event: InsertEvent = SchemaValidator::new(&EVENTS)
            .validate_into(&valid_payload())
            .unwrap();
        assert_eq!(event.title, "Annual");
        assert_eq!(event.held_on, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(event.kind.as_deref(), Some("general"));
    }
}
