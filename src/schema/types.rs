//! Field and entity declarations
//!
//! Supported semantic types:
//! - text: UTF-8 string
//! - integer: 32-bit signed integer
//! - real: floating point number
//! - boolean: true / false
//! - date: ISO-8601 calendar date (`YYYY-MM-DD`), stored as text
//!
//! Declarations are `static` data built by the `entity!` macro. Nullability and
//! semantic type are read off the Rust field type through [`ColumnType`].

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// Semantic type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    Text,
    /// 32-bit signed integer
    Integer,
    /// Floating point number
    Real,
    /// Boolean
    Boolean,
    /// Calendar date in `YYYY-MM-DD` form
    Date,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Real => "real",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        }
    }

    /// Returns the PostgreSQL column type used for this field.
    ///
    /// Dates are kept as text columns.
    pub fn sql_type(&self) -> &'static str {
        match self {
            FieldType::Text | FieldType::Date => "TEXT",
            FieldType::Integer => "INTEGER",
            FieldType::Real => "REAL",
            FieldType::Boolean => "BOOLEAN",
        }
    }
}

/// Value applied to an absent field when an insert payload is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Text(&'static str),
    Integer(i32),
    Real(f64),
    Boolean(bool),
}

impl DefaultValue {
    /// Returns the semantic type this default belongs to.
    ///
    /// A text default is also valid for a date field.
    pub fn field_type(&self) -> FieldType {
        match self {
            DefaultValue::Text(_) => FieldType::Text,
            DefaultValue::Integer(_) => FieldType::Integer,
            DefaultValue::Real(_) => FieldType::Real,
            DefaultValue::Boolean(_) => FieldType::Boolean,
        }
    }

    /// Converts the default into the JSON value placed in a normalized payload.
    pub fn to_json(&self) -> Value {
        match *self {
            DefaultValue::Text(s) => Value::String(s.to_string()),
            DefaultValue::Integer(i) => Value::from(i),
            DefaultValue::Real(r) => Value::from(r),
            DefaultValue::Boolean(b) => Value::Bool(b),
        }
    }

    /// Renders the default as a SQL literal.
    pub fn sql_literal(&self) -> String {
        match *self {
            DefaultValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
            DefaultValue::Integer(i) => i.to_string(),
            DefaultValue::Real(r) => r.to_string(),
            DefaultValue::Boolean(b) => b.to_string(),
        }
    }

    fn matches(&self, field_type: FieldType) -> bool {
        match (self, field_type) {
            (DefaultValue::Text(s), FieldType::Date) => {
                NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok()
            }
            (d, t) => d.field_type() == t,
        }
    }
}

/// Format accepted for date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maps a Rust field type to its semantic type and nullability.
///
/// `Option<T>` marks the column as nullable.
pub trait ColumnType {
    const FIELD_TYPE: FieldType;
    const NULLABLE: bool = false;
}

impl ColumnType for String {
    const FIELD_TYPE: FieldType = FieldType::Text;
}

impl ColumnType for i32 {
    const FIELD_TYPE: FieldType = FieldType::Integer;
}

impl ColumnType for f64 {
    const FIELD_TYPE: FieldType = FieldType::Real;
}

impl ColumnType for bool {
    const FIELD_TYPE: FieldType = FieldType::Boolean;
}

impl ColumnType for NaiveDate {
    const FIELD_TYPE: FieldType = FieldType::Date;
}

impl<T: ColumnType> ColumnType for Option<T> {
    const FIELD_TYPE: FieldType = T::FIELD_TYPE;
    const NULLABLE: bool = true;
}

/// One declared field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDef {
    /// External (camelCase) field name
    pub name: &'static str,
    /// Column name in the entity's table
    pub column: &'static str,
    /// Semantic type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether `null` is an allowed value
    pub nullable: bool,
    /// Value applied when the field is absent on insert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Whether the storage layer must keep values unique
    pub unique: bool,
    /// Whether the storage layer assigns the value
    pub generated: bool,
}

impl FieldDef {
    /// The generated `id` field every entity starts with.
    pub const fn generated_id() -> Self {
        Self {
            name: "id",
            column: "id",
            field_type: FieldType::Integer,
            nullable: false,
            default: None,
            unique: true,
            generated: true,
        }
    }

    /// Whether an insert payload must supply this field.
    pub fn is_required_on_insert(&self) -> bool {
        !self.generated && !self.nullable && self.default.is_none()
    }
}

/// Complete declaration of one entity.
#[derive(Debug, PartialEq, Serialize)]
pub struct EntitySchema {
    /// Entity name, e.g. `Student`
    pub entity: &'static str,
    /// Table name, e.g. `students`
    pub table: &'static str,
    /// Persisted fields in declared order, generated identifier first
    pub fields: &'static [FieldDef],
}

impl EntitySchema {
    /// All persisted fields, including the generated identifier.
    pub fn persisted_fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    /// Fields of the insertable shape: the persisted fields minus generated ones.
    pub fn insertable_fields(&self) -> impl Iterator<Item = &'static FieldDef> {
        self.fields.iter().filter(|f| !f.generated)
    }

    /// The generated identifier field.
    pub fn identifier(&self) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.generated)
    }

    /// Looks up a persisted field by external name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that must be present in an insert payload.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldDef> {
        self.fields.iter().filter(|f| f.is_required_on_insert())
    }

    /// Non-generated fields carrying a uniqueness constraint.
    pub fn unique_fields(&self) -> impl Iterator<Item = &'static FieldDef> {
        self.insertable_fields().filter(|f| f.unique)
    }

    /// Fields with a declared default.
    pub fn defaulted_fields(&self) -> impl Iterator<Item = &'static FieldDef> {
        self.fields.iter().filter(|f| f.default.is_some())
    }

    /// Validates the declaration itself (not a payload).
    pub fn validate_structure(&self) -> Result<(), String> {
        match self.fields.first() {
            Some(first) if first.generated && first.name == "id" => {}
            _ => {
                return Err(format!(
                    "{}: first field must be the generated 'id'",
                    self.entity
                ))
            }
        }

        if self.fields.iter().filter(|f| f.generated).count() != 1 {
            return Err(format!(
                "{}: exactly one generated field is allowed",
                self.entity
            ));
        }

        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(format!("{}: duplicate field '{}'", self.entity, field.name));
            }
            if self.fields[..i].iter().any(|f| f.column == field.column) {
                return Err(format!(
                    "{}: duplicate column '{}'",
                    self.entity, field.column
                ));
            }
            if column_name(field.name) != field.column {
                return Err(format!(
                    "{}: column '{}' does not match field '{}'",
                    self.entity, field.column, field.name
                ));
            }
            if let Some(default) = field.default {
                if !default.matches(field.field_type) {
                    return Err(format!(
                        "{}: default for '{}' is not a {}",
                        self.entity,
                        field.name,
                        field.field_type.type_name()
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Maps an external field name to its column name: words lower-cased and
/// joined by underscores (`guardianMobile` -> `guardian_mobile`).
pub fn column_name(field: &str) -> String {
    let mut column = String::with_capacity(field.len() + 4);
    for (i, c) in field.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                column.push('_');
            }
            column.push(c.to_ascii_lowercase());
        } else {
            column.push(c);
        }
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE_FIELDS: [FieldDef; 3] = [
        FieldDef::generated_id(),
        FieldDef {
            name: "memberId",
            column: "member_id",
            field_type: FieldType::Text,
            nullable: false,
            default: None,
            unique: true,
            generated: false,
        },
        FieldDef {
            name: "status",
            column: "status",
            field_type: FieldType::Text,
            nullable: true,
            default: Some(DefaultValue::Text("active")),
            unique: false,
            generated: false,
        },
    ];

    static SAMPLE: EntitySchema = EntitySchema {
        entity: "Member",
        table: "members",
        fields: &SAMPLE_FIELDS,
    };

    #[test]
    fn test_schema_structure_valid() {
        assert!(SAMPLE.validate_structure().is_ok());
    }

    #[test]
    fn test_insertable_excludes_identifier() {
        let names: Vec<_> = SAMPLE.insertable_fields().map(|f| f.name).collect();
        assert_eq!(names, vec!["memberId", "status"]);
        assert_eq!(SAMPLE.identifier().map(|f| f.name), Some("id"));
    }

    #[test]
    fn test_required_and_defaulted() {
        let required: Vec<_> = SAMPLE.required_fields().map(|f| f.name).collect();
        assert_eq!(required, vec!["memberId"]);

        let defaulted: Vec<_> = SAMPLE.defaulted_fields().map(|f| f.name).collect();
        assert_eq!(defaulted, vec!["status"]);

        let unique: Vec<_> = SAMPLE.unique_fields().map(|f| f.name).collect();
        assert_eq!(unique, vec!["memberId"]);
    }

    #[test]
    fn test_missing_identifier_rejected() {
        static FIELDS: [FieldDef; 1] = [FieldDef {
            name: "name",
            column: "name",
            field_type: FieldType::Text,
            nullable: false,
            default: None,
            unique: false,
            generated: false,
        }];
        let schema = EntitySchema {
            entity: "Broken",
            table: "broken",
            fields: &FIELDS,
        };
        let err = schema.validate_structure().unwrap_err();
        assert!(err.contains("'id'"));
    }

    #[test]
    fn test_column_convention_enforced() {
        static FIELDS: [FieldDef; 2] = [
            FieldDef::generated_id(),
            FieldDef {
                name: "fullName",
                column: "fullname",
                field_type: FieldType::Text,
                nullable: false,
                default: None,
                unique: false,
                generated: false,
            },
        ];
        let schema = EntitySchema {
            entity: "Broken",
            table: "broken",
            fields: &FIELDS,
        };
        assert!(schema.validate_structure().unwrap_err().contains("fullname"));
    }

    #[test]
    fn test_default_type_mismatch_rejected() {
        static FIELDS: [FieldDef; 2] = [
            FieldDef::generated_id(),
            FieldDef {
                name: "active",
                column: "active",
                field_type: FieldType::Boolean,
                nullable: true,
                default: Some(DefaultValue::Text("yes")),
                unique: false,
                generated: false,
            },
        ];
        let schema = EntitySchema {
            entity: "Broken",
            table: "broken",
            fields: &FIELDS,
        };
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_column_name_convention() {
        assert_eq!(column_name("id"), "id");
        assert_eq!(column_name("studentId"), "student_id");
        assert_eq!(column_name("guardianMobile"), "guardian_mobile");
        assert_eq!(column_name("dateOfBirth"), "date_of_birth");
    }

    #[test]
    fn test_column_type_mapping() {
        assert_eq!(<String as ColumnType>::FIELD_TYPE, FieldType::Text);
        assert!(!<String as ColumnType>::NULLABLE);
        assert_eq!(<Option<f64> as ColumnType>::FIELD_TYPE, FieldType::Real);
        assert!(<Option<f64> as ColumnType>::NULLABLE);
        assert_eq!(<NaiveDate as ColumnType>::FIELD_TYPE, FieldType::Date);
        assert_eq!(FieldType::Date.sql_type(), "TEXT");
    }

    #[test]
    fn test_default_literals() {
        assert_eq!(DefaultValue::Text("it's").sql_literal(), "'it''s'");
        assert_eq!(DefaultValue::Boolean(true).sql_literal(), "true");
        assert_eq!(DefaultValue::Text("staff").to_json(), Value::from("staff"));
    }
}
