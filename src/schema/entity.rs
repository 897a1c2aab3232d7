//! Typed entities generated from a single declaration
//!
//! The [`entity!`](crate::entity) macro takes one field list and emits:
//! - the persisted record struct (generated `id` first),
//! - the insert struct (same fields, no `id`),
//! - a `static` [`EntitySchema`] describing both,
//! - the [`Entity`] impl tying them together.
//!
//! Semantic type and nullability come from each field's Rust type through
//! [`ColumnType`](super::ColumnType), so the structs and the schema cannot
//! disagree.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::errors::ValidationResult;
use super::types::EntitySchema;
use super::validator::SchemaValidator;

/// A persisted record type with a generated identifier.
pub trait Entity: Serialize + DeserializeOwned + Sized {
    /// Insertable shape: every persisted field except the identifier
    type Insert: Serialize + DeserializeOwned;

    /// Returns the static declaration of this entity.
    fn schema() -> &'static EntitySchema;

    /// Returns the storage-assigned identifier.
    fn id(&self) -> i32;

    /// Joins a validated insert payload with the identifier the storage
    /// layer assigned to it.
    fn from_insert(id: i32, insert: Self::Insert) -> Self;

    /// Returns a validator for this entity's insert payloads.
    fn validator() -> SchemaValidator {
        SchemaValidator::new(Self::schema())
    }

    /// Validates a raw payload and decodes it into the insert shape.
    fn validate_insert(payload: &Value) -> ValidationResult<Self::Insert> {
        Self::validator().validate_into(payload)
    }
}

/// Declares an entity.
///
/// ```ignore
/// entity! {
///     /// A registered student
///     Student / InsertStudent => STUDENTS("students") {
///         student_id("studentId"): String, unique;
///         date_of_birth("dateOfBirth"): Option<NaiveDate>;
///         status("status"): Option<String> = Text("active");
///     }
/// }
/// ```
///
/// Each field reads `column("wireName"): RustType [= Kind(literal)] [, unique]`.
/// `Option<_>` makes a column nullable; `= Kind(literal)` declares a default
/// using a [`DefaultValue`](crate::schema::DefaultValue) variant.
#[macro_export]
macro_rules! entity {
    (@default) => { None };
    (@default $kind:ident ($val:literal)) => {
        Some($crate::schema::DefaultValue::$kind($val))
    };
    (@unique) => { false };
    (@unique unique) => { true };

    (
        $(#[$meta:meta])*
        $record:ident / $insert:ident => $schema:ident ($table:literal) {
            $(
                $(#[$fmeta:meta])*
                $field:ident ($wire:literal) : $ty:ty
                    $( = $dkind:ident ( $dval:literal ) )?
                    $( , $unique:ident )?
            );* $(;)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $record {
            /// Storage-assigned identifier
            pub id: i32,
            $(
                $(#[$fmeta])*
                #[serde(rename = $wire)]
                pub $field: $ty,
            )*
        }

        #[doc = concat!("Insertable shape of [`", stringify!($record), "`]: every persisted field except `id`.")]
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $insert {
            $(
                $(#[$fmeta])*
                #[serde(rename = $wire)]
                pub $field: $ty,
            )*
        }

        #[doc = concat!("Declaration of the `", $table, "` table.")]
        pub static $schema: $crate::schema::EntitySchema = $crate::schema::EntitySchema {
            entity: stringify!($record),
            table: $table,
            fields: &[
                $crate::schema::FieldDef::generated_id(),
                $(
                    $crate::schema::FieldDef {
                        name: $wire,
                        column: stringify!($field),
                        field_type: <$ty as $crate::schema::ColumnType>::FIELD_TYPE,
                        nullable: <$ty as $crate::schema::ColumnType>::NULLABLE,
                        default: $crate::entity!(@default $( $dkind ($dval) )?),
                        unique: $crate::entity!(@unique $( $unique )?),
                        generated: false,
                    },
                )*
            ],
        };

        impl $crate::schema::Entity for $record {
            type Insert = $insert;

            fn schema() -> &'static $crate::schema::EntitySchema {
                &$schema
            }

            fn id(&self) -> i32 {
                self.id
            }

            fn from_insert(id: i32, insert: $insert) -> Self {
                Self {
                    id,
                    $( $field: insert.$field, )*
                }
            }
        }

        impl $insert {
            /// Validates a raw payload and decodes it, defaults applied.
            pub fn validate(
                payload: &::serde_json::Value,
            ) -> $crate::schema::ValidationResult<Self> {
                <$record as $crate::schema::Entity>::validate_insert(payload)
            }

            /// Builds the persisted record once storage has assigned `id`.
            pub fn into_record(self, id: i32) -> $record {
                <$record as $crate::schema::Entity>::from_insert(id, self)
            }
        }
    };
}
