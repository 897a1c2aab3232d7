//! Record schema subsystem
//!
//! Every entity is declared once as data. The insertable shape (the persisted
//! shape minus its generated identifier) and the payload validator are both
//! derived from that declaration.
//!
//! # Design Principles
//!
//! - One declaration per entity, nothing hand-maintained twice
//! - Generated identifiers never appear in insert payloads
//! - Defaults applied at validation time only
//! - Uniqueness declared for the storage layer, never checked here
//! - Stateless, deterministic validation

mod ddl;
mod entity;
mod errors;
mod export;
mod types;
mod validator;

pub use ddl::{create_table_sql, create_tables_sql};
pub use entity::Entity;
pub use errors::{FieldIssue, IssueKind, ValidationError, ValidationResult, VALIDATION_FAILED};
pub use export::{
    descriptor_file_name, format_checksum, ExportError, ExportManifest, ExportResult,
    SchemaDescriptor, SchemaExporter, DDL_FILE, MANIFEST_FILE, MANIFEST_FORMAT_VERSION,
};
pub use types::{column_name, ColumnType, DefaultValue, EntitySchema, FieldDef, FieldType, DATE_FORMAT};
pub use validator::{SchemaValidator, UnknownFieldPolicy};
