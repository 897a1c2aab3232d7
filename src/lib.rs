//! madrasa-schema - record schemas of a madrasa administration system
//!
//! Each entity (students, teachers, attendance, exams, fees, donations,
//! committee membership, ...) is declared once. From that declaration the crate
//! derives the persisted record type, the insertable type without the generated
//! identifier, and a validator that applies defaults to insert payloads.
//!
//! ```ignore
//! use madrasa_schema::entities::InsertStudent;
//!
//! let student = InsertStudent::validate(&payload)?;
//! let record = student.into_record(assigned_id);
//! ```

pub mod cli;
pub mod config;
pub mod entities;
pub mod registry;
pub mod schema;

pub use config::RegistryConfig;
pub use registry::{RegistryError, SchemaRegistry};
pub use schema::{Entity, EntitySchema, ValidationError};
