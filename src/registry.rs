//! Name-based access to every entity declaration
//!
//! Typed callers use the generated `Insert*` structs directly. The registry
//! serves callers that only know an entity by name, such as the CLI.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::RegistryConfig;
use crate::entities::ALL_ENTITIES;
use crate::schema::{EntitySchema, SchemaValidator, UnknownFieldPolicy, ValidationError};

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown entity: '{0}'")]
    UnknownEntity(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Lookup table over the declared entities.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRegistry {
    entities: &'static [&'static EntitySchema],
    unknown_fields: UnknownFieldPolicy,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Creates a registry over every declared entity.
    pub fn new() -> Self {
        Self {
            entities: &ALL_ENTITIES,
            unknown_fields: UnknownFieldPolicy::default(),
        }
    }

    /// Creates a registry configured from `config`.
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new().with_policy(config.unknown_fields)
    }

    /// Sets the policy applied to undeclared payload keys.
    pub fn with_policy(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Returns the policy applied to undeclared payload keys.
    pub fn policy(&self) -> UnknownFieldPolicy {
        self.unknown_fields
    }

    /// Iterates declarations in declaration order.
    pub fn entities(&self) -> impl Iterator<Item = &'static EntitySchema> {
        let entities: &'static [&'static EntitySchema] = self.entities;
        entities.iter().copied()
    }

    /// Returns the number of declared entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entity is declared.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Finds an entity by entity name or table name.
    ///
    /// Matching ignores case, `_` and `-`, so `ExamResult`, `exam-result` and
    /// `exam_results` all resolve to the same declaration.
    pub fn get(&self, name: &str) -> Option<&'static EntitySchema> {
        let wanted = normalize(name);
        self.entities()
            .find(|s| normalize(s.entity) == wanted || normalize(s.table) == wanted)
    }

    /// Like [`get`](Self::get), failing with `UnknownEntity`.
    pub fn lookup(&self, name: &str) -> RegistryResult<&'static EntitySchema> {
        self.get(name)
            .ok_or_else(|| RegistryError::UnknownEntity(name.to_string()))
    }

    /// Returns a validator for the named entity using the registry's policy.
    pub fn validator(&self, name: &str) -> RegistryResult<SchemaValidator> {
        let schema = self.lookup(name)?;
        Ok(SchemaValidator::new(schema).with_policy(self.unknown_fields))
    }

    /// Validates an insert payload for the named entity.
    pub fn validate(&self, name: &str, payload: &Value) -> RegistryResult<Map<String, Value>> {
        Ok(self.validator(name)?.validate(payload)?)
    }

    /// Checks every declaration and that entity and table names are distinct.
    pub fn validate_structure(&self) -> Result<(), String> {
        for (i, schema) in self.entities.iter().enumerate() {
            schema.validate_structure()?;

            let earlier = &self.entities[..i];
            if earlier.iter().any(|s| normalize(s.entity) == normalize(schema.entity)) {
                return Err(format!("duplicate entity '{}'", schema.entity));
            }
            if earlier.iter().any(|s| s.table == schema.table) {
                return Err(format!("duplicate table '{}'", schema.table));
            }
        }
        Ok(())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
