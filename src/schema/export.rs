//! Schema export to disk
//!
//! Layout of an export directory:
//! - `schema_<table>.json`: one descriptor per entity
//! - `schema.sql`: DDL for every exported entity
//! - `manifest.json`: creation time and a CRC32 checksum per written file
//!
//! Existing files are never overwritten unless the exporter is forced. The
//! check happens before anything is written, so a refused export leaves the
//! directory untouched.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ddl::create_tables_sql;
use super::types::{EntitySchema, FieldDef};

/// Manifest format version
pub const MANIFEST_FORMAT_VERSION: u8 = 1;

/// Name of the manifest file inside an export directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Name of the DDL file inside an export directory
pub const DDL_FILE: &str = "schema.sql";

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// JSON view of one entity: both shapes and their constraints.
#[derive(Debug, Serialize)]
pub struct SchemaDescriptor<'a> {
    pub entity: &'a str,
    pub table: &'a str,
    /// Persisted shape, generated identifier included
    pub fields: &'a [FieldDef],
    /// Field names of the insertable shape
    pub insertable: Vec<&'a str>,
    /// Fields an insert payload must supply
    pub required: Vec<&'a str>,
    /// Fields the storage layer keeps unique
    pub unique: Vec<&'a str>,
}

impl<'a> SchemaDescriptor<'a> {
    pub fn new(schema: &'a EntitySchema) -> Self {
        Self {
            entity: schema.entity,
            table: schema.table,
            fields: schema.fields,
            insertable: schema.insertable_fields().map(|f| f.name).collect(),
            required: schema.required_fields().map(|f| f.name).collect(),
            unique: schema.unique_fields().map(|f| f.name).collect(),
        }
    }
}

/// Export manifest
///
/// ```json
/// {
///   "created_at": "2026-02-04T11:30:00Z",
///   "format_version": 1,
///   "files": { "schema_students.json": "crc32:abcd1234" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportManifest {
    /// Creation timestamp in RFC3339 format
    pub created_at: String,
    /// Manifest format version
    pub format_version: u8,
    /// File name -> formatted CRC32 checksum
    pub files: BTreeMap<String, String>,
}

impl ExportManifest {
    /// Parses a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Computes a CRC32 checksum and formats it as `crc32:xxxxxxxx`.
pub fn format_checksum(data: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(data);
    format!("crc32:{:08x}", hasher.finalize())
}

/// File name of an entity's descriptor.
pub fn descriptor_file_name(schema: &EntitySchema) -> String {
    format!("schema_{}.json", schema.table)
}

/// Writes schema descriptors, DDL and a manifest into a directory.
pub struct SchemaExporter {
    out_dir: PathBuf,
    force: bool,
}

impl SchemaExporter {
    /// Creates an exporter that refuses to overwrite existing files.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            force: false,
        }
    }

    /// Allows existing files to be overwritten.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Returns the export directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Exports the given entities and returns the written manifest.
    pub fn export(&self, schemas: &[&EntitySchema]) -> ExportResult<ExportManifest> {
        let mut contents: Vec<(String, Vec<u8>)> = Vec::with_capacity(schemas.len() + 1);

        for schema in schemas {
            let descriptor = SchemaDescriptor::new(schema);
            let json = serde_json::to_vec_pretty(&descriptor).map_err(|e| {
                ExportError::Serialize {
                    what: format!("{} descriptor", schema.entity),
                    source: e,
                }
            })?;
            contents.push((descriptor_file_name(schema), json));
        }
        contents.push((
            DDL_FILE.to_string(),
            create_tables_sql(schemas.iter().copied()).into_bytes(),
        ));

        if !self.force {
            let names = contents.iter().map(|(name, _)| name.as_str());
            for name in names.chain(std::iter::once(MANIFEST_FILE)) {
                let path = self.out_dir.join(name);
                if path.exists() {
                    return Err(ExportError::AlreadyExists(path));
                }
            }
        }

        fs::create_dir_all(&self.out_dir).map_err(|e| ExportError::Io {
            path: self.out_dir.clone(),
            source: e,
        })?;

        let mut files = BTreeMap::new();
        for (name, data) in &contents {
            self.write_file(name, data)?;
            files.insert(name.clone(), format_checksum(data));
        }

        let manifest = ExportManifest {
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            format_version: MANIFEST_FORMAT_VERSION,
            files,
        };
        let json = serde_json::to_vec_pretty(&manifest).map_err(|e| ExportError::Serialize {
            what: "manifest".to_string(),
            source: e,
        })?;
        self.write_file(MANIFEST_FILE, &json)?;

        tracing::info!(
            dir = %self.out_dir.display(),
            entities = schemas.len(),
            "schema export written"
        );

        Ok(manifest)
    }

    /// Writes one file with fsync.
    fn write_file(&self, name: &str, data: &[u8]) -> ExportResult<()> {
        let path = self.out_dir.join(name);
        let io_err = |e| ExportError::Io {
            path: path.clone(),
            source: e,
        };

        let mut file = File::create(&path).map_err(io_err)?;
        file.write_all(data).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        tracing::debug!(file = %path.display(), bytes = data.len(), "export file written");
        Ok(())
    }
}
