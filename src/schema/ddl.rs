//! PostgreSQL DDL rendering
//!
//! One `CREATE TABLE IF NOT EXISTS` statement per entity. Uniqueness and
//! defaults are handed to the storage layer here; the registry never checks
//! them against stored data.

use std::fmt::Write;

use super::types::{EntitySchema, FieldDef};

/// Renders the column clause for one field.
fn column_clause(field: &FieldDef) -> String {
    if field.generated {
        return format!("{} SERIAL PRIMARY KEY", field.column);
    }

    let mut clause = format!("{} {}", field.column, field.field_type.sql_type());
    if !field.nullable {
        clause.push_str(" NOT NULL");
    }
    if field.unique {
        clause.push_str(" UNIQUE");
    }
    if let Some(default) = field.default {
        clause.push_str(" DEFAULT ");
        clause.push_str(&default.sql_literal());
    }
    clause
}

/// Renders the `CREATE TABLE` statement for an entity, columns in declared order.
pub fn create_table_sql(schema: &EntitySchema) -> String {
    let mut sql = String::with_capacity(64 + schema.fields.len() * 40);
    // Writing to a String cannot fail
    let _ = writeln!(sql, "CREATE TABLE IF NOT EXISTS {} (", schema.table);

    let last = schema.fields.len().saturating_sub(1);
    for (i, field) in schema.fields.iter().enumerate() {
        let sep = if i == last { "" } else { "," };
        let _ = writeln!(sql, "    {}{}", column_clause(field), sep);
    }

    sql.push_str(");\n");
    sql
}

/// Renders the statements for several entities separated by blank lines.
pub fn create_tables_sql<'a>(schemas: impl IntoIterator<Item = &'a EntitySchema>) -> String {
    schemas
        .into_iter()
        .map(create_table_sql)
        .collect::<Vec<_>>()
        .join("\n")
}
