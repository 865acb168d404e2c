//! Schema introspection traits and types

use crate::Result;
use serde::{Deserialize, Serialize};

/// One discovered (table, field) pair, in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub table: String,
    pub field: String,
}

/// Schema introspection interface
pub trait SchemaIntrospection: Send + Sync {
    /// List all table names, in storage order. The first listed table is the
    /// default selection for every form slot.
    fn list_tables(&self) -> Result<Vec<String>>;

    /// List the field names of a table, derived by sampling one row.
    /// A table with zero rows exposes zero discoverable fields.
    fn list_fields(&self, table: &str) -> Result<Vec<String>>;

    /// Walk every table and collect its (table, field) pairs. The resulting
    /// sequence fixes the form's slot count for the session.
    fn discover_fields(&self) -> Result<Vec<FieldRef>> {
        let mut fields = Vec::new();
        for table in self.list_tables()? {
            for field in self.list_fields(&table)? {
                fields.push(FieldRef {
                    table: table.clone(),
                    field,
                });
            }
        }
        Ok(fields)
    }
}
