use serde::{Deserialize, Serialize};

use crate::schema::{names::TableName, table::TableDef};

/// Normalized relational schema: an ordered list of tables.
///
/// Table order is significant (it reflects the dependency or display order of the
/// producer) and every operation in relform preserves it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct SchemaDocument {
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

impl SchemaDocument {
    pub fn new(tables: Vec<TableDef>) -> Self {
        Self { tables }
    }

    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|t| t.tablename == name)
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut TableDef> {
        self.tables.iter_mut().find(|t| t.tablename == name)
    }

    pub fn table_names(&self) -> Vec<&TableName> {
        self.tables.iter().map(|t| &t.tablename).collect()
    }

    /// Keep the tables for which `keep(position, table)` holds.
    /// Returns the number of removed tables.
    pub fn retain_tables<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(usize, &TableDef) -> bool,
    {
        let before = self.tables.len();
        let mut position = 0;
        self.tables.retain(|table| {
            let kept = keep(position, table);
            position += 1;
            kept
        });
        before - self.tables.len()
    }

    /// Dynamic view of the document with the interchange key order.
    pub fn to_value(&self) -> Result<serde_yaml::Value, serde_yaml::Error> {
        serde_yaml::to_value(self)
    }

    pub fn from_value(value: serde_yaml::Value) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_value(value)
    }
}
