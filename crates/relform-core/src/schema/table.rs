use serde::{Deserialize, Serialize};

use crate::schema::{
    column::ColumnDef,
    foreign_key::ForeignKeyDef,
    names::{ColumnName, TableName},
};

/// One relational table.
///
/// `primary_key` and `foreign_keys` distinguish "absent" (`None`, omitted when
/// serialized) from "declared but empty" (`Some(vec![])`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TableDef {
    pub tablename: TableName,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Vec<ColumnName>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_keys: Option<Vec<ForeignKeyDef>>,
}

impl TableDef {
    pub fn new(tablename: impl Into<TableName>, columns: Vec<ColumnDef>) -> Self {
        Self {
            tablename: tablename.into(),
            columns,
            primary_key: None,
            foreign_keys: None,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.columnname == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Foreign keys as a slice; empty when the table declares none.
    pub fn foreign_key_defs(&self) -> &[ForeignKeyDef] {
        self.foreign_keys.as_deref().unwrap_or_default()
    }

    pub fn foreign_key_names(&self) -> Vec<&str> {
        self.foreign_key_defs()
            .iter()
            .map(|fk| fk.fkname.as_str())
            .collect()
    }

    /// Keep the columns for which `keep(position, column)` holds.
    /// Returns the number of removed columns; order of the survivors is unchanged.
    pub fn retain_columns<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(usize, &ColumnDef) -> bool,
    {
        let before = self.columns.len();
        let mut position = 0;
        self.columns.retain(|col| {
            let kept = keep(position, col);
            position += 1;
            kept
        });
        before - self.columns.len()
    }

    /// Keep the foreign keys for which `keep(position, fk)` holds.
    ///
    /// A list that this call empties is dropped entirely (`foreign_keys` becomes
    /// `None`); a list that was already empty stays as it is.
    pub fn retain_foreign_keys<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(usize, &ForeignKeyDef) -> bool,
    {
        let Some(fks) = self.foreign_keys.as_mut() else {
            return 0;
        };
        let before = fks.len();
        let mut position = 0;
        fks.retain(|fk| {
            let kept = keep(position, fk);
            position += 1;
            kept
        });
        let removed = before - fks.len();
        if removed > 0 && fks.is_empty() {
            self.foreign_keys = None;
        }
        removed
    }

    /// Append a foreign key, creating the list when the table has none.
    pub fn push_foreign_key(&mut self, fk: ForeignKeyDef) {
        self.foreign_keys.get_or_insert_with(Vec::new).push(fk);
    }
}
