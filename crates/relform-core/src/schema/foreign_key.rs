use serde::{Deserialize, Serialize};

use crate::schema::names::{ColumnName, ForeignKeyName, TableName};

/// A named, positionally paired column mapping from the owning table to `targettable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ForeignKeyDef {
    pub fkname: ForeignKeyName,
    pub sourcecolumns: Vec<ColumnName>,
    pub targettable: TableName,
    pub targetcolumns: Vec<ColumnName>,
}

impl ForeignKeyDef {
    pub fn new(
        fkname: impl Into<ForeignKeyName>,
        sourcecolumns: Vec<ColumnName>,
        targettable: impl Into<TableName>,
        targetcolumns: Vec<ColumnName>,
    ) -> Self {
        Self {
            fkname: fkname.into(),
            sourcecolumns,
            targettable: targettable.into(),
            targetcolumns,
        }
    }

    /// Source and target column lists pair up one to one.
    pub fn is_balanced(&self) -> bool {
        self.sourcecolumns.len() == self.targetcolumns.len()
    }
}
