use serde::{Deserialize, Serialize};

use crate::schema::names::ColumnName;

/// One column of a table, in declaration order.
///
/// `type` is kept as the raw type token of the source (`INTEGER`, `DECIMAL(9,2)`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ColumnDef {
    pub columnname: ColumnName,
    pub r#type: String,
    pub nullable: bool,
}

impl ColumnDef {
    pub fn new(columnname: impl Into<ColumnName>, r#type: impl Into<String>, nullable: bool) -> Self {
        Self {
            columnname: columnname.into(),
            r#type: r#type.into(),
            nullable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_type_without_raw_prefix() {
        let col = ColumnDef::new("amount", "DECIMAL(9,2)", false);
        let json = serde_json::to_string(&col).unwrap();
        assert_eq!(
            json,
            r#"{"columnname":"amount","type":"DECIMAL(9,2)","nullable":false}"#
        );
    }

    #[test]
    fn deserializes_yaml_booleans() {
        let col: ColumnDef =
            serde_yaml::from_str("columnname: id\ntype: INTEGER\nnullable: False\n").unwrap();
        assert_eq!(col, ColumnDef::new("id", "INTEGER", false));
    }
}
