use std::fmt;

use relform_core::{ColumnName, ForeignKeyName, SchemaDocument, TableDef, TableName};

/// One difference between two documents, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaChange {
    TableRemoved(TableName),
    TableAdded(TableName),
    ColumnRemoved { table: TableName, column: ColumnName },
    ColumnAdded { table: TableName, column: ColumnName },
    ForeignKeyRemoved { table: TableName, fkname: ForeignKeyName },
    ForeignKeyAdded { table: TableName, fkname: ForeignKeyName },
}

impl fmt::Display for SchemaChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaChange::TableRemoved(table) => write!(f, "- table {table}"),
            SchemaChange::TableAdded(table) => write!(f, "+ table {table}"),
            SchemaChange::ColumnRemoved { table, column } => {
                write!(f, "- column {table}.{column}")
            }
            SchemaChange::ColumnAdded { table, column } => write!(f, "+ column {table}.{column}"),
            SchemaChange::ForeignKeyRemoved { table, fkname } => {
                write!(f, "- fk {table}.{fkname}")
            }
            SchemaChange::ForeignKeyAdded { table, fkname } => write!(f, "+ fk {table}.{fkname}"),
        }
    }
}

impl SchemaChange {
    pub fn is_removal(&self) -> bool {
        matches!(
            self,
            SchemaChange::TableRemoved(_)
                | SchemaChange::ColumnRemoved { .. }
                | SchemaChange::ForeignKeyRemoved { .. }
        )
    }
}

/// Compare `base` with `working`.
///
/// Changes follow the table order of `base`; tables only present in `working` come last.
/// Within a table, removed columns come before added ones, then foreign keys.
pub fn diff_documents(base: &SchemaDocument, working: &SchemaDocument) -> Vec<SchemaChange> {
    let mut changes = Vec::new();

    for table in &base.tables {
        match working.table(&table.tablename) {
            None => changes.push(SchemaChange::TableRemoved(table.tablename.clone())),
            Some(current) => diff_table(table, current, &mut changes),
        }
    }
    for table in &working.tables {
        if base.table(&table.tablename).is_none() {
            changes.push(SchemaChange::TableAdded(table.tablename.clone()));
        }
    }

    changes
}

fn diff_table(before: &TableDef, after: &TableDef, changes: &mut Vec<SchemaChange>) {
    let table = || before.tablename.clone();

    for col in &before.columns {
        if !after.has_column(&col.columnname) {
            changes.push(SchemaChange::ColumnRemoved {
                table: table(),
                column: col.columnname.clone(),
            });
        }
    }
    for col in &after.columns {
        if !before.has_column(&col.columnname) {
            changes.push(SchemaChange::ColumnAdded {
                table: table(),
                column: col.columnname.clone(),
            });
        }
    }

    let before_fks = before.foreign_key_names();
    let after_fks = after.foreign_key_names();
    for name in &before_fks {
        if !after_fks.contains(name) {
            changes.push(SchemaChange::ForeignKeyRemoved {
                table: table(),
                fkname: name.to_string(),
            });
        }
    }
    for name in &after_fks {
        if !before_fks.contains(name) {
            changes.push(SchemaChange::ForeignKeyAdded {
                table: table(),
                fkname: name.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{add_foreign_keys, apply};
    use relform_core::ColumnDef;

    fn sample() -> SchemaDocument {
        let cols = |names: &[&str]| {
            names
                .iter()
                .map(|n| ColumnDef::new(*n, "TEXT", true))
                .collect()
        };
        SchemaDocument::new(vec![
            TableDef::new("a", cols(&["id", "note"])),
            TableDef::new("b", cols(&["id", "a_id"])),
            TableDef::new("c", cols(&["id"])),
        ])
    }

    #[test]
    fn identical_documents_have_no_changes() {
        assert!(diff_documents(&sample(), &sample()).is_empty());
    }

    #[test]
    fn reports_changes_in_base_order() {
        let base = sample();
        let mut working = base.clone();
        apply(
            &mut working,
            &["del table pattern:c", "del column a pattern:note"],
        )
        .unwrap();
        add_foreign_keys(&mut working, &["b|a_id|-->|a|id"]).unwrap();
        working.tables.push(TableDef::new("d", vec![]));

        let changes = diff_documents(&base, &working);
        let rendered: Vec<String> = changes.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["- column a.note", "+ fk b.fk_b_a_a_id_1", "- table c", "+ table d"]
        );
        assert_eq!(changes.iter().filter(|c| c.is_removal()).count(), 2);
    }

    #[test]
    fn removed_foreign_keys_are_listed() {
        let mut base = sample();
        add_foreign_keys(&mut base, &["b|a_id|-->|a|id"]).unwrap();
        let mut working = base.clone();
        apply(&mut working, &["del fk index:[0]"]).unwrap();

        assert_eq!(
            diff_documents(&base, &working),
            vec![SchemaChange::ForeignKeyRemoved {
                table: "b".into(),
                fkname: "fk_b_a_a_id_1".into(),
            }]
        );
    }
}
