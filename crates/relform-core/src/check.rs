use std::collections::HashSet;

use thiserror::Error;

use crate::document::SchemaDocument;
use crate::schema::names::{ColumnName, ForeignKeyName, TableName};

/// A structural finding reported by [`SchemaDocument::check`].
///
/// Dangling references and unknown columns are legitimate results of deleting
/// tables or columns, so they are warnings. Duplicate tables and unbalanced
/// foreign keys break the document model and are errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentIssue {
    #[error("duplicate table name: {0}")]
    DuplicateTable(TableName),
    #[error(
        "foreign key {table}.{fkname} pairs {source_count} source column(s) with {target_count} target column(s)"
    )]
    ForeignKeyArity {
        table: TableName,
        fkname: ForeignKeyName,
        source_count: usize,
        target_count: usize,
    },
    #[error("primary key of {table} references unknown column: {column}")]
    UnknownPrimaryKeyColumn { table: TableName, column: ColumnName },
    #[error("foreign key {table}.{fkname} references unknown source column: {column}")]
    UnknownForeignKeyColumn {
        table: TableName,
        fkname: ForeignKeyName,
        column: ColumnName,
    },
    #[error("foreign key {table}.{fkname} references missing table: {target}")]
    DanglingForeignKey {
        table: TableName,
        fkname: ForeignKeyName,
        target: TableName,
    },
    #[error("foreign key {table}.{fkname} references unknown column: {target}.{column}")]
    UnknownTargetColumn {
        table: TableName,
        fkname: ForeignKeyName,
        target: TableName,
        column: ColumnName,
    },
}

impl DocumentIssue {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            DocumentIssue::DuplicateTable(_) | DocumentIssue::ForeignKeyArity { .. }
        )
    }
}

impl SchemaDocument {
    /// Report structural issues, in table order.
    pub fn check(&self) -> Vec<DocumentIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for table in &self.tables {
            if !seen.insert(table.tablename.as_str()) {
                issues.push(DocumentIssue::DuplicateTable(table.tablename.clone()));
            }

            for column in table.primary_key.iter().flatten() {
                if !table.has_column(column) {
                    issues.push(DocumentIssue::UnknownPrimaryKeyColumn {
                        table: table.tablename.clone(),
                        column: column.clone(),
                    });
                }
            }

            for fk in table.foreign_key_defs() {
                if !fk.is_balanced() {
                    issues.push(DocumentIssue::ForeignKeyArity {
                        table: table.tablename.clone(),
                        fkname: fk.fkname.clone(),
                        source_count: fk.sourcecolumns.len(),
                        target_count: fk.targetcolumns.len(),
                    });
                }

                for column in &fk.sourcecolumns {
                    if !table.has_column(column) {
                        issues.push(DocumentIssue::UnknownForeignKeyColumn {
                            table: table.tablename.clone(),
                            fkname: fk.fkname.clone(),
                            column: column.clone(),
                        });
                    }
                }

                match self.table(&fk.targettable) {
                    None => issues.push(DocumentIssue::DanglingForeignKey {
                        table: table.tablename.clone(),
                        fkname: fk.fkname.clone(),
                        target: fk.targettable.clone(),
                    }),
                    Some(target) => {
                        for column in &fk.targetcolumns {
                            if !target.has_column(column) {
                                issues.push(DocumentIssue::UnknownTargetColumn {
                                    table: table.tablename.clone(),
                                    fkname: fk.fkname.clone(),
                                    target: fk.targettable.clone(),
                                    column: column.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }

        issues
    }
}
