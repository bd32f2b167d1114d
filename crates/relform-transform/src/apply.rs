use std::collections::BTreeSet;

use relform_core::SchemaDocument;
use tracing::debug;

use crate::error::TransformError;
use crate::pattern::GlobPattern;
use crate::statement::{Statement, Target, is_skipped};

/// Outcome of one applied statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub removed: usize,
}

/// Apply a single parsed statement to `doc`.
///
/// Index targets resolve against the collection as it is right now; statements that
/// name a missing table remove nothing.
pub fn apply_statement(doc: &mut SchemaDocument, statement: &Statement) -> ApplyReport {
    let removed = match statement {
        Statement::DeleteTables(target) => {
            let len = doc.tables.len();
            let drop = Selection::new(target, len);
            doc.retain_tables(|i, table| !drop.hits(i, &table.tablename))
        }
        Statement::DeleteColumns { table, target } => doc
            .tables
            .iter_mut()
            .filter(|t| table.selects(&t.tablename))
            .map(|t| {
                let drop = Selection::new(target, t.columns.len());
                t.retain_columns(|i, col| !drop.hits(i, &col.columnname))
            })
            .sum::<usize>(),
        Statement::DeleteForeignKeys(target) => doc
            .tables
            .iter_mut()
            .map(|t| {
                let drop = Selection::new(target, t.foreign_key_defs().len());
                t.retain_foreign_keys(|i, fk| !drop.hits(i, &fk.fkname))
            })
            .sum::<usize>(),
    };

    debug!("{:<12} - {statement} ({removed} removed)", "TRANSFORM");
    ApplyReport { removed }
}

/// Parse and apply `statements` in order.
///
/// Blank entries and `#` comments are skipped. The first invalid statement stops the
/// run with its 1-based position; statements before it stay applied.
pub fn apply<'d, S: AsRef<str>>(
    doc: &'d mut SchemaDocument,
    statements: &[S],
) -> Result<&'d mut SchemaDocument, TransformError> {
    for (i, raw) in statements.iter().enumerate() {
        let raw = raw.as_ref();
        if is_skipped(raw) {
            continue;
        }
        let statement = Statement::parse(raw).map_err(|e| e.at_line(i + 1))?;
        apply_statement(doc, &statement);
    }
    Ok(doc)
}

/// [`apply`] over the lines of a script.
pub fn apply_script<'d>(
    doc: &'d mut SchemaDocument,
    script: &str,
) -> Result<&'d mut SchemaDocument, TransformError> {
    apply(doc, &script.lines().collect::<Vec<_>>())
}

/// A target bound to one collection length.
enum Selection<'a> {
    Pattern(&'a GlobPattern),
    Positions(BTreeSet<usize>),
}

impl<'a> Selection<'a> {
    fn new(target: &'a Target, len: usize) -> Self {
        match target {
            Target::Pattern(pattern) => Selection::Pattern(pattern),
            Target::Index(spec) => Selection::Positions(spec.resolve(len)),
        }
    }

    fn hits(&self, position: usize, name: &str) -> bool {
        match self {
            Selection::Pattern(pattern) => pattern.matches(name),
            Selection::Positions(positions) => positions.contains(&position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use relform_core::{ColumnDef, ForeignKeyDef, TableDef};

    fn table(name: &str, cols: &[&str]) -> TableDef {
        TableDef::new(
            name,
            cols.iter()
                .map(|c| ColumnDef::new(*c, "INTEGER", false))
                .collect(),
        )
    }

    /// table1(pk=[id1]), table2(pk=[id2], fk -> table1), table3(pk=[id3])
    fn sample() -> SchemaDocument {
        let mut t1 = table("table1", &["id1", "name", "note"]);
        t1.primary_key = Some(vec!["id1".into()]);
        let mut t2 = table("table2", &["id2", "fk1"]);
        t2.primary_key = Some(vec!["id2".into()]);
        t2.push_foreign_key(ForeignKeyDef::new(
            "fk_table2_table1_1",
            vec!["fk1".into()],
            "table1",
            vec!["id1".into()],
        ));
        let mut t3 = table("table3", &["id3"]);
        t3.primary_key = Some(vec!["id3".into()]);
        SchemaDocument::new(vec![t1, t2, t3])
    }

    fn column_names(doc: &SchemaDocument, table: &str) -> Vec<String> {
        doc.table(table)
            .unwrap()
            .columns
            .iter()
            .map(|c| c.columnname.clone())
            .collect()
    }

    #[test]
    fn delete_table_by_pattern_keeps_order() {
        let mut doc = sample();
        apply(&mut doc, &["del table pattern:table2"]).unwrap();
        assert_eq!(doc.table_names(), vec!["table1", "table3"]);
    }

    #[test]
    fn delete_table_by_index() {
        let mut doc = sample();
        apply(&mut doc, &["del table index:[0,2]"]).unwrap();
        assert_eq!(doc.table_names(), vec!["table2"]);
    }

    #[test]
    fn deleting_last_fk_drops_the_key() {
        let mut doc = sample();
        apply(&mut doc, &["del fk pattern:fk_table2*"]).unwrap();
        let table2 = doc.table("table2").unwrap();
        assert_eq!(table2.foreign_keys, None);
        assert!(!serde_yaml::to_string(table2).unwrap().contains("foreign_keys"));
    }

    #[test]
    fn fk_index_is_local_to_each_table() {
        let mut doc = sample();
        doc.table_mut("table3").unwrap().push_foreign_key(ForeignKeyDef::new(
            "fk_table3_table1_1",
            vec!["id3".into()],
            "table1",
            vec!["id1".into()],
        ));
        doc.table_mut("table3").unwrap().push_foreign_key(ForeignKeyDef::new(
            "fk_table3_table2_1",
            vec!["id3".into()],
            "table2",
            vec!["id2".into()],
        ));

        let report = apply_statement(&mut doc, &Statement::parse("del fk index:0").unwrap());
        assert_eq!(report.removed, 2);
        assert_eq!(doc.table("table2").unwrap().foreign_keys, None);
        assert_eq!(
            doc.table("table3").unwrap().foreign_key_names(),
            vec!["fk_table3_table2_1"]
        );
    }

    #[test]
    fn delete_columns_of_one_table() {
        let mut doc = sample();
        apply(&mut doc, &["del column table1 index:[1:]"]).unwrap();
        assert_eq!(column_names(&doc, "table1"), vec!["id1"]);
        // pk and other tables are left alone
        assert_eq!(doc.table("table1").unwrap().primary_key, Some(vec!["id1".into()]));
        assert_eq!(column_names(&doc, "table2"), vec!["id2", "fk1"]);
    }

    #[test]
    fn delete_columns_everywhere() {
        let mut doc = sample();
        apply(&mut doc, &["del column * index:0"]).unwrap();
        assert_eq!(column_names(&doc, "table1"), vec!["name", "note"]);
        assert_eq!(column_names(&doc, "table2"), vec!["fk1"]);
        assert!(column_names(&doc, "table3").is_empty());

        let mut doc = sample();
        apply(&mut doc, &["del column * pattern:id*"]).unwrap();
        assert_eq!(column_names(&doc, "table1"), vec!["name", "note"]);
        assert_eq!(column_names(&doc, "table2"), vec!["fk1"]);
    }

    #[test]
    fn column_deletion_does_not_cascade() {
        let mut doc = sample();
        apply(&mut doc, &["del column table2 pattern:fk1"]).unwrap();
        let table2 = doc.table("table2").unwrap();
        assert_eq!(table2.foreign_key_defs()[0].sourcecolumns, vec!["fk1"]);
    }

    #[test]
    fn missing_table_is_a_no_op() {
        let mut doc = sample();
        let report =
            apply_statement(&mut doc, &Statement::parse("del column ghost pattern:*").unwrap());
        assert_eq!(report, ApplyReport { removed: 0 });
        assert_eq!(doc, sample());
    }

    #[test]
    fn empty_index_and_out_of_range_remove_nothing() {
        let mut doc = sample();
        apply(&mut doc, &["del table index:[]", "del table index:[7,-9]"]).unwrap();
        assert_eq!(doc, sample());
    }

    #[test]
    fn empty_or_out_of_range_column_index_keeps_columns_in_order() {
        let mut doc = sample();
        let report = apply_statement(
            &mut doc,
            &Statement::parse("del column table1 index:[]").unwrap(),
        );
        assert_eq!(report.removed, 0);
        assert_eq!(column_names(&doc, "table1"), vec!["id1", "name", "note"]);

        apply(&mut doc, &["del column table1 index:[3,-4,10:20]"]).unwrap();
        assert_eq!(column_names(&doc, "table1"), vec!["id1", "name", "note"]);
        assert_eq!(doc, sample());
    }

    #[test]
    fn negative_index_counts_from_the_end() {
        let mut doc = sample();
        apply(&mut doc, &["del table index:-1"]).unwrap();
        assert_eq!(doc.table_names(), vec!["table1", "table2"]);
    }

    #[test]
    fn index_resolves_against_current_state() {
        let mut doc = sample();
        apply(&mut doc, &["del table index:0", "del table index:0"]).unwrap();
        assert_eq!(doc.table_names(), vec!["table3"]);
    }

    #[test]
    fn pattern_deletion_is_idempotent() {
        let mut once = sample();
        apply(&mut once, &["del table pattern:table[12]"]).unwrap();
        let mut twice = once.clone();
        apply(&mut twice, &["del table pattern:table[12]"]).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn invalid_statement_stops_the_run() {
        let mut doc = sample();
        let err = apply(
            &mut doc,
            &["del table pattern:table3", "# comment", "invalid command"],
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().starts_with("line 3: invalid statement: 'invalid command'"));
        // earlier statements stay applied
        assert_eq!(doc.table_names(), vec!["table1", "table2"]);
    }

    #[test]
    fn apply_script_runs_every_line() {
        let mut doc = sample();
        apply_script(
            &mut doc,
            "# trim the sample\ndel fk pattern:*\n\ndel table pattern:table1\n",
        )
        .unwrap();
        assert_eq!(doc.table_names(), vec!["table2", "table3"]);
        assert_eq!(doc.table("table2").unwrap().foreign_keys, None);
    }
}
