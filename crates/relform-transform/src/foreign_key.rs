use relform_core::{ColumnName, ForeignKeyDef, SchemaDocument, TableName};
use relform_naming::next_foreign_key_name;
use tracing::debug;

use crate::error::TransformError;
use crate::statement::is_skipped;

const SEPARATOR: &str = "|-->|";

/// A parsed `source|cols|-->|target|cols` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeySpec {
    pub source_table: TableName,
    pub source_columns: Vec<ColumnName>,
    pub target_table: TableName,
    pub target_columns: Vec<ColumnName>,
}

impl ForeignKeySpec {
    /// Parse one spec line. Column lists are comma separated; whitespace around every
    /// token is ignored.
    ///
    /// ```
    /// use relform_transform::ForeignKeySpec;
    ///
    /// let spec = ForeignKeySpec::parse("OrgUnit | SuperUnit, Region |-->| OrgUnit | OEID, RegionCode").unwrap();
    /// assert_eq!(spec.source_columns, vec!["SuperUnit", "Region"]);
    /// assert_eq!(spec.target_table, "OrgUnit");
    /// ```
    pub fn parse(line: &str) -> Result<Self, TransformError> {
        let line = line.trim();
        let parts: Vec<&str> = line.split(SEPARATOR).collect();
        let (source, target) = match parts.as_slice() {
            [_] => return Err(TransformError::MissingSeparator(line.to_string())),
            [source, target] => (source.trim(), target.trim()),
            _ => return Err(TransformError::DuplicateSeparator(line.to_string())),
        };

        let (source_table, source_columns) =
            split_side(source).ok_or_else(|| TransformError::InvalidSource(source.to_string()))?;
        let (target_table, target_columns) =
            split_side(target).ok_or_else(|| TransformError::InvalidTarget(target.to_string()))?;

        let has_empty = source_table.is_empty()
            || target_table.is_empty()
            || source_columns.iter().chain(&target_columns).any(String::is_empty);
        if has_empty {
            return Err(TransformError::EmptyName(line.to_string()));
        }
        if source_columns.len() != target_columns.len() {
            return Err(TransformError::ColumnCountMismatch {
                spec: line.to_string(),
                source_count: source_columns.len(),
                target_count: target_columns.len(),
            });
        }

        Ok(Self {
            source_table,
            source_columns,
            target_table,
            target_columns,
        })
    }
}

fn split_side(side: &str) -> Option<(TableName, Vec<ColumnName>)> {
    let tokens: Vec<&str> = side.split('|').map(str::trim).collect();
    let [table, columns] = tokens.as_slice() else {
        return None;
    };
    let columns = columns.split(',').map(|c| c.trim().to_string()).collect();
    Some((table.to_string(), columns))
}

/// Append the foreign key described by `spec` to its source table and return the
/// generated name.
pub fn add_foreign_key(
    doc: &mut SchemaDocument,
    spec: &ForeignKeySpec,
) -> Result<String, TransformError> {
    let Some(table) = doc.table_mut(&spec.source_table) else {
        return Err(TransformError::SourceTableNotFound {
            table: spec.source_table.clone(),
            spec: format!(
                "{}|{}{SEPARATOR}{}|{}",
                spec.source_table,
                spec.source_columns.join(","),
                spec.target_table,
                spec.target_columns.join(",")
            ),
        });
    };

    let fkname = next_foreign_key_name(
        &spec.source_table,
        &spec.target_table,
        &spec.source_columns,
        &table.foreign_key_names(),
    );
    table.push_foreign_key(ForeignKeyDef::new(
        fkname.clone(),
        spec.source_columns.clone(),
        spec.target_table.clone(),
        spec.target_columns.clone(),
    ));
    debug!("{:<12} - {fkname}", "ADD_FK");
    Ok(fkname)
}

/// Parse and inject every spec line in order.
///
/// Blank entries and `#` comments are skipped. The first failing line stops the batch
/// with its 1-based position; keys added before it stay in place.
pub fn add_foreign_keys<'d, S: AsRef<str>>(
    doc: &'d mut SchemaDocument,
    specs: &[S],
) -> Result<&'d mut SchemaDocument, TransformError> {
    for (i, raw) in specs.iter().enumerate() {
        let raw = raw.as_ref();
        if is_skipped(raw) {
            continue;
        }
        let spec = ForeignKeySpec::parse(raw).map_err(|e| e.at_line(i + 1))?;
        add_foreign_key(doc, &spec).map_err(|e| match e {
            TransformError::SourceTableNotFound { table, .. } => {
                TransformError::SourceTableNotFound {
                    table,
                    spec: raw.trim().to_string(),
                }
                .at_line(i + 1)
            }
            other => other.at_line(i + 1),
        })?;
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use relform_core::{ColumnDef, TableDef};
    use rstest::rstest;

    fn org_doc() -> SchemaDocument {
        let cols = |names: &[&str]| {
            names
                .iter()
                .map(|n| ColumnDef::new(*n, "INTEGER", true))
                .collect()
        };
        SchemaDocument::new(vec![
            TableDef::new("OrgUnit", cols(&["OEID", "Region", "SuperUnit", "Head"])),
            TableDef::new("Employee", cols(&["EID", "OEID"])),
        ])
    }

    #[test]
    fn injects_into_table_without_foreign_keys() {
        let mut doc = org_doc();
        add_foreign_keys(&mut doc, &["OrgUnit|Head|-->|Employee|EID"]).unwrap();
        assert_eq!(
            doc.table("OrgUnit").unwrap().foreign_keys,
            Some(vec![ForeignKeyDef::new(
                "fk_OrgUnit_Employee_Head_1",
                vec!["Head".into()],
                "Employee",
                vec!["EID".into()],
            )])
        );
    }

    #[test]
    fn composite_keys_join_columns_into_the_name() {
        let mut doc = org_doc();
        let spec = ForeignKeySpec::parse("OrgUnit|SuperUnit,Region|-->|OrgUnit|OEID,Region").unwrap();
        let name = add_foreign_key(&mut doc, &spec).unwrap();
        assert_eq!(name, "fk_OrgUnit_OrgUnit_SuperUnit_Region_1");
    }

    #[test]
    fn repeated_specs_get_increasing_sequence() {
        let mut doc = org_doc();
        add_foreign_keys(
            &mut doc,
            &[
                "OrgUnit|Head|-->|Employee|EID",
                "# same target again",
                "OrgUnit|Head|-->|Employee|EID",
                "Employee|OEID|-->|OrgUnit|OEID",
            ],
        )
        .unwrap();
        assert_eq!(
            doc.table("OrgUnit").unwrap().foreign_key_names(),
            vec!["fk_OrgUnit_Employee_Head_1", "fk_OrgUnit_Employee_Head_2"]
        );
        assert_eq!(
            doc.table("Employee").unwrap().foreign_key_names(),
            vec!["fk_Employee_OrgUnit_OEID_1"]
        );
    }

    #[rstest]
    #[case(
        "OrgUnit|Head-->|Employee|EID",
        TransformError::MissingSeparator("OrgUnit|Head-->|Employee|EID".into())
    )]
    #[case(
        "a|x|-->|b|y|-->|c|z",
        TransformError::DuplicateSeparator("a|x|-->|b|y|-->|c|z".into())
    )]
    #[case("a x|-->|b|y", TransformError::InvalidSource("a x".into()))]
    #[case("a|x|q|-->|b|y", TransformError::InvalidSource("a|x|q".into()))]
    #[case("a|x|-->|b", TransformError::InvalidTarget("b".into()))]
    #[case("|x|-->|b|y", TransformError::EmptyName("|x|-->|b|y".into()))]
    #[case("a|x,|-->|b|y,z", TransformError::EmptyName("a|x,|-->|b|y,z".into()))]
    #[case(
        "a|x|-->|b|y,z",
        TransformError::ColumnCountMismatch {
            spec: "a|x|-->|b|y,z".into(),
            source_count: 1,
            target_count: 2,
        }
    )]
    fn rejects_malformed_specs(#[case] line: &str, #[case] expected: TransformError) {
        assert_eq!(ForeignKeySpec::parse(line).unwrap_err(), expected);
    }

    #[test]
    fn missing_separator_is_a_parse_error() {
        let err = ForeignKeySpec::parse("OrgUnit|Head-->|Employee|EID").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("missing '|-->|'"));
    }

    #[test]
    fn missing_source_table_is_fatal() {
        let mut doc = org_doc();
        let err = add_foreign_keys(
            &mut doc,
            &["OrgUnit|Head|-->|Employee|EID", " Ghost | a |-->| OrgUnit | OEID "],
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "line 2: source table not found: Ghost (in 'Ghost | a |-->| OrgUnit | OEID')"
        );
        // the first key stays
        assert_eq!(doc.table("OrgUnit").unwrap().foreign_key_names().len(), 1);
    }

    #[test]
    fn target_table_is_not_required() {
        let mut doc = org_doc();
        add_foreign_keys(&mut doc, &["Employee|OEID|-->|Department|DID"]).unwrap();
        let fk = &doc.table("Employee").unwrap().foreign_key_defs()[0];
        assert_eq!(fk.targettable, "Department");
    }
}
