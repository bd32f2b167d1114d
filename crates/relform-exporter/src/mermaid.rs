use std::collections::HashSet;

use relform_config::Direction;
use relform_core::{SchemaDocument, TableDef};

use crate::diagram::DiagramExporter;

/// Mermaid `erDiagram` exporter.
///
/// Keys in `omitted_tags` are drawn as if the document did not have them: `tables`
/// leaves only the header, `columns` empties every entity, `type` renders each column
/// as `UNKNOWN`, `primary_key` drops the `PK` markers and `foreign_keys` drops the
/// relationships. Other keys do not appear in the diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MermaidExporter {
    pub direction: Direction,
    pub omitted_tags: Vec<String>,
}

impl MermaidExporter {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            omitted_tags: Vec::new(),
        }
    }

    pub fn omitting<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.omitted_tags
            .extend(tags.iter().map(|t| t.as_ref().to_string()));
        self
    }

    fn omits(&self, key: &str) -> bool {
        self.omitted_tags.iter().any(|t| t == key)
    }

    fn render_entity(&self, table: &TableDef, lines: &mut Vec<String>) {
        let pk: HashSet<&str> = if self.omits("primary_key") {
            HashSet::new()
        } else {
            table
                .primary_key
                .iter()
                .flatten()
                .map(String::as_str)
                .collect()
        };

        lines.push(format!("    {} {{", table.tablename));
        if !self.omits("columns") {
            for col in &table.columns {
                let marker = if pk.contains(col.columnname.as_str()) {
                    " PK"
                } else {
                    ""
                };
                let ty = if self.omits("type") {
                    ""
                } else {
                    col.r#type.as_str()
                };
                lines.push(format!(
                    "        {} {}{marker}",
                    mermaid_type(ty),
                    col.columnname
                ));
            }
        }
        lines.push("    }".to_string());
    }
}

impl DiagramExporter for MermaidExporter {
    /// Every table becomes an entity block listing its columns (primary key columns
    /// marked `PK`), and every foreign key a many-to-one relationship labelled with its
    /// column lists. Foreign keys whose target table is gone are still drawn.
    fn render(&self, doc: &SchemaDocument) -> String {
        let mut lines = vec![
            "erDiagram".to_string(),
            format!("    direction {}", self.direction),
        ];
        if self.omits("tables") {
            return lines.join("\n");
        }

        for table in &doc.tables {
            self.render_entity(table, &mut lines);
        }

        if !self.omits("foreign_keys") {
            for table in &doc.tables {
                for fk in table.foreign_key_defs() {
                    lines.push(format!(
                        "    {} }}o--|| {} : \"{} -> {}\"",
                        table.tablename,
                        fk.targettable,
                        fk.sourcecolumns.join(", "),
                        fk.targetcolumns.join(", ")
                    ));
                }
            }
        }

        lines.join("\n")
    }
}

/// Render `doc` as a Mermaid ER diagram with nothing omitted.
pub fn render_mermaid(doc: &SchemaDocument, direction: Direction) -> String {
    MermaidExporter::new(direction).render(doc)
}

/// Reduce a raw column type to a single Mermaid type token.
///
/// Parenthesised size or precision groups are dropped, and remaining inner whitespace
/// becomes `_`. An empty result renders as `UNKNOWN`.
///
/// ```
/// use relform_exporter::mermaid_type;
///
/// assert_eq!(mermaid_type("DECIMAL(9,2)"), "DECIMAL");
/// assert_eq!(mermaid_type("double precision"), "double_precision");
/// ```
pub fn mermaid_type(raw: &str) -> String {
    let mut stripped = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => stripped.push(c),
            _ => {}
        }
    }

    let token = stripped.split_whitespace().collect::<Vec<_>>().join("_");
    if token.is_empty() {
        "UNKNOWN".to_string()
    } else {
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use rstest::rstest;

    const SAMPLE: &str = r#"tables:
- tablename: OrgUnit
  columns:
  - columnname: OEID
    type: INTEGER
    nullable: false
  - columnname: Budget
    type: DECIMAL(9,2)
    nullable: true
  - columnname: Head
    type: INTEGER
    nullable: true
  primary_key:
  - OEID
- tablename: Employee
  columns:
  - columnname: EID
    type: INTEGER
    nullable: false
  - columnname: Name
    type: VARCHAR(255)
    nullable: false
  primary_key:
  - EID
  foreign_keys:
  - fkname: fk_Employee_OrgUnit_OEID_1
    sourcecolumns:
    - OEID
    targettable: OrgUnit
    targetcolumns:
    - OEID
"#;

    #[test]
    fn renders_entities_and_relationships() {
        let doc: SchemaDocument = serde_yaml::from_str(SAMPLE).unwrap();
        assert_snapshot!(render_mermaid(&doc, Direction::Tb), @r#"
        erDiagram
            direction TB
            OrgUnit {
                INTEGER OEID PK
                DECIMAL Budget
                INTEGER Head
            }
            Employee {
                INTEGER EID PK
                VARCHAR Name
            }
            Employee }o--|| OrgUnit : "OEID -> OEID"
        "#);
    }

    #[test]
    fn composite_keys_and_direction() {
        let doc: SchemaDocument = serde_yaml::from_str(
            r#"tables:
- tablename: a
  columns:
  - {columnname: x, type: INT, nullable: false}
  - {columnname: y, type: INT, nullable: false}
  primary_key: [x, y]
  foreign_keys:
  - {fkname: fk_a_b_x_y_1, sourcecolumns: [x, y], targettable: b, targetcolumns: [p, q]}
"#,
        )
        .unwrap();
        let text = MermaidExporter::new(Direction::Lr).render(&doc);

        assert!(text.starts_with("erDiagram\n    direction LR\n"));
        assert!(text.contains("        INT x PK\n        INT y PK\n"));
        assert!(text.ends_with("    a }o--|| b : \"x, y -> p, q\""));
    }

    #[test]
    fn empty_document_renders_header_only() {
        let doc = SchemaDocument::default();
        assert_eq!(
            render_mermaid(&doc, Direction::Bt),
            "erDiagram\n    direction BT"
        );
    }

    #[test]
    fn omitted_keys_are_left_out_of_the_diagram() {
        let doc: SchemaDocument = serde_yaml::from_str(SAMPLE).unwrap();
        let text = MermaidExporter::new(Direction::Tb)
            .omitting(&["primary_key", "foreign_keys", "nullable"])
            .render(&doc);
        assert_snapshot!(text, @r"
        erDiagram
            direction TB
            OrgUnit {
                INTEGER OEID
                DECIMAL Budget
                INTEGER Head
            }
            Employee {
                INTEGER EID
                VARCHAR Name
            }
        ");
    }

    #[rstest]
    #[case(&["type"], "        UNKNOWN OEID PK\n")]
    #[case(&["columns"], "    OrgUnit {\n    }\n")]
    fn omitted_column_keys(#[case] tags: &[&str], #[case] expected: &str) {
        let doc: SchemaDocument = serde_yaml::from_str(SAMPLE).unwrap();
        let text = MermaidExporter::new(Direction::Tb).omitting(tags).render(&doc);
        assert!(text.contains(expected), "{text}");
    }

    #[test]
    fn omitting_tables_leaves_the_header() {
        let doc: SchemaDocument = serde_yaml::from_str(SAMPLE).unwrap();
        let text = MermaidExporter::new(Direction::Rl)
            .omitting(&["tables"])
            .render(&doc);
        assert_eq!(text, "erDiagram\n    direction RL");
    }

    #[rstest]
    #[case("INTEGER", "INTEGER")]
    #[case("VARCHAR(20)", "VARCHAR")]
    #[case("NUMERIC(10, 2)", "NUMERIC")]
    #[case("TIMESTAMP(6) WITH TIME ZONE", "TIMESTAMP_WITH_TIME_ZONE")]
    #[case("  text  ", "text")]
    #[case("(3)", "UNKNOWN")]
    #[case("", "UNKNOWN")]
    fn type_tokens(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(mermaid_type(raw), expected);
    }
}
