use relform_core::SchemaDocument;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

/// Return a copy of `value` with every mapping entry whose key is one of `tags` removed,
/// at any depth.
///
/// ```
/// use relform_transform::strip_tags;
///
/// let doc: serde_yaml::Value =
///     serde_yaml::from_str("a: 1\nb:\n  - type: INT\n    a: 2\n").unwrap();
/// let stripped = strip_tags(&doc, &["a"]);
/// assert_eq!(serde_yaml::to_string(&stripped).unwrap(), "b:\n- type: INT\n");
/// ```
pub fn strip_tags<S: AsRef<str>>(value: &Value, tags: &[S]) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .filter(|(key, _)| !is_omitted(key, tags))
                .map(|(key, inner)| (key.clone(), strip_tags(inner, tags)))
                .collect::<Mapping>(),
        ),
        Value::Sequence(items) => {
            Value::Sequence(items.iter().map(|item| strip_tags(item, tags)).collect())
        }
        Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
            tag: tagged.tag.clone(),
            value: strip_tags(&tagged.value, tags),
        })),
        scalar => scalar.clone(),
    }
}

/// [`strip_tags`] applied to the dynamic view of a typed document.
pub fn strip_document_tags<S: AsRef<str>>(
    doc: &SchemaDocument,
    tags: &[S],
) -> Result<Value, serde_yaml::Error> {
    Ok(strip_tags(&doc.to_value()?, tags))
}

fn is_omitted<S: AsRef<str>>(key: &Value, tags: &[S]) -> bool {
    key.as_str()
        .is_some_and(|key| tags.iter().any(|tag| tag.as_ref() == key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use relform_core::{ColumnDef, ForeignKeyDef, TableDef};

    fn sample() -> SchemaDocument {
        let mut table = TableDef::new(
            "orders",
            vec![
                ColumnDef::new("id", "INTEGER", false),
                ColumnDef::new("total", "DECIMAL(9,2)", true),
            ],
        );
        table.primary_key = Some(vec!["id".into()]);
        table.push_foreign_key(ForeignKeyDef::new(
            "fk_orders_customer_id_1",
            vec!["id".into()],
            "customer",
            vec!["id".into()],
        ));
        SchemaDocument::new(vec![table])
    }

    #[test]
    fn removes_keys_at_every_depth() {
        let stripped = strip_document_tags(&sample(), &["type", "nullable", "fkname"]).unwrap();
        insta::assert_snapshot!(serde_yaml::to_string(&stripped).unwrap(), @r"
        tables:
        - tablename: orders
          columns:
          - columnname: id
          - columnname: total
          primary_key:
          - id
          foreign_keys:
          - sourcecolumns:
            - id
            targettable: customer
            targetcolumns:
            - id
        ");
    }

    #[test]
    fn leaves_the_input_untouched() {
        let original = sample().to_value().unwrap();
        let _ = strip_tags(&original, &["columns"]);
        assert_eq!(original, sample().to_value().unwrap());
    }

    #[test]
    fn stripping_is_idempotent() {
        let tags = ["primary_key", "type"];
        let once = strip_document_tags(&sample(), &tags).unwrap();
        let twice = strip_tags(&once, &tags);
        assert_eq!(once, twice);
    }

    #[test]
    fn only_string_keys_match_and_values_are_kept() {
        let value: Value = serde_yaml::from_str("1: one\ntype: type\nlist: [type, {type: x}]\n").unwrap();
        let stripped = strip_tags(&value, &["type", "1"]);
        assert_eq!(
            serde_yaml::to_string(&stripped).unwrap(),
            "1: one\nlist:\n- type\n- {}\n"
        );
    }

    #[test]
    fn descends_into_tagged_values() {
        let value: Value = serde_yaml::from_str("!Table\nname: t\nsecret: x\n").unwrap();
        let stripped = strip_tags(&value, &["secret"]);
        let Value::Tagged(tagged) = stripped else {
            panic!("tag lost");
        };
        assert_eq!(tagged.tag, "Table");
        assert_eq!(tagged.value["name"], "t");
        assert!(tagged.value.get("secret").is_none());
    }
}
