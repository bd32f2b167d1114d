//! Naming conventions for synthetic relform schema objects.
//!
//! Foreign keys injected into a schema document get a generated name built from
//! the source table, the target table, the source columns, and a sequence number.
//! This crate has no dependencies and can be used by any other relform crate.

/// Name prefix shared by every generated foreign key with the same endpoints.
/// Format: fk_{source}_{target}_{col1}_{col2}...
///
/// # Examples
/// ```
/// use relform_naming::foreign_key_name_prefix;
///
/// assert_eq!(
///     foreign_key_name_prefix("OrgUnit", "OrgUnit", &["SuperUnit".into(), "Region".into()]),
///     "fk_OrgUnit_OrgUnit_SuperUnit_Region"
/// );
/// ```
pub fn foreign_key_name_prefix(source_table: &str, target_table: &str, columns: &[String]) -> String {
    format!("fk_{}_{}_{}", source_table, target_table, columns.join("_"))
}

/// Generate a foreign key name with an explicit sequence number.
/// Format: fk_{source}_{target}_{col1}_{col2}..._{sequence}
///
/// # Examples
/// ```
/// use relform_naming::build_foreign_key_name;
///
/// assert_eq!(
///     build_foreign_key_name("OrgUnit", "Employee", &["Head".into()], 1),
///     "fk_OrgUnit_Employee_Head_1"
/// );
/// ```
pub fn build_foreign_key_name(
    source_table: &str,
    target_table: &str,
    columns: &[String],
    sequence: u32,
) -> String {
    format!(
        "{}_{}",
        foreign_key_name_prefix(source_table, target_table, columns),
        sequence
    )
}

/// Generate the first foreign key name not already present in `existing`.
///
/// Sequence numbers start at 1, so the first key between two tables over the same
/// columns always ends in `_1`, and later ones take the lowest free number.
///
/// # Examples
/// ```
/// use relform_naming::next_foreign_key_name;
///
/// let taken = vec!["fk_a_b_x_1".to_string()];
/// assert_eq!(next_foreign_key_name("a", "b", &["x".into()], &taken), "fk_a_b_x_2");
/// assert_eq!(next_foreign_key_name("a", "c", &["x".into()], &taken), "fk_a_c_x_1");
/// ```
pub fn next_foreign_key_name<S: AsRef<str>>(
    source_table: &str,
    target_table: &str,
    columns: &[String],
    existing: &[S],
) -> String {
    let mut sequence = 1;
    loop {
        let candidate = build_foreign_key_name(source_table, target_table, columns, sequence);
        if !existing.iter().any(|name| name.as_ref() == candidate) {
            return candidate;
        }
        sequence += 1;
    }
}
