use std::fmt;

use relform_core::TableName;
use relform_index::IndexSpec;

use crate::error::TransformError;
use crate::pattern::GlobPattern;

/// What a deletion statement selects inside a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `pattern:<glob>`, matched against names.
    Pattern(GlobPattern),
    /// `index:<spec>`, resolved against the current collection length.
    Index(IndexSpec),
}

/// Table argument of `del column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelector {
    /// `*`: every table.
    All,
    Named(TableName),
}

impl TableSelector {
    pub fn selects(&self, tablename: &str) -> bool {
        match self {
            TableSelector::All => true,
            TableSelector::Named(name) => name == tablename,
        }
    }
}

/// One parsed transformation statement.
///
/// ```text
/// del table pattern:<glob>            del table index:<spec>
/// del column <table> pattern:<glob>   del column <table> index:<spec>
/// del column * pattern:<glob>         del column * index:<spec>
/// del fk pattern:<glob>               del fk index:<spec>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    DeleteTables(Target),
    DeleteColumns { table: TableSelector, target: Target },
    /// Index targets are local to each table's foreign key list.
    DeleteForeignKeys(Target),
}

impl Statement {
    pub fn parse(line: &str) -> Result<Self, TransformError> {
        let line = line.trim();
        let invalid = || TransformError::InvalidStatement(line.to_string());
        let rest = keyword(line, "del").ok_or_else(invalid)?;

        if let Some(rest) = keyword(rest, "table") {
            return Ok(Statement::DeleteTables(parse_target(line, rest)?));
        }
        if let Some(rest) = keyword(rest, "column") {
            let (table, rest) = rest.split_once(char::is_whitespace).ok_or_else(invalid)?;
            let table = match table {
                "*" => TableSelector::All,
                name => TableSelector::Named(name.to_string()),
            };
            return Ok(Statement::DeleteColumns {
                table,
                target: parse_target(line, rest.trim_start())?,
            });
        }
        if let Some(rest) = keyword(rest, "fk") {
            return Ok(Statement::DeleteForeignKeys(parse_target(line, rest)?));
        }
        Err(invalid())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::DeleteTables(target) => write!(f, "del table {target}"),
            Statement::DeleteColumns { table, target } => match table {
                TableSelector::All => write!(f, "del column * {target}"),
                TableSelector::Named(name) => write!(f, "del column {name} {target}"),
            },
            Statement::DeleteForeignKeys(target) => write!(f, "del fk {target}"),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Pattern(pattern) => write!(f, "pattern:{pattern}"),
            Target::Index(spec) => write!(f, "index:{spec}"),
        }
    }
}

/// Parse a list of statements, skipping blank entries and `#` comments.
///
/// Errors carry the 1-based position of the offending entry.
pub fn parse_statements<S: AsRef<str>>(
    statements: &[S],
) -> Result<Vec<Statement>, TransformError> {
    statements
        .iter()
        .enumerate()
        .filter(|(_, raw)| !is_skipped(raw.as_ref()))
        .map(|(i, raw)| Statement::parse(raw.as_ref()).map_err(|e| e.at_line(i + 1)))
        .collect()
}

/// Parse a whole script, one statement per line.
pub fn parse_script(script: &str) -> Result<Vec<Statement>, TransformError> {
    parse_statements(&script.lines().collect::<Vec<_>>())
}

pub(crate) fn is_skipped(entry: &str) -> bool {
    let entry = entry.trim();
    entry.is_empty() || entry.starts_with('#')
}

/// Strip `word` and the whitespace run after it; `None` unless at least one
/// whitespace character follows.
fn keyword<'a>(input: &'a str, word: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(word)?;
    let trimmed = rest.trim_start();
    (trimmed.len() < rest.len()).then_some(trimmed)
}

fn parse_target(line: &str, rest: &str) -> Result<Target, TransformError> {
    if let Some(pattern) = rest.strip_prefix("pattern:") {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(TransformError::InvalidStatement(line.to_string()));
        }
        return Ok(Target::Pattern(GlobPattern::new(pattern)));
    }
    if let Some(spec) = rest.strip_prefix("index:") {
        let spec = spec.trim();
        return IndexSpec::parse(spec)
            .map(Target::Index)
            .map_err(|reason| TransformError::InvalidIndexSpec {
                spec: spec.to_string(),
                reason,
            });
    }
    Err(TransformError::InvalidStatement(line.to_string()))
}
