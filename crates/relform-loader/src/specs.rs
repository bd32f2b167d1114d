use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_yaml::Value;

/// The three kinds of line-oriented spec files.
///
/// A `.yaml`, `.yml` or `.json` spec file holds a mapping with a list under
/// [`key`](SpecKind::key); any other file is read as plain text, one entry per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecKind {
    Transformations,
    ForeignKeys,
    OmitTags,
}

impl SpecKind {
    pub fn key(self) -> &'static str {
        match self {
            SpecKind::Transformations => "transformation_steps",
            SpecKind::ForeignKeys => "foreign_keys",
            SpecKind::OmitTags => "omit_tags",
        }
    }
}

/// Read the raw entries of a spec file. Blank and `#` entries are kept; the consumers
/// skip them so reported positions match the file.
pub fn load_spec_entries(path: &Path, kind: SpecKind) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read spec file: {}", path.display()))?;

    let ext = path.extension().and_then(|s| s.to_str());
    let root: Value = match ext {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("parse JSON spec file: {}", path.display()))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("parse YAML spec file: {}", path.display()))?,
        _ => return Ok(content.lines().map(str::to_string).collect()),
    };

    let key = kind.key();
    let Some(list) = root.get(key) else {
        bail!(
            "{} must contain '{key}' key with a list of entries",
            path.display()
        );
    };
    let Value::Sequence(items) = list else {
        bail!("'{key}' in {} must be a list", path.display());
    };

    let mut entries = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(entry) => entries.push(entry.clone()),
            // keep positions aligned with the list
            Value::Null => entries.push(String::new()),
            other => bail!(
                "'{key}' entry {} in {} must be a string, found: {}",
                i + 1,
                path.display(),
                serde_yaml::to_string(other)?.trim_end()
            ),
        }
    }
    Ok(entries)
}

pub fn load_statements(path: &Path) -> Result<Vec<String>> {
    load_spec_entries(path, SpecKind::Transformations)
}

pub fn load_foreign_key_specs(path: &Path) -> Result<Vec<String>> {
    load_spec_entries(path, SpecKind::ForeignKeys)
}

pub fn load_omit_tags(path: &Path) -> Result<Vec<String>> {
    load_spec_entries(path, SpecKind::OmitTags)
}
