use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use relform_config::FileFormat;
use relform_core::SchemaDocument;
use serde_yaml::Value;

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("json")
}

/// Read a schema document. `.json` files are parsed as JSON, everything else as YAML.
pub fn load_document(path: &Path) -> Result<SchemaDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read schema document: {}", path.display()))?;
    let format = if is_json(path) {
        FileFormat::Json
    } else {
        FileFormat::Yaml
    };
    parse_document(&content, format)
        .with_context(|| format!("parse schema document: {}", path.display()))
}

pub fn parse_document(content: &str, format: FileFormat) -> Result<SchemaDocument> {
    let doc = if format.is_json() {
        serde_json::from_str(content)?
    } else {
        serde_yaml::from_str(content)?
    };
    Ok(doc)
}

/// Serialize a dynamic document view as text.
pub fn render_value(value: &Value, format: FileFormat) -> Result<String> {
    let text = if format.is_json() {
        let mut text = serde_json::to_string_pretty(value).context("serialize JSON")?;
        text.push('\n');
        text
    } else {
        serde_yaml::to_string(value).context("serialize YAML")?
    };
    Ok(text)
}

/// Write a document view to `path`, creating parent directories.
pub fn write_value(path: &Path, value: &Value, format: FileFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory: {}", parent.display()))?;
    }
    let text = render_value(value, format)?;
    fs::write(path, text).with_context(|| format!("write document: {}", path.display()))?;
    Ok(())
}
