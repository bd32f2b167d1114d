use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::file_format::FileFormat;

/// Default location of the input schema document.
pub fn default_schema_path() -> PathBuf {
    PathBuf::from("schema.yaml")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("out/schema.yaml")
}

/// Mermaid diagram settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct DiagramConfig {
    #[serde(default)]
    pub direction: Direction,
    /// Where `relform mermaid` writes the diagram. Printed to stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// Top-level relform configuration (`relform.json`).
///
/// The pipeline loads `schema`, applies every file in `transforms`, injects the keys
/// from `foreign_keys`, then hides the tags listed in `omit_tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct RelformConfig {
    #[serde(default = "default_schema_path")]
    pub schema: PathBuf,
    /// DSL files, applied in order.
    #[serde(default)]
    pub transforms: Vec<PathBuf>,
    /// Foreign key spec files, applied in order after the transforms.
    #[serde(default)]
    pub foreign_keys: Vec<PathBuf>,
    /// Omit-tag files.
    #[serde(default)]
    pub omit_tags: Vec<PathBuf>,
    #[serde(default = "default_output_path")]
    pub output: PathBuf,
    #[serde(default)]
    pub output_format: FileFormat,
    #[serde(default)]
    pub diagram: DiagramConfig,
}

impl Default for RelformConfig {
    fn default() -> Self {
        Self {
            schema: default_schema_path(),
            transforms: Vec::new(),
            foreign_keys: Vec::new(),
            omit_tags: Vec::new(),
            output: default_output_path(),
            output_format: FileFormat::default(),
            diagram: DiagramConfig::default(),
        }
    }
}

impl RelformConfig {
    pub fn schema(&self) -> &Path {
        &self.schema
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn output_format(&self) -> FileFormat {
        self.output_format
    }

    pub fn direction(&self) -> Direction {
        self.diagram.direction
    }

    /// Resolve every configured path against `root`; absolute paths are kept.
    pub fn rooted_at(&self, root: &Path) -> Self {
        let join = |p: &PathBuf| root.join(p);
        Self {
            schema: join(&self.schema),
            transforms: self.transforms.iter().map(join).collect(),
            foreign_keys: self.foreign_keys.iter().map(join).collect(),
            omit_tags: self.omit_tags.iter().map(join).collect(),
            output: join(&self.output),
            output_format: self.output_format,
            diagram: DiagramConfig {
                direction: self.diagram.direction,
                output: self.diagram.output.as_ref().map(join),
            },
        }
    }
}
