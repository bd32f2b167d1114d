use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use relform_config::RelformConfig;

pub const CONFIG_FILE: &str = "relform.json";

/// Load relform.json from the current directory.
pub fn load_config() -> Result<RelformConfig> {
    let path = PathBuf::from(CONFIG_FILE);
    if !path.exists() {
        anyhow::bail!("relform.json not found. Run 'relform init' first.");
    }
    read_config(&path)
}

/// Load config from a specific path.
pub fn load_config_from_path(path: PathBuf) -> Result<RelformConfig> {
    if !path.exists() {
        anyhow::bail!("relform.json not found at: {}", path.display());
    }
    read_config(&path)
}

/// Load config from project root, with fallback to defaults.
pub fn load_config_or_default(project_root: Option<PathBuf>) -> Result<RelformConfig> {
    let config_path = match project_root {
        Some(root) => root.join(CONFIG_FILE),
        None => PathBuf::from(CONFIG_FILE),
    };

    if config_path.exists() {
        load_config_from_path(config_path)
    } else {
        Ok(RelformConfig::default())
    }
}

fn read_config(path: &Path) -> Result<RelformConfig> {
    let content = fs::read_to_string(path).context("read relform.json")?;
    serde_json::from_str(&content).context("parse relform.json")
}
