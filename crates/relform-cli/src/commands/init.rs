use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use relform_config::RelformConfig;
use relform_loader::CONFIG_FILE;

pub fn cmd_init() -> Result<()> {
    write_default_config(Path::new(CONFIG_FILE))?;
    println!("created {CONFIG_FILE}");
    Ok(())
}

/// Write the default config to `path`, refusing to overwrite an existing file.
fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    let json = serde_json::to_string_pretty(&RelformConfig::default())
        .context("serialize default config")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_a_loadable_default_config() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);

        write_default_config(&path).unwrap();
        let written = relform_loader::load_config_from_path(path).unwrap();
        assert_eq!(written, RelformConfig::default());
    }

    #[test]
    fn refuses_to_overwrite() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "{}").unwrap();

        let err = write_default_config(&path).unwrap_err();
        assert!(err.to_string().ends_with("relform.json already exists"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
