use std::path::PathBuf;

use anyhow::Result;
use relform_config::RelformConfig;
use relform_loader::{load_config_from_path, load_config_or_default};
use relform_transform::SchemaSession;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RELFORM_LOG";

pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// Load the project config. An explicit path must exist and its relative paths are
/// resolved against its directory; otherwise ./relform.json or the defaults are used.
pub fn load_config(path: Option<PathBuf>) -> Result<RelformConfig> {
    match path {
        Some(path) => {
            let root = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            Ok(load_config_from_path(path)?.rooted_at(&root))
        }
        None => load_config_or_default(None),
    }
}

/// Load the config and run the whole pipeline.
pub fn load_session(path: Option<PathBuf>) -> Result<(RelformConfig, SchemaSession)> {
    let config = load_config(path)?;
    debug!("{:<12} - {}", "SCHEMA", config.schema().display());
    let session = relform_loader::load_session(&config)?;
    Ok((config, session))
}
