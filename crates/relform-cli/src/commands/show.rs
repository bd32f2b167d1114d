use std::path::PathBuf;

use anyhow::{Context, Result};
use relform_config::FileFormat;
use relform_loader::render_value;

use crate::utils::load_session;

pub fn cmd_show(config: Option<PathBuf>, base: bool, format: Option<FileFormat>) -> Result<()> {
    let (config, session) = load_session(config)?;
    let value = if base {
        session.base_view()
    } else {
        session.view()
    }
    .context("build document view")?;

    let format = format.unwrap_or(config.output_format());
    print!("{}", render_value(&value, format)?);
    Ok(())
}
