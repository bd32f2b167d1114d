use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use relform_loader::write_value;

use crate::utils::load_session;

pub fn cmd_apply(config: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let (config, session) = load_session(config)?;
    let output = output.unwrap_or_else(|| config.output().to_path_buf());

    let value = session.view().context("build document view")?;
    write_value(&output, &value, config.output_format())?;

    let working = session.working();
    println!(
        "{} {} ({} tables, {} changes)",
        "Wrote".bright_green(),
        output.display().to_string().bright_white(),
        working.tables.len().to_string().bright_yellow(),
        session.diff().len().to_string().bright_yellow()
    );
    Ok(())
}
