use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use relform_index::IndexSpec;

use crate::utils::load_session;

pub fn cmd_tables(config: Option<PathBuf>, select: Option<String>) -> Result<()> {
    let (_, session) = load_session(config)?;
    let tables = &session.working().tables;

    let positions: Vec<usize> = match select.as_deref() {
        Some(spec) => IndexSpec::parse(spec)
            .with_context(|| format!("invalid --select spec: {spec}"))?
            .positions(tables.len()),
        None => (0..tables.len()).collect(),
    };

    for i in positions {
        let table = &tables[i];
        println!(
            "{:>3}  {} {}",
            i.to_string().bright_magenta(),
            table.tablename.bright_cyan().bold(),
            format!(
                "({} columns, {} foreign keys)",
                table.columns.len(),
                table.foreign_key_defs().len()
            )
            .bright_black()
        );
    }
    Ok(())
}
