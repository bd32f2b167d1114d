use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use relform_transform::SchemaChange;

use crate::utils::load_session;

pub fn cmd_diff(config: Option<PathBuf>) -> Result<()> {
    let (_, session) = load_session(config)?;
    let changes = session.diff();

    if changes.is_empty() {
        println!(
            "{} {}",
            "No differences found.".bright_green(),
            "Working document matches the base.".bright_white()
        );
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Found".bright_cyan(),
        changes.len().to_string().bright_yellow().bold(),
        "change(s):".bright_cyan()
    );
    println!();
    for (i, change) in changes.iter().enumerate() {
        println!(
            "{}. {}",
            (i + 1).to_string().bright_magenta().bold(),
            format_change(change)
        );
    }
    Ok(())
}

fn format_change(change: &SchemaChange) -> String {
    let verb = if change.is_removal() {
        "Removed".bright_red()
    } else {
        "Added".bright_green()
    };
    match change {
        SchemaChange::TableRemoved(table) | SchemaChange::TableAdded(table) => {
            format!("{verb} {} {}", "table:".bright_white(), table.bright_cyan().bold())
        }
        SchemaChange::ColumnRemoved { table, column }
        | SchemaChange::ColumnAdded { table, column } => format!(
            "{verb} {} {}.{}",
            "column:".bright_white(),
            table.bright_cyan(),
            column.bright_white()
        ),
        SchemaChange::ForeignKeyRemoved { table, fkname }
        | SchemaChange::ForeignKeyAdded { table, fkname } => format!(
            "{verb} {} {}.{}",
            "foreign key:".bright_white(),
            table.bright_cyan(),
            fkname.bright_white()
        ),
    }
}
