use std::path::PathBuf;

use anyhow::{Result, bail};
use colored::Colorize;

use crate::utils::load_session;

pub fn cmd_check(config: Option<PathBuf>) -> Result<()> {
    let (_, session) = load_session(config)?;
    let issues = session.working().check();

    if issues.is_empty() {
        println!("{}", "No issues found.".bright_green());
        return Ok(());
    }

    let mut errors = 0;
    for issue in &issues {
        if issue.is_error() {
            errors += 1;
            println!("{} {}", "error:".bright_red().bold(), issue);
        } else {
            println!("{} {}", "warning:".yellow().bold(), issue);
        }
    }

    if errors > 0 {
        bail!("{errors} structural error(s) found");
    }
    Ok(())
}
