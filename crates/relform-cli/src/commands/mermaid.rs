use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use relform_config::Direction;
use relform_exporter::{DiagramExporter, MermaidExporter};

use crate::utils::load_session;

pub fn cmd_mermaid(
    config: Option<PathBuf>,
    direction: Option<Direction>,
    output: Option<PathBuf>,
) -> Result<()> {
    let (config, session) = load_session(config)?;
    let diagram = MermaidExporter::new(direction.unwrap_or(config.direction()))
        .omitting(session.omitted_tags())
        .render(session.working());

    match output.or_else(|| config.diagram.output.clone()) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create directory: {}", parent.display()))?;
            }
            fs::write(&path, format!("{diagram}\n"))
                .with_context(|| format!("write diagram: {}", path.display()))?;
            println!(
                "{} {}",
                "Wrote".bright_green(),
                path.display().to_string().bright_white()
            );
        }
        None => println!("{diagram}"),
    }
    Ok(())
}
