use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use relform_config::{Direction, FileFormat};

mod commands;
mod utils;
use commands::{cmd_apply, cmd_check, cmd_diff, cmd_init, cmd_mermaid, cmd_show, cmd_tables};

/// relform command-line interface.
#[derive(Parser, Debug)]
#[command(name = "relform", author, version, about)]
struct Cli {
    /// Path to relform.json (defaults to ./relform.json, or built-in defaults when absent).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
    /// Log debug output (otherwise RELFORM_LOG or `warn`).
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize relform.json with defaults.
    Init,
    /// Print the transformed document (or the untouched base).
    Show {
        #[arg(long)]
        base: bool,
        #[arg(short = 'f', long = "format", value_enum)]
        format: Option<FileFormat>,
    },
    /// Run the pipeline and write the result.
    Apply {
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// List what the pipeline removed or added.
    Diff,
    /// List the tables of the transformed document.
    Tables {
        /// Index spec such as `[0,2:5]` or `-3:`.
        #[arg(short = 's', long = "select", allow_hyphen_values = true)]
        select: Option<String>,
    },
    /// Render the transformed document as a Mermaid ER diagram.
    Mermaid {
        #[arg(short = 'd', long = "direction", value_enum)]
        direction: Option<Direction>,
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// Report structural problems of the transformed document.
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    let config = cli.config;
    match command {
        Commands::Init => cmd_init(),
        Commands::Show { base, format } => cmd_show(config, base, format),
        Commands::Apply { output } => cmd_apply(config, output),
        Commands::Diff => cmd_diff(config),
        Commands::Tables { select } => cmd_tables(config, select),
        Commands::Mermaid { direction, output } => cmd_mermaid(config, direction, output),
        Commands::Check => cmd_check(config),
    }
}
