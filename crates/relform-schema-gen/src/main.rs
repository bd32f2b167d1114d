use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use relform_config::RelformConfig;
use relform_core::SchemaDocument;
use schemars::{Schema, schema_for};

#[derive(Debug, Parser)]
#[command(
    name = "relform-schema-gen",
    about = "Emit JSON Schemas for relform schema documents and configuration."
)]
struct Args {
    /// Output directory for schema files.
    #[arg(short = 'o', long = "out", default_value = "schemas")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    run(args.out)
}

fn run(out: PathBuf) -> Result<()> {
    if !out.exists() {
        fs::create_dir_all(&out).with_context(|| format!("create dir {}", out.display()))?;
    }

    let document_path = out.join("document.schema.json");
    let config_path = out.join("config.schema.json");
    write_schema(&document_path, &schema_for!(SchemaDocument))?;
    write_schema(&config_path, &schema_for!(RelformConfig))?;

    println!("Wrote schemas:");
    println!("  {}", document_path.display());
    println!("  {}", config_path.display());
    Ok(())
}

fn write_schema(path: &Path, schema: &Schema) -> Result<()> {
    let json = serde_json::to_string_pretty(schema)
        .with_context(|| format!("serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}
