use anyhow::{Context, Result};
use relform_config::RelformConfig;
use relform_transform::SchemaSession;
use tracing::info;

use crate::document::load_document;
use crate::specs::{load_foreign_key_specs, load_omit_tags, load_statements};

/// Load the configured schema and run the pipeline: transforms, then foreign key
/// injection, then tag omission. Each spec file is applied atomically.
pub fn load_session(config: &RelformConfig) -> Result<SchemaSession> {
    let base = load_document(config.schema())?;
    let mut session = SchemaSession::new(base);

    for path in &config.transforms {
        let statements = load_statements(path)?;
        session
            .apply_atomic(&statements)
            .with_context(|| format!("apply transformations: {}", path.display()))?;
        info!("{:<12} - {}", "TRANSFORMS", path.display());
    }
    for path in &config.foreign_keys {
        let specs = load_foreign_key_specs(path)?;
        session
            .add_foreign_keys_atomic(&specs)
            .with_context(|| format!("add foreign keys: {}", path.display()))?;
        info!("{:<12} - {}", "FOREIGN_KEYS", path.display());
    }
    for path in &config.omit_tags {
        session.omit_tags(&load_omit_tags(path)?);
    }

    Ok(session)
}
