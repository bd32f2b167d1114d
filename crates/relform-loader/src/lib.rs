pub mod config;
pub mod document;
pub mod pipeline;
pub mod specs;

pub use config::{CONFIG_FILE, load_config, load_config_from_path, load_config_or_default};
pub use document::{load_document, parse_document, render_value, write_value};
pub use pipeline::load_session;
pub use specs::{SpecKind, load_foreign_key_specs, load_omit_tags, load_spec_entries, load_statements};
