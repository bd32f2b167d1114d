//! Declarative editing of relform schema documents.
//!
//! * [`apply`] runs `del ...` statements (see [`Statement`]) against a document.
//! * [`add_foreign_keys`] injects foreign keys from `src|cols|-->|dst|cols` specs.
//! * [`strip_tags`] removes keys from a dynamic document view at any depth.
//! * [`SchemaSession`] keeps the untouched base next to the working copy.

pub mod apply;
pub mod diff;
pub mod error;
pub mod foreign_key;
pub mod pattern;
pub mod session;
pub mod statement;
pub mod tags;

pub use apply::{ApplyReport, apply, apply_script, apply_statement};
pub use diff::{SchemaChange, diff_documents};
pub use error::{ErrorKind, TransformError};
pub use foreign_key::{ForeignKeySpec, add_foreign_key, add_foreign_keys};
pub use pattern::GlobPattern;
pub use session::SchemaSession;
pub use statement::{Statement, TableSelector, Target, parse_script, parse_statements};
pub use tags::{strip_document_tags, strip_tags};
