pub mod check;
pub mod document;
pub mod schema;

pub use check::DocumentIssue;
pub use document::SchemaDocument;
pub use schema::{ColumnDef, ColumnName, ForeignKeyDef, ForeignKeyName, TableDef, TableName};
