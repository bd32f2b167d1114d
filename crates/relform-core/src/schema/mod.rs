pub mod column;
pub mod foreign_key;
pub mod names;
pub mod table;

pub use column::ColumnDef;
pub use foreign_key::ForeignKeyDef;
pub use names::{ColumnName, ForeignKeyName, TableName};
pub use table::TableDef;
