pub type TableName = String;
pub type ColumnName = String;
pub type ForeignKeyName = String;
