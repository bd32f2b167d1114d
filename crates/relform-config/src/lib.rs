pub mod config;
pub mod direction;
pub mod file_format;

pub use config::{DiagramConfig, RelformConfig, default_schema_path};
pub use direction::Direction;
pub use file_format::FileFormat;
