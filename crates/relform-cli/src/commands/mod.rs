pub mod apply;
pub mod check;
pub mod diff;
pub mod init;
pub mod mermaid;
pub mod show;
pub mod tables;

pub use apply::cmd_apply;
pub use check::cmd_check;
pub use diff::cmd_diff;
pub use init::cmd_init;
pub use mermaid::cmd_mermaid;
pub use show::cmd_show;
pub use tables::cmd_tables;
