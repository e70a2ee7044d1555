//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
pub mod audit_cmd;
pub mod backup;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod generate;
pub mod import_cmd;
pub mod init;
pub mod list;
pub mod passwd;
pub mod show;
