//! Line-oriented shell over the record lists.

pub mod commands;
pub mod core;
pub mod output;
pub mod registry;
pub mod render;
pub mod shell;

pub use self::core::{CliError, CliMode, CommandError, Screen, ShellContext};
pub use shell::run_cli;
