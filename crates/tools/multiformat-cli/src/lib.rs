//! Library half of the `mf` tool: subcommand arguments and their handlers.

pub mod commands;

mod error;
pub use error::{CliError, Result};
