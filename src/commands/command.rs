//! Command trait definition for CLI commands.
//!
//! Subcommands implement [`Command`] and are dispatched through `enum_dispatch`.

use anyhow::Result;
use enum_dispatch::enum_dispatch;

/// Trait implemented by all umidedup CLI commands.
///
/// `command_line` holds the full invocation and is logged by commands that report it.
#[enum_dispatch]
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self, command_line: &str) -> Result<()>;
}
