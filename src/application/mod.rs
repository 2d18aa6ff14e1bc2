//! Application layer - session state and CLI commands

pub mod commands;
pub mod session;

pub use commands::{Cli, Commands, CommandExecutor};
pub use session::SwapSession;
