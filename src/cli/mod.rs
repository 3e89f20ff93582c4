//! CLI command handlers
//!
//! - Argument parsing structures
//! - Command routing
//! - Output formatting

pub mod args;
pub mod output;
pub mod router;

// Re-export the main CLI structures for convenience
pub use args::{Cli, Commands};
pub use router::execute_command;
