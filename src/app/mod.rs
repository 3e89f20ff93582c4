//! Application module
//!
//! Process-level concerns shared by every subcommand:
//! - Configuration handling
//! - Logging setup
//! - Runtime initialization
//! - Fatal error reporting

pub mod config;
pub mod error_handling;
pub mod logging;
pub mod runtime;

// Re-export main application functions
pub use config::AppConfig;
pub use error_handling::handle_fatal_error;
pub use logging::init_logging;
pub use runtime::{initialize_app, load_storage_settings, storage_settings_for};
