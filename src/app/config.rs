//! Application configuration
//!
//! Process-wide settings that are independent of any single job.

/// Application configuration structure
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
}

impl AppConfig {
    /// Create a new application configuration
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }

    /// Get the log filter directive based on verbosity
    ///
    /// SDK crates stay at `warn` until `-vvv`, where their request traces
    /// become useful.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info,aws_config=warn,aws_smithy_runtime=warn",
            1 => "debug,aws_config=warn,aws_smithy_runtime=warn,hyper=info",
            2 => "trace,aws_config=info,aws_smithy_runtime=info,hyper=info",
            _ => "trace,hyper=debug",
        }
    }
}
