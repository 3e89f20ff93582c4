use std::time::Duration;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// Result type for job operations
pub type JobResult<T> = Result<T, JobError>;

/// Errors that abort an estimation job
///
/// Every variant is fatal: nothing in the pipeline retries or emits a
/// partial result once one of these has been produced.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("[E{code:04}] Invalid argument: {message}", code = ErrorCode::VALIDATION_INVALID_ARGUMENT)]
    InvalidArgument { message: String },

    #[error("[E{code:04}] Sample generation failed for partition {partition}: {message}", code = ErrorCode::EXEC_GENERATION_FAILED)]
    Generation {
        partition: usize,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Cannot estimate from zero samples", code = ErrorCode::EXEC_DIVISION_BY_ZERO)]
    DivisionByZero,

    #[error("[E{code:04}] Failed to write results to {destination}: {message}", code = ErrorCode::STORAGE_WRITE_FAILED)]
    Write {
        destination: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Failed to read results from {destination}: {message}", code = ErrorCode::STORAGE_READ_FAILED)]
    Read {
        destination: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Partition {partition} did not finish within {timeout:?}", code = ErrorCode::EXEC_TIMEOUT)]
    Timeout { partition: usize, timeout: Duration },

    #[error("[E{code:04}] Worker task panicked: {message}", code = ErrorCode::EXEC_WORKER_PANICKED)]
    WorkerPanicked { message: String },

    #[error("[E{code:04}] Configuration error: {message}")]
    Configuration { code: u16, message: String },
}

impl JobError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a generation error for a partition
    pub fn generation(partition: usize, message: impl Into<String>) -> Self {
        Self::Generation {
            partition,
            message: message.into(),
            source: None,
        }
    }

    /// Create a write error for a destination
    pub fn write(destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write {
            destination: destination.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a read error for a destination
    pub fn read(destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            destination: destination.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with the generic code
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::configuration_with_code(ErrorCode::CONFIG_GENERIC, message)
    }

    /// Create a configuration error with a specific code
    pub fn configuration_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Configuration {
            code,
            message: message.into(),
        }
    }

    /// Attach an underlying cause to errors that carry one
    pub fn with_source(
        mut self,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Generation { source, .. }
            | Self::Write { source, .. }
            | Self::Read { source, .. } => {
                *source = Some(cause.into());
            }
            _ => {}
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidArgument { .. } => ErrorCode::VALIDATION_INVALID_ARGUMENT,
            Self::Generation { .. } => ErrorCode::EXEC_GENERATION_FAILED,
            Self::DivisionByZero => ErrorCode::EXEC_DIVISION_BY_ZERO,
            Self::Write { .. } => ErrorCode::STORAGE_WRITE_FAILED,
            Self::Read { .. } => ErrorCode::STORAGE_READ_FAILED,
            Self::Timeout { .. } => ErrorCode::EXEC_TIMEOUT,
            Self::WorkerPanicked { .. } => ErrorCode::EXEC_WORKER_PANICKED,
            Self::Configuration { code, .. } => *code,
        }
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } | Self::InvalidArgument { .. } => 2,
            Self::Write { .. } | Self::Read { .. } => 4,
            Self::Generation { .. }
            | Self::DivisionByZero
            | Self::Timeout { .. }
            | Self::WorkerPanicked { .. } => 5,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArgument { message } => format!("Invalid job parameters: {}", message),
            Self::Generation { partition, .. } => format!(
                "Could not generate random samples for partition {}",
                partition
            ),
            Self::DivisionByZero => "The job produced no samples to estimate from".to_string(),
            Self::Write {
                destination,
                message,
                ..
            } => format!("Could not write results to {}: {}", destination, message),
            Self::Read {
                destination,
                message,
                ..
            } => format!("Could not read results from {}: {}", destination, message),
            Self::Timeout { partition, timeout } => format!(
                "Partition {} took longer than {}",
                partition,
                humantime_serde::re::humantime::format_duration(*timeout)
            ),
            Self::WorkerPanicked { .. } => "A worker crashed while sampling".to_string(),
            Self::Configuration { message, .. } => format!("Configuration problem: {}", message),
        }
    }

    /// Get a detailed developer message including the cause chain
    pub fn developer_message(&self) -> String {
        let mut message = self.to_string();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            message.push_str(&format!("\n  caused by: {}", cause));
            current = cause.source();
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = JobError::invalid_argument("partitions must be positive");
        assert_eq!(
            err.to_string(),
            "[E7008] Invalid argument: partitions must be positive"
        );
        assert_eq!(err.code(), ErrorCode::VALIDATION_INVALID_ARGUMENT);
    }

    #[test]
    fn test_exit_codes_are_non_zero() {
        let errors = vec![
            JobError::invalid_argument("x"),
            JobError::generation(0, "x"),
            JobError::DivisionByZero,
            JobError::write("memory://out", "x"),
            JobError::read("memory://out", "x"),
            JobError::Timeout {
                partition: 1,
                timeout: Duration::from_secs(1),
            },
            JobError::WorkerPanicked {
                message: "x".to_string(),
            },
            JobError::configuration("x"),
        ];

        for err in errors {
            assert_ne!(err.exit_code(), 0, "{err}");
        }
    }

    #[test]
    fn test_developer_message_includes_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = JobError::write("file:///readonly", "put failed").with_source(io);

        let message = err.developer_message();
        assert!(message.contains("put failed"));
        assert!(message.contains("caused by: denied"));
    }

    #[test]
    fn test_with_source_ignored_for_sourceless_variants() {
        let io = std::io::Error::other("boom");
        let err = JobError::DivisionByZero.with_source(io);
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_timeout_user_message_is_human_readable() {
        let err = JobError::Timeout {
            partition: 3,
            timeout: Duration::from_millis(1500),
        };
        assert_eq!(err.user_message(), "Partition 3 took longer than 1s 500ms");
    }
}
