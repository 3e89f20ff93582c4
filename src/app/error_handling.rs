//! Error handling utilities
//!
//! This module provides centralized error handling for the application.

use tracing::error;

/// Exit code for failures that carry no [`JobError`](crate::error::JobError)
pub const GENERAL_ERROR: i32 = 1;

/// Handle fatal errors and exit with appropriate status code
///
/// # Verbose Mode Behavior
/// - `verbose = 0`: User-friendly messages only
/// - `verbose >= 1`: Includes full developer context with error chain
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);
    eprintln!("{}", render_error(&error, verbose));
    std::process::exit(exit_code_for(&error))
}

/// Exit status the process should end with for `error`
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    use crate::error::JobError;

    error
        .downcast_ref::<JobError>()
        .map(JobError::exit_code)
        .unwrap_or(GENERAL_ERROR)
}

/// Text printed to stderr for `error`
pub fn render_error(error: &anyhow::Error, verbose: u8) -> String {
    use crate::error::{describe_error_code, JobError};

    if let Some(job_err) = error.downcast_ref::<JobError>() {
        let mut text = job_err.user_message();
        if verbose >= 1 {
            text.push_str(&format!(
                "\n\nE{:04}: {}",
                job_err.code(),
                describe_error_code(job_err.code())
            ));
            text.push_str("\n\nContext Chain:\n");
            text.push_str(&job_err.developer_message());
        }
        return text;
    }

    let mut text = format!("Error: {error}");
    if verbose >= 1 {
        text.push_str("\n\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            text.push_str(&format!("\n  {}: {}", i, cause));
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobError;
    use anyhow::anyhow;

    #[test]
    fn test_job_error_exit_codes() {
        let err = anyhow::Error::new(JobError::invalid_argument("bad"));
        assert_eq!(exit_code_for(&err), 2);

        let err = anyhow::Error::new(JobError::write("memory://x", "denied"));
        assert_eq!(exit_code_for(&err), 4);

        let err = anyhow::Error::new(JobError::DivisionByZero);
        assert_eq!(exit_code_for(&err), 5);
    }

    #[test]
    fn test_other_errors_use_general_code() {
        assert_eq!(exit_code_for(&anyhow!("something else")), GENERAL_ERROR);
    }

    #[test]
    fn test_verbose_rendering_adds_chain() {
        let err = anyhow::Error::new(
            JobError::write("memory://x", "failed to write data object")
                .with_source(std::io::Error::other("disk full")),
        );

        let quiet = render_error(&err, 0);
        assert!(quiet.starts_with("Could not write results to memory://x"));
        assert!(!quiet.contains("disk full"));

        let verbose = render_error(&err, 1);
        assert!(verbose.contains("E3001: Failed to write to the storage destination"));
        assert!(verbose.contains("Context Chain"));
        assert!(verbose.contains("caused by: disk full"));
    }

    #[test]
    fn test_plain_error_chain() {
        let err = anyhow!("root").context("outer");
        let text = render_error(&err, 1);
        assert!(text.starts_with("Error: outer"));
        assert!(text.contains("1: root"));
    }
}
