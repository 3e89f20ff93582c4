/// Error code registry for pi-sampler
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 3000-3999: Storage and sink errors
/// - 4000-4999: Execution errors
/// - 7000-7999: Validation errors
/// - 9000-9999: Other errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;
    pub const CONFIG_UNSUPPORTED_SCHEME: u16 = 1010;

    // Storage errors (3000-3999)
    pub const STORAGE_WRITE_FAILED: u16 = 3001;
    pub const STORAGE_READ_FAILED: u16 = 3004;
    pub const STORAGE_SERIALIZATION_ERROR: u16 = 3011;

    // Execution errors (4000-4999)
    pub const EXEC_GENERATION_FAILED: u16 = 4001;
    pub const EXEC_TIMEOUT: u16 = 4002;
    pub const EXEC_WORKER_PANICKED: u16 = 4007;
    pub const EXEC_DIVISION_BY_ZERO: u16 = 4011;

    // Validation errors (7000-7999)
    pub const VALIDATION_INVALID_ARGUMENT: u16 = 7008;

    // Other errors (9000-9999)
    pub const OTHER_GENERIC: u16 = 9000;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1005 => "Invalid value in configuration",
        1010 => "Output destination uses an unsupported scheme",

        3001 => "Failed to write to the storage destination",
        3004 => "Failed to read from the storage destination",
        3011 => "Failed to encode or decode the result record",

        4001 => "Random sample generation failed",
        4002 => "Worker task exceeded its timeout",
        4007 => "Worker task panicked",
        4011 => "Aggregation over zero samples",

        7008 => "Invalid job argument",

        9000 => "Unexpected error",
        _ => "Unknown error code",
    }
}
