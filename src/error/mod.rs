// Error types for the audio tracker service
//
// Server startup failures carry stable numeric codes; ingest decode failures
// are never fatal and travel alongside the recovered record instead.

mod decode;
mod server;

pub use decode::{DecodeError, Decoded, FieldMismatch};
pub use server::{log_server_error, ServerError, ServerErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types so they can be logged and reported uniformly.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
