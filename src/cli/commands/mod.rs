//! CLI command implementations
//!
//! Every command returns a process exit code: 0 on success, 2 for
//! configuration errors, 5 for fatal errors.

pub mod init;
pub mod serve;
pub mod validate;

/// Successful run
pub const EXIT_OK: i32 = 0;
/// Configuration could not be loaded, validated, or written
pub const EXIT_CONFIG: i32 = 2;
/// Anything else that stops the command
pub const EXIT_FATAL: i32 = 5;
