//! Stable exit codes for judge programs.

/// The submission or data was accepted.
pub const CORRECT: i32 = 0;
/// The judge itself could not run (bad test data, spawn failure, I/O error).
pub const ERROR: i32 = 1;
/// The validated stream violated the expected format or answer.
pub const INCORRECT: i32 = 2;
/// The child process exited with a nonzero code or was killed.
pub const RUNTIME_ERROR: i32 = 3;
