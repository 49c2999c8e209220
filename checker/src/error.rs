//! Error types shared by the reader and the process harness.

use std::io;

use thiserror::Error;

/// Coarse classification used by judges to turn an error into a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The validated stream does not match the expected grammar or ranges.
    Format,
    /// The child process exited with a nonzero code or abnormally.
    Process,
    /// The judge's own environment failed (I/O, spawning, waiting).
    Environment,
}

/// Recoverable failures of a validation session.
///
/// Misuse of the API (double termination, dropping an open reader, reading
/// after termination) is not represented here; it panics through
/// [`logic_violation`].
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{location}: {message}")]
    Format { location: String, message: String },

    #[error("{program} exited with code {code}")]
    NonZeroExit { program: String, code: i32 },

    #[error("{program} terminated abnormally: {detail}")]
    AbnormalExit { program: String, detail: String },

    #[error("error reading {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("error writing to {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("error opening {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl CheckError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CheckError::Format { .. } => ErrorCategory::Format,
            CheckError::NonZeroExit { .. } | CheckError::AbnormalExit { .. } => {
                ErrorCategory::Process
            }
            CheckError::Read { .. }
            | CheckError::Write { .. }
            | CheckError::Open { .. }
            | CheckError::Spawn { .. }
            | CheckError::Wait { .. } => ErrorCategory::Environment,
        }
    }

    pub fn is_format(&self) -> bool {
        self.category() == ErrorCategory::Format
    }

    pub fn is_process(&self) -> bool {
        self.category() == ErrorCategory::Process
    }
}

/// Abort the judge because its own logic misused the API.
///
/// These are defects in the judge, not in the data, so they are never
/// turned into a verdict.
#[track_caller]
pub fn logic_violation(message: &str) -> ! {
    panic!("logic violation: {message}")
}
