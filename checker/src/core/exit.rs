//! Classification of a reaped child's exit status.

use std::fmt;
use std::process::ExitStatus;

/// How a child process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitClass {
    /// Normal exit with code 0.
    Success,
    /// Normal exit with a nonzero code.
    NonZeroExit(i32),
    /// Killed or stopped by a signal, or otherwise not a normal exit.
    Abnormal(String),
}

impl fmt::Display for ExitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitClass::Success => write!(f, "success"),
            ExitClass::NonZeroExit(code) => write!(f, "exit code {code}"),
            ExitClass::Abnormal(detail) => write!(f, "abnormal termination ({detail})"),
        }
    }
}

pub fn classify_exit(status: &ExitStatus) -> ExitClass {
    match status.code() {
        Some(0) => ExitClass::Success,
        Some(code) => ExitClass::NonZeroExit(code),
        None => ExitClass::Abnormal(abnormal_detail(status)),
    }
}

#[cfg(unix)]
fn abnormal_detail(status: &ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;

    if let Some(signal) = status.signal() {
        let core = if status.core_dumped() {
            ", core dumped"
        } else {
            ""
        };
        format!("killed by signal {signal}{core}")
    } else if let Some(signal) = status.stopped_signal() {
        format!("stopped by signal {signal}")
    } else {
        status.to_string()
    }
}

#[cfg(not(unix))]
fn abnormal_detail(status: &ExitStatus) -> String {
    status.to_string()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn zero_is_success() {
        assert_eq!(classify_exit(&ExitStatus::from_raw(0)), ExitClass::Success);
    }

    #[test]
    fn nonzero_code_is_reported() {
        // wait(2) encodes the exit code in the second byte.
        let status = ExitStatus::from_raw(3 << 8);
        assert_eq!(classify_exit(&status), ExitClass::NonZeroExit(3));
    }

    #[test]
    fn signal_is_abnormal() {
        let status = ExitStatus::from_raw(9);
        assert_eq!(
            classify_exit(&status),
            ExitClass::Abnormal("killed by signal 9".to_string())
        );
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(ExitClass::NonZeroExit(1).to_string(), "exit code 1");
        assert_eq!(ExitClass::Success.to_string(), "success");
    }
}
