//! Verdicts and the single boundary where library errors become one.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use checker::exit_codes;
use checker::{CheckError, ErrorCategory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    RuntimeError,
}

impl Verdict {
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Correct => exit_codes::CORRECT,
            Verdict::Incorrect => exit_codes::INCORRECT,
            Verdict::RuntimeError => exit_codes::RUNTIME_ERROR,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "Correct."),
            Verdict::Incorrect => write!(f, "Incorrect."),
            Verdict::RuntimeError => write!(f, "Runtime error."),
        }
    }
}

/// A verdict and, for failures, the message explaining it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    pub verdict: Verdict,
    pub detail: Option<String>,
}

impl Judgment {
    pub fn correct() -> Self {
        Self {
            verdict: Verdict::Correct,
            detail: None,
        }
    }

    pub fn incorrect(detail: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Incorrect,
            detail: Some(detail.into()),
        }
    }
}

/// Turn a session result into a judgment.
///
/// Format violations are the submission's fault, process failures mean it
/// crashed; anything else is the judge's own problem and stays an error.
pub fn judge(result: Result<(), CheckError>) -> Result<Judgment> {
    let Err(err) = result else {
        return Ok(Judgment::correct());
    };
    let verdict = match err.category() {
        ErrorCategory::Format => Verdict::Incorrect,
        ErrorCategory::Process => Verdict::RuntimeError,
        ErrorCategory::Environment => return Err(err.into()),
    };
    Ok(Judgment {
        verdict,
        detail: Some(err.to_string()),
    })
}

pub fn write_report(path: &Path, judgment: &Judgment) -> Result<()> {
    let contents = serde_json::to_string_pretty(judgment).context("serialize judgment")?;
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_error() -> CheckError {
        CheckError::Format {
            location: "<stdin>(1,1,N)".to_string(),
            message: "error reading int N: not an integer input".to_string(),
        }
    }

    #[test]
    fn success_is_correct() {
        assert_eq!(judge(Ok(())).expect("judge"), Judgment::correct());
    }

    #[test]
    fn format_error_is_incorrect_with_detail() {
        let judgment = judge(Err(format_error())).expect("judge");
        assert_eq!(judgment.verdict, Verdict::Incorrect);
        assert_eq!(
            judgment.detail.as_deref(),
            Some("<stdin>(1,1,N): error reading int N: not an integer input")
        );
    }

    #[test]
    fn process_error_is_runtime_error() {
        let err = CheckError::NonZeroExit {
            program: "sol".to_string(),
            code: 1,
        };
        let judgment = judge(Err(err)).expect("judge");
        assert_eq!(judgment.verdict, Verdict::RuntimeError);
        assert_eq!(judgment.verdict.exit_code(), exit_codes::RUNTIME_ERROR);
    }

    #[test]
    fn environment_error_propagates() {
        let err = CheckError::Spawn {
            program: "sol".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(judge(Err(err)).is_err());
    }

    #[test]
    fn report_is_snake_case_json() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("report.json");
        write_report(&path, &Judgment::incorrect("bad")).expect("write");
        let text = fs::read_to_string(&path).expect("read");
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["verdict"], "incorrect");
        assert_eq!(value["detail"], "bad");
    }
}
