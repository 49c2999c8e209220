//! Strict input validation and interactive process plumbing for judge programs.
//!
//! A judge either validates a data stream against a whitespace-delimited
//! integer grammar, or drives a child process over two pipes while applying
//! the same validation to whatever the child prints. The crate keeps the
//! same separation as its sibling tools:
//!
//! - **[`core`]**: Pure, deterministic logic (numeric thresholds, positions,
//!   duplicate detection, exit classification). No I/O.
//! - **[`io`]**: The strict reader, the diagnostic mirror and the interactive
//!   process harness.
//!
//! Errors fall into three categories. Format and process violations are
//! values of [`error::CheckError`] and are meant to become a verdict. Logic
//! violations (misuse of the API by the judge itself) panic.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::numeral::Numeral;
pub use crate::core::uniqueness::check_unique;
pub use crate::error::{CheckError, ErrorCategory};
pub use crate::io::process::{InteractiveProcess, ProcessBuilder};
pub use crate::io::reader::{Delimited, Delimiter, StrictReader};
