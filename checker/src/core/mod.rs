//! Deterministic, pure logic shared by the reader and the process harness.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod exit;
pub mod numeral;
pub mod position;
pub mod uniqueness;
