//! Side-effecting building blocks: the strict reader over a byte source, the
//! diagnostic mirror and the interactive process harness.

pub mod mirror;
pub mod process;
pub mod reader;
