//! `judge solve`: reference solutions for `judge guess`.
//!
//! Guesses go to stdout, answers come back on stdin. Every guess is flushed
//! before the answer is read.

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use checker::{CheckError, StrictReader};
use clap::ValueEnum;
use tracing::debug;

use crate::config::{GuessLimits, JudgeConfig};

const STDOUT_NAME: &str = "<stdout>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Try indices 0, 1, 2, ... in order.
    Linear,
    /// Bisect on the sign of the answer.
    Binary,
}

fn ask<W: Write>(out: &mut W, index: i32) -> Result<(), CheckError> {
    writeln!(out, "{index}")
        .and_then(|()| out.flush())
        .map_err(|source| CheckError::Write {
            name: STDOUT_NAME.to_string(),
            source,
        })
}

fn read_header<R: Read>(
    input: &mut StrictReader<R>,
    limits: &GuessLimits,
) -> Result<i32, CheckError> {
    let n = input.read_int("N")?.range(1, limits.max_n)?.space()?;
    input.read_int("K")?.range(1, limits.max_n)?.newline()?;
    Ok(n)
}

/// Scan from the left. Returns the number of guesses made.
pub fn linear<R: Read, W: Write>(
    mut input: StrictReader<R>,
    out: &mut W,
    limits: &GuessLimits,
) -> Result<i32, CheckError> {
    read_header(&mut input, limits)?;
    let mut index = 0;
    loop {
        ask(out, index)?;
        let result = input
            .read_int(&format!("result[{index}]"))?
            .range(limits.min_x, limits.max_x)?
            .newline()?;
        if result == 0 {
            break;
        }
        index += 1;
    }
    input.confirm_eof()?;
    Ok(index + 1)
}

/// Bisect the open interval `(lo, hi)`. Returns the number of guesses made.
///
/// Reading is aborted at the end rather than confirmed.
pub fn binary<R: Read, W: Write>(
    mut input: StrictReader<R>,
    out: &mut W,
    limits: &GuessLimits,
) -> Result<i32, CheckError> {
    let n = read_header(&mut input, limits)?;
    let (mut lo, mut hi) = (-1, n);
    let mut guesses = 0;
    loop {
        let mid = (lo + hi) / 2;
        ask(out, mid)?;
        let result = input
            .read_int(&format!("result[{guesses}]=x[{mid}]"))?
            .range(limits.min_x, limits.max_x)?
            .newline()?;
        guesses += 1;
        if result == 0 {
            break;
        }
        if result < 0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    input.abort();
    Ok(guesses)
}

pub fn run(config: &JudgeConfig, strategy: Strategy) -> Result<()> {
    let input = StrictReader::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let guesses = match strategy {
        Strategy::Linear => linear(input, &mut out, &config.guess),
        Strategy::Binary => binary(input, &mut out, &config.guess),
    }
    .context("solution failed")?;
    debug!(guesses, ?strategy, "zero found");
    Ok(())
}
