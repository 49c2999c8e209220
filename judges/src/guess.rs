//! `judge guess`: interactive judge for "find the zero in a sorted array".
//!
//! The judge sends `N K`, then answers each guessed index `i` with `xs[i]`.
//! The solution wins by guessing an index holding zero within `K` guesses.

use std::io::Read;

use anyhow::{Context, Result};
use checker::{CheckError, InteractiveProcess, ProcessBuilder, StrictReader};
use tracing::{debug, info};

use crate::config::{GuessLimits, JudgeConfig};
use crate::verdict::{Judgment, judge};

/// One test case: the guess budget and the hidden array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub k: i32,
    pub xs: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found { guesses: i32 },
    OutOfGuesses { budget: i32 },
}

/// Read the judge's own test data: `N K\n`, then `N` non-decreasing values
/// on one line.
pub fn read_instance<R: Read>(
    mut input: StrictReader<R>,
    limits: &GuessLimits,
) -> Result<Instance, CheckError> {
    let n = input.read_int("N")?.range(1, limits.max_n)?.space()?;
    let k = input.read_int("K")?.range(1, limits.max_n)?.newline()?;
    let count = n as usize;
    let mut xs = Vec::with_capacity(count);
    let mut last = limits.min_x;
    for i in 0..count {
        let x = input
            .read_int(&format!("xs[{i}]"))?
            .range(last, limits.max_x)?
            .positional(i, count)?;
        xs.push(x);
        last = x;
    }
    input.confirm_eof()?;
    Ok(Instance { k, xs })
}

/// Run the guessing protocol until the solution finds a zero or spends its
/// budget. On success the solution's output must end right after.
pub fn play(process: &mut InteractiveProcess, instance: &Instance) -> Result<Outcome, CheckError> {
    let n = instance.xs.len();
    writeln!(process, "{} {}", n, instance.k)?;
    process.flush()?;
    for count in 0..instance.k {
        let guess = process
            .read_int(&format!("guess[{count}]"))?
            .range(0, n as i32 - 1)?
            .newline()?;
        let value = instance.xs[guess as usize];
        writeln!(process, "{value}")?;
        process.flush()?;
        if value == 0 {
            process.close_write_side()?;
            process.confirm_eof()?;
            return Ok(Outcome::Found {
                guesses: count + 1,
            });
        }
    }
    Ok(Outcome::OutOfGuesses {
        budget: instance.k,
    })
}

/// Combine the protocol result with the way the solution exited.
pub fn decide(
    played: Result<Outcome, CheckError>,
    exited: Result<(), CheckError>,
) -> Result<Judgment> {
    match played {
        Ok(Outcome::Found { guesses }) => {
            debug!(guesses, "solution found a zero");
            judge(exited)
        }
        Ok(Outcome::OutOfGuesses { budget }) => Ok(Judgment::incorrect(format!(
            "no zero was found within {budget} guesses"
        ))),
        Err(err) if err.is_format() => Ok(Judgment::incorrect(err.to_string())),
        // A broken pipe is explained by the solution's exit, if it crashed.
        Err(err) => match exited {
            Err(exit) if exit.is_process() => judge(Err(exit)),
            _ => Err(anyhow::Error::new(err).context("interactive session failed")),
        },
    }
}

pub fn run(config: &JudgeConfig, solution: &[String]) -> Result<Judgment> {
    let mut input = StrictReader::stdin();
    if config.mirror {
        input.enable_mirror();
    }
    let instance = read_instance(input, &config.guess).context("invalid judge input")?;
    debug!(n = instance.xs.len(), k = instance.k, "judge input loaded");

    let mut process = ProcessBuilder::new()
        .args(solution)
        .spawn()
        .context("start solution")?;
    if config.mirror {
        process.enable_mirror();
    }
    let played = play(&mut process, &instance);
    process.abort_reading();
    let exited = process.terminate();
    info!(played = ?played.as_ref().ok(), "session finished");
    decide(played, exited)
}
