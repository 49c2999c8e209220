//! `judge gen-points`: deterministic test data for `judge points`.

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{JudgeConfig, PointsLimits};

pub fn generate<W: Write>(out: &mut W, limits: &PointsLimits, count: i32, seed: u64) -> io::Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    writeln!(out, "{count}")?;
    for _ in 0..count {
        let x = rng.gen_range(limits.min_pos..=limits.max_pos);
        let y = rng.gen_range(limits.min_pos..=limits.max_pos);
        writeln!(out, "{x} {y}")?;
    }
    Ok(())
}

pub fn run(config: &JudgeConfig, count: Option<i32>, seed: u64) -> Result<()> {
    let limits = &config.points;
    let count = count.unwrap_or(limits.max_n);
    if !(1..=limits.max_n).contains(&count) {
        bail!("count must be in 1..={}", limits.max_n);
    }
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    generate(&mut out, limits, count, seed).context("write points")?;
    out.flush().context("flush points")?;
    Ok(())
}
