//! Sample judges and solutions built on the `checker` library.
//!
//! Each judge prints a verdict line on stdout (`Correct.`, `Incorrect.` or
//! `Runtime error.`), explains failures on stderr and exits with the matching
//! code from [`checker::exit_codes`].

mod config;
mod generate;
mod guess;
mod points;
mod solve;
mod sum;
mod verdict;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use checker::{exit_codes, logging};
use clap::{Parser, Subcommand};

use crate::config::{JudgeConfig, load_config};
use crate::solve::Strategy;
use crate::verdict::{Judgment, write_report};

#[derive(Parser)]
#[command(name = "judge", version, about = "Strict-format judges for sample problems")]
struct Cli {
    /// Path to the judge configuration.
    #[arg(long, global = true, default_value = "judge.toml")]
    config: PathBuf,
    /// Echo validated traffic to stderr.
    #[arg(long, global = true)]
    mirror: bool,
    /// Log harness lifecycle events unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Write the verdict as JSON to this path.
    #[arg(long, global = true)]
    report: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read `a b` and print their sum.
    Sum {
        /// Abandon the input after the first line instead of requiring EOF.
        #[arg(long)]
        abort: bool,
    },
    /// Validate a list of points.
    Points {
        /// Also require the points to be pairwise distinct.
        #[arg(long)]
        distinct: bool,
    },
    /// Print random input for `points`.
    GenPoints {
        /// Number of points (defaults to the configured maximum).
        #[arg(long)]
        count: Option<i32>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Judge an interactive solution given as a command line.
    Guess {
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "SOLUTION"
        )]
        solution: Vec<String>,
    },
    /// Run a reference solution for `guess`.
    Solve {
        #[arg(value_enum)]
        strategy: Strategy,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() {
    let cli = Cli::parse();
    logging::init_with_default(if cli.verbose {
        logging::VERBOSE_FILTER
    } else {
        logging::DEFAULT_FILTER
    });
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let mut config = load_config(&cli.config).context("load config")?;
    config.mirror |= cli.mirror;

    let judgment = match cli.command {
        Command::Sum { abort } => sum::run(&config, abort)?,
        Command::Points { distinct } => points::run(&config, distinct)?,
        Command::Guess { solution } => guess::run(&config, &solution)?,
        Command::GenPoints { count, seed } => {
            generate::run(&config, count, seed)?;
            return Ok(exit_codes::CORRECT);
        }
        Command::Solve { strategy } => {
            solve::run(&config, strategy)?;
            return Ok(exit_codes::CORRECT);
        }
        Command::Config => {
            print_config(&config)?;
            return Ok(exit_codes::CORRECT);
        }
    };
    report(&judgment, cli.report.as_deref())
}

fn report(judgment: &Judgment, path: Option<&Path>) -> Result<i32> {
    if let Some(detail) = &judgment.detail {
        eprintln!("{detail}");
    }
    println!("{}", judgment.verdict);
    if let Some(path) = path {
        write_report(path, judgment)?;
    }
    Ok(judgment.verdict.exit_code())
}

fn print_config(config: &JudgeConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
