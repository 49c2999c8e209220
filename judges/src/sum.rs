//! `judge sum`: read two bounded integers and print their sum.

use std::io::Read;

use anyhow::Result;
use checker::{CheckError, StrictReader};

use crate::config::{JudgeConfig, SumLimits};
use crate::verdict::{Judgment, judge};

/// Validate `a b\n` and return `(a, b)`.
///
/// With `abort` the reader is abandoned instead of checking for EOF, so
/// trailing input is ignored.
pub fn check<R: Read>(
    mut input: StrictReader<R>,
    limits: &SumLimits,
    abort: bool,
) -> Result<(i32, i32), CheckError> {
    let a = input.read_int("a")?.range(limits.min, limits.max)?.space()?;
    let b = input.read_int("b")?.range(limits.min, limits.max)?.newline()?;
    if abort {
        input.abort();
    } else {
        input.confirm_eof()?;
    }
    Ok((a, b))
}

pub fn run(config: &JudgeConfig, abort: bool) -> Result<Judgment> {
    let mut input = StrictReader::stdin();
    if config.mirror {
        input.enable_mirror();
    }
    let result = check(input, &config.sum, abort).map(|(a, b)| {
        println!("({a}) + ({b}) = ({})", i64::from(a) + i64::from(b));
    });
    judge(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checker::test_support::reader as input;

    #[test]
    fn reads_bounded_pair() {
        let pair = check(input("-100 100\n"), &SumLimits::default(), false).expect("pair");
        assert_eq!(pair, (-100, 100));
    }

    #[test]
    fn trailing_input_fails_unless_aborted() {
        let limits = SumLimits::default();
        let err = check(input("1 2\n3\n"), &limits, false).expect_err("trailing");
        assert!(err.to_string().contains("not an EOF"));
        assert_eq!(check(input("1 2\n3\n"), &limits, true).expect("abort"), (1, 2));
    }

    #[test]
    fn out_of_range_is_incorrect() {
        let err = check(input("1 101\n"), &SumLimits::default(), false).expect_err("range");
        assert!(err.is_format());
        assert_eq!(
            err.to_string(),
            "<test>(1,6,b): b = 101 is out of range [-100, 100]"
        );
    }
}
