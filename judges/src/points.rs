//! `judge points`: validate `N` followed by `N` coordinate pairs.

use std::io::Read;

use anyhow::Result;
use checker::{CheckError, StrictReader, check_unique};

use crate::config::{JudgeConfig, PointsLimits};
use crate::verdict::{Judgment, judge};

pub fn check<R: Read>(
    mut input: StrictReader<R>,
    limits: &PointsLimits,
    distinct: bool,
) -> Result<Vec<(i64, i64)>, CheckError> {
    let n = input.read_int("N")?.range(1, limits.max_n)?.newline()?;
    let mut points = Vec::with_capacity(n as usize);
    for i in 0..n {
        let x = input
            .read_long(&format!("xs[{i}]"))?
            .range(limits.min_pos, limits.max_pos)?
            .space()?;
        let y = input
            .read_long(&format!("ys[{i}]"))?
            .range(limits.min_pos, limits.max_pos)?
            .newline()?;
        points.push((x, y));
    }
    input.confirm_eof()?;
    if distinct {
        check_unique(&points, "points")?;
    }
    Ok(points)
}

pub fn run(config: &JudgeConfig, distinct: bool) -> Result<Judgment> {
    let mut input = StrictReader::stdin();
    if config.mirror {
        input.enable_mirror();
    }
    judge(check(input, &config.points, distinct).map(|_| ()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use checker::test_support::reader as input;

    #[test]
    fn accepts_well_formed_points() {
        let points = check(
            input("2\n1000000000000 -1000000000000\n0 5\n"),
            &PointsLimits::default(),
            true,
        )
        .expect("points");
        assert_eq!(points, vec![(1_000_000_000_000, -1_000_000_000_000), (0, 5)]);
    }

    #[test]
    fn coordinate_out_of_range_names_field() {
        let err = check(
            input("1\n1000000000001 0\n"),
            &PointsLimits::default(),
            false,
        )
        .expect_err("range");
        assert!(err.to_string().contains("xs[0] = 1000000000001 is out of range"));
    }

    #[test]
    fn missing_line_is_incorrect() {
        let err = check(input("2\n1 2\n"), &PointsLimits::default(), false).expect_err("short");
        assert!(err.to_string().contains("error reading long long xs[1]"));
    }

    #[test]
    fn duplicates_only_fail_when_distinct() {
        let text = "3\n1 2\n3 4\n1 2\n";
        let limits = PointsLimits::default();
        assert!(check(input(text), &limits, false).is_ok());
        let err = check(input(text), &limits, true).expect_err("duplicate");
        assert_eq!(
            err.to_string(),
            "points: duplicate values: points[0] and points[2] are equal"
        );
    }
}
