//! Judge configuration stored in `judge.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Judge configuration (TOML).
///
/// Every field is optional in the file; the defaults are the limits of the
/// bundled sample problems.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JudgeConfig {
    /// Echo validated traffic to stderr.
    pub mirror: bool,
    pub sum: SumLimits,
    pub points: PointsLimits,
    pub guess: GuessLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SumLimits {
    pub min: i32,
    pub max: i32,
}

impl Default for SumLimits {
    fn default() -> Self {
        Self { min: -100, max: 100 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PointsLimits {
    /// Upper bound on the number of points.
    pub max_n: i32,
    pub min_pos: i64,
    pub max_pos: i64,
}

impl Default for PointsLimits {
    fn default() -> Self {
        Self {
            max_n: 1_000_000,
            min_pos: -1_000_000_000_000,
            max_pos: 1_000_000_000_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GuessLimits {
    /// Upper bound on both the array length and the guess budget.
    pub max_n: i32,
    pub min_x: i32,
    pub max_x: i32,
}

impl Default for GuessLimits {
    fn default() -> Self {
        Self {
            max_n: 100_000,
            min_x: -1_000_000_000,
            max_x: 1_000_000_000,
        }
    }
}

impl JudgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sum.min > self.sum.max {
            return Err(anyhow!("sum.min must be <= sum.max"));
        }
        if self.points.max_n < 1 {
            return Err(anyhow!("points.max_n must be >= 1"));
        }
        if self.points.min_pos > self.points.max_pos {
            return Err(anyhow!("points.min_pos must be <= points.max_pos"));
        }
        if self.guess.max_n < 1 {
            return Err(anyhow!("guess.max_n must be >= 1"));
        }
        if self.guess.min_x > self.guess.max_x {
            return Err(anyhow!("guess.min_x must be <= guess.max_x"));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize config toml")
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `JudgeConfig::default()`.
pub fn load_config(path: &Path) -> Result<JudgeConfig> {
    if !path.exists() {
        let cfg = JudgeConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: JudgeConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, JudgeConfig::default());
        assert!(!cfg.mirror);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("judge.toml");
        fs::write(&path, "mirror = true\n\n[sum]\nmax = 5\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert!(cfg.mirror);
        assert_eq!(cfg.sum, SumLimits { min: -100, max: 5 });
        assert_eq!(cfg.guess, GuessLimits::default());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("judge.toml");
        fs::write(&path, "[points]\nmin_pos = 10\nmax_pos = -10\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(err.to_string().contains("points.min_pos"));
    }

    #[test]
    fn printed_config_parses_back() {
        let cfg = JudgeConfig::default();
        let text = cfg.to_toml().expect("toml");
        let parsed: JudgeConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, cfg);
    }
}
