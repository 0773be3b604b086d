//! Configuration types for the automaton.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Run configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Minimum live-neighbor count for a cell to become alive
    pub threshold: u32,
    /// Per-cell flip probability applied after the threshold rule (0.0 to 1.0)
    pub noise_probability: f64,
    /// Number of steps to run; the trajectory holds `steps + 1` grids
    pub steps: u64,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            threshold: 3,
            noise_probability: 0.02,
            steps: 40,
            seed: 2,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        validate_probability("noise_probability", self.noise_probability)
    }
}

/// Random initial grid: each cell alive with probability `density`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSeed {
    pub rows: usize,
    pub cols: usize,
    /// Fraction of cells expected alive (0.0 to 1.0)
    pub density: f64,
}

impl Default for RandomSeed {
    fn default() -> Self {
        Self {
            rows: 60,
            cols: 60,
            density: 0.18,
        }
    }
}

impl RandomSeed {
    pub fn validate(&self) -> Result<()> {
        validate_probability("density", self.density)
    }
}

/// Source of the initial grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedConfig {
    Random(RandomSeed),
    /// Text pattern file (`#`/`1` alive, `.`/`0` dead)
    Pattern { path: PathBuf },
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig::Random(RandomSeed::default())
    }
}

/// Runner output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for the report and snapshot
    pub dir: PathBuf,
    /// Also write the full trajectory as a binary snapshot
    pub write_trajectory: bool,
    /// Keep every grid in memory; when false only the accumulator is kept
    pub record_trajectory: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./output"),
            write_trajectory: true,
            record_trajectory: true,
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub run: RunConfig,
    pub seed: SeedConfig,
    pub output: OutputConfig,
}

impl RunnerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RunnerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.run.validate()?;
        if let SeedConfig::Random(seed) = &self.seed {
            seed.validate()?;
        }
        if self.output.write_trajectory && !self.output.record_trajectory {
            return Err(Error::InvalidParameter(
                "write_trajectory requires record_trajectory".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reject NaN and values outside [0, 1]
pub fn validate_probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidParameter(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}
