//! Run report and trajectory snapshot output.

use ca_core::{Dimensions, Result, RunnerConfig};
use ca_world::{SimulationResult, VisitAccumulator};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

const REPORT_VERSION: u32 = 1;
const REPORT_FILE: &str = "report.json";
const TRAJECTORY_FILE: &str = "trajectory.bin";

#[derive(Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub version: u32,
    pub run_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub config: RunnerConfig,
    pub dims: Dimensions,
    /// Number of grids in the trajectory (steps + 1)
    pub trajectory_len: u64,
    pub active_counts: Vec<usize>,
    pub visits: VisitAccumulator,
}

impl RunReport {
    pub fn new(config: &RunnerConfig, result: &SimulationResult) -> Self {
        Self {
            version: REPORT_VERSION,
            run_id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            config: config.clone(),
            dims: result.accumulator.dims(),
            trajectory_len: result.accumulator.recorded(),
            active_counts: result.active_counts.clone(),
            visits: result.accumulator.clone(),
        }
    }
}

/// Files written for one run
#[derive(Debug)]
pub struct Outputs {
    pub report: PathBuf,
    pub trajectory: Option<PathBuf>,
}

/// Write the JSON report and, when configured and recorded, the binary
/// trajectory snapshot
pub fn write_outputs(
    dir: &Path,
    report: &RunReport,
    result: &SimulationResult,
    write_trajectory: bool,
) -> Result<Outputs> {
    fs::create_dir_all(dir)?;

    let report_path = dir.join(REPORT_FILE);
    fs::write(&report_path, serde_json::to_vec_pretty(report)?)?;
    info!(run_id = %report.run_id, "Report written to {:?}", report_path);

    let trajectory_path = match (&result.trajectory, write_trajectory) {
        (Some(trajectory), true) => {
            let path = dir.join(TRAJECTORY_FILE);
            fs::write(&path, trajectory.to_bytes()?)?;
            info!(grids = trajectory.len(), "Trajectory snapshot written to {:?}", path);
            Some(path)
        }
        _ => None,
    };

    Ok(Outputs {
        report: report_path,
        trajectory: trajectory_path,
    })
}
