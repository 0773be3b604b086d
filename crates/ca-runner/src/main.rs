//! Command-line runner for the threshold automaton.
//!
//! Usage: `ca-runner [config.json]`. The config path may also come from
//! `CA_CONFIG`; without one the built-in defaults are used.

mod report;
mod telemetry;

use anyhow::{Context, Result};
use ca_core::{RunnerConfig, SeedConfig};
use ca_world::{Grid, Simulation};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    telemetry::init_telemetry(telemetry::LogFormat::from_env())?;

    let config = load_config()?;
    info!(
        threshold = config.run.threshold,
        noise_probability = config.run.noise_probability,
        steps = config.run.steps,
        seed = config.run.seed,
        "Starting CA-Sim runner"
    );

    // The seed grid and the run share one stream
    let mut rng = ChaCha8Rng::seed_from_u64(config.run.seed);
    let initial = initial_grid(&config.seed, &mut rng)?;
    info!(
        dims = %initial.dims(),
        active = initial.active_count(),
        "Initial grid ready"
    );

    let mut simulation = Simulation::with_rng(config.run.clone(), initial, rng)?;
    let result = if config.output.record_trajectory {
        simulation.run()?
    } else {
        simulation.run_streaming()?
    };
    info!("Generated {} CA steps", result.accumulator.recorded());

    let report = report::RunReport::new(&config, &result);
    let outputs = report::write_outputs(
        &config.output.dir,
        &report,
        &result,
        config.output.write_trajectory,
    )?;
    info!(
        report = ?outputs.report,
        trajectory = ?outputs.trajectory,
        "CA visit-count shape: {}",
        result.accumulator.dims()
    );

    Ok(())
}

fn load_config() -> Result<RunnerConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CA_CONFIG").ok())
        .map(PathBuf::from);

    match path {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {:?}", path))?;
            let config = RunnerConfig::from_json(&json)
                .with_context(|| format!("parsing config {:?}", path))?;
            info!("Loaded configuration from {:?}", path);
            Ok(config)
        }
        None => {
            info!("No configuration given, using defaults");
            Ok(RunnerConfig::default())
        }
    }
}

fn initial_grid(seed: &SeedConfig, rng: &mut ChaCha8Rng) -> Result<Grid> {
    match seed {
        SeedConfig::Random(random) => Ok(Grid::from_config(random, rng)?),
        SeedConfig::Pattern { path } => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading pattern {:?}", path))?;
            text.parse::<Grid>()
                .with_context(|| format!("parsing pattern {:?}", path))
        }
    }
}
