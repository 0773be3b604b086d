//! Simulation driver owning a seeded generator.

use crate::accumulator::VisitAccumulator;
use crate::engine::{self, UpdateRule};
use crate::grid::Grid;
use crate::trajectory::Trajectory;
use ca_core::{Result, RunConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Progress is logged at info level every this many ticks
const LOG_INTERVAL: u64 = 10;

/// Double-buffered run over one grid: each tick writes into the scratch
/// buffer and swaps it with the current grid.
pub struct Simulation {
    current: Grid,
    scratch: Grid,
    rule: UpdateRule,
    config: RunConfig,
    rng: ChaCha8Rng,
    tick: u64,
}

impl Simulation {
    pub fn new(config: RunConfig, initial: Grid) -> Result<Self> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, initial, rng)
    }

    /// Use an already-advanced generator instead of seeding from the config
    pub fn with_rng(config: RunConfig, initial: Grid, rng: ChaCha8Rng) -> Result<Self> {
        let rule = UpdateRule::from_config(&config)?;

        Ok(Self {
            scratch: initial.clone(),
            current: initial,
            rule,
            config,
            rng,
            tick: 0,
        })
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn rule(&self) -> &UpdateRule {
        &self.rule
    }

    pub fn rng(&self) -> &ChaCha8Rng {
        &self.rng
    }

    /// Advance by exactly one step
    pub fn advance(&mut self) {
        engine::advance_into(&self.current, &mut self.scratch, &self.rule, &mut self.rng);
        std::mem::swap(&mut self.current, &mut self.scratch);
        self.tick += 1;

        debug!(
            tick = self.tick,
            active = self.current.active_count(),
            "Step complete"
        );
        if self.tick % LOG_INTERVAL == 0 {
            info!(
                "Tick {}: {} of {} cells active",
                self.tick,
                self.current.active_count(),
                self.current.dims().area()
            );
        }
    }

    /// Run the configured number of steps, keeping every grid
    #[instrument(skip(self), fields(steps = self.config.steps, dims = %self.current.dims()))]
    pub fn run(&mut self) -> Result<SimulationResult> {
        info!("Starting simulation for {} steps", self.config.steps);

        let mut trajectory = Trajectory::new(self.current.clone());
        for _ in 0..self.config.steps {
            self.advance();
            trajectory.push(self.current.clone())?;
        }

        let accumulator = trajectory.accumulate();
        let result = SimulationResult {
            active_counts: trajectory.active_counts(),
            final_grid: self.current.clone(),
            trajectory: Some(trajectory),
            accumulator,
            total_ticks: self.tick,
        };
        result.emit_summary();

        Ok(result)
    }

    /// Run the configured number of steps, accumulating visits without
    /// keeping the grids
    #[instrument(skip(self), fields(steps = self.config.steps, dims = %self.current.dims()))]
    pub fn run_streaming(&mut self) -> Result<SimulationResult> {
        info!("Starting streaming simulation for {} steps", self.config.steps);

        let mut accumulator = VisitAccumulator::new(self.current.dims());
        let mut active_counts = Vec::new();
        accumulator.record(&self.current)?;
        active_counts.push(self.current.active_count());

        for _ in 0..self.config.steps {
            self.advance();
            accumulator.record(&self.current)?;
            active_counts.push(self.current.active_count());
        }

        let result = SimulationResult {
            trajectory: None,
            accumulator,
            active_counts,
            final_grid: self.current.clone(),
            total_ticks: self.tick,
        };
        result.emit_summary();

        Ok(result)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Present only for recorded runs
    pub trajectory: Option<Trajectory>,
    pub accumulator: VisitAccumulator,
    /// Alive-cell count per recorded grid, initial grid first
    pub active_counts: Vec<usize>,
    pub final_grid: Grid,
    pub total_ticks: u64,
}

impl SimulationResult {
    fn emit_summary(&self) {
        let peak = self.active_counts.iter().copied().max().unwrap_or(0);
        info!(
            event = "run_summary",
            total_ticks = self.total_ticks,
            grids = self.accumulator.recorded(),
            dims = %self.final_grid.dims(),
            initial_active = self.active_counts.first().copied().unwrap_or(0),
            final_active = self.final_grid.active_count(),
            peak_active = peak,
            max_visits = self.accumulator.max(),
            total_visits = self.accumulator.total(),
            "Run complete"
        );
    }
}
