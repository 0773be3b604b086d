//! Threshold update rule with noise, and the trajectory driver.
//!
//! One step computes every cell's candidate state from the pre-step grid
//! (alive iff its eight wrapped neighbors sum to at least `threshold`), then,
//! when noise is enabled, draws one uniform value per cell in row-major order
//! and flips the candidate where the draw falls below `noise_probability`.

use crate::accumulator::VisitAccumulator;
use crate::grid::Grid;
use crate::trajectory::Trajectory;
use ca_core::{validate_probability, Cell, Error, Result, RunConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Validated update parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpdateRule {
    /// Any value is legal; above 8 nothing survives the threshold pass
    pub threshold: u32,
    pub noise_probability: f64,
}

impl UpdateRule {
    pub fn new(threshold: u32, noise_probability: f64) -> Result<Self> {
        validate_probability("noise_probability", noise_probability)?;
        Ok(Self {
            threshold,
            noise_probability,
        })
    }

    pub fn from_config(config: &RunConfig) -> Result<Self> {
        Self::new(config.threshold, config.noise_probability)
    }

    /// Whether a step consumes random draws
    #[inline]
    pub fn has_noise(&self) -> bool {
        self.noise_probability > 0.0
    }
}

/// Advance `grid` by one step, returning a new grid
pub fn step<R: Rng + ?Sized>(
    grid: &Grid,
    threshold: u32,
    noise_probability: f64,
    rng: &mut R,
) -> Result<Grid> {
    let rule = UpdateRule::new(threshold, noise_probability)?;
    Ok(step_with_rule(grid, &rule, rng))
}

pub fn step_with_rule<R: Rng + ?Sized>(grid: &Grid, rule: &UpdateRule, rng: &mut R) -> Grid {
    let mut next = grid.clone();
    advance_into(grid, &mut next, rule, rng);
    next
}

/// Allocation-free step: writes the successor of `src` into `dst`
pub fn step_into<R: Rng + ?Sized>(
    src: &Grid,
    dst: &mut Grid,
    rule: &UpdateRule,
    rng: &mut R,
) -> Result<()> {
    src.dims().ensure_same(dst.dims())?;
    advance_into(src, dst, rule, rng);
    Ok(())
}

/// Caller guarantees `src` and `dst` share dimensions
pub(crate) fn advance_into<R: Rng + ?Sized>(
    src: &Grid,
    dst: &mut Grid,
    rule: &UpdateRule,
    rng: &mut R,
) {
    apply_threshold(src, dst, rule.threshold);
    if rule.has_noise() {
        apply_noise(dst.cells_mut(), rule.noise_probability, rng);
    }
}

#[cfg(not(feature = "parallel"))]
fn apply_threshold(src: &Grid, dst: &mut Grid, threshold: u32) {
    let cols = src.cols();
    for (row, out) in dst.cells_mut().chunks_mut(cols).enumerate() {
        threshold_row(src, row, out, threshold);
    }
}

#[cfg(feature = "parallel")]
fn apply_threshold(src: &Grid, dst: &mut Grid, threshold: u32) {
    let cols = src.cols();
    dst.cells_mut()
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, out)| threshold_row(src, row, out, threshold));
}

/// Threshold pass for one output row, reading only the pre-step grid
fn threshold_row(src: &Grid, row: usize, out: &mut [Cell], threshold: u32) {
    let rows = src.rows();
    let cols = src.cols();
    let up = src.row((row + rows - 1) % rows);
    let mid = src.row(row);
    let down = src.row((row + 1) % rows);

    for (col, cell) in out.iter_mut().enumerate() {
        let left = (col + cols - 1) % cols;
        let right = (col + 1) % cols;
        let sum: u32 = [
            up[left], up[col], up[right],
            mid[left], mid[right],
            down[left], down[col], down[right],
        ]
        .iter()
        .map(|c| c.as_u8() as u32)
        .sum();
        *cell = Cell::from_bool(sum >= threshold);
    }
}

/// Exactly one draw per cell, row-major
fn apply_noise<R: Rng + ?Sized>(cells: &mut [Cell], noise_probability: f64, rng: &mut R) {
    let mut flipped = 0usize;
    for cell in cells.iter_mut() {
        if rng.gen::<f64>() < noise_probability {
            *cell = cell.flip();
            flipped += 1;
        }
    }
    trace!(flipped, "Noise applied");
}

/// Run `steps` steps from `initial`, sharing one random stream across the
/// whole run. The trajectory holds `steps + 1` grids, starting with a copy of
/// `initial`.
#[instrument(skip(initial, rng), fields(dims = %initial.dims()))]
pub fn run<R: Rng + ?Sized>(
    initial: &Grid,
    steps: u64,
    threshold: u32,
    noise_probability: f64,
    rng: &mut R,
) -> Result<Trajectory> {
    let rule = UpdateRule::new(threshold, noise_probability)?;
    let mut trajectory = Trajectory::new(initial.clone());

    for tick in 1..=steps {
        let next = step_with_rule(trajectory.last(), &rule, rng);
        debug!(tick, active = next.active_count(), "Step complete");
        trajectory.push(next)?;
    }

    Ok(trajectory)
}

/// Per-cell sum of states across `grids`
pub fn accumulate(grids: &[Grid]) -> Result<VisitAccumulator> {
    let first = grids.first().ok_or(Error::EmptyTrajectory)?;
    let mut accumulator = VisitAccumulator::new(first.dims());
    for grid in grids {
        accumulator.record(grid)?;
    }
    Ok(accumulator)
}
