//! Ordered grid snapshots of a run.

use crate::accumulator::VisitAccumulator;
use crate::grid::Grid;
use ca_core::{Dimensions, Error, Result};
use serde::{Deserialize, Serialize};

/// Grids of one run, index 0 being the initial grid. Every grid shares the
/// initial grid's dimensions and there is always at least one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Grid>", into = "Vec<Grid>")]
pub struct Trajectory {
    grids: Vec<Grid>,
}

impl Trajectory {
    pub fn new(initial: Grid) -> Self {
        Self {
            grids: vec![initial],
        }
    }

    /// Build from grids assembled elsewhere, checking shape
    pub fn from_grids(grids: Vec<Grid>) -> Result<Self> {
        let mut iter = grids.into_iter();
        let first = iter.next().ok_or(Error::EmptyTrajectory)?;
        let mut trajectory = Self::new(first);
        for grid in iter {
            trajectory.push(grid)?;
        }
        Ok(trajectory)
    }

    /// Append the next grid
    pub fn push(&mut self, grid: Grid) -> Result<()> {
        self.dims().ensure_same(grid.dims())?;
        self.grids.push(grid);
        Ok(())
    }

    pub fn dims(&self) -> Dimensions {
        self.grids[0].dims()
    }

    /// Number of grids, i.e. steps + 1
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Number of steps taken
    pub fn steps(&self) -> usize {
        self.grids.len() - 1
    }

    pub fn initial(&self) -> &Grid {
        &self.grids[0]
    }

    pub fn last(&self) -> &Grid {
        &self.grids[self.grids.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<&Grid> {
        self.grids.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grid> + '_ {
        self.grids.iter()
    }

    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    pub fn into_grids(self) -> Vec<Grid> {
        self.grids
    }

    /// Alive-cell count of each grid
    pub fn active_counts(&self) -> Vec<usize> {
        self.grids.iter().map(Grid::active_count).collect()
    }

    /// Visitation counts over every grid
    pub fn accumulate(&self) -> VisitAccumulator {
        let mut accumulator = VisitAccumulator::new(self.dims());
        for grid in &self.grids {
            accumulator.add(grid);
        }
        accumulator
    }

    /// Serialize to a compact binary snapshot
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl TryFrom<Vec<Grid>> for Trajectory {
    type Error = Error;

    fn try_from(grids: Vec<Grid>) -> Result<Self> {
        Self::from_grids(grids)
    }
}

impl From<Trajectory> for Vec<Grid> {
    fn from(trajectory: Trajectory) -> Self {
        trajectory.grids
    }
}
