//! Per-cell visitation counts.

use crate::grid::Grid;
use ca_core::{Dimensions, Error, Position, Result};
use serde::{Deserialize, Serialize};

/// For each cell, how many recorded grids had it alive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccumulatorData")]
pub struct VisitAccumulator {
    dims: Dimensions,
    counts: Vec<u64>,
    recorded: u64,
}

/// Unchecked wire form of an accumulator
#[derive(Deserialize)]
struct AccumulatorData {
    dims: Dimensions,
    counts: Vec<u64>,
    recorded: u64,
}

impl TryFrom<AccumulatorData> for VisitAccumulator {
    type Error = Error;

    fn try_from(data: AccumulatorData) -> Result<Self> {
        let dims = Dimensions::new(data.dims.rows, data.dims.cols)?;
        if data.counts.len() != dims.area() {
            return Err(Error::InvalidDimension(format!(
                "{} counts do not fill a {} grid",
                data.counts.len(),
                dims
            )));
        }
        if let Some(&count) = data.counts.iter().find(|&&c| c > data.recorded) {
            return Err(Error::InvalidParameter(format!(
                "visit count {} exceeds {} recorded grids",
                count, data.recorded
            )));
        }
        Ok(Self {
            dims,
            counts: data.counts,
            recorded: data.recorded,
        })
    }
}

impl VisitAccumulator {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            counts: vec![0; dims.area()],
            recorded: 0,
        }
    }

    /// Add one grid's states
    pub fn record(&mut self, grid: &Grid) -> Result<()> {
        self.dims.ensure_same(grid.dims())?;
        self.add(grid);
        Ok(())
    }

    pub(crate) fn add(&mut self, grid: &Grid) {
        for (count, cell) in self.counts.iter_mut().zip(grid.cells()) {
            *count += cell.as_u8() as u64;
        }
        self.recorded += 1;
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Number of grids recorded; upper bound of every count
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    pub fn get(&self, pos: Position) -> u64 {
        self.counts[self.dims.index(pos.wrap(self.dims))]
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn max(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.counts
            .chunks(self.dims.cols)
            .map(<[u64]>::to_vec)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca_core::Cell;

    #[test]
    fn test_record_and_query() {
        let dims = Dimensions::new(2, 3).unwrap();
        let mut accumulator = VisitAccumulator::new(dims);

        let mut grid = Grid::new(2, 3).unwrap();
        grid.set(Position::new(1, 2), Cell::Alive);
        accumulator.record(&grid).unwrap();
        accumulator.record(&grid).unwrap();
        grid.set(Position::new(0, 0), Cell::Alive);
        accumulator.record(&grid).unwrap();

        assert_eq!(accumulator.get(Position::new(1, 2)), 3);
        assert_eq!(accumulator.get(Position::new(0, 0)), 1);
        assert_eq!(accumulator.get(Position::new(0, 1)), 0);
        assert_eq!(accumulator.max(), 3);
        assert_eq!(accumulator.total(), 4);
        assert_eq!(accumulator.recorded(), 3);
    }

    #[test]
    fn test_record_rejects_other_shape() {
        let mut accumulator = VisitAccumulator::new(Dimensions::new(2, 2).unwrap());
        let grid = Grid::new(2, 3).unwrap();
        assert!(matches!(
            accumulator.record(&grid),
            Err(Error::DimensionMismatch { .. })
        ));
        assert_eq!(accumulator.recorded(), 0);
    }

    #[test]
    fn test_deserialize_validates_shape() {
        let zero = r#"{"dims":{"rows":0,"cols":0},"counts":[],"recorded":0}"#;
        assert!(serde_json::from_str::<VisitAccumulator>(zero).is_err());

        let short = r#"{"dims":{"rows":2,"cols":2},"counts":[1],"recorded":1}"#;
        assert!(serde_json::from_str::<VisitAccumulator>(short).is_err());

        let over = r#"{"dims":{"rows":1,"cols":2},"counts":[3,0],"recorded":2}"#;
        assert!(serde_json::from_str::<VisitAccumulator>(over).is_err());

        let ok = r#"{"dims":{"rows":1,"cols":2},"counts":[2,0],"recorded":2}"#;
        let accumulator: VisitAccumulator = serde_json::from_str(ok).unwrap();
        assert_eq!(accumulator.get(Position::new(0, 0)), 2);
        assert_eq!(accumulator.to_rows(), vec![vec![2, 0]]);

        let mut original = VisitAccumulator::new(Dimensions::new(2, 2).unwrap());
        original.record(&Grid::from_rows(&[[1u8, 0], [0, 1]]).unwrap()).unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(serde_json::from_str::<VisitAccumulator>(&json).unwrap(), original);
    }
}
