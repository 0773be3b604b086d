//! 2D binary grid for the automaton.

use ca_core::{Cell, Dimensions, Direction, Error, Position, RandomSeed, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 2D toroidal grid of binary cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<Cell>,
}

/// Unchecked wire form of a grid
#[derive(Deserialize)]
struct GridData {
    dims: Dimensions,
    cells: Vec<Cell>,
}

impl TryFrom<GridData> for Grid {
    type Error = Error;

    fn try_from(data: GridData) -> Result<Self> {
        Grid::from_cells(data.dims.rows, data.dims.cols, data.cells)
    }
}

impl Grid {
    /// All-dead grid
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let dims = Dimensions::new(rows, cols)?;
        Ok(Self {
            dims,
            cells: vec![Cell::Dead; dims.area()],
        })
    }

    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self> {
        let dims = Dimensions::new(rows, cols)?;
        if cells.len() != dims.area() {
            return Err(Error::InvalidDimension(format!(
                "{} cells do not fill a {} grid",
                cells.len(),
                dims
            )));
        }
        Ok(Self { dims, cells })
    }

    /// Build from rows of 0/1 values
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * cols);

        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::InvalidDimension(format!(
                    "row {} has {} columns, expected {}",
                    row_idx,
                    row.len(),
                    cols
                )));
            }
            for &value in row {
                cells.push(Cell::from_u8(value)?);
            }
        }

        Self::from_cells(rows.len(), cols, cells)
    }

    /// Create a random grid: each cell is alive when a uniform draw falls
    /// below `density`, drawn in row-major order
    pub fn from_config<R: Rng + ?Sized>(config: &RandomSeed, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let mut grid = Self::new(config.rows, config.cols)?;

        for cell in grid.cells.iter_mut() {
            *cell = Cell::from_bool(rng.gen::<f64>() < config.density);
        }

        Ok(grid)
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Get cell at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.dims.index(pos.wrap(self.dims))]
    }

    /// Set cell at position (with toroidal wrapping)
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let index = self.dims.index(pos.wrap(self.dims));
        self.cells[index] = cell;
    }

    /// Sum of the eight wrapped neighbors, excluding the cell itself
    pub fn neighbor_sum(&self, pos: Position) -> u32 {
        Direction::all()
            .iter()
            .map(|dir| {
                let (dr, dc) = dir.to_delta();
                self.get(pos.offset(dr, dc, self.dims)).as_u8() as u32
            })
            .sum()
    }

    /// Number of alive cells
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.dims.cols;
        &self.cells[start..start + self.dims.cols]
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.dims.position(i), *cell))
    }

    /// Rows of 0/1 values
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.dims.cols)
            .map(|row| row.iter().map(|c| c.as_u8()).collect())
            .collect()
    }
}

/// Renders one line per row, `#` alive and `.` dead
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.dims.cols) {
            for cell in row {
                let glyph = if cell.is_alive() { '#' } else { '.' };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the pattern format: `#`/`1` alive, `.`/`0` dead. Blank lines and
/// lines starting with `!` are skipped.
impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut rows = Vec::new();

        for (line_no, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('!') {
                continue;
            }

            let row = line
                .chars()
                .map(|ch| match ch {
                    '#' | '1' => Ok(1u8),
                    '.' | '0' => Ok(0u8),
                    other => Err(Error::InvalidCell(format!(
                        "unexpected '{}' on line {}",
                        other,
                        line_no + 1
                    ))),
                })
                .collect::<Result<Vec<u8>>>()?;
            rows.push(row);
        }

        Self::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 12).unwrap();
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 12);
        assert_eq!(grid.cells.len(), 120);
        assert_eq!(grid.active_count(), 0);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(Grid::new(0, 3), Err(Error::InvalidDimension(_))));
        assert!(matches!(Grid::new(3, 0), Err(Error::InvalidDimension(_))));
        let empty: Vec<Vec<u8>> = Vec::new();
        assert!(Grid::from_rows(&empty).is_err());
    }

    #[test]
    fn test_from_rows_validation() {
        assert!(matches!(
            Grid::from_rows(&[vec![0u8, 1], vec![1]]),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            Grid::from_rows(&[vec![0u8, 2]]),
            Err(Error::InvalidCell(_))
        ));
        assert!(Grid::from_cells(2, 2, vec![Cell::Dead; 3]).is_err());
    }

    #[test]
    fn test_toroidal_wrapping() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set(Position::new(9, 9), Cell::Alive);

        assert_eq!(grid.get(Position::new(9, 9)), Cell::Alive);
        // Should wrap to (0, 0)
        assert_eq!(grid.get(Position::new(10, 10)), Cell::Dead);
        assert_eq!(grid.get(Position::new(19, 19)), Cell::Alive);
    }

    #[test]
    fn test_corner_neighbors_wrap() {
        let grid = Grid::from_rows(&[[1u8, 0, 0], [0, 0, 0], [0, 0, 0]]).unwrap();

        // Opposite corner only touches (0, 0) through wraparound
        assert_eq!(grid.neighbor_sum(Position::new(2, 2)), 1);
        // Own state is excluded
        assert_eq!(grid.neighbor_sum(Position::new(0, 0)), 0);
    }

    #[test]
    fn test_neighbor_sum_interior() {
        let grid = Grid::from_rows(&[
            [1u8, 1, 1, 0],
            [1, 1, 1, 0],
            [1, 1, 1, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();
        assert_eq!(grid.neighbor_sum(Position::new(1, 1)), 8);
        // All four live neighbors of the far corner are reached only through wraparound
        assert_eq!(grid.neighbor_sum(Position::new(3, 3)), 4);
    }

    #[test]
    fn test_single_row_counts_wrapped_cells_twice() {
        // With one row, north and south both land on the same row
        let grid = Grid::from_rows(&[[1u8, 0, 1]]).unwrap();
        assert_eq!(grid.neighbor_sum(Position::new(0, 1)), 6);
    }

    #[test]
    fn test_grid_from_config() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = RandomSeed {
            rows: 20,
            cols: 30,
            density: 0.5,
        };

        let grid = Grid::from_config(&config, &mut rng).unwrap();
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.cols(), 30);

        let alive = grid.active_count();
        assert!(alive > 0);
        assert!(alive < 600);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(Grid::from_config(&config, &mut rng).unwrap(), grid);
    }

    #[test]
    fn test_grid_from_config_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let full = RandomSeed {
            rows: 5,
            cols: 5,
            density: 1.0,
        };
        assert_eq!(Grid::from_config(&full, &mut rng).unwrap().active_count(), 25);

        let bad = RandomSeed {
            density: 1.2,
            ..Default::default()
        };
        assert!(Grid::from_config(&bad, &mut rng).is_err());
    }

    #[test]
    fn test_pattern_parse_and_display() {
        let text = "! glider\n.#.\n..#\n###\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]]);
        assert_eq!(grid.to_string(), ".#.\n..#\n###\n");

        let digits: Grid = "010\n001\n111".parse().unwrap();
        assert_eq!(digits, grid);

        assert!(matches!("..x".parse::<Grid>(), Err(Error::InvalidCell(_))));
    }

    #[test]
    fn test_deserialize_rejects_short_cells() {
        let json = r#"{"dims":{"rows":2,"cols":2},"cells":["Dead","Alive","Dead"]}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());

        let grid = Grid::from_rows(&[[0u8, 1], [1, 0]]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
    }
}
