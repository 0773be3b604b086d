//! Core type definitions for the automaton.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary cell state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Cell::Dead),
            1 => Ok(Cell::Alive),
            other => Err(Error::InvalidCell(format!(
                "cell state must be 0 or 1, got {}",
                other
            ))),
        }
    }

    pub fn from_bool(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Logical NOT of the state
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }
}

/// Grid dimensions, fixed for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    /// Create validated dimensions (both sides must be at least 1)
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension(format!(
                "grid must have at least one row and one column, got {}x{}",
                rows, cols
            )));
        }
        Ok(Self { rows, cols })
    }

    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major index of a position already inside the grid
    #[inline]
    pub fn index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    #[inline]
    pub fn position(&self, index: usize) -> Position {
        Position::new(index / self.cols, index % self.cols)
    }

    /// Ensure `other` has exactly these dimensions
    pub fn ensure_same(&self, other: Dimensions) -> Result<()> {
        if *self != other {
            return Err(Error::DimensionMismatch {
                expected: *self,
                found: other,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// 2D position on the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset by a signed delta with toroidal wrapping
    pub fn offset(&self, dr: isize, dc: isize, dims: Dimensions) -> Self {
        Self {
            row: wrap_index(self.row as isize + dr, dims.rows),
            col: wrap_index(self.col as isize + dc, dims.cols),
        }
    }

    /// Apply toroidal wrapping for given grid dimensions
    pub fn wrap(&self, dims: Dimensions) -> Self {
        Self {
            row: self.row % dims.rows,
            col: self.col % dims.cols,
        }
    }
}

#[inline]
fn wrap_index(value: isize, len: usize) -> usize {
    value.rem_euclid(len as isize) as usize
}

/// The eight Moore-neighborhood directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// (row, column) delta
    pub fn to_delta(&self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }

    pub fn all() -> [Direction; 8] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::SouthEast,
            Direction::SouthWest,
        ]
    }
}
