//! Error types for the automaton.

use crate::Dimensions;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        expected: Dimensions,
        found: Dimensions,
    },

    #[error("Trajectory contains no grids")]
    EmptyTrajectory,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid cell: {0}")]
    InvalidCell(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
