//! Grid engine for the toroidal threshold automaton.
//!
//! A grid advances synchronously: every cell becomes alive when at least
//! `threshold` of its eight wrapped neighbors are alive, then each cell may be
//! flipped by noise. Runs produce a [`Trajectory`] and a [`VisitAccumulator`].

pub mod accumulator;
pub mod engine;
pub mod grid;
pub mod simulation;
pub mod trajectory;

pub use accumulator::VisitAccumulator;
pub use engine::{accumulate, run, step, step_into, step_with_rule, UpdateRule};
pub use grid::Grid;
pub use simulation::{Simulation, SimulationResult};
pub use trajectory::Trajectory;
