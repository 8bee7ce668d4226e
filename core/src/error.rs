//! Error taxonomy shared by the world and its systems.

use thiserror::Error;

use crate::{CellCoord, Occupant, RobotId};

/// Rejected run parameters. Raised before any world state exists.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A parameter that must be positive was zero.
    #[error("{name} must be greater than zero")]
    ZeroParameter {
        /// Name of the offending parameter.
        name: &'static str,
    },
    /// The grid has no interior inside its border ring.
    #[error("grid of {width}x{height} cells has no interior; both sides must be at least 3")]
    GridTooSmall {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Shelves, boxes and robots cannot all fit inside the border ring.
    #[error("{requested} entities requested but the interior only has {available} cells")]
    InsufficientCapacity {
        /// Shelf bound plus box count plus robot count.
        requested: u64,
        /// Number of interior cells.
        available: u64,
    },
}

/// A mutation that would break a spatial or bookkeeping invariant.
///
/// These indicate a defect in the caller rather than a recoverable condition.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The target cell lies outside the grid.
    #[error("cell {cell} lies outside the grid")]
    OutOfBounds {
        /// Offending cell.
        cell: CellCoord,
    },
    /// The target cell already holds a different occupant.
    #[error("cell {cell} is already occupied by {occupant:?}")]
    CellOccupied {
        /// Offending cell.
        cell: CellCoord,
        /// Entity recorded in the cell.
        occupant: Occupant,
    },
    /// The entity is already placed somewhere on the grid.
    #[error("{occupant:?} is already placed on the grid")]
    AlreadyPlaced {
        /// Entity that was placed twice.
        occupant: Occupant,
    },
    /// The entity has no position on the grid.
    #[error("{occupant:?} is not on the grid")]
    NotOnGrid {
        /// Entity that could not be found.
        occupant: Occupant,
    },
    /// No robot with the provided identifier exists.
    #[error("robot {} does not exist", robot.get())]
    UnknownRobot {
        /// Identifier that was looked up.
        robot: RobotId,
    },
    /// A pick-up targeted something other than a waiting box.
    #[error("{occupant:?} cannot be picked up")]
    NotABox {
        /// Entity that was targeted.
        occupant: Occupant,
    },
    /// The action targets a cell that does not share an edge with the robot.
    #[error("robot {} cannot reach {cell}", robot.get())]
    NotAdjacent {
        /// Acting robot.
        robot: RobotId,
        /// Cell the action targeted.
        cell: CellCoord,
    },
    /// A drop was requested by a robot with empty hands.
    #[error("robot {} is not carrying a box", robot.get())]
    NotCarrying {
        /// Acting robot.
        robot: RobotId,
    },
    /// A pick-up was requested by a robot that already holds a box.
    #[error("robot {} is already carrying a box", robot.get())]
    AlreadyCarrying {
        /// Acting robot.
        robot: RobotId,
    },
    /// A robot action arrived after the run finished.
    #[error("the run has already finished")]
    RunFinished,
}

/// Any failure surfaced while creating or driving a simulation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// The run parameters were rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// A world mutation broke an invariant.
    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}
