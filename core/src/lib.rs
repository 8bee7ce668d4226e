#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the warehouse simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems read immutable views such as
//! [`GridView`] and [`RobotSnapshot`], decide a [`RobotAction`], and hand it to
//! the world wrapped in a [`Command`]. The world executes the command and
//! reports what happened through [`Event`] values.

mod config;
mod error;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use config::{WorldConfig, MIN_ROBOT_COUNT};
pub use error::{ConfigError, InvariantViolation, SimulationError};

/// First identifier handed to robots, keeping them clear of obstacle ids.
pub const ROBOT_ID_BASE: u32 = 1_000;

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Squared Euclidean distance between two cells.
    ///
    /// Ordering by the squared distance is identical to ordering by the true
    /// Euclidean distance, so callers can compare cells without floats.
    #[must_use]
    pub fn distance_squared(self, other: CellCoord) -> u64 {
        let dx = u64::from(self.column.abs_diff(other.column));
        let dy = u64::from(self.row.abs_diff(other.row));
        dx * dx + dy * dy
    }

    /// Reports whether `other` shares an edge with this cell.
    #[must_use]
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row) == 1
    }

    /// Cell one step away in the provided direction, if it has non-negative coordinates.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Cardinal directions used to enumerate a cell's neighbourhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing row indices.
    South,
    /// Toward increasing column indices.
    East,
    /// Toward decreasing column indices.
    West,
}

impl Direction {
    /// Neighbour scan order. Every tie-break in the simulation follows it.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];
}

/// Enumerates the orthogonal neighbours of `cell` that lie inside a
/// `width` x `height` grid, in [`Direction::SCAN_ORDER`].
///
/// The grid is not toroidal: neighbours past an edge are omitted.
pub fn cardinal_neighbors(
    cell: CellCoord,
    width: u32,
    height: u32,
) -> impl Iterator<Item = CellCoord> {
    Direction::SCAN_ORDER
        .into_iter()
        .filter_map(move |direction| cell.step(direction))
        .filter(move |neighbor| neighbor.column() < width && neighbor.row() < height)
}

/// Unique identifier assigned to a robot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RobotId(u32);

impl RobotId {
    /// Creates a new robot identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an obstacle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ObstacleId(u32);

impl ObstacleId {
    /// Creates a new obstacle identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of obstacles that populate the warehouse floor.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    /// Permanent wall cell on the outer ring of the grid.
    Border,
    /// Permanent storage shelf inside the warehouse.
    Shelf,
    /// Box waiting to be carried to the drop zone.
    Box,
}

impl ObstacleKind {
    /// Lowercase tag used when reporting the kind to visualization clients.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Border => "border",
            Self::Shelf => "shelf",
            Self::Box => "box",
        }
    }

    /// Reports whether obstacles of this kind stay put for the whole run.
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        match self {
            Self::Border | Self::Shelf => true,
            Self::Box => false,
        }
    }
}

/// Entity recorded in a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Occupant {
    /// A robot agent.
    Robot(RobotId),
    /// An obstacle together with its kind.
    Obstacle {
        /// Identifier of the obstacle.
        id: ObstacleId,
        /// Kind of the obstacle.
        kind: ObstacleKind,
    },
}

impl Occupant {
    /// Returns the obstacle id when the occupant is a box.
    #[must_use]
    pub const fn as_box(&self) -> Option<ObstacleId> {
        match self {
            Self::Obstacle {
                id,
                kind: ObstacleKind::Box,
            } => Some(*id),
            _ => None,
        }
    }
}

/// Read-only view into the single-occupancy grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [Option<Occupant>],
    width: u32,
    height: u32,
    picked_up: &'a [ObstacleId],
}

impl<'a> GridView<'a> {
    /// Captures a new view backed by a row-major cell slice.
    ///
    /// `picked_up` lists boxes already lifted by a robot, sorted by id.
    #[must_use]
    pub fn new(
        cells: &'a [Option<Occupant>],
        width: u32,
        height: u32,
        picked_up: &'a [ObstacleId],
    ) -> Self {
        Self {
            cells,
            width,
            height,
            picked_up,
        }
    }

    /// Provides the dimensions of the underlying grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the occupant recorded at `cell`, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<Occupant> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Reports whether `cell` lies inside the grid and holds no occupant.
    #[must_use]
    pub fn is_empty(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some() && self.occupant(cell).is_none()
    }

    /// Reports whether a robot may step onto `cell`.
    ///
    /// Empty cells are passable, and so is a cell still recording a box that
    /// some robot has already picked up.
    #[must_use]
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        if self.is_empty(cell) {
            return true;
        }
        self.occupant(cell)
            .and_then(|occupant| occupant.as_box())
            .is_some_and(|id| self.is_picked_up(id))
    }

    /// Reports whether the box with the provided id has been lifted.
    #[must_use]
    pub fn is_picked_up(&self, id: ObstacleId) -> bool {
        self.picked_up.binary_search(&id).is_ok()
    }

    /// In-bounds orthogonal neighbours of `cell` in scan order.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
        cardinal_neighbors(cell, self.width, self.height)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.width && cell.row() < self.height {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Decision produced for a single robot activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RobotAction {
    /// Hand the carried box over at the adjacent drop zone.
    Drop,
    /// Lift the adjacent box.
    PickUp {
        /// Box being lifted.
        obstacle: ObstacleId,
        /// Cell the box occupies.
        cell: CellCoord,
    },
    /// Step onto an adjacent passable cell.
    MoveTo {
        /// Destination cell.
        cell: CellCoord,
    },
    /// Remain in place for this tick.
    Stay,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Applies a robot's decided action.
    Act {
        /// Robot performing the action.
        robot: RobotId,
        /// Action to perform.
        action: RobotAction,
    },
    /// Marks the end of a tick after every robot acted.
    CompleteTick,
    /// Moves the run into its terminal state.
    FinishRun,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// A robot stepped between two adjacent cells.
    RobotMoved {
        /// Robot that moved.
        robot: RobotId,
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// A robot found no cell to move to and stayed in place.
    RobotStayed {
        /// Robot that stayed.
        robot: RobotId,
        /// Cell the robot remains on.
        cell: CellCoord,
    },
    /// A robot lifted a box off the grid.
    BoxPickedUp {
        /// Robot now carrying the box.
        robot: RobotId,
        /// Box that was lifted.
        obstacle: ObstacleId,
        /// Cell the box occupied.
        cell: CellCoord,
    },
    /// A robot delivered its box at the drop zone.
    BoxDropped {
        /// Robot that delivered the box.
        robot: RobotId,
        /// Total boxes delivered after this drop.
        boxes_dropped: u32,
    },
    /// Every robot acted and the tick counter advanced.
    TickCompleted {
        /// Ticks elapsed after the increment.
        ticks_elapsed: u32,
    },
    /// The run reached its terminal state.
    RunFinished {
        /// Final tick count.
        ticks_elapsed: u32,
        /// Final number of robot moves.
        total_moves: u64,
        /// Final number of delivered boxes.
        boxes_dropped: u32,
    },
}

/// Lifecycle state of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    /// Robots are still activated on every tick.
    Running,
    /// Terminal state; no further activations occur.
    Finished,
}

/// Immutable representation of a single robot's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RobotSnapshot {
    /// Unique identifier assigned to the robot.
    pub id: RobotId,
    /// Grid cell currently occupied by the robot.
    pub cell: CellCoord,
    /// Whether the robot is transporting a box.
    pub carrying: bool,
}

/// Read-only snapshot describing all robots in ascending id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RobotView {
    snapshots: Vec<RobotSnapshot>,
}

impl RobotView {
    /// Creates a new robot view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<RobotSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured robot snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &RobotSnapshot> {
        self.snapshots.iter()
    }

    /// Number of robots captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no robots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<RobotSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of an obstacle currently placed on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObstacleSnapshot {
    /// Identifier allocated to the obstacle.
    pub id: ObstacleId,
    /// Kind of the obstacle.
    pub kind: ObstacleKind,
    /// Cell occupied by the obstacle.
    pub cell: CellCoord,
    /// Whether a robot has lifted the box. Always false for borders and shelves.
    pub picked_up: bool,
}

/// Read-only snapshot describing all placed obstacles in ascending id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObstacleView {
    snapshots: Vec<ObstacleSnapshot>,
}

impl ObstacleView {
    /// Creates a new obstacle view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ObstacleSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured obstacle snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ObstacleSnapshot> {
        self.snapshots.iter()
    }

    /// Number of obstacles captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no obstacles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ObstacleSnapshot> {
        self.snapshots
    }
}

/// Where every box of the run currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoxCensus {
    /// Boxes still waiting on the grid.
    pub on_grid: u32,
    /// Boxes held by robots.
    pub carried: u32,
    /// Boxes delivered to the drop zone.
    pub dropped: u32,
}

impl BoxCensus {
    /// Sum of all three buckets. Stays equal to the target box count.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.on_grid + self.carried + self.dropped
    }
}

/// Result of a single scheduler step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickReport {
    /// Ticks executed so far.
    pub ticks_elapsed: u32,
    /// Boxes delivered so far.
    pub boxes_dropped: u32,
    /// Run state after the step.
    pub state: RunState,
}

/// Aggregate counters describing a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunSummary {
    /// Ticks executed so far.
    pub ticks_elapsed: u32,
    /// Robot moves performed so far.
    pub total_moves: u64,
    /// Boxes delivered so far.
    pub boxes_dropped: u32,
    /// Boxes that must be delivered to finish early.
    pub target_box_count: u32,
    /// Maximum number of ticks the run may execute.
    pub tick_budget: u32,
    /// Whether the run reached its terminal state.
    pub finished: bool,
}
