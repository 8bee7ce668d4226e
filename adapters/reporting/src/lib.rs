#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Serializable payloads describing a warehouse run for external viewers.
//!
//! Grid columns map to `x` and grid rows map to `z`; `y` is the constant
//! height a 3D client renders every entity at.

use serde::Serialize;
use warehouse_core::{CellCoord, ObstacleKind, ObstacleView, RobotView, RunSummary, WorldConfig};

/// Height reported for every entity.
pub const ENTITY_HEIGHT: u32 = 1;

/// Planar position of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PositionRecord {
    /// Grid column.
    pub x: u32,
    /// Grid row.
    pub y: u32,
}

impl From<CellCoord> for PositionRecord {
    fn from(cell: CellCoord) -> Self {
        Self {
            x: cell.column(),
            y: cell.row(),
        }
    }
}

/// Location of the drop zone, wrapped in a one-element list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DropZonePayload {
    /// Drop zone position.
    pub drop_zone_pos: Vec<PositionRecord>,
}

impl DropZonePayload {
    /// Wraps the drop zone cell.
    #[must_use]
    pub fn from_cell(cell: CellCoord) -> Self {
        Self {
            drop_zone_pos: vec![PositionRecord::from(cell)],
        }
    }
}

/// One robot as seen by a viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RobotRecord {
    /// Grid column.
    pub x: u32,
    /// Constant entity height.
    pub y: u32,
    /// Grid row.
    pub z: u32,
    /// Whether the robot carries a box.
    pub has_box: bool,
    /// Robot identifier.
    pub unique_id: u32,
}

/// Every robot, ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RobotsPayload {
    /// Robot records.
    pub robots_attributes: Vec<RobotRecord>,
}

impl RobotsPayload {
    /// Converts a robot view into wire records.
    #[must_use]
    pub fn from_view(view: &RobotView) -> Self {
        let robots_attributes = view
            .iter()
            .map(|robot| RobotRecord {
                x: robot.cell.column(),
                y: ENTITY_HEIGHT,
                z: robot.cell.row(),
                has_box: robot.carrying,
                unique_id: robot.id.get(),
            })
            .collect();
        Self { robots_attributes }
    }
}

/// One obstacle as seen by a viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ObstacleRecord {
    /// Grid column.
    pub x: u32,
    /// Constant entity height.
    pub y: u32,
    /// Grid row.
    pub z: u32,
    /// `"border"`, `"shelf"` or `"box"`.
    pub tag: ObstacleKind,
    /// Whether a robot lifted the box.
    pub picked_up: bool,
    /// Obstacle identifier.
    pub unique_id: u32,
}

/// Every obstacle still on the grid, ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ObstaclesPayload {
    /// Obstacle records.
    pub obstacles_attributes: Vec<ObstacleRecord>,
}

impl ObstaclesPayload {
    /// Converts an obstacle view into wire records.
    #[must_use]
    pub fn from_view(view: &ObstacleView) -> Self {
        let obstacles_attributes = view
            .iter()
            .map(|obstacle| ObstacleRecord {
                x: obstacle.cell.column(),
                y: ENTITY_HEIGHT,
                z: obstacle.cell.row(),
                tag: obstacle.kind,
                picked_up: obstacle.picked_up,
                unique_id: obstacle.id.get(),
            })
            .collect();
        Self {
            obstacles_attributes,
        }
    }
}

/// Progress counters returned after each step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// Number of step requests served so far.
    #[serde(rename = "currentStep")]
    pub current_step: u64,
    /// Boxes delivered so far.
    #[serde(rename = "droppedBoxes")]
    pub dropped_boxes: u32,
}

/// Complete picture of the warehouse after one step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Step counters.
    #[serde(flatten)]
    pub step: StepRecord,
    /// Robot records.
    #[serde(flatten)]
    pub robots: RobotsPayload,
    /// Obstacle records.
    #[serde(flatten)]
    pub obstacles: ObstaclesPayload,
}

impl Frame {
    /// Captures the counters and both entity views.
    #[must_use]
    pub fn capture(step: StepRecord, robots: &RobotView, obstacles: &ObstacleView) -> Self {
        Self {
            step,
            robots: RobotsPayload::from_view(robots),
            obstacles: ObstaclesPayload::from_view(obstacles),
        }
    }
}

/// Document written once a run ends.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    /// Parameters the run was generated from.
    pub config: WorldConfig,
    /// Drop zone location.
    #[serde(flatten)]
    pub drop_zone: DropZonePayload,
    /// Final counters.
    pub summary: RunSummary,
    /// Per-step frames, when recorded.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame>,
}
