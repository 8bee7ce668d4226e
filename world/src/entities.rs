//! Robot and obstacle records together with identifier allocation.

use std::collections::BTreeMap;

use warehouse_core::{ObstacleId, ObstacleKind, RobotId, ROBOT_ID_BASE};

/// Mutable state of a robot. Its position lives in the grid.
#[derive(Clone, Debug)]
pub(crate) struct Robot {
    /// Box currently held by the robot.
    pub(crate) carrying: Option<ObstacleId>,
}

/// Mutable state of an obstacle. Its position lives in the grid.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Obstacle {
    pub(crate) kind: ObstacleKind,
    /// Set once a robot lifts the box.
    pub(crate) picked_up: bool,
}

/// Registry that stores entities and hands out identifiers from one shared space.
///
/// Obstacles count up from zero. Robots start at [`ROBOT_ID_BASE`], or right
/// after the last obstacle when obstacles already reach past it.
#[derive(Debug)]
pub(crate) struct EntityRegistry {
    pub(crate) robots: BTreeMap<RobotId, Robot>,
    pub(crate) obstacles: BTreeMap<ObstacleId, Obstacle>,
    next_id: u32,
}

impl EntityRegistry {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            robots: BTreeMap::new(),
            obstacles: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Registers a new obstacle and returns its identifier.
    pub(crate) fn spawn_obstacle(&mut self, kind: ObstacleKind) -> ObstacleId {
        let id = ObstacleId::new(self.allocate());
        let _ = self.obstacles.insert(
            id,
            Obstacle {
                kind,
                picked_up: false,
            },
        );
        id
    }

    /// Registers a new robot and returns its identifier.
    pub(crate) fn spawn_robot(&mut self) -> RobotId {
        if self.robots.is_empty() {
            self.next_id = self.next_id.max(ROBOT_ID_BASE);
        }
        let id = RobotId::new(self.allocate());
        let _ = self.robots.insert(id, Robot { carrying: None });
        id
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }
}
