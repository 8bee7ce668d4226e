#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-robot decision making for the warehouse simulation.
//!
//! A robot senses its four orthogonal neighbours and picks exactly one action,
//! taking the first rule that matches:
//!
//! 1. carrying, with the drop zone adjacent: drop the box;
//! 2. empty-handed, with a waiting box adjacent: pick it up;
//! 3. carrying: step to the passable neighbour closest to the drop zone;
//! 4. empty-handed: step to a uniformly chosen passable neighbour.
//!
//! Rules 3 and 4 fall back to staying put when no neighbour is passable.
//! Every tie is broken by [`Direction::SCAN_ORDER`](warehouse_core::Direction::SCAN_ORDER).

use rand::{seq::SliceRandom, Rng};
use warehouse_core::{CellCoord, GridView, ObstacleId, RobotAction, RobotSnapshot};

/// Pure system that turns a robot's local view into an action.
#[derive(Debug, Default)]
pub struct RobotPolicy {
    passable: Vec<CellCoord>,
}

impl RobotPolicy {
    /// Creates a policy with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides the action for `robot` given the grid as it stands right now.
    ///
    /// `rng` is only drawn from when an empty-handed robot has at least one
    /// passable neighbour to wander to.
    pub fn decide<R>(
        &mut self,
        robot: &RobotSnapshot,
        drop_zone: CellCoord,
        grid: &GridView<'_>,
        rng: &mut R,
    ) -> RobotAction
    where
        R: Rng + ?Sized,
    {
        if robot.carrying {
            if grid.neighbors(robot.cell).any(|cell| cell == drop_zone) {
                return RobotAction::Drop;
            }
        } else if let Some((obstacle, cell)) = adjacent_box(robot.cell, grid) {
            return RobotAction::PickUp { obstacle, cell };
        }

        self.passable.clear();
        self.passable.extend(
            grid.neighbors(robot.cell)
                .filter(|cell| grid.is_passable(*cell)),
        );

        let destination = if robot.carrying {
            closest_to(&self.passable, drop_zone)
        } else {
            self.passable.choose(rng).copied()
        };

        destination.map_or(RobotAction::Stay, |cell| RobotAction::MoveTo { cell })
    }
}

/// First neighbour, in scan order, holding a box nobody has lifted yet.
fn adjacent_box(cell: CellCoord, grid: &GridView<'_>) -> Option<(ObstacleId, CellCoord)> {
    grid.neighbors(cell).find_map(|neighbor| {
        let id = grid.occupant(neighbor)?.as_box()?;
        (!grid.is_picked_up(id)).then_some((id, neighbor))
    })
}

/// Candidate with the smallest Euclidean distance to `goal`; earlier wins ties.
fn closest_to(candidates: &[CellCoord], goal: CellCoord) -> Option<CellCoord> {
    let mut best: Option<(u64, CellCoord)> = None;
    for &cell in candidates {
        let distance = cell.distance_squared(goal);
        if best.map_or(true, |(closest, _)| distance < closest) {
            best = Some((distance, cell));
        }
    }
    best.map(|(_, cell)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_prefers_earlier_candidate_on_ties() {
        let goal = CellCoord::new(4, 0);
        let candidates = [CellCoord::new(2, 1), CellCoord::new(3, 2)];
        assert_eq!(closest_to(&candidates, goal), Some(CellCoord::new(2, 1)));
    }

    #[test]
    fn closest_of_nothing_is_none() {
        assert_eq!(closest_to(&[], CellCoord::new(1, 1)), None);
    }
}
