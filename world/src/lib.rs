#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the warehouse simulation.

mod entities;
mod grid;
mod init;

use rand::Rng;
use tracing::{debug, info};
use warehouse_core::{
    CellCoord, Command, Event, InvariantViolation, ObstacleId, ObstacleKind, Occupant, RobotAction,
    RobotId, RunState, SimulationError, WorldConfig,
};

use crate::entities::EntityRegistry;

pub use crate::grid::Grid;

/// Represents the authoritative warehouse world state.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    entities: EntityRegistry,
    drop_zone: CellCoord,
    /// Boxes lifted but not yet delivered, sorted by id.
    picked_up: Vec<ObstacleId>,
    boxes_dropped: u32,
    ticks_elapsed: u32,
    total_moves: u64,
    target_box_count: u32,
    tick_budget: u32,
    run_state: RunState,
}

impl World {
    /// Generates a populated world from the provided parameters.
    ///
    /// Every random draw comes from `rng`, so a seeded generator reproduces the
    /// same layout.
    pub fn generate<R>(config: &WorldConfig, rng: &mut R) -> Result<Self, SimulationError>
    where
        R: Rng + ?Sized,
    {
        init::generate(config, rng)
    }

    fn robot_cell(&self, robot: RobotId) -> Result<CellCoord, InvariantViolation> {
        self.grid
            .position(Occupant::Robot(robot))
            .ok_or(InvariantViolation::NotOnGrid {
                occupant: Occupant::Robot(robot),
            })
    }

    fn act(
        &mut self,
        robot: RobotId,
        action: RobotAction,
        out_events: &mut Vec<Event>,
    ) -> Result<(), InvariantViolation> {
        if self.run_state == RunState::Finished {
            return Err(InvariantViolation::RunFinished);
        }
        if !self.entities.robots.contains_key(&robot) {
            return Err(InvariantViolation::UnknownRobot { robot });
        }
        let cell = self.robot_cell(robot)?;

        match action {
            RobotAction::Drop => self.drop_box(robot, cell, out_events),
            RobotAction::PickUp {
                obstacle,
                cell: target,
            } => self.pick_up(robot, cell, obstacle, target, out_events),
            RobotAction::MoveTo { cell: target } => self.step(robot, cell, target, out_events),
            RobotAction::Stay => {
                debug!(robot = robot.get(), cell = %cell, "robot cannot move, no free cells");
                out_events.push(Event::RobotStayed { robot, cell });
                Ok(())
            }
        }
    }

    fn drop_box(
        &mut self,
        robot: RobotId,
        cell: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<(), InvariantViolation> {
        if !cell.is_adjacent(self.drop_zone) {
            return Err(InvariantViolation::NotAdjacent {
                robot,
                cell: self.drop_zone,
            });
        }
        let carried = self
            .entities
            .robots
            .get_mut(&robot)
            .and_then(|state| state.carrying.take())
            .ok_or(InvariantViolation::NotCarrying { robot })?;

        if let Ok(index) = self.picked_up.binary_search(&carried) {
            let _ = self.picked_up.remove(index);
        }
        let _ = self.entities.obstacles.remove(&carried);
        self.boxes_dropped = self.boxes_dropped.saturating_add(1);

        debug!(
            robot = robot.get(),
            boxes_dropped = self.boxes_dropped,
            "robot dropped its box"
        );
        out_events.push(Event::BoxDropped {
            robot,
            boxes_dropped: self.boxes_dropped,
        });
        Ok(())
    }

    fn pick_up(
        &mut self,
        robot: RobotId,
        cell: CellCoord,
        obstacle: ObstacleId,
        target: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<(), InvariantViolation> {
        if !cell.is_adjacent(target) {
            return Err(InvariantViolation::NotAdjacent {
                robot,
                cell: target,
            });
        }
        let occupant = self
            .grid
            .occupant(target)
            .ok_or(InvariantViolation::NotOnGrid {
                occupant: Occupant::Obstacle {
                    id: obstacle,
                    kind: ObstacleKind::Box,
                },
            })?;
        if occupant.as_box() != Some(obstacle) || self.picked_up.binary_search(&obstacle).is_ok() {
            return Err(InvariantViolation::NotABox { occupant });
        }

        let state = self
            .entities
            .robots
            .get_mut(&robot)
            .ok_or(InvariantViolation::UnknownRobot { robot })?;
        if state.carrying.is_some() {
            return Err(InvariantViolation::AlreadyCarrying { robot });
        }

        let _ = self.grid.remove(occupant)?;
        state.carrying = Some(obstacle);
        if let Some(record) = self.entities.obstacles.get_mut(&obstacle) {
            record.picked_up = true;
        }
        if let Err(index) = self.picked_up.binary_search(&obstacle) {
            self.picked_up.insert(index, obstacle);
        }

        debug!(
            robot = robot.get(),
            obstacle = obstacle.get(),
            cell = %target,
            "robot picked up a box"
        );
        out_events.push(Event::BoxPickedUp {
            robot,
            obstacle,
            cell: target,
        });
        Ok(())
    }

    fn step(
        &mut self,
        robot: RobotId,
        cell: CellCoord,
        target: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<(), InvariantViolation> {
        if !cell.is_adjacent(target) {
            return Err(InvariantViolation::NotAdjacent {
                robot,
                cell: target,
            });
        }

        // A lifted box must never linger in the grid; clear any stale record
        // before stepping onto its cell.
        if let Some(stale) = self.grid.occupant(target) {
            if stale
                .as_box()
                .is_some_and(|id| self.picked_up.binary_search(&id).is_ok())
            {
                let _ = self.grid.remove(stale)?;
            }
        }

        let from = self.grid.move_occupant(Occupant::Robot(robot), target)?;
        self.total_moves = self.total_moves.saturating_add(1);

        debug!(robot = robot.get(), from = %from, to = %target, "robot moved");
        out_events.push(Event::RobotMoved {
            robot,
            from,
            to: target,
        });
        Ok(())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Each command is applied completely or not at all; an error leaves the
/// world untouched by that command.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), InvariantViolation> {
    match command {
        Command::Act { robot, action } => world.act(robot, action, out_events),
        Command::CompleteTick => {
            if world.run_state == RunState::Finished {
                return Err(InvariantViolation::RunFinished);
            }
            world.ticks_elapsed = world.ticks_elapsed.saturating_add(1);
            out_events.push(Event::TickCompleted {
                ticks_elapsed: world.ticks_elapsed,
            });
            Ok(())
        }
        Command::FinishRun => {
            if world.run_state == RunState::Running {
                world.run_state = RunState::Finished;
                info!(
                    ticks_elapsed = world.ticks_elapsed,
                    total_moves = world.total_moves,
                    boxes_dropped = world.boxes_dropped,
                    target_box_count = world.target_box_count,
                    "warehouse run finished"
                );
                out_events.push(Event::RunFinished {
                    ticks_elapsed: world.ticks_elapsed,
                    total_moves: world.total_moves,
                    boxes_dropped: world.boxes_dropped,
                });
            }
            Ok(())
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Grid, World};
    use warehouse_core::{
        BoxCensus, CellCoord, GridView, ObstacleSnapshot, ObstacleView, Occupant, RobotId,
        RobotSnapshot, RobotView, RunState, RunSummary,
    };

    /// Coordinate of the single drop zone.
    #[must_use]
    pub fn drop_zone(world: &World) -> CellCoord {
        world.drop_zone
    }

    /// Width and height of the grid.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        world.grid.dimensions()
    }

    /// Provides read-only access to the spatial index.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Captures the view robots use to sense their neighbourhood.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        world.grid.view(&world.picked_up)
    }

    /// Captures a single robot's state.
    #[must_use]
    pub fn robot(world: &World, id: RobotId) -> Option<RobotSnapshot> {
        let state = world.entities.robots.get(&id)?;
        let cell = world.grid.position(Occupant::Robot(id))?;
        Some(RobotSnapshot {
            id,
            cell,
            carrying: state.carrying.is_some(),
        })
    }

    /// Captures every robot in ascending id order.
    #[must_use]
    pub fn robot_view(world: &World) -> RobotView {
        let snapshots = world
            .entities
            .robots
            .keys()
            .filter_map(|id| robot(world, *id))
            .collect();
        RobotView::from_snapshots(snapshots)
    }

    /// Captures every obstacle still placed on the grid in ascending id order.
    #[must_use]
    pub fn obstacle_view(world: &World) -> ObstacleView {
        let snapshots = world
            .entities
            .obstacles
            .iter()
            .filter_map(|(id, state)| {
                let cell = world.grid.position(Occupant::Obstacle {
                    id: *id,
                    kind: state.kind,
                })?;
                Some(ObstacleSnapshot {
                    id: *id,
                    kind: state.kind,
                    cell,
                    picked_up: state.picked_up,
                })
            })
            .collect();
        ObstacleView::from_snapshots(snapshots)
    }

    /// Counts boxes waiting on the grid, carried by robots, and delivered.
    #[must_use]
    pub fn box_census(world: &World) -> BoxCensus {
        let carried = world
            .entities
            .robots
            .values()
            .filter(|robot| robot.carrying.is_some())
            .count();
        let on_grid = world
            .grid
            .occupied()
            .filter(|(_, occupant)| occupant.as_box().is_some())
            .count();
        BoxCensus {
            on_grid: u32::try_from(on_grid).unwrap_or(u32::MAX),
            carried: u32::try_from(carried).unwrap_or(u32::MAX),
            dropped: world.boxes_dropped,
        }
    }

    /// Boxes delivered so far.
    #[must_use]
    pub fn boxes_dropped(world: &World) -> u32 {
        world.boxes_dropped
    }

    /// Ticks executed so far.
    #[must_use]
    pub fn ticks_elapsed(world: &World) -> u32 {
        world.ticks_elapsed
    }

    /// Robot moves performed so far.
    #[must_use]
    pub fn total_moves(world: &World) -> u64 {
        world.total_moves
    }

    /// Boxes that must be delivered for the run to finish early.
    #[must_use]
    pub fn target_box_count(world: &World) -> u32 {
        world.target_box_count
    }

    /// Maximum number of ticks the run may execute.
    #[must_use]
    pub fn tick_budget(world: &World) -> u32 {
        world.tick_budget
    }

    /// Lifecycle state of the run.
    #[must_use]
    pub fn run_state(world: &World) -> RunState {
        world.run_state
    }

    /// Aggregate counters for reporting.
    #[must_use]
    pub fn summary(world: &World) -> RunSummary {
        RunSummary {
            ticks_elapsed: world.ticks_elapsed,
            total_moves: world.total_moves,
            boxes_dropped: world.boxes_dropped,
            target_box_count: world.target_box_count,
            tick_budget: world.tick_budget,
            finished: world.run_state == RunState::Finished,
        }
    }
}
