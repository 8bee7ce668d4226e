#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn-based scheduler that advances the warehouse one tick at a time.
//!
//! Every tick activates each robot exactly once in ascending id order. A
//! robot's decision is computed against the grid as left by the robots before
//! it and applied before the next robot looks, so no two robots can ever claim
//! the same cell or the same box.

mod simulation;

use rand::Rng;
use tracing::trace;
use warehouse_core::{Command, Event, InvariantViolation, RobotId, RunState, TickReport};
use warehouse_system_robot_policy::RobotPolicy;
use warehouse_world::{self as world, query, World};

pub use simulation::Simulation;

/// Drives the `Running -> Finished` state machine of a world.
#[derive(Debug)]
pub struct Scheduler {
    policy: RobotPolicy,
    activation_order: Vec<RobotId>,
}

impl Scheduler {
    /// Creates a scheduler that activates the world's robots in creation order.
    #[must_use]
    pub fn new(world: &World) -> Self {
        let activation_order = query::robot_view(world)
            .iter()
            .map(|robot| robot.id)
            .collect();
        Self {
            policy: RobotPolicy::new(),
            activation_order,
        }
    }

    /// Robots in the order they act on every tick.
    #[must_use]
    pub fn activation_order(&self) -> &[RobotId] {
        &self.activation_order
    }

    /// Advances the world by one step.
    ///
    /// While the run may continue, every robot acts once and the tick counter
    /// grows by one. The run finishes as soon as all boxes are delivered or the
    /// tick budget is spent; afterwards this is a no-op. The first invariant
    /// violation aborts the tick and is returned.
    pub fn advance<R>(
        &mut self,
        world: &mut World,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> Result<TickReport, InvariantViolation>
    where
        R: Rng + ?Sized,
    {
        if query::run_state(world) == RunState::Finished {
            return Ok(report(world));
        }

        if !may_continue(world) {
            world::apply(world, Command::FinishRun, out_events)?;
            return Ok(report(world));
        }

        let drop_zone = query::drop_zone(world);
        for &robot in &self.activation_order {
            let snapshot =
                query::robot(world, robot).ok_or(InvariantViolation::UnknownRobot { robot })?;
            let action = {
                let view = query::grid_view(world);
                self.policy.decide(&snapshot, drop_zone, &view, rng)
            };
            trace!(robot = robot.get(), ?action, "robot decided");
            world::apply(world, Command::Act { robot, action }, out_events)?;
        }
        world::apply(world, Command::CompleteTick, out_events)?;

        if !may_continue(world) {
            world::apply(world, Command::FinishRun, out_events)?;
        }
        Ok(report(world))
    }
}

/// Guard of the `Running` state.
fn may_continue(world: &World) -> bool {
    query::boxes_dropped(world) < query::target_box_count(world)
        && query::ticks_elapsed(world) < query::tick_budget(world)
}

fn report(world: &World) -> TickReport {
    TickReport {
        ticks_elapsed: query::ticks_elapsed(world),
        boxes_dropped: query::boxes_dropped(world),
        state: query::run_state(world),
    }
}
