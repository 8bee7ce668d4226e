//! Handle that owns one run and exposes it to outer layers.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;
use warehouse_core::{
    BoxCensus, CellCoord, Event, InvariantViolation, ObstacleView, RobotView, RunState, RunSummary,
    SimulationError, TickReport, WorldConfig,
};
use warehouse_world::{query, World};

use crate::Scheduler;

/// A single warehouse run: world, scheduler and the seeded random source.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    scheduler: Scheduler,
    rng: ChaCha8Rng,
    current_step: u64,
    last_events: Vec<Event>,
}

impl Simulation {
    /// Validates `config` and generates a fresh world from its seed.
    pub fn initialize(config: &WorldConfig) -> Result<Self, SimulationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let world = World::generate(config, &mut rng)?;
        let scheduler = Scheduler::new(&world);
        Ok(Self {
            world,
            scheduler,
            rng,
            current_step: 0,
            last_events: Vec::new(),
        })
    }

    /// Read-only access to the underlying world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Coordinate of the drop zone.
    #[must_use]
    pub fn drop_zone(&self) -> CellCoord {
        query::drop_zone(&self.world)
    }

    /// Grid width and height.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        query::dimensions(&self.world)
    }

    /// Every robot in ascending id order.
    #[must_use]
    pub fn list_robots(&self) -> RobotView {
        query::robot_view(&self.world)
    }

    /// Every obstacle on the grid in ascending id order.
    #[must_use]
    pub fn list_obstacles(&self) -> ObstacleView {
        query::obstacle_view(&self.world)
    }

    /// Drives the scheduler one step. Calls after the run finished change nothing.
    pub fn advance_tick(&mut self) -> Result<TickReport, InvariantViolation> {
        self.current_step = self.current_step.saturating_add(1);
        self.last_events.clear();
        if self.is_finished() {
            warn!(step = self.current_step, "run already finished; tick ignored");
        }
        self.scheduler
            .advance(&mut self.world, &mut self.rng, &mut self.last_events)
    }

    /// Advances until the run finishes and returns the final counters.
    pub fn run_to_completion(&mut self) -> Result<RunSummary, InvariantViolation> {
        while !self.is_finished() {
            let _ = self.advance_tick()?;
        }
        Ok(self.summary())
    }

    /// Events produced by the most recent [`Simulation::advance_tick`] call.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.last_events
    }

    /// Number of `advance_tick` calls made, including ones after finishing.
    #[must_use]
    pub fn current_step(&self) -> u64 {
        self.current_step
    }

    /// Boxes delivered so far.
    #[must_use]
    pub fn boxes_dropped(&self) -> u32 {
        query::boxes_dropped(&self.world)
    }

    /// Robot moves performed so far.
    #[must_use]
    pub fn total_moves(&self) -> u64 {
        query::total_moves(&self.world)
    }

    /// Ticks executed so far.
    #[must_use]
    pub fn ticks_elapsed(&self) -> u32 {
        query::ticks_elapsed(&self.world)
    }

    /// Whether the run reached its terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        query::run_state(&self.world) == RunState::Finished
    }

    /// Where every box currently is.
    #[must_use]
    pub fn box_census(&self) -> BoxCensus {
        query::box_census(&self.world)
    }

    /// Aggregate counters of the run.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        query::summary(&self.world)
    }
}
