//! One-shot randomized construction of a warehouse world.

use rand::Rng;
use tracing::info;
use warehouse_core::{
    CellCoord, ObstacleKind, Occupant, RunState, SimulationError, WorldConfig,
};

use crate::{entities::EntityRegistry, grid::Grid, World};

/// Builds a ready-to-run world from validated parameters.
///
/// Placement order is borders, shelves, boxes, then robots, so earlier kinds
/// can block later ones but never the reverse.
pub(crate) fn generate<R>(config: &WorldConfig, rng: &mut R) -> Result<World, SimulationError>
where
    R: Rng + ?Sized,
{
    config.validate()?;

    let (width, height) = (config.width, config.height);
    let drop_zone = random_interior_cell(width, height, rng);
    let shelf_count = rng.gen_range(0..config.shelf_upper_bound);

    let mut grid = Grid::new(width, height);
    let mut entities = EntityRegistry::new();

    for row in 0..height {
        for column in 0..width {
            if column == 0 || column == width - 1 || row == 0 || row == height - 1 {
                let id = entities.spawn_obstacle(ObstacleKind::Border);
                grid.place(
                    Occupant::Obstacle {
                        id,
                        kind: ObstacleKind::Border,
                    },
                    CellCoord::new(column, row),
                )?;
            }
        }
    }

    let scattered = [
        (ObstacleKind::Shelf, shelf_count),
        (ObstacleKind::Box, config.box_count),
    ];
    for (kind, count) in scattered {
        for _ in 0..count {
            let id = entities.spawn_obstacle(kind);
            let cell = sample_empty_interior(&grid, rng);
            grid.place(Occupant::Obstacle { id, kind }, cell)?;
        }
    }

    let robot_count = config.effective_robot_count();
    for _ in 0..robot_count {
        let id = entities.spawn_robot();
        let cell = sample_empty_interior(&grid, rng);
        grid.place(Occupant::Robot(id), cell)?;
    }

    info!(
        width,
        height,
        robots = robot_count,
        shelves = shelf_count,
        boxes = config.box_count,
        drop_zone = %drop_zone,
        seed = config.seed,
        "generated warehouse world"
    );

    Ok(World {
        grid,
        entities,
        drop_zone,
        picked_up: Vec::new(),
        boxes_dropped: 0,
        ticks_elapsed: 0,
        total_moves: 0,
        target_box_count: config.box_count,
        tick_budget: config.tick_budget,
        run_state: RunState::Running,
    })
}

/// Draws a uniform cell strictly inside the border ring.
fn random_interior_cell<R>(width: u32, height: u32, rng: &mut R) -> CellCoord
where
    R: Rng + ?Sized,
{
    CellCoord::new(rng.gen_range(1..width - 1), rng.gen_range(1..height - 1))
}

/// Rejection-samples interior cells until an empty one turns up.
///
/// Terminates only while the interior has a free cell, which
/// [`WorldConfig::validate`] guarantees for every placement made here.
fn sample_empty_interior<R>(grid: &Grid, rng: &mut R) -> CellCoord
where
    R: Rng + ?Sized,
{
    let (width, height) = grid.dimensions();
    loop {
        let cell = random_interior_cell(width, height, rng);
        if grid.is_empty(cell) {
            return cell;
        }
    }
}
