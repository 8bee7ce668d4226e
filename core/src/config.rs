//! Run parameters accepted when a warehouse world is generated.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Fewest robots a world is ever populated with.
pub const MIN_ROBOT_COUNT: u32 = 5;

const DEFAULT_ROBOT_COUNT: u32 = 10;
const DEFAULT_SHELF_UPPER_BOUND: u32 = 5;
const DEFAULT_BOX_COUNT: u32 = 10;
const DEFAULT_WIDTH: u32 = 28;
const DEFAULT_HEIGHT: u32 = 28;
const DEFAULT_TICK_BUDGET: u32 = 100;
const DEFAULT_SEED: u64 = 0x5eed_0f_ba5e_b0c5;

/// Parameters describing a warehouse run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Requested number of robots. Raised to [`MIN_ROBOT_COUNT`] when lower.
    pub robot_count: u32,
    /// Exclusive upper bound of the uniformly drawn shelf count.
    pub shelf_upper_bound: u32,
    /// Number of boxes placed and the number that must be delivered.
    pub box_count: u32,
    /// Grid width in cells, border ring included.
    pub width: u32,
    /// Grid height in cells, border ring included.
    pub height: u32,
    /// Maximum number of ticks the run may execute.
    pub tick_budget: u32,
    /// Seed for every random draw made during the run.
    pub seed: u64,
}

impl WorldConfig {
    /// Creates a configuration from the six run parameters and the default seed.
    #[must_use]
    pub const fn new(
        robot_count: u32,
        shelf_upper_bound: u32,
        box_count: u32,
        width: u32,
        height: u32,
        tick_budget: u32,
    ) -> Self {
        Self {
            robot_count,
            shelf_upper_bound,
            box_count,
            width,
            height,
            tick_budget,
            seed: DEFAULT_SEED,
        }
    }

    /// Replaces the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of robots actually created.
    #[must_use]
    pub fn effective_robot_count(&self) -> u32 {
        self.robot_count.max(MIN_ROBOT_COUNT)
    }

    /// Number of cells strictly inside the border ring.
    #[must_use]
    pub fn interior_capacity(&self) -> u64 {
        u64::from(self.width.saturating_sub(2)) * u64::from(self.height.saturating_sub(2))
    }

    /// Checks that a world can be generated from these parameters.
    ///
    /// The tick budget may be zero; such a run finishes on its first step.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("robot_count", self.robot_count),
            ("shelf_upper_bound", self.shelf_upper_bound),
            ("box_count", self.box_count),
            ("width", self.width),
            ("height", self.height),
        ];
        if let Some((name, _)) = required.into_iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroParameter { name });
        }

        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }

        let requested = u64::from(self.shelf_upper_bound)
            + u64::from(self.box_count)
            + u64::from(self.effective_robot_count());
        let available = self.interior_capacity();
        if requested > available {
            return Err(ConfigError::InsufficientCapacity {
                requested,
                available,
            });
        }

        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_ROBOT_COUNT,
            DEFAULT_SHELF_UPPER_BOUND,
            DEFAULT_BOX_COUNT,
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            DEFAULT_TICK_BUDGET,
        )
    }
}
