//! Resolves run parameters from an optional TOML file and command-line flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Args;
use warehouse_core::WorldConfig;

/// Flags that take precedence over values read from the config file.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ConfigOverrides {
    /// Number of robots (at least five are always placed).
    #[arg(long)]
    pub(crate) robots: Option<u32>,
    /// Exclusive upper bound of the random shelf count.
    #[arg(long)]
    pub(crate) shelves: Option<u32>,
    /// Number of boxes to place and deliver.
    #[arg(long)]
    pub(crate) boxes: Option<u32>,
    /// Grid width including the border ring.
    #[arg(long)]
    pub(crate) width: Option<u32>,
    /// Grid height including the border ring.
    #[arg(long)]
    pub(crate) height: Option<u32>,
    /// Maximum number of ticks to simulate.
    #[arg(long)]
    pub(crate) max_steps: Option<u32>,
    /// Seed for every random draw of the run.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

impl ConfigOverrides {
    fn apply(&self, mut config: WorldConfig) -> WorldConfig {
        if let Some(robots) = self.robots {
            config.robot_count = robots;
        }
        if let Some(shelves) = self.shelves {
            config.shelf_upper_bound = shelves;
        }
        if let Some(boxes) = self.boxes {
            config.box_count = boxes;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(max_steps) = self.max_steps {
            config.tick_budget = max_steps;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }
}

/// Builds the validated run parameters.
pub(crate) fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<WorldConfig> {
    let base = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            parse(&contents)
                .with_context(|| format!("failed to load config file {}", path.display()))?
        }
        None => WorldConfig::default(),
    };

    let config = overrides.apply(base);
    config.validate().context("invalid run parameters")?;
    Ok(config)
}

fn parse(contents: &str) -> Result<WorldConfig> {
    toml::from_str(contents).context("failed to parse config toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = parse("width = 12\nheight = 9\n").expect("parse");
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 9);
        assert_eq!(config.robot_count, WorldConfig::default().robot_count);
        assert_eq!(config.tick_budget, WorldConfig::default().tick_budget);
    }

    #[test]
    fn malformed_toml_is_reported() {
        assert!(parse("width = \"wide\"").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let base = parse("robot_count = 7\nbox_count = 3\nseed = 1\n").expect("parse");
        let overrides = ConfigOverrides {
            boxes: Some(4),
            seed: Some(99),
            ..ConfigOverrides::default()
        };

        let config = overrides.apply(base);
        assert_eq!(config.robot_count, 7);
        assert_eq!(config.box_count, 4);
        assert_eq!(config.seed, 99);
    }

    #[test]
    fn defaults_are_used_without_a_file() {
        let config = load(None, &ConfigOverrides::default()).expect("defaults are valid");
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let overrides = ConfigOverrides {
            width: Some(2),
            ..ConfigOverrides::default()
        };
        assert!(load(None, &overrides).is_err());
    }

    #[test]
    fn unreadable_file_is_reported() {
        let path = Path::new("/nonexistent/warehouse.toml");
        let error = load(Some(path), &ConfigOverrides::default()).expect_err("missing file");
        assert!(error.to_string().contains("warehouse.toml"));
    }
}
