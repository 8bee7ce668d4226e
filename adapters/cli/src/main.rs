#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a warehouse simulation and prints a JSON report.

mod config;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use warehouse_core::WorldConfig;
use warehouse_reporting::{DropZonePayload, Frame, RunReport, StepRecord};
use warehouse_system_scheduler::Simulation;

use crate::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "warehouse-sim",
    version,
    about = "Simulate warehouse robots collecting boxes into a drop zone"
)]
struct Cli {
    /// TOML file with run parameters; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Record a frame of every robot and obstacle after each step.
    #[arg(long)]
    frames: bool,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

/// Entry point for the warehouse command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = config::load(cli.config.as_deref(), &cli.overrides)?;
    let report = run(config, cli.frames)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if cli.pretty {
        serde_json::to_writer_pretty(&mut out, &report)
    } else {
        serde_json::to_writer(&mut out, &report)
    };
    written.context("failed to write report")?;
    writeln!(out).context("failed to write report")?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn run(config: WorldConfig, record_frames: bool) -> Result<RunReport> {
    let mut simulation =
        Simulation::initialize(&config).context("failed to initialize the warehouse")?;
    info!(
        width = config.width,
        height = config.height,
        robots = simulation.list_robots().len(),
        drop_zone = %simulation.drop_zone(),
        "starting warehouse run"
    );

    let mut frames = Vec::new();
    if record_frames {
        frames.push(capture(&simulation));
    }
    while !simulation.is_finished() {
        let _ = simulation
            .advance_tick()
            .context("simulation step violated a world invariant")?;
        if record_frames {
            frames.push(capture(&simulation));
        }
    }

    Ok(RunReport {
        drop_zone: DropZonePayload::from_cell(simulation.drop_zone()),
        summary: simulation.summary(),
        config,
        frames,
    })
}

fn capture(simulation: &Simulation) -> Frame {
    let step = StepRecord {
        current_step: simulation.current_step(),
        dropped_boxes: simulation.boxes_dropped(),
    };
    Frame::capture(step, &simulation.list_robots(), &simulation.list_obstacles())
}
