use std::{fs, process::Command};

use serde_json::Value;

fn warehouse_sim() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_warehouse-sim"));
    let _ = command.env_remove("RUST_LOG");
    command
}

fn run_json(args: &[&str]) -> Value {
    let output = warehouse_sim()
        .args(args)
        .output()
        .expect("failed to launch warehouse-sim");
    assert!(
        output.status.success(),
        "warehouse-sim failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is a JSON report")
}

#[test]
fn small_run_reports_a_finished_summary() {
    let report = run_json(&[
        "--robots", "5", "--shelves", "1", "--boxes", "1", "--width", "6", "--height", "6",
        "--max-steps", "30", "--seed", "4",
    ]);

    let summary = &report["summary"];
    assert_eq!(summary["finished"], Value::Bool(true));
    assert_eq!(summary["target_box_count"], 1);
    assert_eq!(summary["tick_budget"], 30);
    assert!(summary["ticks_elapsed"].as_u64().expect("ticks") <= 30);
    assert_eq!(report["config"]["seed"], 4);
    assert_eq!(report["drop_zone_pos"].as_array().map(Vec::len), Some(1));
    assert!(report.get("frames").is_none());
}

#[test]
fn frames_cover_the_initial_state_and_every_step() {
    let report = run_json(&[
        "--robots", "5", "--shelves", "2", "--boxes", "2", "--width", "8", "--height", "8",
        "--max-steps", "15", "--seed", "21", "--frames",
    ]);

    let ticks = report["summary"]["ticks_elapsed"].as_u64().expect("ticks");
    let frames = report["frames"].as_array().expect("frames recorded");
    assert_eq!(frames.len() as u64, ticks + 1);
    assert_eq!(frames[0]["currentStep"], 0);
    assert_eq!(frames[0]["droppedBoxes"], 0);

    for frame in frames {
        let robots = frame["robots_attributes"].as_array().expect("robots");
        assert_eq!(robots.len(), 5);
        assert!(robots.iter().all(|robot| robot["y"] == 1));
        assert!(frame["obstacles_attributes"].as_array().is_some());
    }
}

#[test]
fn identical_seeds_print_identical_reports() {
    let args = ["--width", "10", "--height", "10", "--seed", "77", "--max-steps", "25"];
    assert_eq!(run_json(&args), run_json(&args));
}

#[test]
fn config_file_values_are_overridden_by_flags() {
    let path = std::env::temp_dir().join(format!("warehouse-sim-{}.toml", std::process::id()));
    fs::write(
        &path,
        "robot_count = 6\nbox_count = 2\nwidth = 9\nheight = 9\ntick_budget = 12\nseed = 5\n",
    )
    .expect("write config");

    let config_arg = path.to_string_lossy().into_owned();
    let report = run_json(&["--config", &config_arg, "--max-steps", "3"]);
    let _ = fs::remove_file(&path);

    assert_eq!(report["config"]["robot_count"], 6);
    assert_eq!(report["config"]["width"], 9);
    assert_eq!(report["config"]["tick_budget"], 3);
    assert!(report["summary"]["ticks_elapsed"].as_u64().expect("ticks") <= 3);
}

#[test]
fn impossible_layout_exits_with_an_error() {
    let output = warehouse_sim()
        .args(["--width", "4", "--height", "4", "--boxes", "10"])
        .output()
        .expect("failed to launch warehouse-sim");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
