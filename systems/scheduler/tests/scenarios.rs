use warehouse_core::{Event, ObstacleKind, RunState, WorldConfig};
use warehouse_system_scheduler::Simulation;

fn tight_floor(seed: u64) -> WorldConfig {
    WorldConfig::new(5, 1, 1, 5, 5, 50).with_seed(seed)
}

#[test]
fn tiny_warehouse_delivers_its_only_box() {
    let mut simulation = Simulation::initialize(&tight_floor(7)).expect("valid config");
    assert_eq!(simulation.list_robots().len(), 5);

    let summary = simulation.run_to_completion().expect("run completes");

    assert!(summary.finished);
    assert_eq!(summary.boxes_dropped, 1);
    assert!(summary.ticks_elapsed <= 50);
    assert!(!simulation
        .list_obstacles()
        .iter()
        .any(|obstacle| obstacle.kind == ObstacleKind::Box));
}

#[test]
fn zero_budget_finishes_on_the_first_advance() {
    let config = WorldConfig::new(5, 1, 1, 5, 5, 0).with_seed(3);
    let mut simulation = Simulation::initialize(&config).expect("valid config");
    let robots_before = simulation.list_robots();

    let report = simulation.advance_tick().expect("advance");

    assert_eq!(report.state, RunState::Finished);
    assert_eq!(report.ticks_elapsed, 0);
    assert_eq!(simulation.total_moves(), 0);
    assert_eq!(simulation.list_robots(), robots_before);
    assert!(matches!(
        simulation.last_events(),
        [Event::RunFinished {
            ticks_elapsed: 0,
            total_moves: 0,
            boxes_dropped: 0
        }]
    ));
}

#[test]
fn advancing_a_finished_run_changes_nothing() {
    let mut simulation = Simulation::initialize(&tight_floor(11)).expect("valid config");
    let summary = simulation.run_to_completion().expect("run completes");
    let robots = simulation.list_robots();
    let obstacles = simulation.list_obstacles();
    let step = simulation.current_step();

    for _ in 0..3 {
        let report = simulation.advance_tick().expect("advance");
        assert_eq!(report.state, RunState::Finished);
        assert_eq!(report.ticks_elapsed, summary.ticks_elapsed);
        assert!(simulation.last_events().is_empty());
    }

    assert_eq!(simulation.summary(), summary);
    assert_eq!(simulation.list_robots(), robots);
    assert_eq!(simulation.list_obstacles(), obstacles);
    assert_eq!(simulation.current_step(), step + 3);
}

#[test]
fn running_ticks_advance_by_exactly_one() {
    let config = WorldConfig::default().with_seed(42);
    let mut simulation = Simulation::initialize(&config).expect("valid config");

    let mut previous = simulation.summary();
    while !simulation.is_finished() {
        let report = simulation.advance_tick().expect("advance");
        let current = simulation.summary();
        assert_eq!(report.ticks_elapsed, previous.ticks_elapsed + 1);
        assert!(current.total_moves >= previous.total_moves);
        assert!(current.boxes_dropped >= previous.boxes_dropped);
        assert_eq!(simulation.box_census().total(), config.box_count);
        previous = current;
    }

    assert!(previous.ticks_elapsed <= config.tick_budget);
    assert!(
        previous.ticks_elapsed == config.tick_budget
            || previous.boxes_dropped == config.box_count
    );
}

#[test]
fn every_robot_acts_once_per_tick_in_id_order() {
    let config = WorldConfig::default().with_seed(5);
    let mut simulation = Simulation::initialize(&config).expect("valid config");
    let _ = simulation.advance_tick().expect("advance");

    let acting: Vec<_> = simulation
        .last_events()
        .iter()
        .filter_map(|event| match *event {
            Event::RobotMoved { robot, .. }
            | Event::RobotStayed { robot, .. }
            | Event::BoxPickedUp { robot, .. }
            | Event::BoxDropped { robot, .. } => Some(robot),
            _ => None,
        })
        .collect();
    let expected: Vec<_> = simulation.list_robots().iter().map(|robot| robot.id).collect();

    assert_eq!(acting, expected);
    assert!(simulation
        .last_events()
        .contains(&Event::TickCompleted { ticks_elapsed: 1 }));
}

#[test]
fn moves_counter_matches_move_events() {
    let config = WorldConfig::default().with_seed(9);
    let mut simulation = Simulation::initialize(&config).expect("valid config");

    let mut counted = 0_u64;
    for _ in 0..20 {
        let _ = simulation.advance_tick().expect("advance");
        counted += simulation
            .last_events()
            .iter()
            .filter(|event| matches!(event, Event::RobotMoved { .. }))
            .count() as u64;
    }

    assert_eq!(simulation.total_moves(), counted);
}

#[test]
fn invalid_config_is_rejected_before_any_state_exists() {
    let config = WorldConfig::new(5, 1, 10, 5, 5, 50);
    assert!(Simulation::initialize(&config).is_err());
}
