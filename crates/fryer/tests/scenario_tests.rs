//! Shipped scenarios run end to end

use fryer::Fryer;
use fryer::scenario::{ScenarioAction, ScenarioDefinition, ScenarioExecutor, ScenarioExecutorConfig};
use fryer_core::seeded_rng;

fn executor() -> ScenarioExecutor {
    ScenarioExecutor::with_config(ScenarioExecutorConfig {
        sample_interval_secs: 30.0,
        ..ScenarioExecutorConfig::default()
    })
}

#[test]
fn test_default_scenario_parses() {
    let scenario = ScenarioDefinition::from_ron(include_str!("../scenarios/default.ron"))
        .expect("default scenario");
    assert_eq!(scenario.duration_secs, Some(200.0));
    assert_eq!(scenario.actions[0].action, ScenarioAction::DropBody);
}

#[test]
fn test_default_scenario_fries_and_removes() {
    let scenario = ScenarioDefinition::from_ron(include_str!("../scenarios/default.ron"))
        .expect("default scenario");
    let mut fryer = Fryer::default();

    let report = executor()
        .execute_scenario(&scenario, &mut fryer, &mut seeded_rng(7))
        .expect("run");

    assert_eq!(report.actions_executed, 5);
    assert!(fryer.body().is_none());
    assert_eq!(fryer.target_temperature(), 185.0);
    assert!(report.census.total_spawned() > 0);
    assert_eq!(report.samples.len(), 7);

    // The fry was sampled mid-run and had browned well before removal
    let last_with_body = report
        .samples
        .iter()
        .filter_map(|s| s.body.as_ref())
        .last()
        .expect("body samples");
    assert!(last_with_body.done);
    assert!(report.log.iter().any(|line| line.contains("Checking colour")));
}

#[test]
fn test_drag_scenario_holds_then_sinks() {
    let scenario =
        ScenarioDefinition::from_ron(include_str!("../scenarios/drag.ron")).expect("drag scenario");
    let mut fryer = Fryer::default();

    let report = executor()
        .execute_scenario(&scenario, &mut fryer, &mut seeded_rng(8))
        .expect("run");

    assert!(!fryer.is_dragging());
    assert!(!fryer.is_paused());
    // 25 of the 30 seconds advanced the fryer
    assert!((report.sim_time - 25.0).abs() < 0.1);

    let floor = fryer.config().geometry.basket_floor;
    let body = fryer.body().expect("body present");
    assert!(body.position.y > floor - 40.0);
}

#[test]
fn test_scenario_file_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("scenario.ron");

    let scenario = ScenarioDefinition::drop_and_fry();
    scenario.to_file(&path).expect("save");
    let loaded = ScenarioDefinition::from_file(&path).expect("load");

    assert_eq!(loaded.name, scenario.name);
    assert_eq!(loaded.actions, scenario.actions);
}

#[test]
fn test_missing_scenario_file_reports_path() {
    let err = ScenarioDefinition::from_file("does/not/exist.ron").expect_err("missing file");
    assert!(format!("{:#}", err).contains("does/not/exist.ron"));
}
