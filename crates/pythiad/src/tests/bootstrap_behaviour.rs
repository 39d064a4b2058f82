//! Behavioural tests for the bootstrap sequence.

use std::cell::RefCell;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use pythia_config::Config;

use crate::bootstrap::{
    BootstrapError, ConfigLoader, Pythia, StaticConfigLoader, bootstrap,
};

use super::support::{FailingConfigLoader, GoWorkspace, HealthEvent, RecordingHealthReporter};

struct BootstrapWorld {
    reporter: Arc<RecordingHealthReporter>,
    loader: Option<Box<dyn ConfigLoader>>,
    workspace: GoWorkspace,
    empty_dir: TempDir,
    outcome: Option<Result<Pythia, BootstrapError>>,
}

impl BootstrapWorld {
    fn config_for(scope: Vec<String>) -> Box<dyn ConfigLoader> {
        Box::new(StaticConfigLoader::new(Config {
            scope,
            ..Config::default()
        }))
    }

    fn pythia(&self) -> &Pythia {
        match self.outcome.as_ref() {
            Some(Ok(pythia)) => pythia,
            other => panic!("bootstrap did not succeed: {other:?}"),
        }
    }
}

#[fixture]
fn world() -> RefCell<BootstrapWorld> {
    RefCell::new(BootstrapWorld {
        reporter: Arc::new(RecordingHealthReporter::default()),
        loader: None,
        workspace: GoWorkspace::new(),
        empty_dir: TempDir::new().expect("create empty directory"),
        outcome: None,
    })
}

#[given("a configuration naming a Go workspace")]
fn given_workspace_config(world: &RefCell<BootstrapWorld>) {
    let mut world = world.borrow_mut();
    let scope = vec![world.workspace.root_arg()];
    world.loader = Some(BootstrapWorld::config_for(scope));
}

#[given("a configuration naming an empty directory")]
fn given_empty_config(world: &RefCell<BootstrapWorld>) {
    let mut world = world.borrow_mut();
    let scope = vec![
        world
            .empty_dir
            .path()
            .to_str()
            .expect("utf-8 directory path")
            .to_owned(),
    ];
    world.loader = Some(BootstrapWorld::config_for(scope));
}

#[given("a failing configuration loader")]
fn given_failing_loader(world: &RefCell<BootstrapWorld>) {
    world.borrow_mut().loader = Some(Box::new(FailingConfigLoader));
}

#[when("the server bootstraps")]
fn when_bootstrap_runs(world: &RefCell<BootstrapWorld>) {
    let mut world = world.borrow_mut();
    let loader = world.loader.take().expect("loader configured");
    let reporter = Arc::clone(&world.reporter);
    world.outcome = Some(bootstrap(loader.as_ref(), reporter));
}

#[then("bootstrap succeeds")]
fn then_bootstrap_succeeds(world: &RefCell<BootstrapWorld>) {
    let world = world.borrow();
    assert!(
        matches!(world.outcome, Some(Ok(_))),
        "bootstrap error: {:?}",
        world.outcome.as_ref().and_then(|outcome| outcome.as_ref().err())
    );
}

#[then("bootstrap fails")]
fn then_bootstrap_fails(world: &RefCell<BootstrapWorld>) {
    assert!(
        matches!(world.borrow().outcome, Some(Err(_))),
        "bootstrap succeeded unexpectedly"
    );
}

#[then("the scope holds {count} files")]
fn then_scope_holds(world: &RefCell<BootstrapWorld>, count: usize) {
    let world = world.borrow();
    let pythia = world.pythia();
    assert_eq!(pythia.scope().len(), count);
    assert!(pythia.scope().contains(&world.workspace.path_of("main.go")));
}

#[then("the reporter recorded bootstrap start")]
fn then_reporter_start(world: &RefCell<BootstrapWorld>) {
    assert!(
        world
            .borrow()
            .reporter
            .events()
            .contains(&HealthEvent::BootstrapStarting),
        "bootstrap start event missing"
    );
}

#[then("the reporter recorded bootstrap success")]
fn then_reporter_success(world: &RefCell<BootstrapWorld>) {
    let events = world.borrow().reporter.events();
    let succeeded = events
        .iter()
        .any(|event| matches!(event, HealthEvent::BootstrapSucceeded { .. }));
    assert!(succeeded, "bootstrap success event missing: {events:?}");
}

#[then("the reporter recorded bootstrap failure")]
fn then_reporter_failure(world: &RefCell<BootstrapWorld>) {
    let events = world.borrow().reporter.events();
    let failed = events
        .iter()
        .any(|event| matches!(event, HealthEvent::BootstrapFailed(_)));
    assert!(failed, "bootstrap failure event missing: {events:?}");
}

#[scenario(
    path = "tests/features/pythia_bootstrap.feature",
    name = "Bootstrap loads the configured scope"
)]
fn bootstrap_loads_scope(world: RefCell<BootstrapWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pythia_bootstrap.feature",
    name = "Bootstrap fails when configuration cannot be loaded"
)]
fn bootstrap_reports_configuration_failure(world: RefCell<BootstrapWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pythia_bootstrap.feature",
    name = "Bootstrap fails when the scope holds no source files"
)]
fn bootstrap_reports_empty_scope(world: RefCell<BootstrapWorld>) {
    let _ = world;
}
