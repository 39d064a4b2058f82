//! Behavioural tests for the query flow from position string to output.

use std::cell::RefCell;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use pythia_oracle::{FileSetLoader, ProgramLoader, QueryMode, SyntaxOracle};

use crate::dispatch::{QueryDispatcher, QueryError};
use crate::format::{OutputFormat, format_result};
use crate::scope::Scope;

use super::support::{GoWorkspace, strip_quotes};

struct QueryWorld {
    workspace: GoWorkspace,
    dispatcher: Option<QueryDispatcher<SyntaxOracle>>,
    outcome: Option<Result<String, QueryError>>,
}

impl QueryWorld {
    fn run(&mut self, mode: &str, pos: &str) {
        let dispatcher = self.dispatcher.as_ref().expect("program loaded");
        let outcome = dispatcher
            .dispatch(&QueryMode::from(mode), pos)
            .map(|result| {
                let formatted = format_result(result.as_ref(), OutputFormat::Plain);
                String::from_utf8(formatted.body).expect("plain output is UTF-8")
            });
        self.outcome = Some(outcome);
    }

    fn error(&self) -> &QueryError {
        match self.outcome.as_ref() {
            Some(Err(error)) => error,
            other => panic!("expected a query error, got {other:?}"),
        }
    }
}

#[fixture]
fn world() -> RefCell<QueryWorld> {
    RefCell::new(QueryWorld {
        workspace: GoWorkspace::new(),
        dispatcher: None,
        outcome: None,
    })
}

#[given("a loaded Go program")]
fn given_loaded_program(world: &RefCell<QueryWorld>) {
    let mut world = world.borrow_mut();
    let program = FileSetLoader::new()
        .load(&[world.workspace.root_arg()])
        .expect("load workspace");
    let scope = Arc::new(Scope::new(program.paths()));
    world.dispatcher = Some(QueryDispatcher::new(SyntaxOracle::new(program), scope));
}

#[when("I query {mode} at {needle} in {file}")]
fn when_query_at(world: &RefCell<QueryWorld>, mode: String, needle: String, file: String) {
    let mut world = world.borrow_mut();
    let pos = world
        .workspace
        .pos_of(strip_quotes(&file), strip_quotes(&needle));
    world.run(strip_quotes(&mode), &pos);
}

#[when("I query {mode} in a file outside the scope")]
fn when_query_outside(world: &RefCell<QueryWorld>, mode: String) {
    let mut world = world.borrow_mut();
    let pos = format!("{}:#0", world.workspace.path_of("missing.go"));
    world.run(strip_quotes(&mode), &pos);
}

#[when("I query {mode} with position {pos}")]
fn when_query_with_position(world: &RefCell<QueryWorld>, mode: String, pos: String) {
    world
        .borrow_mut()
        .run(strip_quotes(&mode), strip_quotes(&pos));
}

#[then("the plain output contains {text}")]
fn then_output_contains(world: &RefCell<QueryWorld>, text: String) {
    let world = world.borrow();
    let output = match world.outcome.as_ref() {
        Some(Ok(output)) => output,
        other => panic!("expected query output, got {other:?}"),
    };
    let expected = strip_quotes(&text);
    assert!(
        output.contains(expected),
        "output {output:?} does not contain {expected:?}"
    );
}

#[then("the query is forbidden")]
fn then_query_forbidden(world: &RefCell<QueryWorld>) {
    assert!(world.borrow().error().is_forbidden());
}

#[then("the query fails with a message mentioning {text}")]
fn then_query_fails(world: &RefCell<QueryWorld>, text: String) {
    let world = world.borrow();
    let error = world.error();
    assert!(!error.is_forbidden());
    let expected = strip_quotes(&text);
    assert!(
        error.to_string().contains(expected),
        "error {error} does not mention {expected:?}"
    );
}

#[scenario(
    path = "tests/features/query_dispatch.feature",
    name = "Referrers lists every use across the scope"
)]
fn referrers_across_scope(world: RefCell<QueryWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/query_dispatch.feature",
    name = "Definition points at the declaration"
)]
fn definition_points_at_declaration(world: RefCell<QueryWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/query_dispatch.feature",
    name = "Scope summary ignores the position"
)]
fn scope_summary_ignores_position(world: RefCell<QueryWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/query_dispatch.feature",
    name = "Positions outside the scope are forbidden"
)]
fn outside_positions_forbidden(world: RefCell<QueryWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/query_dispatch.feature",
    name = "Malformed positions are reported"
)]
fn malformed_positions_reported(world: RefCell<QueryWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/query_dispatch.feature",
    name = "Unknown modes are reported by the engine"
)]
fn unknown_modes_reported(world: RefCell<QueryWorld>) {
    let _ = world;
}
