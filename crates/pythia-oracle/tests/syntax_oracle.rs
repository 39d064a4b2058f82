//! End-to-end queries against a program loaded from disk.

use std::fs;

use pythia_oracle::{
    FileSetLoader, Oracle, OracleError, ProgramLoader, QueryMode, QueryResult, SourceSpan,
    SyntaxOracle,
};
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;

const GREET: &str = "package main\n\nfunc greet(name string) string {\n\treturn name\n}\n";
const MAIN: &str = "package main\n\nfunc main() {\n\tgreet(\"x\")\n}\n";

struct Workspace {
    _dir: TempDir,
    root: String,
    oracle: SyntaxOracle,
}

impl Workspace {
    fn path(&self, name: &str) -> String {
        format!("{}/{name}", self.root)
    }

    fn span(&self, name: &str, needle: &str, source: &str) -> SourceSpan {
        let start = source.find(needle).expect("needle present");
        SourceSpan::new(self.path(name), start, start)
    }

    fn run(&mut self, mode: &str, span: &SourceSpan) -> Result<Box<dyn QueryResult>, OracleError> {
        let pos = self.oracle.resolve(span)?;
        self.oracle.query(&QueryMode::from(mode), &pos)
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("greet.go"), GREET).expect("write greet.go");
    fs::write(dir.path().join("main.go"), MAIN).expect("write main.go");
    let root = fs::canonicalize(dir.path())
        .expect("canonical root")
        .to_str()
        .expect("utf-8 temp path")
        .to_owned();
    let program = FileSetLoader::new()
        .load(std::slice::from_ref(&root))
        .expect("program loads");
    Workspace {
        _dir: dir,
        root,
        oracle: SyntaxOracle::new(program),
    }
}

fn plain(result: &dyn QueryResult) -> String {
    let mut out = Vec::new();
    result.write_plain(&mut out).expect("write to vec");
    String::from_utf8(out).expect("utf-8 output")
}

#[rstest]
fn definition_finds_the_declaration_in_another_file(mut workspace: Workspace) {
    let span = workspace.span("main.go", "greet(\"x\")", MAIN);
    let result = workspace.run("definition", &span).expect("definition");
    assert_eq!(
        plain(result.as_ref()),
        format!(
            "{}:3.6-3.11: defined here as function_declaration greet\n",
            workspace.path("greet.go")
        )
    );
}

#[rstest]
fn referrers_span_every_file(mut workspace: Workspace) {
    let span = workspace.span("greet.go", "greet(name", GREET);
    let result = workspace.run("referrers", &span).expect("referrers");
    assert_eq!(
        result.serial().expect("serial"),
        json!({
            "mode": "referrers",
            "name": "greet",
            "refs": [
                format!("{}:3.6-3.11", workspace.path("greet.go")),
                format!("{}:4.2-4.7", workspace.path("main.go")),
            ],
        })
    );
}

#[rstest]
fn describe_reports_the_enclosing_chain(mut workspace: Workspace) {
    let span = workspace.span("greet.go", "return", GREET);
    let result = workspace.run("describe", &span).expect("describe");
    let value = result.serial().expect("serial");
    assert_eq!(value.get("kind"), Some(&json!("return_statement")));
    let enclosing = value
        .get("enclosing")
        .and_then(|nodes| nodes.as_array())
        .expect("enclosing array");
    assert_eq!(
        enclosing.last().and_then(|node| node.get("kind")),
        Some(&json!("source_file"))
    );
}

#[rstest]
fn scope_summary_lists_every_file(mut workspace: Workspace) {
    let scope = [workspace.root.clone()];
    let result = workspace
        .oracle
        .query_scope(&QueryMode::from("what"), &scope)
        .expect("summary");
    let text = plain(result.as_ref());
    assert!(text.starts_with("-: 2 files in scope\n"), "{text}");
    assert!(text.contains("greet.go:1.1-1.1: go, 1 declarations, 0 syntax errors"));
}

#[rstest]
#[case("callers")]
#[case("")]
fn unknown_modes_are_rejected(mut workspace: Workspace, #[case] mode: &str) {
    let span = workspace.span("greet.go", "greet", GREET);
    let error = workspace.run(mode, &span).err().expect("mode rejected");
    assert_eq!(error, OracleError::invalid_mode(mode));
}

#[rstest]
fn positions_outside_identifiers_fail_analysis(mut workspace: Workspace) {
    let span = workspace.span("greet.go", "{", GREET);
    let error = workspace.run("referrers", &span).err().expect("no identifier");
    assert!(matches!(error, OracleError::Analysis(_)));
    assert!(error.to_string().starts_with("no identifier here: "));
}

#[rstest]
fn resolution_rejects_unknown_files_and_offsets(workspace: Workspace) {
    let unknown = SourceSpan::new(workspace.path("absent.go"), 0, 0);
    assert!(matches!(
        workspace.oracle.resolve(&unknown),
        Err(OracleError::Resolution(_))
    ));

    let beyond = SourceSpan::new(workspace.path("main.go"), 0, MAIN.len() + 1);
    assert!(matches!(
        workspace.oracle.resolve(&beyond),
        Err(OracleError::Resolution(_))
    ));

    let whole = SourceSpan::new(workspace.path("main.go"), 0, MAIN.len());
    assert!(workspace.oracle.resolve(&whole).is_ok());
}
