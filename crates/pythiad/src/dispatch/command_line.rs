//! Command-line rendering of queries for verbose logging.

use pythia_oracle::QueryMode;

use crate::format::OutputFormat;

/// Renders a query as the equivalent `pythia` invocation, e.g.
/// `pythia -mode=describe -pos=/a/x.go:#12 -format=plain ./cmd/tool`.
#[must_use]
pub fn command_line(
    mode: &QueryMode,
    pos: &str,
    format: OutputFormat,
    scope_args: &[String],
) -> String {
    let mut line = format!("pythia -mode={mode} -pos={pos} -format={format}");
    for arg in scope_args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
