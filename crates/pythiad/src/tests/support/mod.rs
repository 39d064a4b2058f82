//! Shared fixtures for the behavioural suites.

mod config_loader;
mod reporter;
mod workspace;

pub use config_loader::FailingConfigLoader;
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use workspace::GoWorkspace;

/// Removes the quotes Gherkin step arguments are written with.
pub fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}
