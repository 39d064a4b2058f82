//! Query-serving core of the Pythia source browser.
//!
//! Pythia loads a fixed analysis scope at start-up and answers browser
//! requests over HTTP: it lists the in-scope files, renders them with an
//! optional highlighted selection, and forwards analysis queries to an
//! oracle. Every path taken from a request is checked against the scope
//! before the file system or the oracle is touched, and queries run one at a
//! time because the oracle's model is not safe for concurrent use.
//!
//! The pieces, in request order:
//!
//! - [`scope`] decides whether a path may be served.
//! - [`resolve`] turns `path:#start,#end` positions and `line.col-line.col`
//!   selections into byte offsets.
//! - [`dispatch`] serialises access to the oracle.
//! - [`format`] renders a result as JSON or plain text.
//! - [`transport`] maps HTTP routes onto the above.
//!
//! [`bootstrap_with`] wires them together from a [`pythia_config::Config`]
//! and reports lifecycle events through a [`HealthReporter`].

mod bootstrap;
pub mod dispatch;
pub mod format;
mod health;
pub mod resolve;
pub mod scope;
pub mod source;
pub mod telemetry;
pub mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Pythia, StaticConfigLoader, SystemConfigLoader, bootstrap,
    bootstrap_with,
};
pub use dispatch::{DispatcherState, QueryDispatcher, QueryError};
pub use format::{Formatted, OutputFormat, format_result};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use scope::Scope;
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{AppState, HttpListener, ServeError, router};

#[cfg(test)]
mod tests;
