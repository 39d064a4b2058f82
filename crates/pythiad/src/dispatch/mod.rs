//! Query dispatch.
//!
//! [`QueryDispatcher`] owns the oracle behind a mutex so that at most one
//! query runs at a time. Positions are parsed and checked against the scope
//! before the lock is taken; everything that touches the oracle happens while
//! it is held.

mod command_line;
mod dispatcher;
mod errors;

pub use command_line::command_line;
pub use dispatcher::{DispatcherState, QueryDispatcher};
pub use errors::QueryError;

const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
