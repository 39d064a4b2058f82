//! Serialised access to the oracle.

use std::sync::{Arc, Mutex, TryLockError};

use tracing::debug;

use pythia_oracle::{Oracle, QueryMode, QueryResult};

use crate::resolve::QueryPos;
use crate::scope::Scope;

use super::DISPATCH_TARGET;
use super::errors::QueryError;

/// Whether a query currently holds the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    /// No query is running.
    Idle,
    /// A query holds the exclusive section.
    Querying,
}

/// Runs queries against an oracle one at a time.
///
/// The oracle is reachable only through [`QueryDispatcher::dispatch`]. The
/// lock is held for the whole query, from resolving the position to
/// producing the result, and is released on every path including failure.
#[derive(Debug)]
pub struct QueryDispatcher<O = Box<dyn Oracle>> {
    oracle: Mutex<O>,
    scope: Arc<Scope>,
}

impl<O> QueryDispatcher<O>
where
    O: Oracle,
{
    /// Creates a dispatcher guarding `oracle`.
    pub fn new(oracle: O, scope: Arc<Scope>) -> Self {
        Self {
            oracle: Mutex::new(oracle),
            scope,
        }
    }

    /// The analysis scope positions are checked against.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Reports whether a query is running.
    pub fn state(&self) -> DispatcherState {
        match self.oracle.try_lock() {
            Err(TryLockError::WouldBlock) => DispatcherState::Querying,
            Ok(_) | Err(TryLockError::Poisoned(_)) => DispatcherState::Idle,
        }
    }

    /// Runs one query.
    ///
    /// The scope-summary mode ignores `raw_pos` and asks the oracle about the
    /// whole scope. Any other mode parses `raw_pos`, checks its path against
    /// the scope and then resolves and runs the query under the lock.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedPosition`] or
    /// [`QueryError::ScopeViolation`] without touching the oracle, and
    /// [`QueryError::Resolution`] or [`QueryError::Engine`] carrying the
    /// oracle's message verbatim. Nothing is retried.
    pub fn dispatch(
        &self,
        mode: &QueryMode,
        raw_pos: &str,
    ) -> Result<Box<dyn QueryResult>, QueryError> {
        if mode.is_scope_summary() {
            debug!(target: DISPATCH_TARGET, mode = %mode, "dispatching scope query");
            return self.with_oracle(|oracle| {
                oracle
                    .query_scope(mode, self.scope.files())
                    .map_err(QueryError::Engine)
            });
        }

        let pos = QueryPos::parse(raw_pos)?;
        if self.scope.is_forbidden(pos.path()) {
            debug!(target: DISPATCH_TARGET, path = pos.path(), "position outside scope");
            return Err(QueryError::scope_violation(pos.path()));
        }

        debug!(target: DISPATCH_TARGET, mode = %mode, pos = %pos, "dispatching query");
        let span = pos.into_span();
        self.with_oracle(|oracle| {
            let resolved = oracle.resolve(&span).map_err(QueryError::Resolution)?;
            oracle.query(mode, &resolved).map_err(QueryError::Engine)
        })
    }

    /// Executes a closure with exclusive access to the oracle.
    fn with_oracle<F, R>(&self, f: F) -> Result<R, QueryError>
    where
        F: FnOnce(&mut O) -> Result<R, QueryError>,
    {
        let mut guard = self
            .oracle
            .lock()
            .map_err(|_| QueryError::internal("oracle lock poisoned"))?;
        let outcome = f(&mut guard);
        if let Err(error) = &outcome {
            debug!(target: DISPATCH_TARGET, error = %error, "query failed");
        }
        outcome
    }
}
