//! HTTP front end.
//!
//! [`router`] maps the four request routes onto the scope guard, the source
//! renderers and the query dispatcher. [`HttpListener`] binds the configured
//! endpoint and serves the router until shutdown is requested.

mod errors;
mod listener;
mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::dispatch::QueryDispatcher;
use crate::scope::Scope;
use crate::source::{PageRenderer, SourceRenderer};

pub use self::errors::ServeError;
pub use self::listener::HttpListener;

const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<QueryDispatcher>,
    scope_args: Arc<[String]>,
    source: Arc<dyn SourceRenderer>,
    pages: Arc<dyn PageRenderer>,
    verbose: bool,
}

impl AppState {
    /// Assembles the handler state. File routes share the dispatcher's scope.
    #[must_use]
    pub fn new(
        dispatcher: Arc<QueryDispatcher>,
        scope_args: impl Into<Arc<[String]>>,
        source: Arc<dyn SourceRenderer>,
        pages: Arc<dyn PageRenderer>,
    ) -> Self {
        Self {
            dispatcher,
            scope_args: scope_args.into(),
            source,
            pages,
            verbose: false,
        }
    }

    /// Logs every query as an equivalent command line when enabled.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The analysis scope.
    #[must_use]
    pub fn scope(&self) -> &Scope {
        self.dispatcher.scope()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("scope", self.scope())
            .field("scope_args", &self.scope_args)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

/// Builds the request router. Every route answers `GET` and `POST`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index).post(routes::index))
        .route("/source", get(routes::source).post(routes::source))
        .route("/file", get(routes::file).post(routes::file))
        .route("/query", get(routes::query).post(routes::query))
        .fallback(routes::not_found)
        .with_state(state)
}
