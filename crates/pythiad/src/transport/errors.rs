//! Error types for the HTTP listener.

use std::io;

use thiserror::Error;

/// Errors surfaced while binding or running the HTTP listener.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The configured endpoint could not be bound.
    #[error("failed to bind HTTP listener at {endpoint}: {source}")]
    Bind {
        /// Endpoint as configured.
        endpoint: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The bound socket did not report its address.
    #[error("failed to read listener address: {0}")]
    LocalAddr(#[source] io::Error),
    /// The server stopped with an I/O failure.
    #[error("HTTP server failed: {0}")]
    Serve(#[source] io::Error),
}
