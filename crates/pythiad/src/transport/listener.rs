//! TCP listener for the HTTP front end.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use pythia_config::HttpEndpoint;

use super::{ServeError, TRANSPORT_TARGET};

/// Listener bound to the configured endpoint.
#[derive(Debug)]
pub struct HttpListener {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl HttpListener {
    /// Binds `endpoint`. An empty host binds every interface.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError::Bind`] if the address cannot be resolved or
    /// bound.
    pub async fn bind(endpoint: &HttpEndpoint) -> Result<Self, ServeError> {
        let (host, port) = endpoint.bind_target();
        let listener = TcpListener::bind((host.as_str(), port))
            .await
            .map_err(|source| ServeError::Bind {
                endpoint: endpoint.to_string(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(ServeError::LocalAddr)?;
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Address the listener is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves `router` until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError::Serve`] if the server stops with an I/O error.
    pub async fn serve<F>(self, router: Router, shutdown: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(target: TRANSPORT_TARGET, addr = %self.local_addr, "serving HTTP");
        axum::serve(
            self.listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServeError::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn binds_an_ephemeral_port() {
        let listener = HttpListener::bind(&HttpEndpoint::new("127.0.0.1", 0))
            .await
            .expect("bind loopback");
        assert!(listener.local_addr().ip().is_loopback());
        assert_ne!(listener.local_addr().port(), 0);
    }

    #[tokio::test]
    async fn reports_the_endpoint_when_binding_fails() {
        let first = HttpListener::bind(&HttpEndpoint::new("127.0.0.1", 0))
            .await
            .expect("bind loopback");
        let taken = HttpEndpoint::new("127.0.0.1", first.local_addr().port());
        let error = HttpListener::bind(&taken)
            .await
            .expect_err("port already bound");
        assert!(matches!(error, ServeError::Bind { ref endpoint, .. } if *endpoint == taken.to_string()));
    }
}
