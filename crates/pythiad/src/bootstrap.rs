//! Server bootstrap orchestration.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use pythia_config::{Config, ConfigError};
use pythia_oracle::{FileSetLoader, LoadError, Oracle, ProgramLoader, SyntaxOracle};

use crate::dispatch::QueryDispatcher;
use crate::health::HealthReporter;
use crate::scope::Scope;
use crate::source::{BasicPages, HtmlSourceRenderer};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{self, AppState, HttpListener, ServeError};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the server configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`ConfigError`] unchanged.
    fn load(&self) -> Result<Config, ConfigError>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, ConfigError> {
        Config::load()
    }
}

/// Loader that returns a pre-built configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, ConfigError> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: ConfigError,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The analysis scope could not be loaded.
    #[error("failed to load the analysis scope: {source}")]
    Load {
        /// Underlying loader error.
        #[source]
        source: LoadError,
    },
}

/// Result of a successful bootstrap invocation.
pub struct Pythia {
    config: Config,
    state: AppState,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl std::fmt::Debug for Pythia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pythia")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Pythia {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// The loaded analysis scope.
    #[must_use]
    pub fn scope(&self) -> &Scope {
        self.state.scope()
    }

    /// Request router serving this instance.
    #[must_use]
    pub fn router(&self) -> Router {
        transport::router(self.state.clone())
    }

    /// Binds the configured endpoint and serves until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] if the endpoint cannot be bound or the server
    /// fails.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = HttpListener::bind(self.config.http()).await?;
        self.reporter.listener_ready(listener.local_addr());
        let reporter = Arc::clone(&self.reporter);
        let router = self.router();
        listener
            .serve(router, async move {
                shutdown.await;
                reporter.shutdown_requested();
            })
            .await
    }
}

/// Bootstraps the server using the supplied collaborators.
///
/// Loads configuration, installs telemetry, loads the scope named by the
/// configuration and wires the oracle behind a [`QueryDispatcher`]. Every
/// failure is reported to `reporter` before it is returned.
///
/// # Errors
///
/// Returns [`BootstrapError`] for the first step that fails.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    programs: &dyn ProgramLoader,
) -> Result<Pythia, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let program = match programs.load(config.scope()) {
        Ok(program) => program,
        Err(source) => {
            let error = BootstrapError::Load { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let scope = Arc::new(Scope::new(program.paths()));
    let oracle: Box<dyn Oracle> = Box::new(SyntaxOracle::new(program));
    let dispatcher = Arc::new(QueryDispatcher::new(oracle, Arc::clone(&scope)));
    let state = AppState::new(
        dispatcher,
        config.scope(),
        Arc::new(HtmlSourceRenderer),
        Arc::new(BasicPages),
    )
    .with_verbose(config.verbose());
    reporter.bootstrap_succeeded(&config, scope.len());

    Ok(Pythia {
        config,
        state,
        telemetry,
        reporter,
    })
}

/// Bootstraps the server with the default program loader.
///
/// # Errors
///
/// See [`bootstrap_with`].
pub fn bootstrap(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Pythia, BootstrapError> {
    bootstrap_with(loader, reporter, &FileSetLoader::new())
}
