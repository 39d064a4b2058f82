//! Shared configuration for the Pythia query server.
//!
//! Every setting is available as a command-line flag and as a `PYTHIA_*`
//! environment variable. Flags take precedence over the environment, which in
//! turn overrides the built-in defaults. The positional arguments name the
//! files and directories forming the analysis scope.

mod defaults;
mod endpoint;
mod logging;

use std::ffi::OsString;

use clap::Parser;
use thiserror::Error;

pub use defaults::{
    DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT, DEFAULT_LOG_FILTER, default_http_endpoint,
    default_log_filter, default_log_format,
};
pub use endpoint::{EndpointParseError, HttpEndpoint};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for a Pythia run.
#[derive(Debug, Clone, Parser, PartialEq, Eq)]
#[command(
    name = "pythia",
    version,
    about = "Browse source code and query a static analysis oracle from a web browser"
)]
pub struct Config {
    /// HTTP service address, e.g. `localhost:8080` or `:8080`.
    #[arg(
        long = "http",
        env = "PYTHIA_HTTP",
        value_name = "ADDR",
        default_value_t = default_http_endpoint()
    )]
    pub http: HttpEndpoint,

    /// Log every query as an equivalent command line.
    #[arg(short, long, env = "PYTHIA_VERBOSE")]
    pub verbose: bool,

    /// Tracing filter directive, e.g. `info` or `pythiad=debug`.
    #[arg(long, env = "PYTHIA_LOG_FILTER", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,

    /// Log output format: `compact` or `json`.
    #[arg(long, env = "PYTHIA_LOG_FORMAT", default_value_t = default_log_format())]
    pub log_format: LogFormat,

    /// Files and directories forming the analysis scope.
    #[arg(required = true, value_name = "SCOPE")]
    pub scope: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: default_http_endpoint(),
            verbose: false,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: default_log_format(),
            scope: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Cli`] when the arguments are invalid or when
    /// help or version output was requested.
    pub fn load() -> Result<Self, ConfigError> {
        Self::try_parse().map_err(ConfigError::Cli)
    }

    /// Loads configuration from an explicit argument list. The first item is
    /// the program name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Cli`] when the arguments are invalid.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(ConfigError::Cli)
    }

    /// Address the HTTP front end binds to.
    #[must_use]
    pub const fn http(&self) -> &HttpEndpoint {
        &self.http
    }

    /// Tracing filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Selected log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Scope arguments exactly as supplied.
    #[must_use]
    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    /// Whether each query should be logged as a command line.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Argument or environment parsing failed, or help/version was requested.
    #[error(transparent)]
    Cli(clap::Error),
}

impl ConfigError {
    /// Whether the error only carries help or version output for the user.
    #[must_use]
    pub fn is_informational(&self) -> bool {
        match self {
            Self::Cli(error) => matches!(
                error.kind(),
                clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion
                    | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ),
        }
    }
}
