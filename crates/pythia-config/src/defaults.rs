use crate::endpoint::HttpEndpoint;

/// Default TCP port for the HTTP front end.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default host the HTTP front end binds to.
pub const DEFAULT_HTTP_HOST: &str = "localhost";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Compact
}

/// Computes the default HTTP endpoint.
#[must_use]
pub fn default_http_endpoint() -> HttpEndpoint {
    HttpEndpoint::new(DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT)
}
