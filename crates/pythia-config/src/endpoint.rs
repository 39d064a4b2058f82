use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Host used when an address omits the host part (`:8080`).
const ALL_INTERFACES: &str = "0.0.0.0";

/// Address the HTTP front end listens on.
///
/// Accepts `host:port`, `[v6-host]:port` and the bare `:port` shorthand, which
/// binds every interface.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HttpEndpoint {
    host: String,
    port: u16,
}

impl HttpEndpoint {
    /// Builds an endpoint from its parts. An empty host binds all interfaces.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host as written by the user; empty for the `:port` shorthand.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Host and port in a form accepted by socket address resolution.
    #[must_use]
    pub fn bind_target(&self) -> (String, u16) {
        let host = if self.host.is_empty() {
            ALL_INTERFACES.to_owned()
        } else {
            self.host.clone()
        };
        (host, self.port)
    }
}

impl fmt::Display for HttpEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(formatter, "[{}]:{}", self.host, self.port)
        } else {
            write!(formatter, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for HttpEndpoint {
    type Err = EndpointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (host, port) = trimmed
            .rsplit_once(':')
            .ok_or_else(|| EndpointParseError::MissingPort(input.to_owned()))?;
        if port.is_empty() {
            return Err(EndpointParseError::MissingPort(input.to_owned()));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| EndpointParseError::InvalidPort(input.to_owned()))?;

        let host = match host.strip_prefix('[') {
            Some(rest) => rest
                .strip_suffix(']')
                .ok_or_else(|| EndpointParseError::InvalidHost(input.to_owned()))?,
            None if host.contains(':') => {
                return Err(EndpointParseError::InvalidHost(input.to_owned()));
            }
            None => host,
        };

        Ok(Self::new(host, port))
    }
}

/// Errors encountered while parsing an [`HttpEndpoint`] from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointParseError {
    /// No `:port` suffix was present.
    #[error("missing port in '{0}'")]
    MissingPort(String),
    /// The port was not a number in `0..=65535`.
    #[error("invalid port in '{0}'")]
    InvalidPort(String),
    /// An IPv6 host was not bracketed correctly.
    #[error("invalid host in '{0}'")]
    InvalidHost(String),
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("localhost:8080", "localhost", 8080)]
    #[case(":6060", "", 6060)]
    #[case("127.0.0.1:0", "127.0.0.1", 0)]
    #[case("[::1]:9000", "::1", 9000)]
    fn parses_endpoints(#[case] input: &str, #[case] host: &str, #[case] port: u16) {
        let endpoint: HttpEndpoint = input.parse().expect("endpoint should parse");
        assert_eq!(endpoint.host(), host);
        assert_eq!(endpoint.port(), port);
    }

    #[rstest]
    #[case("localhost")]
    #[case("localhost:")]
    #[case("localhost:http")]
    #[case("localhost:70000")]
    #[case("::1:80")]
    #[case("[::1:80")]
    fn rejects_malformed_endpoints(#[case] input: &str) {
        assert!(input.parse::<HttpEndpoint>().is_err(), "{input} should fail");
    }

    #[test]
    fn shorthand_binds_all_interfaces() {
        let endpoint: HttpEndpoint = ":8080".parse().expect("shorthand should parse");
        assert_eq!(endpoint.bind_target(), ("0.0.0.0".to_owned(), 8080));
    }

    #[rstest]
    #[case("localhost:8080")]
    #[case(":8080")]
    #[case("[::1]:8080")]
    fn display_matches_input(#[case] input: &str) {
        let endpoint: HttpEndpoint = input.parse().expect("endpoint should parse");
        assert_eq!(endpoint.to_string(), input);
    }
}
