//! Rendering of query results for the HTTP front end.

use std::fmt;

use pythia_oracle::QueryResult;

/// Output format requested by a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact JSON document.
    Json,
    /// Line-oriented text.
    #[default]
    Plain,
}

impl OutputFormat {
    /// Interprets the `format` request parameter.
    ///
    /// Only `json` selects JSON; anything else, including a missing value,
    /// selects plain text.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("json") => Self::Json,
            _ => Self::Plain,
        }
    }

    /// Parameter spelling of the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Plain => "plain",
        }
    }

    /// Content type of a response body in this format.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Plain => TEXT_PLAIN,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// A rendered response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    /// Body bytes.
    pub body: Vec<u8>,
    /// Content type of `body`.
    pub content_type: &'static str,
}

/// Renders `result` in the requested format.
///
/// Formatting never fails the request: if the result cannot be serialised
/// the error text is returned as plain output, and if plain output stops
/// part way the error text is appended to what was written.
#[must_use]
pub fn format_result(result: &dyn QueryResult, format: OutputFormat) -> Formatted {
    match format {
        OutputFormat::Json => match result.serial().and_then(|value| serde_json::to_vec(&value)) {
            Ok(body) => Formatted {
                body,
                content_type: format.content_type(),
            },
            Err(error) => Formatted {
                body: error.to_string().into_bytes(),
                content_type: TEXT_PLAIN,
            },
        },
        OutputFormat::Plain => {
            let mut body = Vec::new();
            if let Err(error) = result.write_plain(&mut body) {
                body.extend_from_slice(error.to_string().as_bytes());
            }
            Formatted {
                body,
                content_type: TEXT_PLAIN,
            }
        }
    }
}
