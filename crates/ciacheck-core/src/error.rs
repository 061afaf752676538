//! Centralized error types for ciacheck.

use thiserror::Error;

/// Message shown when the URL field is empty.
pub const EMPTY_URL_MESSAGE: &str = "Please enter the URL.";

/// Message shown when the URL field does not parse.
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL.";

/// Message shown for any transport or decoding failure.
pub const CONNECTIVITY_MESSAGE: &str = "Error connecting to server. Please try again.";

/// Local input validation failures, detected before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{}", EMPTY_URL_MESSAGE)]
    EmptyUrl,

    #[error("{}", INVALID_URL_MESSAGE)]
    InvalidUrl,

    #[error("Unknown category '{0}': expected confidentiality, integrity, availability or all")]
    UnknownCategory(String),
}

impl InputError {
    /// The text rendered into the output region.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Failures talking to the analysis backend.
///
/// Both variants surface to the user as [`CONNECTIVITY_MESSAGE`]; the detail
/// only goes to the diagnostic log.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid backend URL '{0}': expected an absolute http(s) URL")]
    InvalidBackendUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Error raised while producing output-region content.
#[derive(Error, Debug)]
pub enum CiaError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Result type for ciacheck operations.
pub type CiaResult<T> = Result<T, CiaError>;
