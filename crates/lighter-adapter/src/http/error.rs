/*
[INPUT]:  Error sources (client configuration, reqwest builder, URL parsing, API envelopes)
[OUTPUT]: Structured error types with configuration/API classification
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new options or new error sources
*/

use thiserror::Error;

/// Main error type for the Lighter adapter
#[derive(Error, Debug)]
pub enum LighterError {
    /// Base endpoint was empty at build time
    #[error("Endpoint must not be empty")]
    EmptyEndpoint,

    /// Proxy target could not be parsed as a URL
    #[error("Invalid proxy URL {url:?}: {source}")]
    InvalidProxyUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Proxy target parsed but cannot be used as a proxy
    #[error("Unusable proxy URL {url:?}: {reason}")]
    UnusableProxyUrl { url: String, reason: String },

    /// Local bind address is not a valid IP address
    #[error("Invalid local address {addr:?}: {source}")]
    InvalidLocalAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Default header name or value rejected
    #[error("Invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// reqwest failed to build the transport
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// API returned a non-OK result envelope
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },
}

impl LighterError {
    /// Check if the error was caused by client misconfiguration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LighterError::EmptyEndpoint
                | LighterError::InvalidProxyUrl { .. }
                | LighterError::UnusableProxyUrl { .. }
                | LighterError::InvalidLocalAddress { .. }
                | LighterError::InvalidHeader { .. }
                | LighterError::Config(_)
        )
    }
}

/// Result type alias for Lighter operations
pub type Result<T> = std::result::Result<T, LighterError>;
