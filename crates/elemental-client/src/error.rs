//! Error types for elemental-client.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the Elemental Conductor client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A request or response body was not valid Elemental XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The API answered with a non-success status code.
    #[error("Elemental API returned {status}: {}", messages.join("; "))]
    Api { status: u16, messages: Vec<String> },

    /// The client settings cannot produce a valid request signature.
    #[error("invalid client settings: {0}")]
    InvalidSettings(String),

    /// A job id that cannot be used as a single path segment.
    #[error("invalid job id: {0:?}")]
    InvalidJobId(String),
}

impl Error {
    /// Create an API error from a status code and error messages.
    pub fn api(status: u16, messages: Vec<String>) -> Self {
        Self::Api { status, messages }
    }

    /// HTTP status code of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
