//! Error type shared by every transcoding provider.

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors returned by providers, their factories, and the registry.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The configuration lacks something the provider needs. Returned by
    /// factories before any connection is attempted.
    #[error("invalid provider configuration")]
    InvalidConfig,

    /// The transcode request was rejected before reaching a provider.
    #[error("invalid transcode request: {0}")]
    InvalidRequest(String),

    /// No factory is registered under the requested name.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// The remote service accepted a job without telling us its id.
    #[error("{0} accepted the job but returned no job id")]
    MissingJobId(&'static str),

    /// Failure talking to Elemental Conductor, passed through untouched.
    #[error(transparent)]
    ElementalConductor(#[from] elemental_client::Error),
}

impl ProviderError {
    /// Create an [`InvalidRequest`](Self::InvalidRequest) error.
    pub fn invalid_request<S: Into<String>>(msg: S) -> Self {
        Self::InvalidRequest(msg.into())
    }
}
