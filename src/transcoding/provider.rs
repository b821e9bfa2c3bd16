//! Trait definition and types for transcoding providers.
//!
//! This module defines the [`TranscodingProvider`] trait that every remote
//! transcoding backend implements, together with the provider-agnostic
//! request and status types exchanged with callers.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::{ProviderError, Result};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A provider-agnostic request to transcode one source into one output per
/// preset.
///
/// Presets are order-significant: output `i` is always produced by
/// `presets()[i]`. A request cannot be modified once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeRequest {
    source: String,
    presets: Vec<String>,
}

impl TranscodeRequest {
    /// Build a request, validating that `source` is an absolute URL naming a
    /// file and that at least one non-blank preset is given.
    ///
    /// The source is kept exactly as given; parsing only validates it.
    pub fn new<S, P>(source: S, presets: P) -> Result<Self>
    where
        S: AsRef<str>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let source = source.as_ref();
        let url = Url::parse(source).map_err(|e| {
            ProviderError::invalid_request(format!("source {source:?} is not a valid URL: {e}"))
        })?;
        if url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map_or(true, str::is_empty)
        {
            return Err(ProviderError::invalid_request(format!(
                "source {source:?} does not name a file"
            )));
        }

        let presets: Vec<String> = presets.into_iter().map(Into::into).collect();
        if presets.is_empty() {
            return Err(ProviderError::invalid_request("at least one preset is required"));
        }
        if let Some(pos) = presets.iter().position(|p| p.trim().is_empty()) {
            return Err(ProviderError::invalid_request(format!(
                "preset at position {pos} is blank"
            )));
        }

        Ok(Self {
            source: source.to_string(),
            presets,
        })
    }

    /// Source media URL.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Preset identifiers in output order.
    pub fn presets(&self) -> &[String] {
        &self.presets
    }

    /// Last path segment of the source, e.g. `video.mov`.
    pub fn file_name(&self) -> &str {
        file_name(&self.source)
    }

    /// Source file name without its extension, e.g. `video` for `video.mov`.
    ///
    /// A leading dot does not start an extension, so `.hidden` stays as is.
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[..idx],
            _ => name,
        }
    }
}

/// Last path segment of a raw URL, ignoring any query or fragment.
fn file_name(source: &str) -> &str {
    let path = source.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/').next().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Canonical job status shared by every provider.
///
/// `Unknown` means the provider reported something unrecognised; callers must
/// not treat it as terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Queued,
    Started,
    Finished,
    Canceled,
    Failed,
    Unknown,
}

impl Status {
    /// Whether the job can no longer change state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Canceled | Self::Failed)
    }

    /// Lowercase name, as used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Started => "started",
            Self::Finished => "finished",
            Self::Canceled => "canceled",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a job as reported by a provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatus {
    /// Name of the provider running the job.
    pub provider_name: String,
    /// The provider's identifier for the job.
    pub provider_job_id: String,
    /// Canonical status.
    pub status: Status,
    /// Raw provider details (remote status string, progress, errors, ...).
    pub provider_status: BTreeMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// A preset available on a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetSummary {
    /// Identifier to pass in [`TranscodeRequest`] presets.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Output container, if the provider reports one.
    pub container: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Async trait that all transcoding providers must implement.
///
/// Implementations hold no mutable state between calls, so a single instance
/// can be shared behind an `Arc` and used concurrently. Transport failures are
/// returned as-is; providers never retry.
#[async_trait]
pub trait TranscodingProvider: Send + Sync {
    /// Short, lowercase identifier for this provider.
    fn name(&self) -> &'static str;

    /// Submit a job transcoding `request.source()` with every preset.
    async fn transcode(&self, request: &TranscodeRequest) -> Result<JobStatus>;

    /// Fetch the current status of a previously submitted job.
    async fn job_status(&self, job_id: &str) -> Result<JobStatus>;

    /// Ask the provider to stop a job.
    async fn cancel_job(&self, job_id: &str) -> Result<()>;

    /// List presets the provider knows about.
    async fn list_presets(&self) -> Result<Vec<PresetSummary>>;

    /// Verify the provider is reachable and accepts our credentials.
    async fn healthcheck(&self) -> Result<()>;
}
