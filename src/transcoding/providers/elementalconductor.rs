//! Elemental Conductor transcoding provider.
//!
//! Implements [`TranscodingProvider`] on top of the Conductor XML API via
//! [`elemental_client`].
//!
//! Jobs follow fixed conventions:
//! - one stream assembly per preset, named `stream_{i}` in preset order;
//! - one output per stream, suffixed `_{preset}` and written as `.mp4`;
//! - outputs land in `{destination}/{source file stem}`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use elemental_client::{
    Client, ClientSettings, FileGroupSettings, Input, Job, JobInfo, Location, Output,
    OutputGroup, StreamAssembly,
};
use tracing::debug;

use crate::config::{Config, ElementalConductorConfig};
use crate::transcoding::error::{ProviderError, Result};
use crate::transcoding::provider::{
    JobStatus, PresetSummary, Status, TranscodeRequest, TranscodingProvider,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Name this provider is registered under.
pub const NAME: &str = "elementalconductor";

const DEFAULT_PRIORITY: u32 = 50;
const OUTPUT_GROUP_ORDER: u32 = 1;
const OUTPUT_GROUP_TYPE: &str = "file_group_settings";
const DEFAULT_EXTENSION: &str = ".mp4";

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Factory registered in the [`ProviderRegistry`](crate::transcoding::ProviderRegistry).
pub fn factory(config: &Config) -> Result<Box<dyn TranscodingProvider>> {
    Ok(Box::new(ElementalConductorProvider::from_config(config)?))
}

/// Whether `config` holds everything needed to authenticate against Conductor.
pub fn is_valid_config(config: &ElementalConductorConfig) -> bool {
    !config.host.is_empty()
        && !config.user_login.is_empty()
        && !config.api_key.is_empty()
        && config.auth_expires > 0
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// Elemental Conductor provider.
///
/// Holds a snapshot of its configuration section and a client built from it;
/// neither changes after construction.
#[derive(Debug, Clone)]
pub struct ElementalConductorProvider {
    client: Client,
    config: ElementalConductorConfig,
}

impl ElementalConductorProvider {
    /// Build a provider from the `[elemental_conductor]` section of `config`.
    ///
    /// Fails with [`ProviderError::InvalidConfig`] if the section is missing,
    /// or if host, user login or API key is empty, or `auth_expires` is zero
    /// or too large to sign requests with.
    pub fn from_config(config: &Config) -> Result<Self> {
        let section = config
            .elemental_conductor
            .as_ref()
            .filter(|section| is_valid_config(section))
            .ok_or(ProviderError::InvalidConfig)?;

        let client = Client::new(ClientSettings {
            host: section.host.clone(),
            user_login: section.user_login.clone(),
            api_key: section.api_key.clone(),
            auth_expires: section.auth_expires_duration(),
        })
        .map_err(|e| match e {
            elemental_client::Error::InvalidSettings(_) => ProviderError::InvalidConfig,
            e => e.into(),
        })?;

        Ok(Self {
            client,
            config: section.clone(),
        })
    }

    /// Configuration snapshot this provider was built from.
    pub fn config(&self) -> &ElementalConductorConfig {
        &self.config
    }

    /// Underlying Conductor client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Build the Conductor job for `request`.
    pub fn new_job(&self, request: &TranscodeRequest) -> Job {
        let (outputs, streams): (Vec<Output>, Vec<StreamAssembly>) = request
            .presets()
            .iter()
            .enumerate()
            .map(|(i, preset)| {
                let name = format!("stream_{i}");
                let output = Output {
                    stream_assembly_name: name.clone(),
                    name_modifier: format!("_{preset}"),
                    order: i as u32,
                    extension: DEFAULT_EXTENSION.to_string(),
                };
                let stream = StreamAssembly {
                    name,
                    preset: preset.clone(),
                };
                (output, stream)
            })
            .unzip();

        Job {
            input: Input {
                file_input: self.location(request.source()),
            },
            priority: DEFAULT_PRIORITY,
            output_group: OutputGroup {
                order: OUTPUT_GROUP_ORDER,
                file_group_settings: FileGroupSettings {
                    destination: self.location(&self.destination(request)),
                },
                group_type: OUTPUT_GROUP_TYPE.to_string(),
                output: outputs,
            },
            stream_assembly: streams,
        }
    }

    fn destination(&self, request: &TranscodeRequest) -> String {
        format!(
            "{}/{}",
            self.config.destination.trim_end_matches('/'),
            request.file_stem()
        )
    }

    fn location(&self, uri: &str) -> Location {
        Location {
            uri: uri.to_string(),
            username: self.config.access_key_id.clone(),
            password: self.config.secret_access_key.clone(),
        }
    }

    fn job_status_from(&self, job_id: String, status: Status, info: &JobInfo) -> JobStatus {
        JobStatus {
            provider_name: NAME.to_string(),
            provider_job_id: job_id,
            status,
            provider_status: provider_status(info),
        }
    }
}

/// Map a Conductor job status to the canonical [`Status`].
///
/// Matching is exact; anything unrecognised is [`Status::Unknown`].
pub fn status_map(status: &str) -> Status {
    match status {
        "pending" => Status::Queued,
        "preprocessing" | "running" | "postprocessing" => Status::Started,
        "complete" => Status::Finished,
        "cancelled" => Status::Canceled,
        "error" => Status::Failed,
        _ => Status::Unknown,
    }
}

/// Raw details worth surfacing next to the canonical status.
fn provider_status(info: &JobInfo) -> BTreeMap<String, serde_json::Value> {
    let mut details = BTreeMap::new();
    if let Some(status) = &info.status {
        details.insert("status".to_string(), status.clone().into());
    }
    if let Some(pct) = info.pct_complete {
        details.insert("pct_complete".to_string(), pct.into());
    }
    if let Some(submitted) = &info.submitted {
        details.insert("submitted".to_string(), submitted.clone().into());
    }
    let errors = info.error_messages();
    if !errors.is_empty() {
        details.insert("error_messages".to_string(), errors.into());
    }
    details
}

#[async_trait]
impl TranscodingProvider for ElementalConductorProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn transcode(&self, request: &TranscodeRequest) -> Result<JobStatus> {
        let job = self.new_job(request);
        debug!(
            source = request.source(),
            presets = request.presets().len(),
            "Submitting Elemental Conductor job"
        );

        let info = self.client.post_job(&job).await?;
        let job_id = info.id().ok_or(ProviderError::MissingJobId(NAME))?.to_string();
        debug!(job_id = %job_id, "Elemental Conductor job created");

        Ok(self.job_status_from(job_id, Status::Queued, &info))
    }

    async fn job_status(&self, job_id: &str) -> Result<JobStatus> {
        let info = self.client.get_job(job_id).await?;
        let status = status_map(info.status.as_deref().unwrap_or_default());
        debug!(job_id, remote = ?info.status, %status, "Elemental Conductor job status");

        Ok(self.job_status_from(job_id.to_string(), status, &info))
    }

    async fn cancel_job(&self, job_id: &str) -> Result<()> {
        self.client.cancel_job(job_id).await?;
        debug!(job_id, "Elemental Conductor job cancelled");
        Ok(())
    }

    async fn list_presets(&self) -> Result<Vec<PresetSummary>> {
        let list = self.client.get_presets().await?;
        Ok(list
            .presets
            .into_iter()
            .map(|preset| PresetSummary {
                id: preset
                    .id()
                    .map(str::to_string)
                    .unwrap_or_else(|| preset.name.clone()),
                name: preset.name,
                container: preset.container,
            })
            .collect())
    }

    async fn healthcheck(&self) -> Result<()> {
        let nodes = self.client.get_nodes().await?;
        debug!(nodes = nodes.nodes.len(), "Elemental Conductor reachable");
        Ok(())
    }
}
