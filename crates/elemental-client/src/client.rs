//! HTTP transport for the Elemental Conductor REST API.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{ApiErrors, Cancel, Job, JobInfo, NodeList, PresetList};

/// Request timeout for every Conductor API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const XML_CONTENT_TYPE: &str = "application/xml";

/// Connection and authentication settings for a [`Client`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Base URL of the Conductor node, e.g. `https://conductor.example.com`.
    pub host: String,
    /// Login of the API user.
    pub user_login: String,
    /// API key of the API user.
    pub api_key: String,
    /// How long a signed request stays valid after it is created.
    pub auth_expires: Duration,
}

/// Client for the Elemental Conductor API.
///
/// Every request is signed with the `X-Auth-*` headers Conductor expects.
/// The client is cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct Client {
    settings: ClientSettings,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. No network traffic happens until a request is made.
    ///
    /// Fails with [`Error::InvalidSettings`] if `auth_expires` is too large
    /// to express as a unix timestamp.
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let client = Self { settings, http };
        client.expires_at()?;
        Ok(client)
    }

    /// Settings the client was created with.
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Submit a new job.
    pub async fn post_job(&self, job: &Job) -> Result<JobInfo> {
        self.request(Method::POST, "/jobs", Some(job)).await
    }

    /// Fetch a job by id.
    pub async fn get_job(&self, job_id: &str) -> Result<JobInfo> {
        self.request::<(), _>(Method::GET, &job_path(job_id)?, None)
            .await
    }

    /// Cancel a job by id.
    pub async fn cancel_job(&self, job_id: &str) -> Result<JobInfo> {
        let path = format!("{}/cancel", job_path(job_id)?);
        self.request(Method::POST, &path, Some(&Cancel {})).await
    }

    /// List the presets configured on the node.
    pub async fn get_presets(&self) -> Result<PresetList> {
        self.request::<(), _>(Method::GET, "/presets", None).await
    }

    /// List the nodes of the cluster.
    pub async fn get_nodes(&self) -> Result<NodeList> {
        self.request::<(), _>(Method::GET, "/nodes", None).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.settings.host.trim_end_matches('/'), path)
    }

    /// Unix timestamp after which a request signed now stops being accepted.
    fn expires_at(&self) -> Result<i64> {
        let secs = self.settings.auth_expires.as_secs();
        i64::try_from(secs)
            .ok()
            .and_then(|secs| chrono::Utc::now().timestamp().checked_add(secs))
            .ok_or_else(|| {
                Error::InvalidSettings(format!("auth_expires of {secs}s is out of range"))
            })
    }

    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let expires = self.expires_at()?;
        let key = auth_key(
            path,
            &self.settings.user_login,
            &self.settings.api_key,
            expires,
        );

        let mut req = self
            .http
            .request(method.clone(), self.url(path))
            .header(reqwest::header::ACCEPT, XML_CONTENT_TYPE)
            .header(reqwest::header::CONTENT_TYPE, XML_CONTENT_TYPE)
            .header("X-Auth-User", &self.settings.user_login)
            .header("X-Auth-Expires", expires.to_string())
            .header("X-Auth-Key", key);
        if let Some(body) = body {
            req = req.body(quick_xml::se::to_string(body)?);
        }

        debug!(method = %method, path, "Elemental Conductor request");
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &text));
        }
        Ok(quick_xml::de::from_str(&text)?)
    }
}

/// Compute the `X-Auth-Key` header for a request.
///
/// `path` is the request path without the `/api` prefix, e.g. `/jobs/42`.
pub fn auth_key(path: &str, user_login: &str, api_key: &str, expires: i64) -> String {
    let inner = md5::compute(format!("{path}{user_login}{api_key}{expires}"));
    let outer = md5::compute(format!("{api_key}{inner:x}"));
    format!("{outer:x}")
}

/// API path of a job, rejecting ids that would not stay a single segment.
fn job_path(job_id: &str) -> Result<String> {
    let valid = !matches!(job_id, "" | "." | "..")
        && job_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid {
        return Err(Error::InvalidJobId(job_id.to_string()));
    }
    Ok(format!("/jobs/{job_id}"))
}

fn api_error(status: StatusCode, body: &str) -> Error {
    let mut messages = quick_xml::de::from_str::<ApiErrors>(body)
        .map(|errors| errors.messages)
        .unwrap_or_default();
    if messages.is_empty() && !body.trim().is_empty() {
        messages.push(body.trim().to_string());
    }
    Error::api(status.as_u16(), messages)
}
