use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub elemental_conductor: Option<ElementalConductorConfig>,
}

/// Settings for the Elemental Conductor provider.
///
/// Every field is optional at parse time so that an incomplete file still
/// loads; the provider factory decides whether the section is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ElementalConductorConfig {
    /// Base URL of the Conductor node
    pub host: String,

    /// API user login
    pub user_login: String,

    /// API key of `user_login`
    pub api_key: String,

    /// Lifetime of a signed API request, in seconds
    pub auth_expires: u64,

    /// Storage access key handed to Conductor for reading sources and
    /// writing outputs
    pub access_key_id: String,

    /// Storage secret key paired with `access_key_id`
    pub secret_access_key: String,

    /// Base location outputs are written under, e.g. `s3://bucket/outputs`
    pub destination: String,
}

impl ElementalConductorConfig {
    pub fn auth_expires_duration(&self) -> Duration {
        Duration::from_secs(self.auth_expires)
    }
}
