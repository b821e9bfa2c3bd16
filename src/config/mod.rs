mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Prefix of the environment variables that override file settings.
const ENV_PREFIX: &str = "ELEMENTALCONDUCTOR_";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./transcoding-api.toml",
        "~/.config/transcoding-api/config.toml",
        "/etc/transcoding-api/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Apply `ELEMENTALCONDUCTOR_*` environment variables on top of `config`.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

type StringField = fn(&mut ElementalConductorConfig) -> &mut String;

/// Apply overrides looked up through `lookup`, keyed by full variable name.
///
/// The provider section is created as soon as one variable is present.
pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

    let strings: [(&str, StringField); 6] = [
        ("HOST", |c| &mut c.host),
        ("USER_LOGIN", |c| &mut c.user_login),
        ("API_KEY", |c| &mut c.api_key),
        ("AWS_ACCESS_KEY_ID", |c| &mut c.access_key_id),
        ("AWS_SECRET_ACCESS_KEY", |c| &mut c.secret_access_key),
        ("DESTINATION", |c| &mut c.destination),
    ];
    let string_overrides: Vec<(StringField, String)> = strings
        .into_iter()
        .filter_map(|(name, field)| var(name).map(|value| (field, value)))
        .collect();
    let auth_expires = var("AUTH_EXPIRES")
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid {ENV_PREFIX}AUTH_EXPIRES: {value:?}"))
        })
        .transpose()?;

    if string_overrides.is_empty() && auth_expires.is_none() {
        return Ok(());
    }

    let section = config.elemental_conductor.get_or_insert_with(Default::default);
    for (field, value) in string_overrides {
        *field(section) = value;
    }
    if let Some(auth_expires) = auth_expires {
        section.auth_expires = auth_expires;
    }

    Ok(())
}
