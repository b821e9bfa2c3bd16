mod cli;

use transcoding_api::config;
use transcoding_api::transcoding::{
    ProviderError, ProviderRegistry, TranscodeRequest, TranscodingProvider,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;
use std::future::Future;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "transcoding_api=trace,elemental_client=debug".to_string()
        } else {
            "transcoding_api=info,elemental_client=warn".to_string()
        }
    });

    // Logs go to stderr so command output on stdout stays machine readable.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let registry = ProviderRegistry::with_builtin();
    let provider_name = cli.provider.as_str();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Transcode { source, presets } => {
            block_on(transcode(&registry, provider_name, config_path, &source, presets))
        }
        Commands::Status { job_id } => {
            block_on(job_status(&registry, provider_name, config_path, &job_id))
        }
        Commands::Cancel { job_id } => {
            block_on(cancel_job(&registry, provider_name, config_path, &job_id))
        }
        Commands::Presets => block_on(list_presets(&registry, provider_name, config_path)),
        Commands::Healthcheck => block_on(healthcheck(&registry, provider_name, config_path)),
        Commands::Validate => validate(&registry, provider_name, config_path),
        Commands::Providers => {
            for name in registry.names() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Version => {
            println!("transcoding-api {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn block_on<F>(future: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(future)
}

/// Load configuration and build the named provider.
fn connect(
    registry: &ProviderRegistry,
    name: &str,
    config_path: Option<&Path>,
) -> Result<Box<dyn TranscodingProvider>> {
    let config = config::load_config_or_default(config_path)?;
    registry
        .create(name, &config)
        .with_context(|| format!("Failed to initialize provider '{}'", name))
}

async fn transcode(
    registry: &ProviderRegistry,
    name: &str,
    config_path: Option<&Path>,
    source: &str,
    presets: Vec<String>,
) -> Result<()> {
    let request = TranscodeRequest::new(source, presets)?;
    let provider = connect(registry, name, config_path)?;
    tracing::info!(
        provider = provider.name(),
        source,
        presets = request.presets().len(),
        "Submitting job"
    );
    print_json(&provider.transcode(&request).await?)
}

async fn job_status(
    registry: &ProviderRegistry,
    name: &str,
    config_path: Option<&Path>,
    job_id: &str,
) -> Result<()> {
    let provider = connect(registry, name, config_path)?;
    print_json(&provider.job_status(job_id).await?)
}

async fn cancel_job(
    registry: &ProviderRegistry,
    name: &str,
    config_path: Option<&Path>,
    job_id: &str,
) -> Result<()> {
    let provider = connect(registry, name, config_path)?;
    provider.cancel_job(job_id).await?;
    println!("Cancelled job {job_id}");
    Ok(())
}

async fn list_presets(
    registry: &ProviderRegistry,
    name: &str,
    config_path: Option<&Path>,
) -> Result<()> {
    let provider = connect(registry, name, config_path)?;
    for preset in provider.list_presets().await? {
        match preset.container {
            Some(container) => println!("{}\t{}\t{}", preset.id, preset.name, container),
            None => println!("{}\t{}", preset.id, preset.name),
        }
    }
    Ok(())
}

async fn healthcheck(
    registry: &ProviderRegistry,
    name: &str,
    config_path: Option<&Path>,
) -> Result<()> {
    let provider = connect(registry, name, config_path)?;
    provider.healthcheck().await?;
    println!("{} is healthy", provider.name());
    Ok(())
}

fn validate(registry: &ProviderRegistry, name: &str, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    match registry.create(name, &config) {
        Ok(_) => {
            println!("Configuration is valid for provider '{}'", name);
            Ok(())
        }
        Err(ProviderError::InvalidConfig) => {
            anyhow::bail!("Configuration is incomplete for provider '{}'", name)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
