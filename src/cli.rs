use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "transcoding-api")]
#[command(author, version, about = "Submit and track jobs on remote transcoding services")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Provider to use
    #[arg(short, long, global = true, default_value = "elementalconductor")]
    pub provider: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a transcoding job
    Transcode {
        /// Source media URL
        #[arg(required = true)]
        source: String,

        /// Preset to encode with; repeat for several outputs (order matters)
        #[arg(long = "preset", required = true)]
        presets: Vec<String>,
    },

    /// Show the status of a job
    Status {
        /// Provider job id
        job_id: String,
    },

    /// Cancel a job
    Cancel {
        /// Provider job id
        job_id: String,
    },

    /// List presets available on the provider
    Presets,

    /// Check that the provider is reachable with the configured credentials
    Healthcheck,

    /// Validate that the configuration is sufficient for the provider
    Validate,

    /// List registered providers
    Providers,

    /// Display version information
    Version,
}
