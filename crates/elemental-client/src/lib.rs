//! # elemental-client
//!
//! Typed client for the Elemental Conductor REST API.
//!
//! Conductor speaks XML over HTTP and authenticates each request with a
//! short-lived signature. This crate provides:
//! - Request and response types mirroring Conductor's XML documents
//! - A [`Client`] that signs requests and decodes responses
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use elemental_client::{Client, ClientSettings};
//!
//! # async fn run() -> elemental_client::Result<()> {
//! let client = Client::new(ClientSettings {
//!     host: "https://conductor.example.com".into(),
//!     user_login: "api-user".into(),
//!     api_key: "api-key".into(),
//!     auth_expires: Duration::from_secs(30),
//! })?;
//! let job = client.get_job("42").await?;
//! println!("status: {:?}", job.status);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod types;

pub use client::{auth_key, Client, ClientSettings};
pub use error::{Error, Result};
pub use types::{
    FileGroupSettings, Input, Job, JobInfo, Location, Node, NodeList, Output, OutputGroup,
    Preset, PresetList, StreamAssembly,
};
