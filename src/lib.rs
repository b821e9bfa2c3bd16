//! Transcoding API - provider adapters for remote transcoding services
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod transcoding;
