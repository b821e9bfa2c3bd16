//! Concrete transcoding provider implementations.
//!
//! Each submodule wraps a single remote service and implements the
//! [`TranscodingProvider`](super::TranscodingProvider) trait.

pub mod elementalconductor;

pub use elementalconductor::ElementalConductorProvider;
