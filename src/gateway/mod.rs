//! Remote-call seam towards the NVMe-oF gateway.
//!
//! Transport construction lives outside this crate: anything that can
//! perform a named call and hand back a response object implements
//! [`Gateway`]. [`GatewayClient`] adds status checking and shapes responses
//! into records with the structural mapper.

mod client;
pub mod models;
mod replay;

#[cfg(test)]
mod tests;

pub use client::GatewayClient;
pub use replay::{ReplayError, ReplayGateway};

use thiserror::Error;

use crate::mapper::Source;

/// Transport-level failure reported by a [`Gateway`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {details}")]
pub struct TransportError {
    /// Transport status code, e.g. "UNAVAILABLE" or "DEADLINE_EXCEEDED".
    pub code: String,
    /// Human-readable diagnostic.
    pub details: String,
}

impl TransportError {
    /// Creates a transport error.
    pub fn new(code: &str, details: &str) -> Self {
        Self {
            code: code.to_string(),
            details: details.to_string(),
        }
    }
}

/// A gateway endpoint able to run named remote calls.
///
/// Responses carry an integer `status` (0 on success) and an
/// `error_message`, either as attributes or as mapping entries.
pub trait Gateway: Send + Sync {
    /// Runs `method` with `request` and returns the raw response.
    ///
    /// # Errors
    /// Returns `TransportError` when the endpoint cannot be reached or the
    /// transport fails before a response is produced.
    fn call(&self, method: &str, request: &Source) -> Result<Source, TransportError>;
}

/// Gateway used when no transport is configured; every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct Disconnected;

impl Gateway for Disconnected {
    fn call(&self, method: &str, _request: &Source) -> Result<Source, TransportError> {
        Err(TransportError {
            code: "UNAVAILABLE".to_string(),
            details: format!("no gateway transport configured for '{method}'"),
        })
    }
}
