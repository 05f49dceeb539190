// File: crates/animchart-core/src/error.rs
// Summary: Typed errors for configuration validation and chart construction.

use thiserror::Error;

/// A configuration field failed validation before any rendering started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid `{field}`: {reason}")]
pub struct ConfigError {
    pub field: &'static str,
    pub reason: String,
}

impl ConfigError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Host-side failure (surface missing, zero-sized surface).
    #[error("surface unavailable: {0}")]
    Surface(String),
}

pub type ChartResult<T> = Result<T, ChartError>;
