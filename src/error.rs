//! Error types for configuration loading and engine entry points.

use thiserror::Error;

/// Errors returned by the engine's public entry points.
///
/// Every other bad input (missing numbers, unknown regions, zero savings) is
/// absorbed into the returned data; only an unknown project category has no
/// sensible default and is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The project category is not one of the supported adapters.
    #[error("unsupported project type \"{0}\", expected one of: {expected}", expected = crate::engine::adapters::ProjectType::NAMES.join(", "))]
    UnsupportedProjectType(String),
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, Error)]
#[error("config error: {field} - {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"panel.nominal_power_wp"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
