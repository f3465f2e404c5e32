//! Photovoltaic sizing and financial viability engine.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
/// Sizing, financial projection, scenarios and cash flow.
pub mod engine;
pub mod equipment;
pub mod error;
pub mod io;
/// Loose parameter bags and numeric coercion.
pub mod params;
pub mod region;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{ConfigError, EngineError};
pub use params::ParameterBag;
