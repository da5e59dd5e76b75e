//! Physics-level errors

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the physics world
#[derive(Error, Debug)]
pub enum PhysicsError {
    /// A non-static body was registered without positive mass
    #[error("Non-static body must have positive mass, got {mass}")]
    NonPositiveMass {
        /// The rejected mass
        mass: f32,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
