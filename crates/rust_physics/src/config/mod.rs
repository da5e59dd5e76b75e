//! Configuration system

use crate::foundation::math::Vec3;
pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value outside its valid range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Standard gravity at the Earth's surface, in m/s²
pub const EARTH_GRAVITY: f32 = 9.807;

/// # Physics Configuration
///
/// Tunables for a [`PhysicsWorld`](crate::physics::PhysicsWorld). Read once
/// at construction; the world never changes them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Force added to every non-weightless dynamic body each step
    pub gravity: Vec3,
    /// Extra distance bodies are pushed apart after positional correction
    pub position_nudge: f32,
    /// Emit contact normals into the frame's debug draw sink
    pub debug_draw: bool,
}

impl PhysicsConfig {
    /// Create a configuration with Earth gravity and default tolerances
    pub fn new() -> Self {
        Self {
            gravity: Vec3::new(0.0, -EARTH_GRAVITY, 0.0),
            position_nudge: 0.001,
            debug_draw: false,
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the positional correction nudge
    pub fn with_position_nudge(mut self, nudge: f32) -> Self {
        self.position_nudge = nudge;
        self
    }

    /// Enable or disable contact visualization
    pub fn with_debug_draw(mut self, enabled: bool) -> Self {
        self.debug_draw = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.iter().all(|component| component.is_finite()) {
            return Err(ConfigError::Invalid(format!("gravity must be finite, got {:?}", self.gravity)));
        }

        if !(self.position_nudge >= 0.0 && self.position_nudge.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "position nudge must be a non-negative number, got {}",
                self.position_nudge
            )));
        }

        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for PhysicsConfig {}
