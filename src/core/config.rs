//! Engine configuration with documented constants
//!
//! Loaded from TOML; every field has a default so partial files are fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, RotationError};

/// How ground-targeted manual requests pick their location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundTargetingMode {
    /// Leave ground targeting to the host; requests are rejected
    Manual,
    /// Use the world position under the cursor at request time
    #[default]
    AtCursor,
    /// Queue as a regular targeted action
    AtTarget,
}

/// When automatic policies are allowed to use potions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotionUse {
    #[default]
    Manual,
    Opener,
    DowntimeOnly,
    Always,
}

/// Configuration for one rotation engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Emit per-decision debug logs
    pub logging: bool,

    /// Ground-targeting behavior for manual requests
    pub ground_targeting: GroundTargetingMode,

    /// Whether the positioning estimate is fed to automatic policies
    ///
    /// When disabled, policies see a position lock of 0 and never plan
    /// around upcoming movement.
    pub enable_movement: bool,

    /// Potion policy handed to automatic policies
    pub potion_use: PotionUse,

    /// Lifetime of a queued manual request (seconds)
    ///
    /// Short enough that a request made during a long cast does not fire
    /// several seconds later in an unrelated situation.
    pub manual_queue_expiry: f32,

    /// Lifetime of an automatic mode without renewal (seconds)
    pub auto_action_timeout: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            logging: false,
            ground_targeting: GroundTargetingMode::AtCursor,
            enable_movement: true,
            potion_use: PotionUse::Manual,
            manual_queue_expiry: 1.0,
            auto_action_timeout: 1.0,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.manual_queue_expiry <= 0.0 {
            return Err(RotationError::InvalidConfig(format!(
                "manual_queue_expiry ({}) must be positive",
                self.manual_queue_expiry
            )));
        }
        if self.auto_action_timeout <= 0.0 {
            return Err(RotationError::InvalidConfig(format!(
                "auto_action_timeout ({}) must be positive",
                self.auto_action_timeout
            )));
        }
        Ok(())
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }
}

/// Load an engine config from a TOML file
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let contents = fs::read_to_string(path)?;
    EngineConfig::from_toml(&contents)
}
