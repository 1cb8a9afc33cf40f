pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, EngineConfig, GroundTargetingMode, PotionUse};
pub use error::{Result, RotationError};
pub use types::{ActionId, ActionKind, ActorId, CooldownGroup, Positional, Timestamp, GCD_GROUP};
