use thiserror::Error;

use crate::core::types::ActionId;

#[derive(Error, Debug)]
pub enum RotationError {
    #[error("Action not supported: {0}")]
    UnknownAction(ActionId),

    #[error("Action {0} requires a target")]
    MissingTarget(ActionId),

    #[error("Ground-targeted action {0} is left to manual targeting")]
    GroundTargetingManual(ActionId),

    #[error("No world position under cursor for ground-targeted action {0}")]
    NoCursorPosition(ActionId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RotationError>;
