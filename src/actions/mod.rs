//! Action definitions and catalog

pub mod catalog;
pub mod condition;
pub mod definition;

pub use catalog::{ActionCatalog, ActionTransform, CatalogBuilder, SupportedAction, TargetTransform, TransformContext};
pub use condition::Condition;
pub use definition::{ActionDefinition, DEFAULT_ANIMATION_LOCK, DEFAULT_GCD_RECAST};
