//! Autorotation - tick-driven action scheduling and admission control

pub mod actions;
pub mod core;
pub mod engine;
pub mod planning;
pub mod policy;
pub mod queue;
pub mod rules;
pub mod timing;
pub mod world;
