//! Runtime rules loaded from TOML

pub mod unlock;

pub use unlock::{load_unlock_table, parse_unlock_table, UnlockEntry, UnlockGate};
