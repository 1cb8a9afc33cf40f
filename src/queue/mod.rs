//! Queue of user and system issued action requests

pub mod manual;

pub use manual::{ManualQueue, QueuedRequest, RequestTier};
