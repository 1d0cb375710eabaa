//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (host timestamps to per-tick elapsed time)
//!
//! Key-value storage lives in [`crate::persistence`].

pub mod time;

pub use time::FrameClock;
