//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Elapsed time passed in explicitly, never read from a clock
//! - No rendering, audio or storage dependencies (output goes through [`EventSink`])

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod events;
pub mod physics;
pub mod scene;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_overlap, hazard_collision_radius};
pub use difficulty::speed_for_score;
pub use events::{Callout, EventSink, GameEvent, Impact, LogSink};
pub use physics::Contact;
pub use spawner::{Spawner, spawn_interval};
pub use state::{Droplet, Hazard, Player, Scene, Session};
pub use tick::{TickInput, tick};
