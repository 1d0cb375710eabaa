//! Drip Drop - catch the droplets, dodge the hazards
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, scoring, scenes)
//! - `input`: Merges keyboard/button/touch sources into movement intents
//! - `game`: Frame driver tying input, clock, simulation and persistence together
//! - `platform`: Browser/native platform abstraction (frame timing)
//! - `persistence`: Best score storage
//! - `audio`: Sound cue scheduling (WebAudio backend on wasm32)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use input::InputAggregator;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration (ms) used for the very first tick
    pub const DEFAULT_FRAME_MS: f32 = 16.0;

    /// LocalStorage key for the best score
    pub const BEST_SCORE_KEY: &str = "ddc_best";
    /// LocalStorage key for player settings
    pub const SETTINGS_KEY: &str = "ddc_settings";

    /// Most power time (ms) the player can bank
    pub const POWER_CAP_MS: f32 = 1200.0;
    /// Lives at the start of every session
    pub const STARTING_LIVES: u8 = 3;
}
