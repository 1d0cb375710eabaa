//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives in [`Tuning`]. Defaults
//! reproduce the classic feel; a JSON document may override any subset of
//! fields (missing keys keep their default).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON, or a field has the wrong type
    Parse(serde_json::Error),
    /// Parsed, but the values cannot drive a session
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "malformed tuning: {e}"),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Spawn ranges are sampled half-open, so they must be finite and non-empty
fn check_range(name: &str, min: f32, max: f32) -> Result<(), TuningError> {
    if min.is_finite() && max.is_finite() && (max - min).is_finite() && min < max {
        Ok(())
    } else {
        Err(TuningError::Invalid(format!(
            "{name} range {min}..{max} is empty or not finite"
        )))
    }
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Declared for parity with older builds; entity motion never reads it
    pub gravity: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Distance from the bottom of the world to the paddle center
    pub player_floor_offset: f32,
    /// Horizontal units moved per tick while an intent is held
    pub player_speed: f32,
    /// Gap kept between the paddle and the side walls
    pub player_inset: f32,

    // === Spawning ===
    pub spawn_interval_base_ms: f32,
    pub spawn_interval_slope_ms: f32,
    pub spawn_interval_floor_ms: f32,
    /// Probability that a spawn is a droplet rather than a hazard
    pub droplet_chance: f32,

    // === Droplets ===
    pub droplet_inset: f32,
    pub droplet_spawn_y: f32,
    pub droplet_radius_min: f32,
    pub droplet_radius_max: f32,
    pub droplet_fall_min: f32,
    pub droplet_fall_max: f32,
    pub droplet_fall_per_speed: f32,
    pub rewarding_chance: f32,

    // === Hazards ===
    pub hazard_inset: f32,
    pub hazard_spawn_y: f32,
    pub hazard_width_min: f32,
    pub hazard_width_max: f32,
    pub hazard_height_min: f32,
    pub hazard_height_max: f32,
    pub hazard_fall_min: f32,
    pub hazard_fall_max: f32,
    pub hazard_fall_per_speed: f32,

    // === Scoring ===
    pub droplet_score: u64,
    pub rewarding_score: u64,
    pub shielded_score: u64,
    /// A "secured" callout fires whenever the score lands on a multiple of this
    pub secured_every: u64,
    pub power_grant_ms: f32,

    // === Difficulty ===
    pub base_speed: u32,
    pub max_speed_bonus: u32,
    /// Score needed per point of speed bonus
    pub score_per_speed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 480.0,
            world_height: 720.0,
            gravity: 0.08,

            player_width: 64.0,
            player_height: 20.0,
            player_floor_offset: 80.0,
            player_speed: 5.0,
            player_inset: 8.0,

            spawn_interval_base_ms: 350.0,
            spawn_interval_slope_ms: 20.0,
            spawn_interval_floor_ms: 120.0,
            droplet_chance: 0.7,

            droplet_inset: 20.0,
            droplet_spawn_y: -20.0,
            droplet_radius_min: 8.0,
            droplet_radius_max: 14.0,
            droplet_fall_min: 1.5,
            droplet_fall_max: 2.5,
            droplet_fall_per_speed: 0.3,
            rewarding_chance: 0.15,

            hazard_inset: 20.0,
            hazard_spawn_y: -28.0,
            hazard_width_min: 20.0,
            hazard_width_max: 30.0,
            hazard_height_min: 18.0,
            hazard_height_max: 26.0,
            hazard_fall_min: 1.8,
            hazard_fall_max: 2.8,
            hazard_fall_per_speed: 0.35,

            droplet_score: 1,
            rewarding_score: 5,
            shielded_score: 2,
            secured_every: 10,
            power_grant_ms: 600.0,

            base_speed: 2,
            max_speed_bonus: 6,
            score_per_speed: 20,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON and check they are playable
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse tuning overrides, falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with (empty spawn ranges,
    /// a paddle wider than the world, speed overflow)
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.world_width > 0.0 && self.world_width.is_finite())
            || !(self.world_height > 0.0 && self.world_height.is_finite())
        {
            return Err(TuningError::Invalid(format!(
                "world size {}x{} must be positive",
                self.world_width, self.world_height
            )));
        }

        let (min_x, max_x) = self.player_x_bounds();
        if !(min_x.is_finite() && max_x.is_finite() && min_x <= max_x) {
            return Err(TuningError::Invalid(format!(
                "paddle of width {} with inset {} does not fit a world {} wide",
                self.player_width, self.player_inset, self.world_width
            )));
        }

        check_range(
            "droplet x",
            self.droplet_inset,
            self.world_width - self.droplet_inset,
        )?;
        check_range("droplet radius", self.droplet_radius_min, self.droplet_radius_max)?;
        check_range("droplet fall", self.droplet_fall_min, self.droplet_fall_max)?;
        check_range(
            "hazard x",
            self.hazard_inset,
            self.world_width - self.hazard_inset,
        )?;
        check_range("hazard width", self.hazard_width_min, self.hazard_width_max)?;
        check_range("hazard height", self.hazard_height_min, self.hazard_height_max)?;
        check_range("hazard fall", self.hazard_fall_min, self.hazard_fall_max)?;

        if self.base_speed.checked_add(self.max_speed_bonus).is_none() {
            return Err(TuningError::Invalid(format!(
                "base speed {} plus bonus {} overflows",
                self.base_speed, self.max_speed_bonus
            )));
        }
        Ok(())
    }

    /// Vertical position of the paddle center
    pub fn player_y(&self) -> f32 {
        self.world_height - self.player_floor_offset
    }

    /// Horizontal range the paddle center may occupy
    pub fn player_x_bounds(&self) -> (f32, f32) {
        let half = self.player_width / 2.0;
        (
            half + self.player_inset,
            self.world_width - half - self.player_inset,
        )
    }

    /// Highest point an entity may occupy (the deepest spawn line)
    pub fn spawn_margin(&self) -> f32 {
        -self.droplet_spawn_y.min(self.hazard_spawn_y)
    }
}
