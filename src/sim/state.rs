//! Session state and core simulation types
//!
//! A [`Session`] owns everything that changes during one play-through. It is
//! handed explicitly to every simulation function; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, hazard_collision_radius};
use super::spawner::Spawner;
use crate::consts::*;
use crate::tuning::Tuning;

/// Top-level mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    /// Title screen, no session in progress
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Horizontal center
    pub x: f32,
    /// Vertical center (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal units per tick
    pub speed: f32,
    /// Power mode time left (ms)
    pub power_ms: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.world_width / 2.0,
            y: tuning.player_y(),
            width: tuning.player_width,
            height: tuning.player_height,
            speed: tuning.player_speed,
            power_ms: 0.0,
        }
    }

    /// Collision rectangle
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(
            Vec2::new(self.x, self.y),
            Vec2::new(self.width, self.height),
        )
    }

    /// Move one tick according to the held intents, staying inside `bounds`
    pub fn steer(&mut self, move_left: bool, move_right: bool, bounds: (f32, f32)) {
        let mut vx = 0.0;
        if move_left {
            vx -= self.speed;
        }
        if move_right {
            vx += self.speed;
        }
        self.x = (self.x + vx).clamp(bounds.0, bounds.1);
    }

    /// Whether hazards are currently neutralized
    pub fn is_powered(&self) -> bool {
        self.power_ms > 0.0
    }

    /// Bank more power time, capped
    pub fn grant_power(&mut self, ms: f32) {
        self.power_ms = (self.power_ms + ms).min(POWER_CAP_MS);
    }

    /// Burn power time, never below zero
    pub fn drain_power(&mut self, dt_ms: f32) {
        if self.power_ms > 0.0 {
            self.power_ms = (self.power_ms - dt_ms).max(0.0);
        }
    }
}

/// A collectible falling droplet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Units per tick, fixed at spawn
    pub fall_speed: f32,
    /// Rare high-value variant that also grants power
    pub rewarding: bool,
}

impl Droplet {
    /// Lowest point of the droplet
    pub fn leading_edge(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Units per tick, fixed at spawn
    pub fall_speed: f32,
}

impl Hazard {
    /// Radius of the circle this hazard collides as
    pub fn collision_radius(&self) -> f32 {
        hazard_collision_radius(self.width, self.height)
    }

    /// Lowest point of the hazard
    pub fn leading_edge(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }
}

/// All mutable state for one play-through (plus the persisted best score)
#[derive(Debug, Clone)]
pub struct Session {
    /// Balance values this session runs with
    pub tuning: Tuning,
    /// Spawn RNG
    pub rng: Pcg32,
    pub scene: Scene,
    pub score: u64,
    pub lives: u8,
    /// Difficulty level derived from score
    pub speed: u32,
    pub best_score: u64,
    pub player: Player,
    /// Live droplets (spawn order)
    pub droplets: Vec<Droplet>,
    /// Live hazards (spawn order)
    pub hazards: Vec<Hazard>,
    pub spawner: Spawner,
    /// Simulation ticks run since the last reset
    pub time_ticks: u64,
    next_id: u32,
}

impl Session {
    /// Create a session sitting in the menu
    pub fn new(seed: u64, tuning: Tuning, best_score: u64) -> Self {
        let player = Player::new(&tuning);
        let speed = tuning.base_speed;
        Self {
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            scene: Scene::Menu,
            score: 0,
            lives: STARTING_LIVES,
            speed,
            best_score,
            player,
            droplets: Vec::new(),
            hazards: Vec::new(),
            spawner: Spawner::default(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Put every per-run value back to its starting point.
    ///
    /// The best score and the RNG stream survive.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.speed = self.tuning.base_speed;
        self.player = Player::new(&self.tuning);
        self.droplets.clear();
        self.hazards.clear();
        self.spawner = Spawner::default();
        self.time_ticks = 0;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Number of live entities of either kind
    pub fn entity_count(&self) -> usize {
        self.droplets.len() + self.hazards.len()
    }
}
