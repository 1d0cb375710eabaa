//! Entity spawning policy
//!
//! Time accumulates every Playing tick; once it passes the current interval
//! a single entity drops in from above the world and the clock restarts.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Droplet, Hazard, Session};
use crate::tuning::Tuning;

/// What a spawn produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawned {
    Droplet,
    Hazard,
}

/// Elapsed-time accumulator driving spawns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    pub accumulator_ms: f32,
}

/// Time between spawns at a given speed, never below the configured floor
pub fn spawn_interval(tuning: &Tuning, speed: u32) -> f32 {
    (tuning.spawn_interval_base_ms - speed as f32 * tuning.spawn_interval_slope_ms)
        .max(tuning.spawn_interval_floor_ms)
}

/// Advance the spawn clock and introduce one entity when it runs out
pub fn spawn(session: &mut Session, dt_ms: f32) -> Option<Spawned> {
    session.spawner.accumulator_ms += dt_ms;
    let interval = spawn_interval(&session.tuning, session.speed);
    if session.spawner.accumulator_ms <= interval {
        return None;
    }
    session.spawner.accumulator_ms = 0.0;

    let speed = session.speed as f32;
    let roll: f32 = session.rng.random();
    if roll < session.tuning.droplet_chance {
        let droplet = roll_droplet(session, speed);
        log::trace!(
            "Spawned droplet {} at x={:.1} vy={:.2} rewarding={}",
            droplet.id,
            droplet.pos.x,
            droplet.fall_speed,
            droplet.rewarding
        );
        session.droplets.push(droplet);
        Some(Spawned::Droplet)
    } else {
        let hazard = roll_hazard(session, speed);
        log::trace!(
            "Spawned hazard {} at x={:.1} vy={:.2}",
            hazard.id,
            hazard.pos.x,
            hazard.fall_speed
        );
        session.hazards.push(hazard);
        Some(Spawned::Hazard)
    }
}

fn roll_droplet(session: &mut Session, speed: f32) -> Droplet {
    let id = session.next_entity_id();
    let t = &session.tuning;
    let rng = &mut session.rng;

    let x = rng.random_range(t.droplet_inset..t.world_width - t.droplet_inset);
    let radius = rng.random_range(t.droplet_radius_min..t.droplet_radius_max);
    let fall_speed =
        rng.random_range(t.droplet_fall_min..t.droplet_fall_max) + speed * t.droplet_fall_per_speed;
    let rewarding = rng.random::<f32>() < t.rewarding_chance;

    Droplet {
        id,
        pos: Vec2::new(x, t.droplet_spawn_y),
        radius,
        fall_speed,
        rewarding,
    }
}

fn roll_hazard(session: &mut Session, speed: f32) -> Hazard {
    let id = session.next_entity_id();
    let t = &session.tuning;
    let rng = &mut session.rng;

    let x = rng.random_range(t.hazard_inset..t.world_width - t.hazard_inset);
    let width = rng.random_range(t.hazard_width_min..t.hazard_width_max);
    let height = rng.random_range(t.hazard_height_min..t.hazard_height_max);
    let fall_speed =
        rng.random_range(t.hazard_fall_min..t.hazard_fall_max) + speed * t.hazard_fall_per_speed;

    Hazard {
        id,
        pos: Vec2::new(x, t.hazard_spawn_y),
        width,
        height,
        fall_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn playing_session(seed: u64) -> Session {
        let mut session = Session::new(seed, Tuning::default(), 0);
        session.scene = super::super::state::Scene::Playing;
        session
    }

    #[test]
    fn test_interval_values() {
        let tuning = Tuning::default();
        assert_eq!(spawn_interval(&tuning, 2), 310.0);
        assert_eq!(spawn_interval(&tuning, 8), 190.0);
        assert_eq!(spawn_interval(&tuning, 50), 120.0);
    }

    #[test]
    fn test_no_spawn_until_threshold_exceeded() {
        let mut session = playing_session(1);
        // 310 ms interval at base speed; reaching it exactly is not enough
        for _ in 0..31 {
            assert_eq!(spawn(&mut session, 10.0), None);
        }
        assert_eq!(session.entity_count(), 0);
        assert!(spawn(&mut session, 10.0).is_some());
        assert_eq!(session.entity_count(), 1);
        assert_eq!(session.spawner.accumulator_ms, 0.0);
    }

    #[test]
    fn test_spawned_parameters_in_range() {
        let mut session = playing_session(42);
        session.speed = 5;
        for _ in 0..500 {
            spawn(&mut session, 1000.0);
        }
        assert_eq!(session.entity_count(), 500);
        for d in &session.droplets {
            assert!(d.pos.x >= 20.0 && d.pos.x < 460.0);
            assert_eq!(d.pos.y, -20.0);
            assert!(d.radius >= 8.0 && d.radius < 14.0);
            assert!(d.fall_speed >= 3.0 - 1e-4 && d.fall_speed < 4.0 + 1e-4);
        }
        for h in &session.hazards {
            assert!(h.pos.x >= 20.0 && h.pos.x < 460.0);
            assert_eq!(h.pos.y, -28.0);
            assert!(h.width >= 20.0 && h.width < 30.0);
            assert!(h.height >= 18.0 && h.height < 26.0);
            assert!(h.fall_speed >= 3.55 - 1e-4 && h.fall_speed < 4.55 + 1e-4);
        }
    }

    #[test]
    fn test_kind_mix_roughly_weighted() {
        let mut session = playing_session(2024);
        for _ in 0..4000 {
            spawn(&mut session, 1000.0);
        }
        let droplet_share = session.droplets.len() as f32 / 4000.0;
        assert!((droplet_share - 0.7).abs() < 0.05, "share {droplet_share}");
        let rewarding = session.droplets.iter().filter(|d| d.rewarding).count() as f32
            / session.droplets.len() as f32;
        assert!((rewarding - 0.15).abs() < 0.05, "rewarding {rewarding}");
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = playing_session(99);
        let mut b = playing_session(99);
        for _ in 0..50 {
            spawn(&mut a, 400.0);
            spawn(&mut b, 400.0);
        }
        assert_eq!(a.droplets, b.droplets);
        assert_eq!(a.hazards, b.hazards);
    }

    proptest! {
        #[test]
        fn prop_interval_non_increasing_and_floored(speed in 0u32..200, step in 0u32..20) {
            let tuning = Tuning::default();
            let slower = spawn_interval(&tuning, speed);
            let faster = spawn_interval(&tuning, speed + step);
            prop_assert!(faster <= slower);
            prop_assert!(faster >= tuning.spawn_interval_floor_ms);
        }
    }
}
