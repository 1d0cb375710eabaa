//! Demo-mode autopilot
//!
//! Synthesizes movement intents from the current session: sidestep the
//! closest hazard about to land on the paddle, otherwise chase the lowest
//! droplet (rewarding droplets count as a bit lower than they are).

use super::state::{Droplet, Session};

/// How far above the paddle a hazard starts counting as a threat
const THREAT_RANGE: f32 = 160.0;
/// Extra clearance kept from hazards
const DODGE_MARGIN: f32 = 6.0;
/// Head start given to rewarding droplets when picking a target
const REWARDING_BIAS: f32 = 120.0;

/// Movement intents `(move_left, move_right)` for this tick
pub fn intents(session: &Session) -> (bool, bool) {
    let player = &session.player;
    let (min_x, max_x) = session.tuning.player_x_bounds();

    if !player.is_powered() {
        let threat = session
            .hazards
            .iter()
            .filter(|h| h.pos.y < player.y && h.pos.y > player.y - THREAT_RANGE)
            .filter(|h| {
                let reach = player.width / 2.0 + h.collision_radius() + DODGE_MARGIN;
                (h.pos.x - player.x).abs() < reach
            })
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        if let Some(hazard) = threat {
            // Step away from the hazard unless pinned against a wall
            let go_left = if hazard.pos.x >= player.x {
                player.x > min_x
            } else {
                player.x >= max_x
            };
            return (go_left, !go_left);
        }
    }

    let target = session
        .droplets
        .iter()
        .filter(|d| d.pos.y < player.y)
        .max_by(|a, b| {
            let weight = |d: &&Droplet| {
                d.pos.y + if d.rewarding { REWARDING_BIAS } else { 0.0 }
            };
            weight(a).total_cmp(&weight(b))
        });

    match target {
        Some(droplet) if droplet.pos.x < player.x - player.speed => (true, false),
        Some(droplet) if droplet.pos.x > player.x + player.speed => (false, true),
        _ => (false, false),
    }
}
