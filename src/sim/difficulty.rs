//! Difficulty scaling from score

use super::state::Session;
use crate::tuning::Tuning;

/// Speed level for a score: base plus one per step, capped
pub fn speed_for_score(tuning: &Tuning, score: u64) -> u32 {
    let bonus = (score / tuning.score_per_speed.max(1)).min(tuning.max_speed_bonus as u64);
    tuning.base_speed + bonus as u32
}

/// Recompute the session speed. Entities already falling keep their velocity.
pub fn rescale(session: &mut Session) {
    let speed = speed_for_score(&session.tuning, session.score);
    if speed != session.speed {
        log::debug!("Speed {} -> {} at score {}", session.speed, speed, session.score);
        session.speed = speed;
    }
}
