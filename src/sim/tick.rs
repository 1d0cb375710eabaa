//! Per-frame simulation tick
//!
//! Scene commands are handled first. Simulation only runs while Playing:
//! steer, spawn, move and collide droplets then hazards, burn power, rescale
//! difficulty. Score/lives changes are reported once at the end of the tick.

use super::events::{EventSink, GameEvent};
use super::state::{Scene, Session};
use super::{autopilot, difficulty, physics, scene, scoring, spawner};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held: move paddle left
    pub move_left: bool,
    /// Held: move paddle right
    pub move_right: bool,
    /// Edge: pause toggle
    pub pause: bool,
    /// Edge: leave the menu
    pub start: bool,
    /// Edge: start the run over
    pub restart: bool,
    /// Edge: back to the menu
    pub quit_to_menu: bool,
    /// Idle/demo mode - autopilot drives the paddle
    pub autopilot: bool,
}

/// Advance the session by one frame of `dt_ms` milliseconds
pub fn tick(session: &mut Session, input: &TickInput, dt_ms: f32, sink: &mut impl EventSink) {
    if input.start {
        scene::start(session, sink);
    }
    if input.restart {
        scene::restart(session, sink);
    }
    if input.quit_to_menu {
        scene::quit_to_menu(session, sink);
    }
    if input.pause {
        scene::toggle_pause(session, sink);
    }

    // Menu, Paused and GameOver only redraw
    if session.scene != Scene::Playing {
        return;
    }

    let score_before = session.score;
    let lives_before = session.lives;

    simulate(session, input, dt_ms, sink);

    if session.score != score_before {
        sink.emit(GameEvent::ScoreChanged(session.score));
    }
    if session.lives != lives_before {
        sink.emit(GameEvent::LivesChanged(session.lives));
    }
}

fn simulate(session: &mut Session, input: &TickInput, dt_ms: f32, sink: &mut impl EventSink) {
    session.time_ticks += 1;

    let (left, right) = if input.autopilot {
        autopilot::intents(session)
    } else {
        (input.move_left, input.move_right)
    };
    let bounds = session.tuning.player_x_bounds();
    session.player.steer(left, right, bounds);

    spawner::spawn(session, dt_ms);

    for contact in physics::advance_droplets(session) {
        scoring::apply_contact(session, contact, sink);
    }
    for contact in physics::advance_hazards(session) {
        scoring::apply_contact(session, contact, sink);
        if session.scene != Scene::Playing {
            // Run ended mid-tick; the rest of the frame is frozen
            return;
        }
    }

    scoring::drain_power(session, dt_ms);
    difficulty::rescale(session);
}
