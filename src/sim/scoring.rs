//! Scoring, lives and power mode
//!
//! | Contact            | Effect                                         |
//! |--------------------|------------------------------------------------|
//! | droplet            | +1, "secured" callout on every tenth point     |
//! | rewarding droplet  | +5, bank 600 ms of power (capped at 1200)      |
//! | hazard, powered    | +2, hazard shredded, power untouched           |
//! | hazard, unpowered  | -1 life, game over when none remain            |

use super::events::{Callout, EventSink, GameEvent, Impact};
use super::physics::Contact;
use super::scene;
use super::state::{Scene, Session};

/// Apply one paddle contact. Ignored once the run is no longer in play.
pub fn apply_contact(session: &mut Session, contact: Contact, sink: &mut impl EventSink) {
    if session.scene != Scene::Playing {
        return;
    }

    match contact {
        Contact::Droplet {
            rewarding: false, ..
        } => {
            session.score += session.tuning.droplet_score;
            sink.emit(GameEvent::Impact(Impact::Droplet));
            let every = session.tuning.secured_every;
            if every > 0 && session.score % every == 0 {
                sink.emit(GameEvent::Callout(Callout::Secured));
            }
        }
        Contact::Droplet {
            rewarding: true, ..
        } => {
            session.score += session.tuning.rewarding_score;
            session.player.grant_power(session.tuning.power_grant_ms);
            sink.emit(GameEvent::Impact(Impact::RewardingDroplet));
            sink.emit(GameEvent::Callout(Callout::PowerUp));
        }
        Contact::Hazard { .. } if session.player.is_powered() => {
            session.score += session.tuning.shielded_score;
            sink.emit(GameEvent::Impact(Impact::ShieldedHazard));
            sink.emit(GameEvent::Callout(Callout::Shielded));
        }
        Contact::Hazard { .. } => {
            session.lives = session.lives.saturating_sub(1);
            sink.emit(GameEvent::Impact(Impact::Hit));
            sink.emit(GameEvent::Callout(Callout::Hit));
            if session.lives == 0 {
                scene::game_over(session, sink);
            }
        }
    }
}

/// Burn down the power timer by the tick's elapsed time
pub fn drain_power(session: &mut Session, dt_ms: f32) {
    let was_powered = session.player.is_powered();
    session.player.drain_power(dt_ms);
    if was_powered && !session.player.is_powered() {
        log::debug!("Power mode ended");
    }
}
