//! Events emitted by the simulation
//!
//! The simulation never touches rendering, audio or storage directly. It
//! reports what happened through an [`EventSink`]; front-ends implement the
//! sink to update the HUD, play sounds and persist the best score.

use serde::{Deserialize, Serialize};

use super::state::Scene;

/// Short-lived on-screen feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Callout {
    /// Score reached a multiple of ten with a plain droplet
    Secured,
    /// Rewarding droplet collected
    PowerUp,
    /// Hazard destroyed while powered
    Shielded,
    /// Hazard cost a life
    Hit,
}

impl Callout {
    pub fn text(&self) -> &'static str {
        match self {
            Callout::Secured => "DRIP SECURED",
            Callout::PowerUp => "LL POWER-UP ACTIVATED",
            Callout::Shielded => "SHIELDED BY LL",
            Callout::Hit => "HIT! STAY LOCKED IN",
        }
    }

    /// CSS color for the callout text
    pub fn color_tag(&self) -> &'static str {
        match self {
            Callout::Secured => "#a7f3d0",
            Callout::PowerUp => "#67e8f9",
            Callout::Shielded => "#fef08a",
            Callout::Hit => "#fecaca",
        }
    }
}

/// What the paddle touched (drives sound effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Droplet,
    RewardingDroplet,
    ShieldedHazard,
    Hit,
}

/// Discrete simulation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(u8),
    /// New best score that should be persisted
    BestScoreChanged(u64),
    Callout(Callout),
    Impact(Impact),
    SceneChanged(Scene),
    GameOver { final_score: u64 },
}

/// Receiver of simulation events
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Sink that forwards every event to the `log` facade
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: GameEvent) {
        match event {
            GameEvent::Callout(callout) => {
                log::info!("[{}] {}", callout.color_tag(), callout.text())
            }
            GameEvent::GameOver { final_score } => {
                log::info!("Game over - final score {final_score}")
            }
            other => log::debug!("{other:?}"),
        }
    }
}
