//! Frame driver
//!
//! [`Game`] owns the session and everything needed to run it from a host
//! animation-frame callback: the input aggregator, the frame clock and the
//! best score record. One call to [`Game::frame`] runs exactly one tick; the
//! host is expected to draw afterwards and schedule the next frame no matter
//! which scene is active.

use crate::input::InputAggregator;
use crate::persistence::{BestScoreRecord, KeyValueStore};
use crate::platform::FrameClock;
use crate::sim::{EventSink, GameEvent, Scene, Session, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game {
    pub session: Session,
    pub input: InputAggregator,
    clock: FrameClock,
    best: BestScoreRecord,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a game in the menu, reading the best score from `store`
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn KeyValueStore>) -> Self {
        let best = BestScoreRecord::load(store);
        log::info!("New game (seed {seed})");
        Self {
            session: Session::new(seed, tuning, best.value()),
            input: InputAggregator::new(),
            clock: FrameClock::new(),
            best,
            events: Vec::new(),
        }
    }

    /// Best score known to this game
    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    pub fn scene(&self) -> Scene {
        self.session.scene
    }

    /// Run one frame at host time `timestamp_ms` and forward its events to `sink`
    pub fn frame(&mut self, timestamp_ms: f64, sink: &mut impl EventSink) {
        let dt = self.clock.advance(timestamp_ms);
        let input = self.input.take_snapshot();

        self.events.clear();
        tick(&mut self.session, &input, dt, &mut self.events);

        for event in self.events.drain(..) {
            if let GameEvent::BestScoreChanged(score) = event {
                self.best.offer(score);
            }
            sink.emit(event);
        }
    }

    /// Restart the frame clock so a long gap (hidden tab) is not one huge step
    pub fn suspend_clock(&mut self) {
        self.clock.reset();
    }
}
