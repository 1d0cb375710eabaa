//! Best score record
//!
//! Read once at startup, written only when a run beats it.

use super::KeyValueStore;
use crate::consts::BEST_SCORE_KEY;

/// Parse a stored best score.
///
/// Leading decimal digits are taken (after surrounding whitespace and an
/// optional `+`); anything absent, negative or non-numeric reads as 0.
pub fn parse_best_score(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let text = raw.trim();
    let text = text.strip_prefix('+').unwrap_or(text);
    let digits_end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..digits_end].parse().unwrap_or(0)
}

/// Best score backed by a key-value store
pub struct BestScoreRecord {
    store: Box<dyn KeyValueStore>,
    value: u64,
    /// False once storage has failed; the record then lives for this session only
    persistent: bool,
}

impl BestScoreRecord {
    /// Read the best score from `store`
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let (value, persistent) = match store.get(BEST_SCORE_KEY) {
            Ok(raw) => (parse_best_score(raw.as_deref()), true),
            Err(e) => {
                log::warn!("Best score not loaded ({e}); keeping it for this session only");
                (0, false)
            }
        };
        log::info!("Best score: {value}");
        Self {
            store,
            value,
            persistent,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Whether writes still reach storage
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Offer a finished run's score. Returns true if it is a new best.
    pub fn offer(&mut self, score: u64) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        if self.persistent {
            if let Err(e) = self.store.set(BEST_SCORE_KEY, &score.to_string()) {
                log::warn!("Best score not saved ({e}); keeping it for this session only");
                self.persistent = false;
            }
        }
        true
    }
}
