//! Player preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,
    /// Pause the game when the window loses focus
    pub pause_on_blur: bool,

    // === HUD ===
    /// Show floating callout text
    pub callouts: bool,

    // === Accessibility ===
    /// Reduced motion (no background ripple animation)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pause_on_blur: true,
            callouts: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Gain multiplier applied to every sound effect
    pub fn effective_sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Parse settings JSON, falling back to defaults when unreadable
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings ({e})");
            Self::default()
        })
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(SETTINGS_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(SETTINGS_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No settings storage on native ({SETTINGS_KEY}), using defaults");
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_respects_mute() {
        let mut settings = Settings::default();
        assert!((settings.effective_sfx_gain() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_sfx_gain(), 0.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true }"#);
        assert!(settings.muted);
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(Settings::from_json("garbage"), Settings::default());
    }
}
