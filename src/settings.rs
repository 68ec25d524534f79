//! Simulation settings
//!
//! Clock pacing and bomb defaults, loaded from a JSON file when one is given.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BLAST_RADIUS, MAX_CATCH_UP_TICKS};

/// How the clock treats a frame that covers more than one tick of real time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickPolicy {
    /// At most one crossing per frame; excess elapsed time is dropped
    #[default]
    DropExcess,
    /// One crossing per whole tick elapsed (capped by `max_catch_up_ticks`)
    CatchUp,
}

impl TickPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickPolicy::DropExcess => "DropExcess",
            TickPolicy::CatchUp => "CatchUp",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dropexcess" | "drop" => Some(TickPolicy::DropExcess),
            "catchup" | "catch-up" => Some(TickPolicy::CatchUp),
            _ => None,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Clock ===
    /// Real milliseconds per game tick
    pub tick_length_ms: u64,
    /// Lag handling for slow frames
    pub tick_policy: TickPolicy,
    /// Cap on crossings per frame under `CatchUp`
    pub max_catch_up_ticks: u32,

    // === Bombs ===
    /// Radius used when a placement doesn't name one
    pub default_radius: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_length_ms: 1000,
            tick_policy: TickPolicy::DropExcess,
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
            default_radius: DEFAULT_BLAST_RADIUS,
        }
    }
}

impl Settings {
    /// Tick length as a duration (never zero)
    pub fn tick_length(&self) -> Duration {
        crate::tick_length_from_ms(self.tick_length_ms)
    }

    /// Radius used for default placements (never zero)
    pub fn effective_radius(&self) -> u32 {
        self.default_radius.max(1)
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
