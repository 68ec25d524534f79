//! Grid Blast - bomb timing and blast propagation core
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (clock, bombs, blast rays, hazard queries)
//! - `settings`: Data-driven clock and bomb tuning
//!
//! The grid itself, rendering and input live outside this crate. The core
//! talks to the map only through [`sim::TileGrid`].

pub mod settings;
pub mod sim;

pub use settings::{Settings, TickPolicy};

use std::time::Duration;

/// Game configuration constants
pub mod consts {
    use super::Duration;

    /// Real time covered by one game tick
    pub const DEFAULT_TICK_LENGTH: Duration = Duration::from_secs(1);
    /// Maximum tick crossings reported per frame under catch-up pacing
    pub const MAX_CATCH_UP_TICKS: u32 = 8;

    /// Stage a freshly placed bomb starts at
    pub const PLANTED_STAGE: u32 = 1;
    /// Stage on which the blast fires (and the only hazardous stage)
    pub const DETONATION_STAGE: u32 = 4;
    /// Default ray length in cells
    pub const DEFAULT_BLAST_RADIUS: u32 = 1;
    /// Undrained events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;
}

/// Clamp a millisecond count into a usable, non-zero tick length
#[inline]
pub fn tick_length_from_ms(ms: u64) -> Duration {
    Duration::from_millis(ms.max(1))
}
