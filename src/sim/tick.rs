//! Bomb lifecycle tick and the per-frame driver
//!
//! [`tick`] advances every bomb one stage. [`Simulation`] owns the clock and
//! the bomb set and runs as many ticks as the clock reports each frame.

use std::time::Instant;

use super::bomb::BombOptions;
use super::clock::Clock;
use super::grid::{GridPos, TileGrid};
use super::state::{CellView, SimEvent, SimState};
use crate::Settings;

/// Advance every active bomb by one stage
///
/// A bomb entering `Detonating` runs its blast against `grid` on this tick
/// only. Bombs past detonation are dropped once the whole set has been
/// evaluated.
pub fn tick(state: &mut SimState, grid: &mut impl TileGrid) {
    let mut events = Vec::new();
    for bomb in &mut state.bombs {
        bomb.stage += 1;

        if bomb.is_detonating() {
            let broken = bomb.propagate(grid);
            log::info!(
                "Bomb {} detonated at ({}, {}), {} walls broken",
                bomb.id,
                bomb.pos.row,
                bomb.pos.column,
                broken.len()
            );
            events.push(SimEvent::BombDetonated {
                id: bomb.id,
                pos: bomb.pos,
                broken_walls: broken.len(),
            });
            events.extend(broken.into_iter().map(|pos| SimEvent::WallBroken { pos }));
        }
    }

    state.bombs.retain(|bomb| {
        if bomb.is_spent() {
            log::debug!("Bomb {} expired", bomb.id);
            events.push(SimEvent::BombExpired { id: bomb.id });
            false
        } else {
            true
        }
    });
    state.record(events);
}

/// Simulation context owned by the game loop
#[derive(Debug, Clone)]
pub struct Simulation {
    pub clock: Clock,
    pub state: SimState,
    /// Options used by [`Simulation::place_default`]
    pub default_options: BombOptions,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Simulation {
    pub fn new(settings: &Settings) -> Self {
        Self {
            clock: Clock::from_settings(settings),
            state: SimState::new(),
            default_options: BombOptions::from_settings(settings),
        }
    }

    /// Run one frame against the real clock; returns ticks applied
    pub fn frame(&mut self, grid: &mut impl TileGrid) -> u32 {
        self.frame_at(Instant::now(), grid)
    }

    /// Run one frame as if the time were `now`
    pub fn frame_at(&mut self, now: Instant, grid: &mut impl TileGrid) -> u32 {
        let crossed = self.clock.advance_at(now);
        for _ in 0..crossed {
            tick(&mut self.state, grid);
        }
        crossed
    }

    pub fn place_bomb(&mut self, pos: GridPos, options: BombOptions) -> Option<u32> {
        self.state.place_bomb(pos, options)
    }

    /// Place a world bomb with the configured defaults
    pub fn place_default(&mut self, pos: GridPos) -> Option<u32> {
        self.state.place_bomb(pos, self.default_options)
    }

    pub fn is_explosion_near(&self, grid: &impl TileGrid, pos: GridPos) -> bool {
        self.state.is_explosion_near(grid, pos)
    }

    pub fn cell_view(&self, grid: &impl TileGrid, pos: GridPos) -> CellView {
        self.state.cell_view(grid, pos)
    }

    pub fn has_player_bomb(&self) -> bool {
        self.state.has_player_bomb()
    }

    /// Game time in ticks
    pub fn game_time(&self) -> u64 {
        self.clock.ticks_since_start()
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.state.drain_events()
    }
}
