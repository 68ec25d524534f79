//! Active bomb set and the queries the rest of the game runs against it
//!
//! Everything here is read on demand: hazard and render queries walk the
//! current bombs against the current grid every time they are asked.

use serde::{Deserialize, Serialize};

use super::bomb::{Bomb, BombOptions, BombStage};
use super::grid::{GridPos, TileGrid};
use crate::consts::MAX_PENDING_EVENTS;

/// Something that happened during placement or a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    BombPlaced { id: u32, pos: GridPos },
    /// Statistics hook: the player placed a bomb
    PlayerBombPlaced { id: u32 },
    BombDetonated { id: u32, pos: GridPos, broken_walls: usize },
    WallBroken { pos: GridPos },
    BombExpired { id: u32 },
}

/// What a renderer needs to know about one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellView {
    /// A bomb sits on this cell
    pub bomb_here: bool,
    /// Most advanced stage among bombs whose reach covers this cell
    pub blast_stage: Option<BombStage>,
}

/// Bomb set state (lives only as long as the session)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Active bombs in placement order
    pub(crate) bombs: Vec<Bomb>,
    /// Events since the last drain, newest last, at most `MAX_PENDING_EVENTS`
    pub(crate) events: Vec<SimEvent>,
    next_id: u32,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimState {
    pub fn new() -> Self {
        Self {
            bombs: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new bomb ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a bomb at `Planted`
    ///
    /// A player bomb is refused (returns `None`, no events) while another
    /// player bomb is still active.
    pub fn place_bomb(&mut self, pos: GridPos, options: BombOptions) -> Option<u32> {
        if options.player_owned && self.has_player_bomb() {
            log::debug!("Player bomb at {:?} refused: one already active", pos);
            return None;
        }

        let id = self.next_entity_id();
        let bomb = Bomb::new(id, pos, options);
        log::debug!(
            "Bomb {} placed at ({}, {}) radius={} player={} penetrating={}",
            id,
            pos.row,
            pos.column,
            bomb.radius,
            bomb.player_owned,
            bomb.wall_penetrating
        );
        self.bombs.push(bomb);

        self.record(std::iter::once(SimEvent::BombPlaced { id, pos }));
        if options.player_owned {
            self.record(std::iter::once(SimEvent::PlayerBombPlaced { id }));
        }
        Some(id)
    }

    /// Append events, dropping the oldest past `MAX_PENDING_EVENTS`
    pub(crate) fn record(&mut self, events: impl IntoIterator<Item = SimEvent>) {
        self.events.extend(events);
        if self.events.len() > MAX_PENDING_EVENTS {
            let excess = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
        }
    }

    /// Active bombs in placement order
    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Is any player-owned bomb still active?
    pub fn has_player_bomb(&self) -> bool {
        self.bombs.iter().any(|b| b.player_owned)
    }

    pub fn bomb(&self, id: u32) -> Option<&Bomb> {
        self.bombs.iter().find(|b| b.id == id)
    }

    /// The bomb occupying `pos`, if any
    pub fn bomb_at(&self, pos: GridPos) -> Option<&Bomb> {
        self.bombs.iter().find(|b| b.pos == pos)
    }

    /// Is `pos` inside a live explosion right now?
    pub fn is_explosion_near(&self, grid: &impl TileGrid, pos: GridPos) -> bool {
        self.bombs
            .iter()
            .any(|b| b.is_detonating() && b.is_near_to(grid, pos))
    }

    /// Occupancy and blast stage for one cell
    pub fn cell_view(&self, grid: &impl TileGrid, pos: GridPos) -> CellView {
        let mut view = CellView::default();
        for bomb in &self.bombs {
            if bomb.pos == pos {
                view.bomb_here = true;
            }
            if bomb.is_near_to(grid, pos) {
                let stage = bomb.phase();
                view.blast_stage = Some(view.blast_stage.map_or(stage, |s| s.max(stage)));
            }
        }
        view
    }

    /// Take all events recorded since the last call
    ///
    /// Callers that never drain lose only the oldest events; the buffer is capped.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
