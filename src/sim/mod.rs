//! Bomb simulation module
//!
//! All timing and blast logic lives here. This module must stay free of
//! rendering and input:
//! - Time enters only through [`Clock`]
//! - The map is reached only through [`TileGrid`]
//! - Bombs are evaluated in placement order

pub mod blast;
pub mod bomb;
pub mod clock;
pub mod grid;
pub mod state;
pub mod tick;

pub use blast::{RAY_DIRECTIONS, RayStep, ray_step};
pub use bomb::{Bomb, BombOptions, BombStage};
pub use clock::Clock;
pub use grid::{GridPos, TileGrid, TileKind, TileMap};
pub use state::{CellView, SimEvent, SimState};
pub use tick::{Simulation, tick};
