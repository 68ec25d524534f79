//! Axis-aligned blast rays
//!
//! Propagation (which breaks walls) and the line-of-sight query (which only
//! reads) share [`ray_step`], so both agree on when a solid wall stops a ray.

use glam::IVec2;

use super::bomb::Bomb;
use super::grid::{GridPos, TileGrid, TileKind};

/// Ray directions in walk order: right, left, down, up (`x = column`, `y = row`)
pub const RAY_DIRECTIONS: [IVec2; 4] = [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y];

/// Outcome of stepping a ray to distance `j`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayStep {
    /// The ray reaches this cell
    Reached(GridPos),
    /// A solid wall lies between this cell and the bomb; the ray ends
    Blocked,
    /// Left the map; the ray ends
    OutOfBounds,
}

/// Step a bomb's ray `j` cells along `dir`
///
/// The wall-check cell is one step from the target back toward the bomb.
pub fn ray_step(bomb: &Bomb, grid: &impl TileGrid, dir: IVec2, j: i32) -> RayStep {
    let target = bomb.pos.offset(dir, j);
    if !grid.in_bounds(target) {
        return RayStep::OutOfBounds;
    }
    if !bomb.wall_penetrating && grid.is_solid(bomb.wall_check_cell(target)) {
        return RayStep::Blocked;
    }
    RayStep::Reached(target)
}

impl Bomb {
    /// Run the blast: clear every breakable wall the rays reach
    ///
    /// Returns the cleared cells. Solid walls are never touched, and running
    /// it again over the same map clears nothing new.
    pub fn propagate(&self, grid: &mut impl TileGrid) -> Vec<GridPos> {
        let mut broken = Vec::new();
        for dir in RAY_DIRECTIONS {
            for j in 1..=self.reach() {
                let target = match ray_step(self, grid, dir, j) {
                    RayStep::Reached(target) => target,
                    RayStep::Blocked | RayStep::OutOfBounds => break,
                };
                if grid.tile(target) == TileKind::BreakableWall {
                    grid.set_tile(target, TileKind::Open);
                    broken.push(target);
                }
            }
        }
        broken
    }

    /// Is `target` inside this bomb's blast reach?
    ///
    /// The bomb's own cell always is. A solid wall cell is never reached
    /// unless the bomb penetrates walls.
    pub fn is_near_to(&self, grid: &impl TileGrid, target: GridPos) -> bool {
        if target == self.pos {
            return true;
        }
        if !self.wall_penetrating && grid.is_solid(target) {
            return false;
        }

        let delta = target.as_ivec2().saturating_sub(self.pos.as_ivec2());
        if delta.x != 0 && delta.y != 0 {
            return false;
        }
        let distance = delta.x.unsigned_abs() + delta.y.unsigned_abs();
        if distance > self.radius {
            return false;
        }

        let dir = delta.signum();
        (1..=i32::try_from(distance).unwrap_or(i32::MAX)).all(|j| matches!(ray_step(self, grid, dir, j), RayStep::Reached(_)))
    }

    /// Every cell the blast reaches, excluding the bomb's own cell
    ///
    /// Matches [`Bomb::is_near_to`] cell for cell.
    pub fn blast_cells(&self, grid: &impl TileGrid) -> Vec<GridPos> {
        let mut cells = Vec::new();
        for dir in RAY_DIRECTIONS {
            for j in 1..=self.reach() {
                match ray_step(self, grid, dir, j) {
                    RayStep::Reached(target) => {
                        if self.wall_penetrating || !grid.is_solid(target) {
                            cells.push(target);
                        }
                    }
                    RayStep::Blocked | RayStep::OutOfBounds => break,
                }
            }
        }
        cells
    }
}
