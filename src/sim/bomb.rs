//! Bomb entities and their lifecycle stages

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::GridPos;
use crate::Settings;
use crate::consts::*;

/// Lifecycle stage derived from a bomb's stage counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BombStage {
    /// Stage 1: just placed
    Planted,
    /// Stage 2: countdown
    Priming,
    /// Stage 3: countdown
    Priming2,
    /// Stage 4: blast fires, cell reach is hazardous
    Detonating,
    /// Past detonation, removed on the tick it is reached
    Spent,
}

impl BombStage {
    pub fn from_counter(stage: u32) -> Self {
        match stage {
            0 | 1 => BombStage::Planted,
            2 => BombStage::Priming,
            3 => BombStage::Priming2,
            DETONATION_STAGE => BombStage::Detonating,
            _ => BombStage::Spent,
        }
    }
}

/// Placement options (radius 1, world-owned, walls block)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombOptions {
    pub player_owned: bool,
    pub radius: u32,
    pub wall_penetrating: bool,
}

impl Default for BombOptions {
    fn default() -> Self {
        Self {
            player_owned: false,
            radius: DEFAULT_BLAST_RADIUS,
            wall_penetrating: false,
        }
    }
}

impl BombOptions {
    /// Defaults with the configured radius
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            radius: settings.effective_radius(),
            ..Default::default()
        }
    }

    pub fn player() -> Self {
        Self {
            player_owned: true,
            ..Default::default()
        }
    }
}

/// A placed bomb
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bomb {
    pub id: u32,
    pub pos: GridPos,
    /// Lifecycle counter, starts at 1 and grows by one per tick
    pub(crate) stage: u32,
    pub player_owned: bool,
    /// Rays and visibility ignore solid walls
    pub wall_penetrating: bool,
    /// Maximum ray length in cells (at least 1)
    pub radius: u32,
}

impl Bomb {
    pub fn new(id: u32, pos: GridPos, options: BombOptions) -> Self {
        Self {
            id,
            pos,
            stage: PLANTED_STAGE,
            player_owned: options.player_owned,
            wall_penetrating: options.wall_penetrating,
            radius: options.radius.max(1),
        }
    }

    #[inline]
    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Radius as a ray length
    #[inline]
    pub fn reach(&self) -> i32 {
        i32::try_from(self.radius).unwrap_or(i32::MAX)
    }

    #[inline]
    pub fn phase(&self) -> BombStage {
        BombStage::from_counter(self.stage)
    }

    #[inline]
    pub fn is_detonating(&self) -> bool {
        self.stage == DETONATION_STAGE
    }

    #[inline]
    pub fn is_spent(&self) -> bool {
        self.stage > DETONATION_STAGE
    }

    /// Unit step from `from` toward this bomb (`x = column`, `y = row`)
    #[inline]
    pub fn direction_to(&self, from: GridPos) -> IVec2 {
        self.pos.as_ivec2().saturating_sub(from.as_ivec2()).signum()
    }

    /// The cell one step closer to the bomb than `target`
    ///
    /// A solid wall here sits between `target` and the bomb. For the bomb's
    /// own cell this is the bomb's cell.
    #[inline]
    pub fn wall_check_cell(&self, target: GridPos) -> GridPos {
        target.offset(self.direction_to(target), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bomb_is_planted() {
        let bomb = Bomb::new(1, GridPos::new(2, 3), BombOptions::default());
        assert_eq!(bomb.stage(), 1);
        assert_eq!(bomb.phase(), BombStage::Planted);
        assert_eq!(bomb.radius, 1);
        assert!(!bomb.player_owned);
        assert!(!bomb.wall_penetrating);
    }

    #[test]
    fn test_zero_radius_clamped() {
        let options = BombOptions {
            radius: 0,
            ..Default::default()
        };
        assert_eq!(Bomb::new(1, GridPos::new(0, 0), options).radius, 1);
    }

    #[test]
    fn test_stage_mapping() {
        assert_eq!(BombStage::from_counter(2), BombStage::Priming);
        assert_eq!(BombStage::from_counter(3), BombStage::Priming2);
        assert_eq!(BombStage::from_counter(4), BombStage::Detonating);
        assert_eq!(BombStage::from_counter(5), BombStage::Spent);
        assert!(BombStage::Priming2 < BombStage::Detonating);
    }

    #[test]
    fn test_direction_points_toward_bomb() {
        let bomb = Bomb::new(1, GridPos::new(5, 5), BombOptions::default());
        // Below the bomb: step up (row - 1)
        assert_eq!(bomb.direction_to(GridPos::new(8, 5)), IVec2::new(0, -1));
        // Left of the bomb: step right
        assert_eq!(bomb.direction_to(GridPos::new(5, 1)), IVec2::new(1, 0));
        // Diagonal
        assert_eq!(bomb.direction_to(GridPos::new(7, 2)), IVec2::new(1, -1));
        assert_eq!(bomb.direction_to(bomb.pos), IVec2::ZERO);
    }

    #[test]
    fn test_wall_check_cell() {
        let bomb = Bomb::new(1, GridPos::new(5, 5), BombOptions::default());
        assert_eq!(bomb.wall_check_cell(GridPos::new(5, 7)), GridPos::new(5, 6));
        assert_eq!(bomb.wall_check_cell(GridPos::new(5, 6)), GridPos::new(5, 5));
        assert_eq!(bomb.wall_check_cell(GridPos::new(2, 5)), GridPos::new(3, 5));
        assert_eq!(bomb.wall_check_cell(bomb.pos), bomb.pos);
    }

    #[test]
    fn test_direction_at_coordinate_limits() {
        let bomb = Bomb::new(1, GridPos::new(i32::MAX, i32::MIN), BombOptions::default());
        assert_eq!(bomb.direction_to(GridPos::new(i32::MIN, i32::MAX)), IVec2::new(-1, 1));
        assert_eq!(bomb.wall_check_cell(GridPos::new(0, 0)), GridPos::new(1, -1));
    }

    #[test]
    fn test_reach_of_huge_radius() {
        let options = BombOptions {
            radius: u32::MAX,
            ..Default::default()
        };
        assert_eq!(Bomb::new(1, GridPos::new(0, 0), options).reach(), i32::MAX);
        assert_eq!(Bomb::new(1, GridPos::new(0, 0), BombOptions::default()).reach(), 1);
    }

    #[test]
    fn test_options_from_settings() {
        let settings = Settings {
            default_radius: 3,
            ..Default::default()
        };
        let options = BombOptions::from_settings(&settings);
        assert_eq!(options.radius, 3);
        assert!(!options.player_owned);
    }
}
