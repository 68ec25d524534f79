//! Grid cells, tile kinds and the map capability the core runs against
//!
//! The map is owned by the game. The simulation only ever touches it through
//! [`TileGrid`], and always asks `in_bounds` before reading or writing.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Kind of tile occupying a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Open,
    /// Indestructible, blocks blast rays and line of sight
    SolidWall,
    /// Destroyed by an unblocked blast ray
    BreakableWall,
}

impl TileKind {
    /// Numeric map code (0 open, 1 solid, 2 breakable)
    pub fn code(self) -> u8 {
        match self {
            TileKind::Open => 0,
            TileKind::SolidWall => 1,
            TileKind::BreakableWall => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileKind::Open),
            1 => Some(TileKind::SolidWall),
            2 => Some(TileKind::BreakableWall),
            _ => None,
        }
    }
}

/// A (row, column) grid coordinate. May lie outside the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub row: i32,
    pub column: i32,
}

impl GridPos {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// As a vector with `x = column`, `y = row`
    #[inline]
    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.column, self.row)
    }

    #[inline]
    pub fn from_ivec2(v: IVec2) -> Self {
        Self::new(v.y, v.x)
    }

    /// Step `n` times along `dir` (`x = column`, `y = row`)
    ///
    /// Saturates at the `i32` limits; such cells are never in bounds.
    #[inline]
    pub fn offset(self, dir: IVec2, n: i32) -> Self {
        let step = dir.saturating_mul(IVec2::splat(n));
        Self::from_ivec2(self.as_ivec2().saturating_add(step))
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((row, column): (i32, i32)) -> Self {
        Self::new(row, column)
    }
}

/// Map access used by blast propagation and hazard queries
pub trait TileGrid {
    fn in_bounds(&self, pos: GridPos) -> bool;

    /// Only called for in-bounds cells
    fn tile(&self, pos: GridPos) -> TileKind;

    /// Only called for in-bounds cells
    fn set_tile(&mut self, pos: GridPos, kind: TileKind);

    /// Bounds-checked read; `None` outside the map
    fn tile_at(&self, pos: GridPos) -> Option<TileKind> {
        self.in_bounds(pos).then(|| self.tile(pos))
    }

    /// True only for an in-bounds solid wall
    fn is_solid(&self, pos: GridPos) -> bool {
        self.tile_at(pos) == Some(TileKind::SolidWall)
    }
}

/// Row-major tile map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    rows: i32,
    columns: i32,
    tiles: Vec<TileKind>,
}

impl TileMap {
    /// An all-open map
    pub fn new(rows: i32, columns: i32) -> Self {
        let rows = rows.max(0);
        let columns = columns.max(0);
        Self {
            rows,
            columns,
            tiles: vec![TileKind::Open; (rows * columns) as usize],
        }
    }

    /// Parse digit rows (`0` open, `1` solid, `2` breakable)
    ///
    /// Returns `None` on an unknown digit or ragged rows.
    pub fn from_rows(lines: &[&str]) -> Option<Self> {
        let columns = lines.first().map_or(0, |l| l.chars().count());
        let mut tiles = Vec::with_capacity(lines.len() * columns);
        for line in lines {
            if line.chars().count() != columns {
                return None;
            }
            for ch in line.chars() {
                let code = ch.to_digit(10)?;
                tiles.push(TileKind::from_code(code as u8)?);
            }
        }
        Some(Self {
            rows: lines.len() as i32,
            columns: columns as i32,
            tiles,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let map: Self = serde_json::from_str(json)?;
        if map.tiles.len() != (map.rows.max(0) * map.columns.max(0)) as usize {
            return Err(serde::de::Error::custom("tile count does not match dimensions"));
        }
        Ok(map)
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Render back to digit rows
    pub fn to_rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.columns.max(1) as usize)
            .map(|row| row.iter().map(|t| char::from(b'0' + t.code())).collect())
            .collect()
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }

    #[inline]
    fn index(&self, pos: GridPos) -> usize {
        (pos.row * self.columns + pos.column) as usize
    }
}

impl TileGrid for TileMap {
    fn in_bounds(&self, pos: GridPos) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.column >= 0 && pos.column < self.columns
    }

    fn tile(&self, pos: GridPos) -> TileKind {
        self.tiles[self.index(pos)]
    }

    fn set_tile(&mut self, pos: GridPos, kind: TileKind) {
        let idx = self.index(pos);
        self.tiles[idx] = kind;
    }
}
