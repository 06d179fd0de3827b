//! Tile layers: static level geometry as a grid of classified cells
//!
//! Layers are built by level loading (outside this crate) and only read by
//! the physics engine. `TileGrid` is the in-memory implementation.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::shape::Rect;

/// Physical classification of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    /// No tile
    #[default]
    Empty,
    /// Decorative tile with no collision
    Normal,
    /// Blocks movement from every side
    Solid,
    /// One-way platform: blocks only bodies landing from above
    Unisolid,
    /// Damages whatever overlaps it
    Hazard,
    /// Climbable
    Ladder,
}

impl TileType {
    #[inline]
    pub fn is_solid(self) -> bool {
        self == TileType::Solid
    }

    /// Classifications reported as tile-trigger events
    #[inline]
    pub fn is_trigger(self) -> bool {
        matches!(self, TileType::Hazard | TileType::Ladder)
    }

    /// ASCII form used by `TileGrid::from_ascii`
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | ' ' => Some(TileType::Empty),
            '~' => Some(TileType::Normal),
            '#' => Some(TileType::Solid),
            '=' => Some(TileType::Unisolid),
            '^' => Some(TileType::Hazard),
            'H' => Some(TileType::Ladder),
            _ => None,
        }
    }
}

/// Read-only view of a tile layer consumed by the physics engine
pub trait TileLayer {
    /// Size of one cell in world units
    fn tile_size(&self) -> Vec2;

    /// Classification of the cell at `cell`. Out-of-range cells are `Empty`.
    fn tile_type_at(&self, cell: IVec2) -> TileType;

    /// Size of the whole layer in world units
    fn world_size(&self) -> Vec2;

    /// World position of cell (0, 0)'s top-left corner
    fn offset(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Cell containing a world-space point
    fn cell_at(&self, world: Vec2) -> IVec2 {
        ((world - self.offset()) / self.tile_size()).floor().as_ivec2()
    }

    /// World-space rectangle covered by `cell`
    fn cell_rect(&self, cell: IVec2) -> Rect {
        let size = self.tile_size();
        Rect::new(self.offset() + cell.as_vec2() * size, size)
    }
}

/// Row-major grid of tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    /// Size in cells
    pub map_size: IVec2,
    pub tile_size: Vec2,
    pub offset: Vec2,
    tiles: Vec<TileType>,
}

impl TileGrid {
    /// An all-empty grid
    pub fn new(map_size: IVec2, tile_size: Vec2) -> Self {
        let map_size = map_size.max(IVec2::ZERO);
        Self {
            map_size,
            tile_size,
            offset: Vec2::ZERO,
            tiles: vec![TileType::Empty; (map_size.x * map_size.y) as usize],
        }
    }

    /// Build a grid from one string per row (see `TileType::from_char`).
    /// Short rows are padded with `Empty`, unknown characters read as `Normal`.
    pub fn from_ascii(rows: &[&str], tile_size: Vec2) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(IVec2::new(width as i32, rows.len() as i32), tile_size);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let tile = TileType::from_char(c).unwrap_or(TileType::Normal);
                grid.set(IVec2::new(x as i32, y as i32), tile);
            }
        }
        grid
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    fn index(&self, cell: IVec2) -> Option<usize> {
        let in_range = cell.x >= 0 && cell.y >= 0 && cell.x < self.map_size.x && cell.y < self.map_size.y;
        in_range.then(|| (cell.y * self.map_size.x + cell.x) as usize)
    }

    /// Set a cell. Out-of-range writes are ignored.
    pub fn set(&mut self, cell: IVec2, tile: TileType) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = tile;
        }
    }

    /// Fill a whole row
    pub fn fill_row(&mut self, y: i32, tile: TileType) {
        for x in 0..self.map_size.x {
            self.set(IVec2::new(x, y), tile);
        }
    }
}

impl TileLayer for TileGrid {
    fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    fn tile_type_at(&self, cell: IVec2) -> TileType {
        self.index(cell).map(|i| self.tiles[i]).unwrap_or_default()
    }

    fn world_size(&self) -> Vec2 {
        self.map_size.as_vec2() * self.tile_size
    }

    fn offset(&self) -> Vec2 {
        self.offset
    }
}
