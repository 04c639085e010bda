//! Tile definitions

use serde::{Deserialize, Serialize};

/// A single tile in the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub tile_type: TileType,
    /// Ever observed; never reverts once set
    pub seen: bool,
    /// Inside the observer's current field of view
    pub seeing: bool,
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            seen: false,
            seeing: false,
        }
    }

    pub fn is_wall(&self) -> bool {
        self.tile_type.blocks_sight()
    }

    pub fn is_walkable(&self) -> bool {
        self.tile_type.is_walkable()
    }

    pub fn glyph(&self) -> char {
        self.tile_type.glyph()
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileType::Wall)
    }
}

/// Types of tiles in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileType::Floor)
    }

    /// Stops sight rays and traced lines; `Map::is_wall` goes through this
    pub fn blocks_sight(&self) -> bool {
        matches!(self, TileType::Wall)
    }

    pub fn glyph(&self) -> char {
        match self {
            TileType::Floor => '.',
            TileType::Wall => '#',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(TileType::Floor),
            '#' => Some(TileType::Wall),
            _ => None,
        }
    }
}
