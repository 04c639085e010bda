//! Map data structure
//!
//! The 2D grid representing a dungeon floor. Produced by the (external)
//! generator; the core only reads tile kinds and updates seen flags.

use std::collections::HashSet;

use super::fov::VisibilityMask;
use super::tile::{Tile, TileType};
use crate::ecs::Position;

/// A dungeon floor map
#[derive(Debug, Clone)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Tile>,
    /// Tiles never observed yet
    fog: HashSet<Position>,
}

impl Map {
    /// Create a new map filled with walls
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        let tiles = vec![Tile::default(); (width * height) as usize];
        let fog = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .collect();
        Self {
            width,
            height,
            tiles,
            fog,
        }
    }

    /// Build a map from rows of `#` (wall) and `.` (floor); other glyphs are walls
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let height = rows.len() as i32;
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0) as i32;
        let mut map = Map::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.as_ref().chars().enumerate() {
                let tile_type = TileType::from_glyph(glyph).unwrap_or(TileType::Wall);
                map.set_tile(x as i32, y as i32, tile_type);
            }
        }
        map
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    pub fn idx_to_xy(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get tile at position
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Get mutable tile at position
    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            Some(&mut self.tiles[idx])
        } else {
            None
        }
    }

    /// Set tile type at position
    pub fn set_tile(&mut self, x: i32, y: i32, tile_type: TileType) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.tile_type = tile_type;
        }
    }

    /// Wall check; out-of-bounds counts as wall
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(true, |t| t.is_wall())
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.is_walkable())
    }

    /// Positions that have never been observed
    pub fn fog(&self) -> &HashSet<Position> {
        &self.fog
    }

    pub fn is_fogged(&self, pos: Position) -> bool {
        self.fog.contains(&pos)
    }

    /// Apply a visibility mask to the tile flags.
    ///
    /// Visible tiles become `seen` and `seeing` and leave the fog. Tiles that
    /// were seen before but are outside the mask stop `seeing`.
    pub fn change_seen(&mut self, mask: &VisibilityMask) {
        for y in 0..self.height {
            for x in 0..self.width {
                let visible = mask.is_visible(x, y);
                let idx = self.xy_to_idx(x, y);
                let tile = &mut self.tiles[idx];
                if visible {
                    tile.seeing = true;
                    tile.seen = true;
                    self.fog.remove(&Position::new(x, y));
                } else if tile.seen {
                    tile.seeing = false;
                }
            }
        }
    }

    /// Get all walkable positions (teleport targets, spawning)
    pub fn get_walkable_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_walkable())
            .map(|(idx, _)| {
                let (x, y) = self.idx_to_xy(idx);
                Position::new(x, y)
            })
            .collect()
    }

    /// Create a simple test map: two rooms joined by a corridor, with a pillar
    pub fn test_map() -> Self {
        Map::from_rows(&[
            "####################",
            "#........#.........#",
            "#........#.........#",
            "#...#..............#",
            "#........#.........#",
            "#........#.........#",
            "##########.........#",
            "#..................#",
            "####################",
        ])
    }
}
