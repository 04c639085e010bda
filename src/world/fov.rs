//! Field of View calculation
//!
//! Ray casting: a ray every `step` degrees around the observer, each walked
//! outward one tile-length at a time using pre-tabulated sines and cosines.
//! A ray stops on the first wall it enters (the wall itself is visible) or
//! when it leaves the map.

use std::sync::OnceLock;

use super::Map;
use crate::constants::{RAYS, RAY_STEP};
use crate::ecs::Position;

/// Per-degree direction table, `RAYS + 1` entries so 360 is addressable
struct RayTable {
    sin: Vec<f64>,
    cos: Vec<f64>,
}

impl RayTable {
    fn build() -> Self {
        // Five decimal places, so exact halves (sin 30 = 0.5) round as halves.
        let quantize = |v: f64| (v * 100_000.0).round() / 100_000.0;
        let (sin, cos) = (0..=RAYS)
            .map(|deg| {
                let rad = (deg as f64).to_radians();
                (quantize(rad.sin()), quantize(rad.cos()))
            })
            .unzip();
        Self { sin, cos }
    }

    fn get() -> &'static RayTable {
        static TABLE: OnceLock<RayTable> = OnceLock::new();
        TABLE.get_or_init(RayTable::build)
    }
}

/// Boolean grid with one cell per map tile; `true` = currently visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityMask {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl VisibilityMask {
    /// An all-dark mask
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
        }
    }

    /// Mask sized to a map
    pub fn for_map(map: &Map) -> Self {
        Self::new(map.width, map.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Mark a tile visible; out-of-range coordinates are ignored
    pub fn set(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = true;
        }
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map_or(false, |idx| self.cells[idx])
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.is_visible(pos.x, pos.y)
    }

    /// Number of visible tiles
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// All visible positions in row-major order
    pub fn visible_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, visible)| **visible)
            .map(move |(idx, _)| {
                let idx = idx as i32;
                Position::new(idx % self.width, idx / self.width)
            })
    }
}

/// Compute field of view from a position with the default ray step
pub fn compute_visibility(map: &Map, origin: Position, radius: i32) -> VisibilityMask {
    compute_visibility_with_step(map, origin, radius, RAY_STEP)
}

/// Compute field of view, casting one ray every `step` degrees
pub fn compute_visibility_with_step(
    map: &Map,
    origin: Position,
    radius: i32,
    step: usize,
) -> VisibilityMask {
    let table = RayTable::get();
    let mut mask = VisibilityMask::for_map(map);
    let max_x = (map.width - 1) as f64;
    let max_y = (map.height - 1) as f64;

    for angle in (0..=RAYS).step_by(step.max(1)) {
        let dx = table.sin[angle];
        let dy = table.cos[angle];
        let mut x = origin.x as f64;
        let mut y = origin.y as f64;

        for _ in 0..radius {
            x += dx;
            y += dy;

            if x < 0.0 || y < 0.0 || x > max_x || y > max_y {
                break;
            }

            let tile_x = x.round_ties_even() as i32;
            let tile_y = y.round_ties_even() as i32;
            mask.set(tile_x, tile_y);

            if map.is_wall(tile_x, tile_y) {
                break;
            }
        }
    }

    // Origin is always visible
    mask.set(origin.x, origin.y);

    log::debug!(
        "FOV from ({}, {}) radius {}: {} tiles visible",
        origin.x,
        origin.y,
        radius,
        mask.count()
    );
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_room() -> Map {
        Map::from_rows(&[
            "###########",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "###########",
        ])
    }

    #[test]
    fn test_ray_table_quantized() {
        let table = RayTable::get();
        assert_eq!(table.sin.len(), RAYS + 1);
        assert_eq!(table.sin[30], 0.5);
        assert_eq!(table.sin[90], 1.0);
        assert_eq!(table.cos[180], -1.0);
    }

    #[test]
    fn test_radius_zero_only_origin() {
        let map = open_room();
        let mask = compute_visibility(&map, Position::new(5, 5), 0);
        assert_eq!(mask.count(), 1);
        assert!(mask.is_visible(5, 5));
    }

    #[test]
    fn test_axis_reach_matches_radius() {
        let map = open_room();
        let mask = compute_visibility(&map, Position::new(5, 5), 3);
        assert!(mask.is_visible(5, 8));
        assert!(mask.is_visible(8, 5));
        assert!(mask.is_visible(5, 2));
        assert!(mask.is_visible(2, 5));
        assert!(!mask.is_visible(5, 9));
        assert!(!mask.is_visible(9, 5));
    }

    #[test]
    fn test_wall_stops_ray() {
        let map = Map::from_rows(&["#########", "#..#....#", "#########"]);
        let mask = compute_visibility(&map, Position::new(1, 1), 6);
        assert!(mask.is_visible(2, 1));
        // The wall itself is seen
        assert!(mask.is_visible(3, 1));
        for x in 4..9 {
            assert!(!mask.is_visible(x, 1), "tile ({}, 1) behind wall was visible", x);
        }
    }

    #[test]
    fn test_map_edge_does_not_wrap() {
        let map = Map::from_rows(&["...", "...", "..."]);
        let mask = compute_visibility(&map, Position::new(0, 0), 5);
        assert!(mask.is_visible(0, 0));
        assert!(mask.is_visible(2, 0));
        assert!(mask.is_visible(0, 2));
    }

    #[test]
    fn test_zero_step_does_not_hang() {
        let map = open_room();
        let mask = compute_visibility_with_step(&map, Position::new(5, 5), 2, 0);
        assert!(mask.is_visible(5, 7));
    }

    #[test]
    fn test_visible_positions_match_count() {
        let map = open_room();
        let mask = compute_visibility(&map, Position::new(4, 4), 3);
        assert_eq!(mask.visible_positions().count(), mask.count());
        assert!(mask.visible_positions().all(|p| mask.contains(p)));
    }
}
