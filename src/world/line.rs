//! Line tracing for ranged abilities
//!
//! Linear interpolation between two tiles, one sample per step of the
//! Chebyshev distance. The line stops before the first wall.

use super::Map;
use crate::ecs::Position;

fn lerp(from: i32, to: i32, t: f64) -> f64 {
    from as f64 + t * (to - from) as f64
}

/// Ordered tiles from `start` toward `end`, excluding the first wall and
/// everything after it. Positions outside the map count as walls.
pub fn trace_line(start: Position, end: Position, map: &Map) -> Vec<Position> {
    let steps = start.chebyshev_distance(&end);
    let mut points = Vec::with_capacity(steps as usize + 1);

    for i in 0..=steps {
        let t = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
        let x = lerp(start.x, end.x, t).round_ties_even() as i32;
        let y = lerp(start.y, end.y, t).round_ties_even() as i32;

        if map.is_wall(x, y) {
            break;
        }
        points.push(Position::new(x, y));
    }

    points
}
