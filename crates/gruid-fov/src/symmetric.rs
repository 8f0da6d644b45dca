//! SYMMETRIC_SHADOWCAST — Albert Ford's symmetric shadowcasting
//! (<https://www.albertford.com/shadowcasting/>), grounded in
//! `original_source/src/libtcod/fov_symmetric_shadowcast.c`.

use gruid_core::Point;

use crate::map::Map;
use crate::radius::Radius;

/// `(xx, xy, yx, yy)` per quadrant, same convention as SHADOW's octant
/// table but covering only the four quadrant reflections.
const QUADRANTS: [(i32, i32, i32, i32); 4] = [(1, 0, 0, 1), (0, 1, 1, 0), (0, -1, -1, 0), (-1, 0, 0, -1)];

fn is_symmetric(depth: i32, slope_low: f32, slope_high: f32, column: i32) -> bool {
    let c = column as f32;
    c >= depth as f32 * slope_low && c <= depth as f32 * slope_high
}

/// The slope of the line tangent to the left edge of tile `column` at
/// `row_depth`, used as both a new `slope_low` (wall -> floor) and a
/// new `slope_high` (floor -> wall, before recursing).
fn slope(row_depth: i32, column: i32) -> f32 {
    (2.0 * column as f32 - 1.0) / (2.0 * row_depth as f32)
}

fn round_half_up(n: f32) -> i32 {
    (n * (1.0 + f32::EPSILON)).round() as i32
}

fn round_half_down(n: f32) -> i32 {
    (n * (1.0 - f32::EPSILON)).round() as i32
}

fn scan(map: &mut Map, pov: Point, quadrant: (i32, i32, i32, i32), depth: i32, mut slope_low: f32, slope_high: f32) {
    let (xx, xy, yx, yy) = quadrant;
    if !map.in_bounds(Point::new(pov.x + depth * xx, pov.y + depth * yx)) {
        return;
    }
    let column_min = round_half_up(depth as f32 * slope_low);
    let column_max = round_half_down(depth as f32 * slope_high);
    let mut prev_tile_is_wall = false;

    for column in column_min..=column_max {
        let p = Point::new(pov.x + depth * xx + column * xy, pov.y + depth * yx + column * yy);
        if !map.in_bounds(p) {
            continue;
        }
        let is_wall = !map.is_transparent(p);
        if is_wall || is_symmetric(depth, slope_low, slope_high, column) {
            map.set_in_fov(p, true);
        }
        if prev_tile_is_wall && !is_wall {
            slope_low = slope(depth, column);
        }
        if column != column_min && !prev_tile_is_wall && is_wall {
            scan(map, pov, quadrant, depth + 1, slope_low, slope(depth, column));
        }
        prev_tile_is_wall = is_wall;
    }
    if !prev_tile_is_wall {
        scan(map, pov, quadrant, depth + 1, slope_low, slope_high);
    }
}

pub(crate) fn compute(map: &mut Map, pov: Point, radius: Radius, light_walls: bool) {
    map.set_in_fov(pov, true);
    for &quadrant in &QUADRANTS {
        scan(map, pov, quadrant, 1, -1.0, 1.0);
    }

    for y in 0..map.height() {
        for x in 0..map.width() {
            let p = Point::new(x, y);
            if !light_walls && !map.is_transparent(p) {
                map.set_in_fov(p, false);
            }
            let dx = i64::from(x - pov.x);
            let dy = i64::from(y - pov.y);
            if !radius.contains_squared(dx * dx + dy * dy) {
                map.set_in_fov(p, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_fully_lit() {
        let mut map = Map::new(5, 5).unwrap();
        map.clear(true, true);
        compute(&mut map, Point::new(2, 2), Radius::Unlimited, true);
        for y in 0..5 {
            for x in 0..5 {
                assert!(map.is_in_fov(Point::new(x, y)), "({x},{y})");
            }
        }
    }

    #[test]
    fn corridor_radius_bound() {
        let mut map = Map::new(7, 1).unwrap();
        map.clear(true, true);
        compute(&mut map, Point::new(0, 0), Radius::Bounded(3), false);
        assert!(map.is_in_fov(Point::new(0, 0)));
        assert!(map.is_in_fov(Point::new(1, 0)));
        assert!(map.is_in_fov(Point::new(2, 0)));
        assert!(map.is_in_fov(Point::new(3, 0)));
        assert!(!map.is_in_fov(Point::new(4, 0)));
        assert!(!map.is_in_fov(Point::new(5, 0)));
        assert!(!map.is_in_fov(Point::new(6, 0)));
    }

    #[test]
    fn light_walls_false_clears_opaque() {
        let mut map = Map::new(5, 5).unwrap();
        map.clear(true, true);
        map.set_properties(Point::new(3, 2), false, true);
        compute(&mut map, Point::new(2, 2), Radius::Unlimited, false);
        assert!(!map.is_in_fov(Point::new(3, 2)));
    }

    #[test]
    fn symmetric_on_open_map() {
        let mut map = Map::new(9, 9).unwrap();
        map.clear(true, true);
        let p = Point::new(2, 2);
        let q = Point::new(6, 7);
        compute(&mut map, p, Radius::Bounded(6), true);
        let q_from_p = map.is_in_fov(q);

        let mut map2 = Map::new(9, 9).unwrap();
        map2.clear(true, true);
        compute(&mut map2, q, Radius::Bounded(6), true);
        let p_from_q = map2.is_in_fov(p);

        assert_eq!(q_from_p, p_from_q);
    }
}
