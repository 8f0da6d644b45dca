//! SHADOW — recursive shadowcasting over 8 octants, grounded in
//! `original_source/src/libtcod/fov_recursive_shadowcasting.c`.

use gruid_core::Point;

use crate::map::Map;
use crate::radius::Radius;

/// `(xx, xy, yx, yy)` per octant: `world = pov + angle * (xx, yx) +
/// distance * (xy, yy)`.
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

pub(crate) fn compute(map: &mut Map, pov: Point, radius: Radius, light_walls: bool) {
    let max_radius = match radius {
        Radius::Bounded(r) => r,
        Radius::Unlimited => {
            let rx = (map.width() - pov.x).max(pov.x) as f64;
            let ry = (map.height() - pov.y).max(pov.y) as f64;
            ((rx * rx + ry * ry).sqrt().ceil()) as i32 + 1
        }
    };

    for &(xx, xy, yx, yy) in &OCTANTS {
        cast_light(map, pov, 1, 1.0, 0.0, max_radius, (xx, xy, yx, yy), light_walls);
    }
    map.set_in_fov(pov, true);
}

#[allow(clippy::too_many_arguments)]
fn cast_light(
    map: &mut Map,
    pov: Point,
    distance: i32,
    mut slope_high: f64,
    slope_low: f64,
    max_radius: i32,
    octant: (i32, i32, i32, i32),
    light_walls: bool,
) {
    if slope_high < slope_low {
        return;
    }
    if distance > max_radius {
        return;
    }
    let (xx, xy, yx, yy) = octant;
    if !map.in_bounds(Point::new(pov.x + distance * xy, pov.y + distance * yy)) {
        return;
    }

    let radius_sq = i64::from(max_radius) * i64::from(max_radius);
    let mut prev_tile_blocked = false;

    for angle in (0..=distance).rev() {
        let tile_slope_high = (angle as f64 + 0.5) / (distance as f64 - 0.5);
        let tile_slope_low = (angle as f64 - 0.5) / (distance as f64 + 0.5);
        let prev_tile_slope_low = (angle as f64 + 0.5) / (distance as f64 + 0.5);

        if tile_slope_low > slope_high {
            continue;
        } else if tile_slope_high < slope_low {
            break;
        }

        let p = Point::new(pov.x + angle * xx + distance * xy, pov.y + angle * yx + distance * yy);
        if !map.in_bounds(p) {
            continue;
        }

        let transparent = map.is_transparent(p);
        let dist_sq = i64::from(angle) * i64::from(angle) + i64::from(distance) * i64::from(distance);
        if dist_sq <= radius_sq && (light_walls || transparent) {
            map.set_in_fov(p, true);
        }

        if prev_tile_blocked && transparent {
            slope_high = prev_tile_slope_low;
        }
        if !prev_tile_blocked && !transparent {
            cast_light(map, pov, distance + 1, slope_high, tile_slope_high, max_radius, octant, light_walls);
        }
        prev_tile_blocked = !transparent;
    }

    if !prev_tile_blocked {
        cast_light(map, pov, distance + 1, slope_high, slope_low, max_radius, octant, light_walls);
    }
}
