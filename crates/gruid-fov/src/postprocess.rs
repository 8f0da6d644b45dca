//! Wall-lighting post-process, grounded in
//! `original_source/src/libtcod/fov_c.c`
//! (`TCOD_map_postprocess`/`TCOD_map_postprocess_quadrant`).
//!
//! Spreads visibility from a lit, transparent cell to its three
//! diagonal-quadrant neighbors when they are opaque, so that walls
//! bordering a lit floor read as lit instead of dark. Only BASIC and
//! DIAMOND call this; the other four algorithms handle wall lighting
//! natively (see `fov_c.c`'s `postproc` flag).

use gruid_core::Point;

use crate::map::Map;
use crate::radius::Radius;

pub(crate) fn run(map: &mut Map, pov: Point, radius: Radius) {
    for &(dx, dy) in &[(-1, -1), (-1, 1), (1, -1), (1, 1)] {
        quadrant(map, pov, radius, dx, dy);
    }
}

/// Sweep the quadrant of sign `(dx, dy)` from `pov` out to the map edge
/// (clamped by `radius` when bounded).
fn quadrant(map: &mut Map, pov: Point, radius: Radius, dx: i32, dy: i32) {
    let rmax = match radius {
        Radius::Unlimited => None,
        Radius::Bounded(r) => Some(r),
    };
    let x_end = if dx > 0 {
        rmax.map_or(map.width() - 1, |r| (pov.x + r).min(map.width() - 1))
    } else {
        rmax.map_or(0, |r| (pov.x - r).max(0))
    };
    let y_end = if dy > 0 {
        rmax.map_or(map.height() - 1, |r| (pov.y + r).min(map.height() - 1))
    } else {
        rmax.map_or(0, |r| (pov.y - r).max(0))
    };

    let xs: Vec<i32> = if dx > 0 {
        (pov.x..=x_end).collect()
    } else {
        (x_end..=pov.x).rev().collect()
    };
    let ys: Vec<i32> = if dy > 0 {
        (pov.y..=y_end).collect()
    } else {
        (y_end..=pov.y).rev().collect()
    };
    for &y in &ys {
        for &x in &xs {
            light_neighbors(map, Point::new(x, y), dx, dy);
        }
    }
}

fn light_neighbors(map: &mut Map, c: Point, dx: i32, dy: i32) {
    if !(map.in_bounds(c) && map.is_in_fov(c) && map.is_transparent(c)) {
        return;
    }
    for n in [
        Point::new(c.x + dx, c.y),
        Point::new(c.x, c.y + dy),
        Point::new(c.x + dx, c.y + dy),
    ] {
        if map.in_bounds(n) && !map.is_transparent(n) {
            map.set_in_fov(n, true);
        }
    }
}
