//! BASIC — perimeter Bresenham raycasting, grounded in
//! `original_source/src/libtcod/fov_circular_raycasting.c`.

use gruid_core::Point;

use crate::line::Bresenham;
use crate::map::Map;
use crate::radius::Radius;

pub(crate) fn compute(map: &mut Map, pov: Point, radius: Radius, light_walls: bool) {
    map.set_in_fov(pov, true);

    let rmax = match radius {
        Radius::Unlimited => None,
        Radius::Bounded(r) => Some(r),
    };
    let x0 = rmax.map_or(0, |r| (pov.x - r).max(0));
    let x1 = rmax.map_or(map.width() - 1, |r| (pov.x + r).min(map.width() - 1));
    let y0 = rmax.map_or(0, |r| (pov.y - r).max(0));
    let y1 = rmax.map_or(map.height() - 1, |r| (pov.y + r).min(map.height() - 1));

    for target in perimeter(x0, y0, x1, y1) {
        cast_ray(map, pov, target, radius, light_walls);
    }
}

/// The cells on the border of `[x0, x1] x [y0, y1]`, in top/right/bottom/left
/// order with no corner repeated.
fn perimeter(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
    let mut pts = Vec::new();
    for x in x0..=x1 {
        pts.push(Point::new(x, y0));
    }
    if y1 > y0 {
        for y in (y0 + 1)..=y1 {
            pts.push(Point::new(x1, y));
        }
    }
    if y1 > y0 && x1 > x0 {
        for x in (x0..x1).rev() {
            pts.push(Point::new(x, y1));
        }
    }
    if y1 > y0 + 1 && x1 > x0 {
        for y in ((y0 + 1)..y1).rev() {
            pts.push(Point::new(x0, y));
        }
    }
    pts
}

fn cast_ray(map: &mut Map, pov: Point, target: Point, radius: Radius, light_walls: bool) {
    let mut line = Bresenham::new(pov.x, pov.y, target.x, target.y);
    while let Some(p) = line.step() {
        if !map.in_bounds(p) {
            return;
        }
        let dx = i64::from(p.x - pov.x);
        let dy = i64::from(p.y - pov.y);
        if !radius.contains_squared(dx * dx + dy * dy) {
            return;
        }
        if !map.is_transparent(p) {
            if light_walls {
                map.set_in_fov(p, true);
            }
            return;
        }
        map.set_in_fov(p, true);
    }
}
