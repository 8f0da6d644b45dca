//! DIAMOND — diamond raycasting with obscurity vectors, grounded in
//! `original_source/src/libtcod/fov_diamond_raycasting.c`.
//!
//! The C source links scratch tiles with raw pointers into a
//! `calloc`'d grid and a singly-linked perimeter queue. Here the
//! scratch is a dense `Vec<RayTile>` indexed exactly like the map
//! (`y * width + x`), and every pointer becomes an `Option<usize>`
//! into that same vector (see `SPEC_FULL.md` §9's "cyclic/graph
//! scratch" design note).

use gruid_core::Point;

use crate::error::{FovError, Result};
use crate::map::Map;
use crate::postprocess;
use crate::radius::Radius;

#[derive(Debug, Clone, Copy, Default)]
struct RayTile {
    x_relative: i32,
    y_relative: i32,
    x_obscurity: i32,
    y_obscurity: i32,
    x_error: i32,
    y_error: i32,
    x_input: Option<usize>,
    y_input: Option<usize>,
    perimeter_next: Option<usize>,
    touched: bool,
    ignore: bool,
}

fn get_ray(tiles: &mut [RayTile], map: &Map, pov: Point, rel: Point) -> Option<usize> {
    let idx = map.index(Point::new(pov.x + rel.x, pov.y + rel.y))?;
    tiles[idx].x_relative = rel.x;
    tiles[idx].y_relative = rel.y;
    Some(idx)
}

fn process_ray(tiles: &mut [RayTile], perimeter_last: &mut usize, new_ray: Option<usize>, input_idx: usize) {
    let Some(new_idx) = new_ray else { return };
    if tiles[new_idx].y_relative == tiles[input_idx].y_relative {
        tiles[new_idx].x_input = Some(input_idx);
    } else {
        tiles[new_idx].y_input = Some(input_idx);
    }
    if !tiles[new_idx].touched {
        tiles[*perimeter_last].perimeter_next = Some(new_idx);
        *perimeter_last = new_idx;
        tiles[new_idx].touched = true;
    }
}

fn is_obscured(t: &RayTile) -> bool {
    (t.x_error > 0 && t.x_error <= t.x_obscurity) || (t.y_error > 0 && t.y_error <= t.y_obscurity)
}

fn process_x_input(new_ray: &mut RayTile, x_input: &RayTile) {
    if x_input.x_obscurity == 0 && x_input.y_obscurity == 0 {
        return;
    }
    if x_input.x_error > 0 && new_ray.x_obscurity == 0 {
        new_ray.x_error = x_input.x_error - x_input.y_obscurity;
        new_ray.y_error = x_input.y_error + x_input.y_obscurity;
        new_ray.x_obscurity = x_input.x_obscurity;
        new_ray.y_obscurity = x_input.y_obscurity;
    }
    if x_input.y_error <= 0 && x_input.y_obscurity > 0 && x_input.x_error > 0 {
        new_ray.y_error = x_input.y_error + x_input.y_obscurity;
        new_ray.x_error = x_input.x_error - x_input.y_obscurity;
        new_ray.x_obscurity = x_input.x_obscurity;
        new_ray.y_obscurity = x_input.y_obscurity;
    }
}

fn process_y_input(new_ray: &mut RayTile, y_input: &RayTile) {
    if y_input.x_obscurity == 0 && y_input.y_obscurity == 0 {
        return;
    }
    if y_input.y_error > 0 && new_ray.y_obscurity == 0 {
        new_ray.y_error = y_input.y_error - y_input.x_obscurity;
        new_ray.x_error = y_input.x_error + y_input.x_obscurity;
        new_ray.x_obscurity = y_input.x_obscurity;
        new_ray.y_obscurity = y_input.y_obscurity;
    }
    if y_input.x_error <= 0 && y_input.x_obscurity > 0 && y_input.y_error > 0 {
        new_ray.y_error = y_input.y_error - y_input.x_obscurity;
        new_ray.x_error = y_input.x_error + y_input.x_obscurity;
        new_ray.x_obscurity = y_input.x_obscurity;
        new_ray.y_obscurity = y_input.y_obscurity;
    }
}

/// Combine `idx`'s source tiles into its own obscurity/error, then
/// seed a fresh shadow if `idx` itself sits on an opaque cell.
fn merge_input(tiles: &mut [RayTile], map: &Map, pov: Point, idx: usize) {
    let mut ray = tiles[idx];
    if let Some(xi) = ray.x_input {
        let x_input = tiles[xi];
        process_x_input(&mut ray, &x_input);
    }
    if let Some(yi) = ray.y_input {
        let y_input = tiles[yi];
        process_y_input(&mut ray, &y_input);
    }
    tiles[idx] = ray;

    let ignore = match (ray.x_input, ray.y_input) {
        (None, Some(yi)) => is_obscured(&tiles[yi]),
        (Some(xi), None) => is_obscured(&tiles[xi]),
        (Some(xi), Some(yi)) => is_obscured(&tiles[xi]) && is_obscured(&tiles[yi]),
        (None, None) => false,
    };
    tiles[idx].ignore = ignore;

    if !ignore {
        let p = Point::new(pov.x + ray.x_relative, pov.y + ray.y_relative);
        if !map.is_transparent(p) {
            let ax = ray.x_relative.abs();
            let ay = ray.y_relative.abs();
            tiles[idx].x_error = ax;
            tiles[idx].x_obscurity = ax;
            tiles[idx].y_error = ay;
            tiles[idx].y_obscurity = ay;
        }
    }
}

fn expand_perimeter_from(tiles: &mut [RayTile], map: &Map, pov: Point, perimeter_last: &mut usize, idx: usize) {
    let ray = tiles[idx];
    if ray.ignore {
        return;
    }
    if ray.x_relative >= 0 {
        let r = get_ray(tiles, map, pov, Point::new(ray.x_relative + 1, ray.y_relative));
        process_ray(tiles, perimeter_last, r, idx);
    }
    if ray.x_relative <= 0 {
        let r = get_ray(tiles, map, pov, Point::new(ray.x_relative - 1, ray.y_relative));
        process_ray(tiles, perimeter_last, r, idx);
    }
    if ray.y_relative >= 0 {
        let r = get_ray(tiles, map, pov, Point::new(ray.x_relative, ray.y_relative + 1));
        process_ray(tiles, perimeter_last, r, idx);
    }
    if ray.y_relative <= 0 {
        let r = get_ray(tiles, map, pov, Point::new(ray.x_relative, ray.y_relative - 1));
        process_ray(tiles, perimeter_last, r, idx);
    }
}

pub(crate) fn compute(map: &mut Map, pov: Point, radius: Radius, light_walls: bool) -> Result<()> {
    let cell_count = map.cell_count() as usize;
    let mut tiles: Vec<RayTile> = Vec::new();
    tiles
        .try_reserve_exact(cell_count)
        .map_err(|_| FovError::out_of_memory("allocating diamond raycast scratch"))?;
    tiles.resize(cell_count, RayTile::default());

    map.set_in_fov(pov, true);

    let Some(origin) = map.index(pov) else {
        return Err(FovError::invalid_argument(format!(
            "point of view {pov:?} is outside the {}x{} map",
            map.width(),
            map.height()
        )));
    };
    tiles[origin].touched = true;
    let mut perimeter_last = origin;
    let mut current = origin;

    expand_perimeter_from(&mut tiles, map, pov, &mut perimeter_last, current);

    while let Some(next) = tiles[current].perimeter_next {
        current = next;

        let t = tiles[current];
        let dsq =
            i64::from(t.x_relative) * i64::from(t.x_relative) + i64::from(t.y_relative) * i64::from(t.y_relative);
        let in_range = radius.contains_squared(dsq);
        if in_range {
            merge_input(&mut tiles, map, pov, current);
        } else {
            tiles[current].ignore = true;
        }
        expand_perimeter_from(&mut tiles, map, pov, &mut perimeter_last, current);

        let t = tiles[current];
        if t.ignore {
            continue;
        }
        if t.x_error > 0 && t.x_error <= t.x_obscurity {
            continue;
        }
        if t.y_error > 0 && t.y_error <= t.y_obscurity {
            continue;
        }
        map.set_in_fov(Point::new(pov.x + t.x_relative, pov.y + t.y_relative), true);
    }

    if light_walls {
        postprocess::run(map, pov, radius);
    }
    Ok(())
}
