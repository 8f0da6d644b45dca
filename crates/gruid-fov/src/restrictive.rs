//! RESTRICTIVE — Mingos' Restrictive Precise Angle Shadowcasting
//! (MRPAS), grounded in `original_source/src/libtcod/fov_restrictive.c`.
//!
//! Each of the four quadrants is swept as two octants: a vertical-edge
//! octant (outward by row, inward by column) and a horizontal-edge
//! octant (outward by column, inward by row). The two are structurally
//! identical except for one detail, preserved here exactly as found in
//! the source: the horizontal-edge octant's obstacle-overlap check
//! advances its cursor twice instead of once whenever an overlap is
//! found, silently skipping the next recorded obstacle. See
//! `SPEC_FULL.md` §4.3-4.8 and `DESIGN.md` for why this is kept rather
//! than "fixed".

use gruid_core::Point;

use crate::error::{FovError, Result};
use crate::map::Map;
use crate::radius::Radius;

#[allow(clippy::too_many_arguments)]
fn vertical_edge(
    map: &mut Map,
    pov: Point,
    max_radius: i32,
    light_walls: bool,
    dx: i32,
    dy: i32,
    start_angle: &mut Vec<f64>,
    end_angle: &mut Vec<f64>,
) {
    start_angle.clear();
    end_angle.clear();
    let mut iteration = 1i32;
    let mut obstacles_in_last_line = 0usize;
    let mut min_angle = 0.0f64;

    let mut y = pov.y + dy;
    let mut done = y < 0 || y >= map.height();
    while !done {
        let slopes_per_cell = 1.0 / f64::from(iteration);
        let half_slopes = slopes_per_cell * 0.5;
        let mut processed_cell = ((min_angle + half_slopes) / slopes_per_cell) as i32;
        let minx = (pov.x - iteration).max(0);
        let maxx = (pov.x + iteration).min(map.width() - 1);
        done = true;

        let mut x = pov.x + processed_cell * dx;
        while x >= minx && x <= maxx {
            let c = Point::new(x, y);
            let mut visible = true;
            let mut extended = false;
            let centre_slope = f64::from(processed_cell) * slopes_per_cell;
            let start_slope = centre_slope - half_slopes;
            let end_slope = centre_slope + half_slopes;

            if obstacles_in_last_line > 0 {
                let prev_same = Point::new(x, y - dy);
                let prev_diag = Point::new(x - dx, y - dy);
                let same_ok = map.is_in_fov(prev_same) && map.is_transparent(prev_same);
                let diag_ok = map.is_in_fov(prev_diag) && map.is_transparent(prev_diag);
                if !same_ok && !diag_ok {
                    visible = false;
                } else {
                    let mut idx = 0usize;
                    while idx < obstacles_in_last_line && visible {
                        if start_slope <= end_angle[idx] && end_slope >= start_angle[idx] {
                            if map.is_transparent(c) {
                                if centre_slope > start_angle[idx] && centre_slope < end_angle[idx] {
                                    visible = false;
                                }
                            } else if start_slope >= start_angle[idx] && end_slope <= end_angle[idx] {
                                visible = false;
                            } else {
                                start_angle[idx] = start_angle[idx].min(start_slope);
                                end_angle[idx] = end_angle[idx].max(end_slope);
                                extended = true;
                            }
                        }
                        idx += 1;
                    }
                }
            }

            if visible {
                done = false;
                map.set_in_fov(c, true);
                if !map.is_transparent(c) {
                    if min_angle >= start_slope {
                        min_angle = end_slope;
                        if processed_cell == iteration {
                            done = true;
                        }
                    } else if !extended {
                        start_angle.push(start_slope);
                        end_angle.push(end_slope);
                    }
                    if !light_walls {
                        map.set_in_fov(c, false);
                    }
                }
            }
            processed_cell += 1;
            x += dx;
        }
        if iteration == max_radius {
            done = true;
        }
        iteration += 1;
        obstacles_in_last_line = start_angle.len();
        y += dy;
        if y < 0 || y >= map.height() {
            done = true;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn horizontal_edge(
    map: &mut Map,
    pov: Point,
    max_radius: i32,
    light_walls: bool,
    dx: i32,
    dy: i32,
    start_angle: &mut Vec<f64>,
    end_angle: &mut Vec<f64>,
) {
    start_angle.clear();
    end_angle.clear();
    let mut iteration = 1i32;
    let mut obstacles_in_last_line = 0usize;
    let mut min_angle = 0.0f64;

    let mut x = pov.x + dx;
    let mut done = x < 0 || x >= map.width();
    while !done {
        let slopes_per_cell = 1.0 / f64::from(iteration);
        let half_slopes = slopes_per_cell * 0.5;
        let mut processed_cell = ((min_angle + half_slopes) / slopes_per_cell) as i32;
        let miny = (pov.y - iteration).max(0);
        let maxy = (pov.y + iteration).min(map.height() - 1);
        done = true;

        let mut y = pov.y + processed_cell * dy;
        while y >= miny && y <= maxy {
            let c = Point::new(x, y);
            let mut visible = true;
            let mut extended = false;
            let centre_slope = f64::from(processed_cell) * slopes_per_cell;
            let start_slope = centre_slope - half_slopes;
            let end_slope = centre_slope + half_slopes;

            if obstacles_in_last_line > 0 {
                let prev_same = Point::new(x - dx, y);
                let prev_diag = Point::new(x - dx, y - dy);
                let same_ok = map.is_in_fov(prev_same) && map.is_transparent(prev_same);
                let diag_ok = map.is_in_fov(prev_diag) && map.is_transparent(prev_diag);
                if !same_ok && !diag_ok {
                    visible = false;
                } else {
                    let mut idx = 0usize;
                    while idx < obstacles_in_last_line && visible {
                        if start_slope <= end_angle[idx] && end_slope >= start_angle[idx] {
                            if map.is_transparent(c) {
                                if centre_slope > start_angle[idx] && centre_slope < end_angle[idx] {
                                    visible = false;
                                }
                            } else if start_slope >= start_angle[idx] && end_slope <= end_angle[idx] {
                                visible = false;
                            } else {
                                start_angle[idx] = start_angle[idx].min(start_slope);
                                end_angle[idx] = end_angle[idx].max(end_slope);
                                extended = true;
                            }
                            // Quirk preserved from the source: the cursor advances an
                            // extra step here on top of the loop's own increment.
                            idx += 1;
                        }
                        idx += 1;
                    }
                }
            }

            if visible {
                done = false;
                map.set_in_fov(c, true);
                if !map.is_transparent(c) {
                    if min_angle >= start_slope {
                        min_angle = end_slope;
                        if processed_cell == iteration {
                            done = true;
                        }
                    } else if !extended {
                        start_angle.push(start_slope);
                        end_angle.push(end_slope);
                    }
                    if !light_walls {
                        map.set_in_fov(c, false);
                    }
                }
            }
            processed_cell += 1;
            y += dy;
        }
        if iteration == max_radius {
            done = true;
        }
        iteration += 1;
        obstacles_in_last_line = start_angle.len();
        x += dx;
        if x < 0 || x >= map.width() {
            done = true;
        }
    }
}

pub(crate) fn compute(map: &mut Map, pov: Point, radius: Radius, light_walls: bool) -> Result<()> {
    map.set_in_fov(pov, true);

    let max_obstacles = (map.cell_count() as usize / 7).max(1);
    let mut start_angle: Vec<f64> = Vec::new();
    start_angle
        .try_reserve_exact(max_obstacles)
        .map_err(|_| FovError::out_of_memory("allocating restrictive obstacle scratch"))?;
    let mut end_angle: Vec<f64> = Vec::new();
    end_angle
        .try_reserve_exact(max_obstacles)
        .map_err(|_| FovError::out_of_memory("allocating restrictive obstacle scratch"))?;

    let max_radius = radius.raw();
    for &(dx, dy) in &[(1, 1), (1, -1), (-1, 1), (-1, -1)] {
        vertical_edge(map, pov, max_radius, light_walls, dx, dy, &mut start_angle, &mut end_angle);
        horizontal_edge(map, pov, max_radius, light_walls, dx, dy, &mut start_angle, &mut end_angle);
    }
    Ok(())
}
