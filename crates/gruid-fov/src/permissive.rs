//! PERMISSIVE — Jonathon Duerig's precise permissive FOV, grounded in
//! `original_source/src/libtcod/fov_permissive2.c`.
//!
//! The C source threads raw pointers through three scratch structures:
//! a dense per-cell `View` array, a bump-list arena with parent
//! pointers, and an array of `View*` tracking which views are still
//! active. Each becomes a plain `Vec` here, addressed by index instead
//! of pointer: `views` is indexed exactly like the map (`y * width +
//! x`), `bumps` is an append-only arena with `Option<usize>` parent
//! links, and `active_views` holds indices into `views`.

use gruid_core::Point;

use crate::error::{FovError, Result};
use crate::map::Map;

const STEP_SIZE: i32 = 16;

#[derive(Debug, Clone, Copy, Default)]
struct Line {
    xi: i32,
    yi: i32,
    xf: i32,
    yf: i32,
}

fn relative_slope(line: &Line, x: i32, y: i32) -> i64 {
    i64::from(line.yf - line.yi) * i64::from(line.xf - x) - i64::from(line.xf - line.xi) * i64::from(line.yf - y)
}
fn below(line: &Line, x: i32, y: i32) -> bool {
    relative_slope(line, x, y) > 0
}
fn below_or_colinear(line: &Line, x: i32, y: i32) -> bool {
    relative_slope(line, x, y) >= 0
}
fn above(line: &Line, x: i32, y: i32) -> bool {
    relative_slope(line, x, y) < 0
}
fn above_or_colinear(line: &Line, x: i32, y: i32) -> bool {
    relative_slope(line, x, y) <= 0
}
fn colinear(line: &Line, x: i32, y: i32) -> bool {
    relative_slope(line, x, y) == 0
}
fn line_colinear(a: &Line, b: &Line) -> bool {
    colinear(a, b.xi, b.yi) && colinear(a, b.xf, b.yf)
}

#[derive(Debug, Clone, Copy)]
struct ViewBump {
    x: i32,
    y: i32,
    parent: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
struct View {
    shallow_line: Line,
    steep_line: Line,
    shallow_bump: Option<usize>,
    steep_bump: Option<usize>,
}

fn add_shallow_bump(x: i32, y: i32, view_idx: usize, views: &mut [View], bumps: &mut Vec<ViewBump>) {
    views[view_idx].shallow_line.xf = x;
    views[view_idx].shallow_line.yf = y;
    bumps.push(ViewBump { x, y, parent: views[view_idx].shallow_bump });
    views[view_idx].shallow_bump = Some(bumps.len() - 1);

    let mut cur = views[view_idx].steep_bump;
    while let Some(bi) = cur {
        let b = bumps[bi];
        if above(&views[view_idx].shallow_line, b.x, b.y) {
            views[view_idx].shallow_line.xi = b.x;
            views[view_idx].shallow_line.yi = b.y;
        }
        cur = b.parent;
    }
}

fn add_steep_bump(x: i32, y: i32, view_idx: usize, views: &mut [View], bumps: &mut Vec<ViewBump>) {
    views[view_idx].steep_line.xf = x;
    views[view_idx].steep_line.yf = y;
    bumps.push(ViewBump { x, y, parent: views[view_idx].steep_bump });
    views[view_idx].steep_bump = Some(bumps.len() - 1);

    let mut cur = views[view_idx].shallow_bump;
    while let Some(bi) = cur {
        let b = bumps[bi];
        if below(&views[view_idx].steep_line, b.x, b.y) {
            views[view_idx].steep_line.xi = b.x;
            views[view_idx].steep_line.yi = b.y;
        }
        cur = b.parent;
    }
}

/// Drop the active view at `idx` if it has degenerated to a single
/// point colinear with the quadrant's outer corner. Returns `false` if
/// it was removed.
fn check_view(active_views: &mut Vec<usize>, idx: usize, views: &[View], offset: i32, limit: i32) -> bool {
    let view = views[active_views[idx]];
    if line_colinear(&view.shallow_line, &view.steep_line)
        && (colinear(&view.shallow_line, offset, limit) || colinear(&view.shallow_line, limit, offset))
    {
        active_views.remove(idx);
        false
    } else {
        true
    }
}

fn is_blocked(map: &mut Map, pov: Point, x: i32, y: i32, dx: i32, dy: i32, light_walls: bool) -> bool {
    let p = Point::new(pov.x + x * dx / STEP_SIZE, pov.y + y * dy / STEP_SIZE);
    let blocked = !map.is_transparent(p);
    if !blocked || light_walls {
        map.set_in_fov(p, true);
    }
    blocked
}

#[allow(clippy::too_many_arguments)]
fn visit_coords(
    map: &mut Map,
    pov: Point,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    active_views: &mut Vec<usize>,
    current_view: &mut usize,
    light_walls: bool,
    offset: i32,
    limit: i32,
    views: &mut Vec<View>,
    bumps: &mut Vec<ViewBump>,
) {
    let tlx = x;
    let tly = y + STEP_SIZE;
    let brx = x + STEP_SIZE;
    let bry = y;

    let vi = loop {
        if *current_view == active_views.len() {
            return;
        }
        let vi = active_views[*current_view];
        if !below_or_colinear(&views[vi].steep_line, brx, bry) {
            break vi;
        }
        *current_view += 1;
    };
    if above_or_colinear(&views[vi].shallow_line, tlx, tly) {
        return;
    }
    if !is_blocked(map, pov, x, y, dx, dy, light_walls) {
        return;
    }

    let shallow_above_br = above(&views[vi].shallow_line, brx, bry);
    let steep_below_tl = below(&views[vi].steep_line, tlx, tly);

    if shallow_above_br && steep_below_tl {
        active_views.remove(*current_view);
    } else if shallow_above_br {
        add_shallow_bump(tlx, tly, vi, views, bumps);
        check_view(active_views, *current_view, views, offset, limit);
    } else if steep_below_tl {
        add_steep_bump(brx, bry, vi, views, bumps);
        check_view(active_views, *current_view, views, offset, limit);
    } else {
        let Some(views_offset) = map.index(Point::new(pov.x + x * dx / STEP_SIZE, pov.y + y * dy / STEP_SIZE)) else {
            return;
        };
        views[views_offset] = views[vi];
        let shallower_idx = views_offset;
        let view_index = *current_view;
        active_views.insert(view_index, shallower_idx);

        *current_view = view_index;
        add_steep_bump(brx, bry, shallower_idx, views, bumps);
        let mut steeper_pos = view_index + 1;
        if !check_view(active_views, view_index, views, offset, limit) {
            steeper_pos -= 1;
        }
        if steeper_pos < active_views.len() {
            let steeper_idx = active_views[steeper_pos];
            add_shallow_bump(tlx, tly, steeper_idx, views, bumps);
            check_view(active_views, steeper_pos, views, offset, limit);
        }
        if view_index > active_views.len() {
            *current_view = active_views.len();
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn check_quadrant(
    map: &mut Map,
    pov: Point,
    origin: usize,
    dx: i32,
    dy: i32,
    extent_x: i32,
    extent_y: i32,
    light_walls: bool,
    offset: i32,
    limit: i32,
    views: &mut Vec<View>,
    bumps: &mut Vec<ViewBump>,
    active_views: &mut Vec<usize>,
) {
    bumps.clear();
    active_views.clear();

    views[origin] = View {
        shallow_line: Line { xi: offset, yi: limit, xf: extent_x * STEP_SIZE, yf: 0 },
        steep_line: Line { xi: limit, yi: offset, xf: 0, yf: extent_y * STEP_SIZE },
        shallow_bump: None,
        steep_bump: None,
    };
    active_views.push(origin);

    let max_i = extent_x + extent_y;
    for i in 1..=max_i {
        if active_views.is_empty() {
            break;
        }
        let mut current_view = 0usize;
        let start_j = (i - extent_x).max(0);
        let max_j = i.min(extent_y);
        for j in start_j..=max_j {
            if active_views.is_empty() || current_view == active_views.len() {
                break;
            }
            let x = (i - j) * STEP_SIZE;
            let y = j * STEP_SIZE;
            visit_coords(map, pov, x, y, dx, dy, active_views, &mut current_view, light_walls, offset, limit, views, bumps);
        }
    }
}

pub(crate) fn compute(map: &mut Map, pov: Point, radius: crate::radius::Radius, light_walls: bool, p: u8) -> Result<()> {
    if p > 8 {
        return Err(FovError::invalid_argument(format!(
            "bad permissiveness {p} for PERMISSIVE, accepted range is [0, 8]"
        )));
    }
    let offset = 8 - i32::from(p);
    let limit = 8 + i32::from(p);

    map.set_in_fov(pov, true);

    let origin = map.index(pov).ok_or_else(|| {
        FovError::invalid_argument(format!("point of view {pov:?} is outside the {}x{} map", map.width(), map.height()))
    })?;

    let cell_count = map.cell_count() as usize;
    let mut views: Vec<View> = Vec::new();
    views
        .try_reserve_exact(cell_count)
        .map_err(|_| FovError::out_of_memory("allocating permissive view scratch"))?;
    views.resize(cell_count, View::default());

    let mut bumps: Vec<ViewBump> = Vec::new();
    bumps
        .try_reserve_exact(cell_count)
        .map_err(|_| FovError::out_of_memory("allocating permissive bump scratch"))?;

    let mut active_views: Vec<usize> = Vec::new();
    active_views
        .try_reserve_exact(cell_count)
        .map_err(|_| FovError::out_of_memory("allocating permissive active-view scratch"))?;

    let mut min_x = pov.x;
    let mut max_x = map.width() - pov.x - 1;
    let mut min_y = pov.y;
    let mut max_y = map.height() - pov.y - 1;
    if let crate::radius::Radius::Bounded(r) = radius {
        min_x = min_x.min(r);
        max_x = max_x.min(r);
        min_y = min_y.min(r);
        max_y = max_y.min(r);
    }

    for &(dx, dy, ex, ey) in &[(1, 1, max_x, max_y), (1, -1, max_x, min_y), (-1, -1, min_x, min_y), (-1, 1, min_x, max_y)] {
        check_quadrant(map, pov, origin, dx, dy, ex, ey, light_walls, offset, limit, &mut views, &mut bumps, &mut active_views);
    }
    Ok(())
}
