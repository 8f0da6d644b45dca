//! The [`Algorithm`] selector and the [`compute_fov`] entry point that
//! dispatches to one of the six implementations.

use gruid_core::Point;

use crate::error::{FovError, Result};
use crate::map::Map;
use crate::radius::Radius;
use crate::{basic, diamond, permissive, postprocess, restrictive, shadow, symmetric};

/// Which field-of-view algorithm to run. `Permissive`'s `u8` is the
/// permissiveness `p`, accepted in `[0, 8]` (0 is the most restrictive,
/// 8 the most permissive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Basic,
    Diamond,
    Shadow,
    Permissive(u8),
    Restrictive,
    SymmetricShadowcast,
}

/// Recompute `map`'s `fov` flags from `pov`, replacing whatever was
/// there before.
///
/// `max_radius <= 0` means unlimited (bounded only by the map itself).
/// `light_walls` controls whether opaque cells at the edge of a lit
/// area are themselves marked visible. Fails if `pov` is out of bounds,
/// or if `algorithm` is `Permissive(p)` with `p > 8`.
pub fn compute_fov(map: &mut Map, pov: Point, max_radius: i32, light_walls: bool, algorithm: Algorithm) -> Result<()> {
    if !map.in_bounds(pov) {
        return Err(FovError::invalid_argument(format!(
            "point of view {pov:?} is outside the {}x{} map",
            map.width(),
            map.height()
        )));
    }

    map.clear_fov();
    let radius = Radius::normalize(max_radius);

    match algorithm {
        Algorithm::Basic => {
            basic::compute(map, pov, radius, light_walls);
            if light_walls {
                postprocess::run(map, pov, radius);
            }
        }
        Algorithm::Diamond => diamond::compute(map, pov, radius, light_walls)?,
        Algorithm::Shadow => shadow::compute(map, pov, radius, light_walls),
        Algorithm::Permissive(p) => permissive::compute(map, pov, radius, light_walls, p)?,
        Algorithm::Restrictive => restrictive::compute(map, pov, radius, light_walls)?,
        Algorithm::SymmetricShadowcast => symmetric::compute(map, pov, radius, light_walls),
    }
    Ok(())
}
