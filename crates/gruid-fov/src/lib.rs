//! Field-of-view computation for grid-based games.
//!
//! A [`Map`] tracks, per cell, whether light passes through it
//! (`transparent`), whether an actor can stand on it (`walkable`), and
//! whether it is currently visible (`fov`). [`compute_fov`] recomputes
//! the `fov` flags from a point of view using one of six
//! [`Algorithm`]s, all originally described for libtcod:
//!
//! - [`Algorithm::Basic`] — raycasting along the map's perimeter.
//! - [`Algorithm::Diamond`] — diamond raycasting with obscurity vectors.
//! - [`Algorithm::Shadow`] — recursive shadowcasting over 8 octants.
//! - [`Algorithm::Permissive`] — Jonathon Duerig's precise permissive FOV.
//! - [`Algorithm::Restrictive`] — Mingos' restrictive precise angle shadowcasting.
//! - [`Algorithm::SymmetricShadowcast`] — Albert Ford's symmetric shadowcasting.
//!
//! ```
//! use gruid_core::Point;
//! use gruid_fov::{compute_fov, Algorithm, Map};
//!
//! let mut map = Map::new(20, 20).unwrap();
//! map.clear(true, true);
//! map.set_properties(Point::new(10, 5), false, true);
//! compute_fov(&mut map, Point::new(9, 9), 0, true, Algorithm::Shadow).unwrap();
//! assert!(map.is_in_fov(Point::new(9, 9)));
//! ```

mod algorithm;
mod basic;
mod diamond;
mod error;
mod line;
mod map;
mod permissive;
mod postprocess;
mod radius;
mod restrictive;
mod shadow;
mod symmetric;

pub use algorithm::{compute_fov, Algorithm};
pub use error::{last_error, FovError, Result};
pub use line::{walk, Bresenham};
pub use map::{Cell, Map};
pub use radius::Radius;
