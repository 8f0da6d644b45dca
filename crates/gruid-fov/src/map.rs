//! The [`Map`] grid and its per-cell [`Cell`] state.
//!
//! Grounded in libtcod's `TCOD_Map`/`TCOD_MapCell`
//! (`original_source/src/libtcod/fov_types.h`, `fov_c.c`): a flat,
//! row-major, owned buffer of three-bit-ish cells, with out-of-bounds
//! reads returning `false` and out-of-bounds writes silently doing
//! nothing.

use gruid_core::Point;

use crate::error::{FovError, Result};

/// A single map cell: transparency, walkability, and current FOV state.
///
/// `walkable` is carried only for the benefit of external pathfinding
/// collaborators (see `spec.md` §6) — FOV computation never reads or
/// writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub(crate) transparent: bool,
    pub(crate) walkable: bool,
    pub(crate) fov: bool,
}

/// An owned, rectangular grid of [`Cell`]s.
///
/// Indexed row-major as `y * width + x`. The owner of a `Map`
/// exclusively controls its lifetime; there is no shared-buffer
/// slicing here (contrast with the wider gruid ecosystem's `Grid`) —
/// a `Map` is always a single independent allocation, matching the
/// original `TCOD_Map`'s ownership model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Map {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Map {
    /// Allocate a new map with every cell `transparent = walkable = fov =
    /// false`. Fails if `width <= 0 || height <= 0`.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(FovError::invalid_argument(format!(
                "map dimensions must be positive, got {width}x{height}"
            )));
        }
        let nbcells = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); nbcells],
        })
    }

    /// Width of the map.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the map.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells (`width * height`).
    #[inline]
    pub fn cell_count(&self) -> i32 {
        self.width * self.height
    }

    /// Whether `p` lies within `[0, width) x [0, height)`.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    #[inline]
    pub(crate) fn index(&self, p: Point) -> Option<usize> {
        if self.in_bounds(p) {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }

    /// Set every cell to `(transparent, walkable)` and clear `fov`.
    pub fn clear(&mut self, transparent: bool, walkable: bool) {
        for cell in &mut self.cells {
            cell.transparent = transparent;
            cell.walkable = walkable;
            cell.fov = false;
        }
    }

    /// Clear only the `fov` flag on every cell, leaving transparency and
    /// walkability untouched. Called at the start of every
    /// [`compute_fov`](crate::compute_fov).
    pub(crate) fn clear_fov(&mut self) {
        for cell in &mut self.cells {
            cell.fov = false;
        }
    }

    /// Resize `dest` to match `source` if their cell counts differ, then
    /// bitwise-copy every cell. Mirrors `TCOD_map_copy`.
    pub fn copy(source: &Map, dest: &mut Map) -> Result<()> {
        if dest.cell_count() != source.cell_count() {
            dest.cells = Vec::new();
            dest.cells
                .try_reserve_exact(source.cells.len())
                .map_err(|_| FovError::out_of_memory("reallocating dest while copying map"))?;
            dest.cells.resize(source.cells.len(), Cell::default());
        }
        dest.width = source.width;
        dest.height = source.height;
        dest.cells.copy_from_slice(&source.cells);
        Ok(())
    }

    /// Change the transparency/walkability of a single cell. No-op if
    /// `(x, y)` is out of bounds.
    pub fn set_properties(&mut self, p: Point, transparent: bool, walkable: bool) {
        if let Some(idx) = self.index(p) {
            self.cells[idx].transparent = transparent;
            self.cells[idx].walkable = walkable;
        }
    }

    /// Set the FOV flag on a single cell. No-op if out of bounds.
    pub fn set_in_fov(&mut self, p: Point, fov: bool) {
        if let Some(idx) = self.index(p) {
            self.cells[idx].fov = fov;
        }
    }

    /// Whether `p` was marked visible by the last `compute_fov` call (or
    /// `set_in_fov`). `false` if out of bounds.
    pub fn is_in_fov(&self, p: Point) -> bool {
        self.index(p).is_some_and(|idx| self.cells[idx].fov)
    }

    /// Whether `p` is transparent. `false` if out of bounds.
    pub fn is_transparent(&self, p: Point) -> bool {
        self.index(p).is_some_and(|idx| self.cells[idx].transparent)
    }

    /// Whether `p` is walkable. `false` if out of bounds.
    pub fn is_walkable(&self, p: Point) -> bool {
        self.index(p).is_some_and(|idx| self.cells[idx].walkable)
    }

    #[inline]
    pub(crate) fn set_fov_unchecked(&mut self, idx: usize, fov: bool) {
        self.cells[idx].fov = fov;
    }

    #[inline]
    pub(crate) fn cell_at(&self, idx: usize) -> Cell {
        self.cells[idx]
    }
}
