//! Error type and the thread-local "last error" diagnostic slot.

use std::cell::RefCell;
use std::fmt;

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn set_last_error(msg: impl Into<String>) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(msg.into()));
}

/// Read the diagnostic set by the most recent non-`Ok` call on this thread.
///
/// Independent of the `Err` value itself; set on every non-`Ok` return from
/// any public entry point in this crate.
pub fn last_error() -> Option<String> {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}

/// Errors produced by [`Map`](crate::Map) and [`compute_fov`](crate::compute_fov).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FovError {
    /// A null/zero-sized map, an out-of-bounds point-of-view, a
    /// permissiveness outside `[0, 8]`, or an unrecognized algorithm.
    InvalidArgument(String),
    /// Scratch-buffer allocation failed (DIAMOND, PERMISSIVE, RESTRICTIVE)
    /// or `Map::copy` needed to grow `dest` and couldn't.
    OutOfMemory(String),
}

impl FovError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        set_last_error(msg.clone());
        Self::InvalidArgument(msg)
    }

    pub(crate) fn out_of_memory(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        set_last_error(msg.clone());
        Self::OutOfMemory(msg)
    }
}

impl fmt::Display for FovError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::OutOfMemory(msg) => write!(f, "out of memory: {msg}"),
        }
    }
}

impl std::error::Error for FovError {}

/// Shorthand used throughout this crate's public entry points.
pub type Result<T> = std::result::Result<T, FovError>;
