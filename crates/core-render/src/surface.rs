//! Drawing surface collaborator.
//!
//! A surface is a rectangular region of a terminal-sized cell buffer. The
//! root surface covers the whole terminal and is obtained with `acquire`;
//! every other surface is a sub-region of an existing one. Coordinates passed
//! to the drawing primitives are relative to the surface they target.
//!
//! Sub-surfaces share cells with their parent (writing through a child is
//! visible through the parent) and must be destroyed before their parent.

use std::fmt;
use thiserror::Error;

/// Handle to a live surface. Ids are never reused within one collaborator,
/// so a destroyed id stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub(crate) u32);

impl SurfaceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("terminal unavailable: {0}")]
    Unavailable(String),
    #[error("surface already acquired")]
    AlreadyAcquired,
    #[error("surface not acquired")]
    NotAcquired,
    #[error("unknown or destroyed surface {0}")]
    Unknown(SurfaceId),
    #[error("{rows}x{cols} region at ({y},{x}) does not fit inside surface {surface}")]
    OutOfRange {
        surface: SurfaceId,
        rows: u16,
        cols: u16,
        y: u16,
        x: u16,
    },
    #[error("surface {surface} is {rows}x{cols}, too small for a border")]
    TooSmall { surface: SurfaceId, rows: u16, cols: u16 },
    #[error("surface {0} still has {1} live sub-surfaces")]
    Busy(SurfaceId, usize),
    #[error("terminal i/o failed: {0}")]
    Io(String),
}

impl From<anyhow::Error> for SurfaceError {
    fn from(e: anyhow::Error) -> Self {
        SurfaceError::Io(format!("{e:#}"))
    }
}

pub trait Surface {
    /// Take ownership of the terminal and return the root surface.
    fn acquire(&mut self) -> Result<SurfaceId, SurfaceError>;
    /// Give the terminal back, restoring its prior mode.
    fn release(&mut self) -> Result<(), SurfaceError>;
    /// `(rows, cols)` of a live surface.
    fn dimensions(&self, id: SurfaceId) -> Result<(u16, u16), SurfaceError>;
    /// Create a `rows` x `cols` sub-surface at (`y`,`x`) inside `parent`.
    fn create_subsurface(
        &mut self,
        parent: SurfaceId,
        rows: u16,
        cols: u16,
        y: u16,
        x: u16,
    ) -> Result<SurfaceId, SurfaceError>;
    /// Paint a one-cell box along the full boundary of the surface.
    fn paint_border(&mut self, id: SurfaceId) -> Result<(), SurfaceError>;
    fn write_text(&mut self, id: SurfaceId, row: u16, col: u16, text: &str)
    -> Result<(), SurfaceError>;
    fn blank_run(&mut self, id: SurfaceId, row: u16, col: u16, len: u16)
    -> Result<(), SurfaceError>;
    /// Mark the surface (and so its sub-surfaces) dirty and push pending
    /// changes inside it to the display.
    fn flush(&mut self, id: SurfaceId) -> Result<(), SurfaceError>;
    fn destroy(&mut self, id: SurfaceId) -> Result<(), SurfaceError>;
}
