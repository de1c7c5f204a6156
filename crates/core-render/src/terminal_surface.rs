//! Crossterm-backed surface.
//!
//! `acquire` enters raw mode and the alternate screen (claiming the
//! process-wide terminal lease), sizes a `BufferSurface` to the terminal and
//! hands out its root. All drawing primitives delegate to that buffer, whose
//! flushes write to stdout. `release` (or drop) leaves the terminal in the
//! mode it was found.

use crate::border::BorderGlyphs;
use crate::buffer_surface::BufferSurface;
use crate::surface::{Surface, SurfaceError, SurfaceId};
use core_terminal::{CrosstermBackend, TerminalBackend};
use std::io::{Stdout, stdout};
use tracing::{info, warn};

pub struct TerminalSurface {
    backend: CrosstermBackend,
    buffer: Option<BufferSurface<Stdout>>,
    glyphs: BorderGlyphs,
    title: Option<String>,
}

impl TerminalSurface {
    pub fn new(glyphs: BorderGlyphs) -> Self {
        Self {
            backend: CrosstermBackend::new(),
            buffer: None,
            glyphs,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn buffer(&self) -> Result<&BufferSurface<Stdout>, SurfaceError> {
        self.buffer.as_ref().ok_or(SurfaceError::NotAcquired)
    }

    fn buffer_mut(&mut self) -> Result<&mut BufferSurface<Stdout>, SurfaceError> {
        self.buffer.as_mut().ok_or(SurfaceError::NotAcquired)
    }
}

impl Surface for TerminalSurface {
    fn acquire(&mut self) -> Result<SurfaceId, SurfaceError> {
        if self.buffer.is_some() {
            return Err(SurfaceError::AlreadyAcquired);
        }
        self.backend
            .enter()
            .map_err(|e| SurfaceError::Unavailable(format!("{e:#}")))?;
        let (rows, cols) = match self.backend.size() {
            Ok(size) => size,
            Err(e) => {
                let _ = self.backend.leave();
                return Err(SurfaceError::Unavailable(format!("{e:#}")));
            }
        };
        if let Some(title) = self.title.as_deref() {
            if let Err(e) = self.backend.set_title(title) {
                warn!(target: "terminal", error = %e, "set_title_failed");
            }
        }
        let mut buffer = BufferSurface::with_output(rows, cols, stdout()).with_glyphs(self.glyphs);
        let root = buffer.acquire()?;
        self.buffer = Some(buffer);
        info!(target: "terminal", rows, cols, "terminal_acquired");
        Ok(root)
    }

    fn release(&mut self) -> Result<(), SurfaceError> {
        let mut buffer = self.buffer.take().ok_or(SurfaceError::NotAcquired)?;
        let released = buffer.release();
        // Leave even when the buffer complains; the terminal must come back.
        self.backend.leave()?;
        info!(target: "terminal", "terminal_released");
        released
    }

    fn dimensions(&self, id: SurfaceId) -> Result<(u16, u16), SurfaceError> {
        self.buffer()?.dimensions(id)
    }

    fn create_subsurface(
        &mut self,
        parent: SurfaceId,
        rows: u16,
        cols: u16,
        y: u16,
        x: u16,
    ) -> Result<SurfaceId, SurfaceError> {
        self.buffer_mut()?.create_subsurface(parent, rows, cols, y, x)
    }

    fn paint_border(&mut self, id: SurfaceId) -> Result<(), SurfaceError> {
        self.buffer_mut()?.paint_border(id)
    }

    fn write_text(
        &mut self,
        id: SurfaceId,
        row: u16,
        col: u16,
        text: &str,
    ) -> Result<(), SurfaceError> {
        self.buffer_mut()?.write_text(id, row, col, text)
    }

    fn blank_run(
        &mut self,
        id: SurfaceId,
        row: u16,
        col: u16,
        len: u16,
    ) -> Result<(), SurfaceError> {
        self.buffer_mut()?.blank_run(id, row, col, len)
    }

    fn flush(&mut self, id: SurfaceId) -> Result<(), SurfaceError> {
        self.buffer_mut()?.flush(id)
    }

    fn destroy(&mut self, id: SurfaceId) -> Result<(), SurfaceError> {
        self.buffer_mut()?.destroy(id)
    }
}
