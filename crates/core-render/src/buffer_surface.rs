//! In-memory surface over a back/front `Frame` pair.
//!
//! Drawing primitives write into the back frame. `flush` diffs the back frame
//! against the front frame (what the output has already seen) inside the
//! flushed surface only, emits changed clusters through a `Writer`, and copies
//! them to the front frame. Output goes to any `Write` sink: the terminal
//! surface passes stdout, tests use `io::sink()`.
//!
//! Every lifecycle call is counted in `SurfaceStats` and flushes are logged in
//! order, which is what the tree tests assert against.

use crate::border::BorderGlyphs;
use crate::dirty::DirtyRows;
use crate::surface::{Surface, SurfaceError, SurfaceId};
use crate::writer::Writer;
use crate::{Cell, Frame, display_width};
use std::io::{self, Sink, Write};
use tracing::{trace, warn};

#[derive(Debug, Clone)]
struct Region {
    parent: Option<SurfaceId>,
    /// Absolute frame row of the region origin.
    top: u16,
    /// Absolute frame column of the region origin.
    left: u16,
    rows: u16,
    cols: u16,
    children: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    pub acquired: u32,
    pub released: u32,
    pub created: u32,
    pub destroyed: u32,
    /// Surfaces in the order they were flushed.
    pub flushes: Vec<SurfaceId>,
    /// Writer commands emitted across all flushes.
    pub commands: usize,
}

impl SurfaceStats {
    /// Sub-surfaces created and not yet destroyed.
    pub fn live(&self) -> i64 {
        self.created as i64 - self.destroyed as i64
    }
}

pub struct BufferSurface<W: Write = Sink> {
    back: Frame,
    front: Frame,
    regions: Vec<Option<Region>>,
    root: Option<SurfaceId>,
    dirty: DirtyRows,
    glyphs: BorderGlyphs,
    out: W,
    stats: SurfaceStats,
}

impl BufferSurface<Sink> {
    /// Surface that keeps cells in memory and discards terminal output.
    pub fn headless(rows: u16, cols: u16) -> Self {
        Self::with_output(rows, cols, io::sink())
    }
}

impl<W: Write> BufferSurface<W> {
    pub fn with_output(rows: u16, cols: u16, out: W) -> Self {
        Self {
            back: Frame::new(cols, rows),
            front: Frame::new(cols, rows),
            regions: Vec::new(),
            root: None,
            dirty: DirtyRows::new(),
            glyphs: BorderGlyphs::default(),
            out,
            stats: SurfaceStats::default(),
        }
    }

    pub fn with_glyphs(mut self, glyphs: BorderGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn glyphs(&self) -> &BorderGlyphs {
        &self.glyphs
    }

    pub fn stats(&self) -> &SurfaceStats {
        &self.stats
    }

    /// Text of the back frame at absolute `(row, col)`, `len` columns wide.
    pub fn screen_text(&self, row: u16, col: u16, len: u16) -> String {
        self.back.row_text(row, col, len)
    }

    /// Text already pushed to the output at absolute `(row, col)`.
    pub fn displayed_text(&self, row: u16, col: u16, len: u16) -> String {
        self.front.row_text(row, col, len)
    }

    /// Back frame cell at absolute `(row, col)`.
    pub fn cell(&self, row: u16, col: u16) -> Option<&Cell> {
        self.back.cell(col, row)
    }

    /// Absolute `(row, col)` of a surface origin.
    pub fn origin(&self, id: SurfaceId) -> Result<(u16, u16), SurfaceError> {
        let r = self.region(id)?;
        Ok((r.top, r.left))
    }

    pub fn parent_of(&self, id: SurfaceId) -> Result<Option<SurfaceId>, SurfaceError> {
        Ok(self.region(id)?.parent)
    }

    pub fn live_surfaces(&self) -> usize {
        self.regions.iter().filter(|r| r.is_some()).count()
    }

    pub fn is_acquired(&self) -> bool {
        self.root.is_some()
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn region(&self, id: SurfaceId) -> Result<&Region, SurfaceError> {
        self.regions
            .get(id.index())
            .and_then(|r| r.as_ref())
            .ok_or(SurfaceError::Unknown(id))
    }

    fn region_mut(&mut self, id: SurfaceId) -> Result<&mut Region, SurfaceError> {
        self.regions
            .get_mut(id.index())
            .and_then(|r| r.as_mut())
            .ok_or(SurfaceError::Unknown(id))
    }

    fn check_span(
        &self,
        id: SurfaceId,
        row: u16,
        col: u16,
        len: u16,
    ) -> Result<Region, SurfaceError> {
        let r = self.region(id)?;
        if row >= r.rows || col as u32 + len as u32 > r.cols as u32 {
            return Err(SurfaceError::OutOfRange {
                surface: id,
                rows: 1,
                cols: len,
                y: row,
                x: col,
            });
        }
        Ok(r.clone())
    }

    /// Emit changed clusters of absolute row `y` within `[left, left+cols)`.
    fn emit_row(&mut self, writer: &mut Writer, y: u16, left: u16, cols: u16) {
        let width = self.back.width as usize;
        let base = y as usize * width;
        let end = left.saturating_add(cols).min(self.back.width);
        let mut x = left;
        let mut cursor: Option<u16> = None;
        while x < end {
            let idx = base + x as usize;
            if self.back.cells[idx] == self.front.cells[idx] {
                x += 1;
                continue;
            }
            let mut lx = x;
            while lx > 0 && !self.back.cells[base + lx as usize].is_leader() {
                lx -= 1;
            }
            let lead = &self.back.cells[base + lx as usize];
            let w = lead.visual_width().max(1);
            if cursor != Some(lx) {
                writer.move_to(lx, y);
            }
            writer.print(lead.cluster().to_string());
            let stop = (lx as usize + w as usize).min(width);
            for cx in lx as usize..stop {
                self.front.cells[base + cx] = self.back.cells[base + cx].clone();
            }
            cursor = Some(stop as u16);
            x = (stop as u16).max(x + 1);
        }
        let row = base..base + width;
        if self.back.cells[row.clone()] != self.front.cells[row] {
            // Changes outside this surface wait for the surface that owns them.
            self.dirty.mark(y);
        }
    }
}

impl<W: Write> Surface for BufferSurface<W> {
    fn acquire(&mut self) -> Result<SurfaceId, SurfaceError> {
        if self.root.is_some() {
            return Err(SurfaceError::AlreadyAcquired);
        }
        let id = SurfaceId(self.regions.len() as u32);
        self.regions.push(Some(Region {
            parent: None,
            top: 0,
            left: 0,
            rows: self.back.height,
            cols: self.back.width,
            children: 0,
        }));
        self.root = Some(id);
        self.stats.acquired += 1;
        trace!(target: "render.surface", %id, rows = self.back.height, cols = self.back.width, "acquire");
        Ok(id)
    }

    fn release(&mut self) -> Result<(), SurfaceError> {
        let root = self.root.take().ok_or(SurfaceError::NotAcquired)?;
        let leaked = self
            .regions
            .iter()
            .filter(|r| r.as_ref().is_some_and(|r| r.parent.is_some()))
            .count();
        if leaked > 0 {
            warn!(target: "render.surface", leaked, "release_with_live_subsurfaces");
        }
        for slot in self.regions.iter_mut() {
            *slot = None;
        }
        self.dirty.clear();
        self.stats.released += 1;
        trace!(target: "render.surface", %root, "release");
        Ok(())
    }

    fn dimensions(&self, id: SurfaceId) -> Result<(u16, u16), SurfaceError> {
        let r = self.region(id)?;
        Ok((r.rows, r.cols))
    }

    fn create_subsurface(
        &mut self,
        parent: SurfaceId,
        rows: u16,
        cols: u16,
        y: u16,
        x: u16,
    ) -> Result<SurfaceId, SurfaceError> {
        let p = self.region(parent)?;
        let fits = rows > 0
            && cols > 0
            && y as u32 + rows as u32 <= p.rows as u32
            && x as u32 + cols as u32 <= p.cols as u32;
        if !fits {
            return Err(SurfaceError::OutOfRange {
                surface: parent,
                rows,
                cols,
                y,
                x,
            });
        }
        let region = Region {
            parent: Some(parent),
            top: p.top + y,
            left: p.left + x,
            rows,
            cols,
            children: 0,
        };
        self.region_mut(parent)?.children += 1;
        let id = SurfaceId(self.regions.len() as u32);
        self.regions.push(Some(region));
        self.stats.created += 1;
        trace!(target: "render.surface", %id, %parent, rows, cols, y, x, "create_subsurface");
        Ok(id)
    }

    fn paint_border(&mut self, id: SurfaceId) -> Result<(), SurfaceError> {
        let r = self.region(id)?.clone();
        if r.rows < 2 || r.cols < 2 {
            return Err(SurfaceError::TooSmall {
                surface: id,
                rows: r.rows,
                cols: r.cols,
            });
        }
        let glyphs = self.glyphs;
        let mut buf = [0u8; 4];
        for row in 0..r.rows {
            for col in 0..r.cols {
                if let Some(ch) = glyphs.glyph_at(row, col, r.rows, r.cols) {
                    let s = ch.encode_utf8(&mut buf);
                    self.back.set_cluster(r.left + col, r.top + row, s, 1);
                }
            }
        }
        self.dirty.mark_range(r.top, r.rows);
        Ok(())
    }

    fn write_text(
        &mut self,
        id: SurfaceId,
        row: u16,
        col: u16,
        text: &str,
    ) -> Result<(), SurfaceError> {
        let r = self.check_span(id, row, col, display_width(text))?;
        self.back.put_str(r.left + col, r.top + row, text);
        self.dirty.mark(r.top + row);
        Ok(())
    }

    fn blank_run(
        &mut self,
        id: SurfaceId,
        row: u16,
        col: u16,
        len: u16,
    ) -> Result<(), SurfaceError> {
        let r = self.check_span(id, row, col, len)?;
        self.back.blank_span(r.left + col, r.top + row, len);
        self.dirty.mark(r.top + row);
        Ok(())
    }

    fn flush(&mut self, id: SurfaceId) -> Result<(), SurfaceError> {
        let r = self.region(id)?.clone();
        self.dirty.mark_range(r.top, r.rows);
        let rows = self.dirty.take_in_span(r.top, r.rows);
        let mut writer = Writer::new();
        for y in rows {
            self.emit_row(&mut writer, y, r.left, r.cols);
        }
        let emitted = if writer.is_empty() {
            0
        } else {
            writer.flush(&mut self.out)?
        };
        self.stats.flushes.push(id);
        self.stats.commands += emitted;
        trace!(target: "render.surface", %id, emitted, "flush");
        Ok(())
    }

    fn destroy(&mut self, id: SurfaceId) -> Result<(), SurfaceError> {
        let r = self.region(id)?;
        if r.children > 0 {
            return Err(SurfaceError::Busy(id, r.children));
        }
        let parent = r.parent;
        self.regions[id.index()] = None;
        match parent {
            Some(p) => {
                if let Ok(pr) = self.region_mut(p) {
                    pr.children = pr.children.saturating_sub(1);
                }
                self.stats.destroyed += 1;
            }
            None => {
                self.root = None;
                self.stats.released += 1;
            }
        }
        trace!(target: "render.surface", %id, "destroy");
        Ok(())
    }
}
