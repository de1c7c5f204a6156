//! Cell grid, border glyphs and the drawing surface collaborator.
//!
//! `Cell` stores the full grapheme cluster for leader cells along with its
//! visual width; continuation cells (width==0) occupy the remaining columns of
//! a multi-column cluster and never print text.
//!
//! Invariants:
//! - Leader: width >= 1, `cluster` non-empty.
//! - Continuation: width == 0, `cluster` empty.
//! - Continuations immediately follow their leader horizontally; no gaps.
//!   Overwriting any cell of a wide cluster blanks the rest of that cluster so
//!   a row never holds an orphaned continuation.
//!
//! Exposed Components:
//! - `Cell` / `Frame`: logical grid backing every surface.
//! - `surface`: the `Surface` trait (sub-surface creation, border, text,
//!   blank runs, flush, destroy) and its error type.
//! - `buffer_surface`: in-memory implementation over a back/front `Frame`
//!   pair, recording lifecycle statistics.
//! - `terminal_surface`: crossterm-backed implementation owning the terminal.
//! - `writer`: terminal command abstraction (MoveTo, Print).
//! - `dirty`: dirty row tracker consulted by flush.
//! - `border`: glyph sets for painted boxes.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Full grapheme cluster string (leader cells only). Empty for continuation cells.
    pub cluster: String,
    /// Visual width in terminal columns. `0` designates a continuation cell.
    pub width: u8,
}

impl Cell {
    #[inline]
    pub fn leader(cluster: &str, width: u16) -> Self {
        Self {
            cluster: cluster.to_string(),
            width: width.max(1) as u8,
        }
    }
    #[inline]
    pub fn continuation() -> Self {
        Self {
            cluster: String::new(),
            width: 0,
        }
    }
    #[inline]
    pub fn is_leader(&self) -> bool {
        self.width > 0
    }
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.cluster == " "
    }
    #[inline]
    pub fn visual_width(&self) -> u16 {
        self.width as u16
    }
    #[inline]
    pub fn cluster(&self) -> &str {
        &self.cluster
    }
}

impl Default for Cell {
    fn default() -> Self {
        // Default is a single space leader cell for blank areas.
        Cell {
            cluster: " ".to_string(),
            width: 1,
        }
    }
}

/// Display width of a string in terminal columns.
pub fn display_width(s: &str) -> u16 {
    s.graphemes(true)
        .map(|g| g.width().max(1))
        .sum::<usize>()
        .min(u16::MAX as usize) as u16
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Blank whatever wide cluster covers (x,y) so the cell can be reused.
    fn detach_cluster_at(&mut self, x: u16, y: u16) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        // Walk back to the leader when landing on a continuation.
        let mut lx = x;
        while lx > 0 && !self.cells[idx - (x - lx) as usize].is_leader() {
            lx -= 1;
        }
        let lead_idx = idx - (x - lx) as usize;
        let w = self.cells[lead_idx].visual_width().max(1);
        if w == 1 && lx == x {
            return;
        }
        for dx in 0..w {
            if let Some(i) = self.index(lx + dx, y) {
                self.cells[i] = Cell::default();
            }
        }
    }

    /// Set a full cluster at (x,y) and populate continuation cells for its width.
    pub fn set_cluster(&mut self, x: u16, y: u16, cluster: &str, width: u16) {
        if x >= self.width || y >= self.height {
            return;
        }
        let w = width.max(1).min(self.width - x);
        for dx in 0..w {
            self.detach_cluster_at(x + dx, y);
        }
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = Cell::leader(cluster, w);
        }
        for dx in 1..w {
            if let Some(c_idx) = self.index(x + dx, y) {
                self.cells[c_idx] = Cell::continuation();
            }
        }
    }

    /// Write `text` starting at (x,y), one cluster per leader. Returns the
    /// number of columns consumed. Clusters past the right edge are dropped.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str) -> u16 {
        let mut cx = x;
        for g in text.graphemes(true) {
            if cx >= self.width {
                break;
            }
            let w = g.width().max(1) as u16;
            self.set_cluster(cx, y, g, w);
            cx = cx.saturating_add(w);
        }
        cx.saturating_sub(x)
    }

    /// Overwrite `len` cells starting at (x,y) with blanks.
    pub fn blank_span(&mut self, x: u16, y: u16, len: u16) {
        let end = x.saturating_add(len).min(self.width);
        for cx in x..end {
            self.set_cluster(cx, y, " ", 1);
        }
    }

    /// Iterate leader cells of a row, yielding (&str, width, start_x).
    pub fn row_leaders<'a>(&'a self, y: u16) -> impl Iterator<Item = (&'a str, u16, u16)> + 'a {
        let width = if y < self.height { self.width } else { 0 };
        let start = y as usize * self.width as usize;
        let mut x = 0u16;
        std::iter::from_fn(move || {
            while x < width {
                let idx = start + x as usize;
                let cell = &self.cells[idx];
                if cell.is_leader() {
                    let w = cell.visual_width();
                    let out = (&*cell.cluster, w, x);
                    x = x.saturating_add(w); // skip continuation cells
                    return Some(out);
                } else {
                    x += 1; // continuation => advance
                }
            }
            None
        })
    }

    /// Concatenated leader clusters for columns `[x, x+len)` of row `y`.
    pub fn row_text(&self, y: u16, x: u16, len: u16) -> String {
        let end = x.saturating_add(len);
        self.row_leaders(y)
            .filter(|(_, _, cx)| *cx >= x && *cx < end)
            .map(|(c, _, _)| c)
            .collect()
    }

    /// Collect leader cluster strings for a given row (testing / diagnostics only).
    pub fn line_clusters(&self, y: u16) -> Vec<&str> {
        if y >= self.height {
            return Vec::new();
        }
        self.row_leaders(y).map(|(c, _, _)| c).collect()
    }
}

pub mod border;
pub mod buffer_surface;
pub mod dirty;
pub mod surface;
pub mod terminal_surface;
pub mod writer;

pub use border::{BorderGlyphs, BorderStyle};
pub use buffer_surface::{BufferSurface, SurfaceStats};
pub use surface::{Surface, SurfaceError, SurfaceId};
pub use terminal_surface::TerminalSurface;
