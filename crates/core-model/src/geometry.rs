//! Positions, footprints and the content area of a window.
//!
//! All coordinates are content-relative: `(0,0)` is the first usable cell of
//! the parent, after the border inset. Region coordinates are expressed in
//! terminal cell units (`u16`) aligning with the surface APIs; sums are
//! computed in `u32` so placements near `u16::MAX` cannot wrap.
//!
//! Inset rule: a bordered window of full size `(rows, cols)` offers a
//! `(rows - 1, cols - 1)` content area whose origin is surface cell `(1,1)`.
//! The top and left border absorb the inset; the last content row and column
//! share cells with the bottom and right border. A child there covers the
//! border, and removing any edge-touching sibling repaints the whole border,
//! so surviving children on the last row or column get overdrawn by border
//! glyphs while staying registered. Every bounds check, paint,
//! sub-surface anchor, blank-out and edge test goes through `ContentArea`, so
//! the rule cannot diverge between operations.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Coordinate {
    pub x: u16,
    pub y: u16,
}

impl Coordinate {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Footprint {
    pub rows: u16,
    pub cols: u16,
}

impl Footprint {
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentArea {
    /// Surface row of content row 0.
    pub origin_row: u16,
    /// Surface column of content column 0.
    pub origin_col: u16,
    pub rows: u16,
    pub cols: u16,
}

impl ContentArea {
    pub fn of(full: Footprint, bordered: bool) -> Self {
        let inset = u16::from(bordered);
        Self {
            origin_row: inset,
            origin_col: inset,
            rows: full.rows.saturating_sub(inset),
            cols: full.cols.saturating_sub(inset),
        }
    }

    pub fn size(&self) -> Footprint {
        Footprint::new(self.rows, self.cols)
    }

    /// True when `fp` placed at `at` stays inside the area.
    pub fn fits(&self, at: Coordinate, fp: Footprint) -> bool {
        at.x as u32 + fp.cols as u32 <= self.cols as u32
            && at.y as u32 + fp.rows as u32 <= self.rows as u32
    }

    /// Surface `(row, col)` of a content coordinate.
    pub fn to_surface(&self, at: Coordinate) -> (u16, u16) {
        (self.origin_row + at.y, self.origin_col + at.x)
    }

    /// True when the rectangle starts on the first content row/column or ends
    /// on the last one, i.e. it borders or overlaps a border edge.
    pub fn touches_edge(&self, at: Coordinate, fp: Footprint) -> bool {
        at.x == 0
            || at.y == 0
            || at.x as u32 + fp.cols as u32 == self.cols as u32
            || at.y as u32 + fp.rows as u32 == self.rows as u32
    }
}
