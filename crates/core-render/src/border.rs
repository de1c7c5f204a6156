//! Border glyph sets for painted boxes.
//!
//! A border is one cell wide and runs along the full boundary of a surface:
//! corners at the four extreme cells, horizontal glyphs on the first and last
//! rows, vertical glyphs on the first and last columns.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Single,
    Double,
    Rounded,
    Ascii,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderGlyphs {
    pub const fn for_style(style: BorderStyle) -> Self {
        match style {
            BorderStyle::Single => Self::new('┌', '┐', '└', '┘', '─', '│'),
            BorderStyle::Double => Self::new('╔', '╗', '╚', '╝', '═', '║'),
            BorderStyle::Rounded => Self::new('╭', '╮', '╰', '╯', '─', '│'),
            BorderStyle::Ascii => Self::new('+', '+', '+', '+', '-', '|'),
        }
    }

    const fn new(
        top_left: char,
        top_right: char,
        bottom_left: char,
        bottom_right: char,
        horizontal: char,
        vertical: char,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            horizontal,
            vertical,
        }
    }

    /// Glyph for cell (row, col) of a `rows` x `cols` box, or `None` for
    /// interior cells.
    pub fn glyph_at(&self, row: u16, col: u16, rows: u16, cols: u16) -> Option<char> {
        let last_row = rows.saturating_sub(1);
        let last_col = cols.saturating_sub(1);
        let top = row == 0;
        let bottom = row == last_row;
        let left = col == 0;
        let right = col == last_col;
        match (top, bottom, left, right) {
            (true, _, true, _) => Some(self.top_left),
            (true, _, _, true) => Some(self.top_right),
            (_, true, true, _) => Some(self.bottom_left),
            (_, true, _, true) => Some(self.bottom_right),
            (true, _, _, _) | (_, true, _, _) => Some(self.horizontal),
            (_, _, true, _) | (_, _, _, true) => Some(self.vertical),
            _ => None,
        }
    }
}

impl Default for BorderGlyphs {
    fn default() -> Self {
        Self::for_style(BorderStyle::default())
    }
}
