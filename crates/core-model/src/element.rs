//! Element capability and the values placed into windows.

use crate::geometry::{Coordinate, Footprint};
use core_render::display_width;

/// Anything placeable inside a window.
pub trait Element {
    fn name(&self) -> &str;
    fn x(&self) -> u16;
    fn y(&self) -> u16;
    fn rows(&self) -> u16;
    fn cols(&self) -> u16;

    fn origin(&self) -> Coordinate {
        Coordinate::new(self.x(), self.y())
    }

    fn footprint(&self) -> Footprint {
        Footprint::new(self.rows(), self.cols())
    }
}

/// Immutable single-line text. Its footprint is one row by the display width
/// of the content. Content with control characters is refused at add time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    name: String,
    at: Coordinate,
    content: String,
    cols: u16,
}

impl Text {
    pub fn new(name: impl Into<String>, x: u16, y: u16, content: impl Into<String>) -> Self {
        let content = content.into();
        let cols = display_width(&content);
        Self {
            name: name.into(),
            at: Coordinate::new(x, y),
            content,
            cols,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// False when the content holds control characters (tab, newline,
    /// escape...). Those move the terminal cursor instead of occupying the
    /// cells the footprint claims.
    pub fn is_printable(&self) -> bool {
        !self.content.chars().any(char::is_control)
    }
}

impl Element for Text {
    fn name(&self) -> &str {
        &self.name
    }
    fn x(&self) -> u16 {
        self.at.x
    }
    fn y(&self) -> u16 {
        self.at.y
    }
    fn rows(&self) -> u16 {
        1
    }
    fn cols(&self) -> u16 {
        self.cols
    }
}

/// Placement request for a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    name: String,
    at: Coordinate,
    size: Footprint,
    border: bool,
    root: bool,
}

impl WindowSpec {
    pub fn new(name: impl Into<String>, x: u16, y: u16, rows: u16, cols: u16, border: bool) -> Self {
        Self {
            name: name.into(),
            at: Coordinate::new(x, y),
            size: Footprint::new(rows, cols),
            border,
            root: false,
        }
    }

    /// Spec describing a screen. No window accepts it as a child.
    pub(crate) fn root(name: impl Into<String>, rows: u16, cols: u16) -> Self {
        Self {
            root: true,
            ..Self::new(name, 0, 0, rows, cols, false)
        }
    }

    pub fn is_bordered(&self) -> bool {
        self.border
    }

    pub fn is_root(&self) -> bool {
        self.root
    }
}

impl Element for WindowSpec {
    fn name(&self) -> &str {
        &self.name
    }
    fn x(&self) -> u16 {
        self.at.x
    }
    fn y(&self) -> u16 {
        self.at.y
    }
    fn rows(&self) -> u16 {
        self.size.rows
    }
    fn cols(&self) -> u16 {
        self.size.cols
    }
}

/// Closed set of things a window can adopt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementSpec {
    Text(Text),
    Window(WindowSpec),
}

impl ElementSpec {
    pub(crate) fn element(&self) -> &dyn Element {
        match self {
            ElementSpec::Text(t) => t,
            ElementSpec::Window(w) => w,
        }
    }
}

impl From<Text> for ElementSpec {
    fn from(t: Text) -> Self {
        ElementSpec::Text(t)
    }
}

impl From<WindowSpec> for ElementSpec {
    fn from(w: WindowSpec) -> Self {
        ElementSpec::Window(w)
    }
}
