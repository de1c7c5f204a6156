//! Root window bound to the whole surface.
//!
//! Construction acquires the surface; drop (or `close`) destroys every window
//! surface deepest first and then releases the surface, so the terminal is
//! restored on every exit path including early returns and unwinding.

use crate::element::WindowSpec;
use crate::error::{Result, StructuralFault};
use crate::geometry::{Coordinate, Footprint};
use crate::tree::{Tree, WindowId, WindowNode};
use crate::window::WindowMut;
use core_render::{Surface, SurfaceError};
use tracing::{info, warn};

pub const SCREEN_NAME: &str = "screen";

pub struct Screen<S: Surface> {
    tree: Tree,
    root: WindowId,
    size: Footprint,
    surface: Option<S>,
}

impl<S: Surface> Screen<S> {
    pub fn new(mut surface: S) -> Result<Self> {
        let sid = surface.acquire()?;
        let (rows, cols) = match surface.dimensions(sid) {
            Ok(dims) => dims,
            Err(e) => {
                let _ = surface.release();
                return Err(e.into());
            }
        };
        let size = Footprint::new(rows, cols);
        let mut tree = Tree::new();
        let root = tree.insert(WindowNode::new(
            SCREEN_NAME.to_string(),
            Coordinate::default(),
            size,
            false,
            sid,
            None,
        ));
        info!(target: "model.screen", rows, cols, "screen_created");
        Ok(Self {
            tree,
            root,
            size,
            surface: Some(surface),
        })
    }

    pub fn root(&self) -> WindowId {
        self.root
    }

    pub fn footprint(&self) -> Footprint {
        self.size
    }

    /// A spec describing this screen. Every window refuses to adopt it.
    pub fn as_spec(&self) -> WindowSpec {
        WindowSpec::root(SCREEN_NAME, self.size.rows, self.size.cols)
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Number of live windows, the screen included.
    pub fn window_count(&self) -> usize {
        self.tree.live_windows()
    }

    /// Mutable view of any live window; stale handles fail with a
    /// structural error.
    pub fn window(&mut self, id: WindowId) -> Result<WindowMut<'_, S>> {
        let surface = self
            .surface
            .as_mut()
            .ok_or(StructuralFault::Destroyed(self.root))?;
        WindowMut::new(&mut self.tree, surface, id)
    }

    pub fn root_window(&mut self) -> Result<WindowMut<'_, S>> {
        let root = self.root;
        self.window(root)
    }

    pub fn add_window(
        &mut self,
        name: impl Into<String>,
        x: u16,
        y: u16,
        rows: u16,
        cols: u16,
        border: bool,
    ) -> Result<WindowId> {
        self.root_window()?.add_window(name, x, y, rows, cols, border)
    }

    pub fn add_text(
        &mut self,
        name: impl Into<String>,
        x: u16,
        y: u16,
        content: impl Into<String>,
    ) -> Result<()> {
        self.root_window()?.add_text(name, x, y, content)
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        self.root_window()?.remove(name)
    }

    /// Flush the whole tree, children before parents.
    pub fn update(&mut self) -> Result<()> {
        self.root_window()?.update()
    }

    /// Tear down every window and release the surface, handing it back.
    pub fn close(mut self) -> Result<S> {
        let torn_down = self.teardown();
        let surface = self
            .surface
            .take()
            .ok_or(StructuralFault::Destroyed(self.root))?;
        torn_down?;
        Ok(surface)
    }

    fn teardown(&mut self) -> std::result::Result<(), SurfaceError> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        let destroyed = self.tree.destroy_subtree(surface, self.root);
        let released = surface.release();
        info!(target: "model.screen", ok = destroyed.is_ok() && released.is_ok(), "screen_closed");
        destroyed.and(released)
    }
}

impl<S: Surface> Drop for Screen<S> {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            warn!(target: "model.screen", error = %e, "screen_teardown_failed");
        }
        self.surface = None;
    }
}
