//! Mutable view of one window in the tree.
//!
//! `WindowMut` pairs a window handle with the tree and surface it lives in.
//! All placement goes through the window's `ContentArea`: bounds checks,
//! paint positions, sub-surface anchors, blank-out rectangles and the edge
//! test for border repaint use the same inset.
//!
//! Add is all-or-nothing: validation happens before any surface call, and a
//! failed border paint destroys the freshly created sub-surface before the
//! error is returned. Text containing control characters fails validation
//! with a bounds error, since its painted width would not match its
//! footprint.
//!
//! A view only exists for a live window, but every accessor still goes
//! through the arena and reports a stale handle as a structural error.

use crate::element::{Element, ElementSpec, Text, WindowSpec};
use crate::error::{ModelError, Result, StructuralFault};
use crate::geometry::{ContentArea, Coordinate, Footprint};
use crate::tree::{Child, Tree, WindowId, WindowNode};
use core_render::{Surface, SurfaceId};
use tracing::{debug, warn};

pub struct WindowMut<'a, S: Surface> {
    tree: &'a mut Tree,
    surface: &'a mut S,
    id: WindowId,
}

impl<'a, S: Surface> WindowMut<'a, S> {
    pub(crate) fn new(tree: &'a mut Tree, surface: &'a mut S, id: WindowId) -> Result<Self> {
        tree.get(id)?;
        Ok(Self { tree, surface, id })
    }

    fn node(&self) -> Result<&WindowNode> {
        self.tree.get(self.id)
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn name(&self) -> Result<&str> {
        Ok(&self.node()?.name)
    }

    pub fn origin(&self) -> Result<Coordinate> {
        Ok(self.node()?.at)
    }

    /// Full requested size, border included.
    pub fn footprint(&self) -> Result<Footprint> {
        Ok(self.node()?.size)
    }

    /// Size of the content area children are placed in.
    pub fn usable(&self) -> Result<Footprint> {
        Ok(self.node()?.content().size())
    }

    pub fn is_bordered(&self) -> Result<bool> {
        Ok(self.node()?.border)
    }

    pub fn is_root(&self) -> Result<bool> {
        Ok(self.node()?.root)
    }

    pub fn surface_id(&self) -> Result<SurfaceId> {
        Ok(self.node()?.surface)
    }

    pub fn child_count(&self) -> Result<usize> {
        Ok(self.node()?.order.len())
    }

    /// Child names in insertion order.
    pub fn names(&self) -> Result<Vec<&str>> {
        Ok(self.node()?.order.iter().map(String::as_str).collect())
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.node()?.index.contains_key(name))
    }

    pub fn child(&self, name: &str) -> Result<&Child> {
        let node = self.node()?;
        node.index.get(name).ok_or_else(|| ModelError::NotFound {
            parent: node.name.clone(),
            name: name.to_string(),
        })
    }

    pub fn text(&self, name: &str) -> Result<&Text> {
        match self.child(name)? {
            Child::Text(t) => Ok(t),
            Child::Window(_) => Err(self.not_found(name)?),
        }
    }

    pub fn window(&self, name: &str) -> Result<WindowId> {
        match self.child(name)? {
            Child::Window(id) => Ok(*id),
            Child::Text(_) => Err(self.not_found(name)?),
        }
    }

    /// Reborrow a named child window.
    pub fn child_window(&mut self, name: &str) -> Result<WindowMut<'_, S>> {
        let id = self.window(name)?;
        WindowMut::new(self.tree, self.surface, id)
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
        let spec = WindowSpec::new(name, x, y, rows, cols, border);
        self.attach_window(spec)
    }

    pub fn add_text(
        &mut self,
        name: impl Into<String>,
        x: u16,
        y: u16,
        content: impl Into<String>,
    ) -> Result<()> {
        self.add(Text::new(name, x, y, content))?;
        Ok(())
    }

    /// Validate and attach an element, painting it immediately.
    pub fn add(&mut self, spec: impl Into<ElementSpec>) -> Result<Child> {
        match spec.into() {
            ElementSpec::Text(text) => self.attach_text(text),
            ElementSpec::Window(w) => self.attach_window(w).map(Child::Window),
        }
    }

    fn attach_text(&mut self, text: Text) -> Result<Child> {
        let area = self.admit(&text, !text.is_printable())?;
        let parent_surface = self.node()?.surface;
        let name = text.name().to_string();
        let (row, col) = area.to_surface(text.origin());
        self.surface
            .write_text(parent_surface, row, col, text.content())?;
        debug!(target: "model.tree", parent = self.name()?, name = name.as_str(), row, col, cols = text.cols(), "text_added");
        let child = Child::Text(text);
        self.tree.get_mut(self.id)?.register(name, child.clone());
        Ok(child)
    }

    fn attach_window(&mut self, spec: WindowSpec) -> Result<WindowId> {
        if spec.is_root() {
            return Err(StructuralFault::ScreenAsChild {
                parent: self.name()?.to_string(),
            }
            .into());
        }
        // A border needs at least one cell per corner.
        let too_small = spec.is_bordered() && (spec.rows() < 2 || spec.cols() < 2);
        let area = self.admit(&spec, too_small)?;
        let parent_surface = self.node()?.surface;
        let name = spec.name().to_string();
        let (at, fp) = (spec.origin(), spec.footprint());
        let (row, col) = area.to_surface(at);

        let sid = self
            .surface
            .create_subsurface(parent_surface, fp.rows, fp.cols, row, col)?;
        if spec.is_bordered() {
            if let Err(e) = self.surface.paint_border(sid) {
                if let Err(cleanup) = self.surface.destroy(sid) {
                    warn!(target: "model.tree", window = name.as_str(), surface = %sid, error = %cleanup, "surface_destroy_failed");
                }
                return Err(e.into());
            }
        }
        let node = WindowNode::new(name.clone(), at, fp, spec.is_bordered(), sid, Some(self.id));
        let id = self.tree.insert(node);
        debug!(target: "model.tree", parent = self.name()?, name = name.as_str(), rows = fp.rows, cols = fp.cols, border = spec.is_bordered(), "window_added");
        self.tree.get_mut(self.id)?.register(name, Child::Window(id));
        Ok(id)
    }

    /// Name and bounds checks shared by every add. Runs before any surface
    /// call. `unplaceable` marks an element whose footprint cannot be drawn
    /// as claimed (undersized border, control characters in text).
    fn admit(&self, element: &dyn Element, unplaceable: bool) -> Result<ContentArea> {
        let parent = self.node()?;
        let name = element.name();
        if parent.index.contains_key(name) {
            return Err(StructuralFault::DuplicateName {
                parent: parent.name.clone(),
                name: name.to_string(),
            }
            .into());
        }
        let area = parent.content();
        let at = element.origin();
        let fp = element.footprint();
        if fp.is_empty() || unplaceable || !area.fits(at, fp) {
            return Err(ModelError::Bounds {
                parent: parent.name.clone(),
                name: name.to_string(),
                x: at.x,
                y: at.y,
                rows: fp.rows,
                cols: fp.cols,
                usable_rows: area.rows,
                usable_cols: area.cols,
            });
        }
        Ok(area)
    }

    /// Detach a child, blank its footprint, repaint a touched border and
    /// destroy the child with everything below it.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let parent = self.node()?;
        let child = self.child(name)?.clone();
        let (at, fp) = match &child {
            Child::Text(t) => (t.origin(), t.footprint()),
            Child::Window(id) => {
                let w = self.tree.get(*id)?;
                (w.at, w.size)
            }
        };
        let area = parent.content();
        let parent_surface = parent.surface;
        let repaint_border = parent.border && area.touches_edge(at, fp);

        let (row, col) = area.to_surface(at);
        for r in 0..fp.rows {
            self.surface.blank_run(parent_surface, row + r, col, fp.cols)?;
        }
        if repaint_border {
            self.surface.paint_border(parent_surface)?;
        }

        self.tree.get_mut(self.id)?.unregister(name);
        if let Child::Window(id) = child {
            self.tree.destroy_subtree(self.surface, id)?;
        }
        debug!(target: "model.tree", parent = self.name()?, name, repaint_border, "child_removed");
        Ok(())
    }

    /// Remove a text child; windows under `name` are left alone.
    pub fn remove_text(&mut self, name: &str) -> Result<()> {
        self.text(name)?;
        self.remove(name)
    }

    /// Remove a child window; texts under `name` are left alone.
    pub fn remove_window(&mut self, name: &str) -> Result<()> {
        self.window(name)?;
        self.remove(name)
    }

    /// Flush child windows depth-first in insertion order, then this one.
    pub fn update(&mut self) -> Result<()> {
        self.tree.update(self.surface, self.id)
    }

    fn not_found(&self, name: &str) -> Result<ModelError> {
        Ok(ModelError::NotFound {
            parent: self.node()?.name.clone(),
            name: name.to_string(),
        })
    }
}
