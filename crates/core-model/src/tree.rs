//! Arena of window nodes.
//!
//! Windows live in a slot arena addressed by generational `WindowId`s. A
//! window stores its children in insertion order plus a name index; text
//! leaves are stored inline, child windows by handle. Freeing a slot bumps its
//! generation so handles to a destroyed window fail instead of aliasing a
//! newer window that reused the slot.
//!
//! Invariants:
//! * `order` and `index` always hold the same set of names.
//! * Every `Child::Window` handle names a live slot whose `parent` is the
//!   owning window (asserted in debug builds on teardown).
//! * A node's surface is live exactly as long as the node occupies its slot.

use crate::element::{Element, Text};
use crate::error::{Result, StructuralFault};
use crate::geometry::{ContentArea, Coordinate, Footprint};
use ahash::AHashMap;
use core_render::{Surface, SurfaceError, SurfaceId};
use std::fmt;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId {
    index: u32,
    generation: u32,
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// A registered child: a text leaf or a handle to a child window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Text(Text),
    Window(WindowId),
}

#[derive(Debug)]
pub(crate) struct WindowNode {
    pub(crate) name: String,
    pub(crate) at: Coordinate,
    pub(crate) size: Footprint,
    pub(crate) border: bool,
    pub(crate) root: bool,
    pub(crate) surface: SurfaceId,
    pub(crate) parent: Option<WindowId>,
    pub(crate) order: Vec<String>,
    pub(crate) index: AHashMap<String, Child>,
}

impl WindowNode {
    pub(crate) fn new(
        name: String,
        at: Coordinate,
        size: Footprint,
        border: bool,
        surface: SurfaceId,
        parent: Option<WindowId>,
    ) -> Self {
        Self {
            name,
            at,
            size,
            border,
            root: parent.is_none(),
            surface,
            parent,
            order: Vec::new(),
            index: AHashMap::new(),
        }
    }

    pub(crate) fn content(&self) -> ContentArea {
        ContentArea::of(self.size, self.border)
    }

    pub(crate) fn register(&mut self, name: String, child: Child) {
        self.order.push(name.clone());
        self.index.insert(name, child);
    }

    pub(crate) fn unregister(&mut self, name: &str) -> Option<Child> {
        let child = self.index.remove(name)?;
        self.order.retain(|n| n != name);
        Some(child)
    }

    /// Child window handles in insertion order.
    pub(crate) fn child_windows(&self) -> Vec<WindowId> {
        self.order
            .iter()
            .filter_map(|n| match self.index.get(n) {
                Some(Child::Window(id)) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl Element for WindowNode {
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

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<WindowNode>,
}

#[derive(Debug, Default)]
pub(crate) struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Tree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, node: WindowNode) -> WindowId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return WindowId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        WindowId {
            index,
            generation: 0,
        }
    }

    pub(crate) fn get(&self, id: WindowId) -> Result<&WindowNode> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
            .ok_or_else(|| StructuralFault::Destroyed(id).into())
    }

    pub(crate) fn get_mut(&mut self, id: WindowId) -> Result<&mut WindowNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
            .ok_or_else(|| StructuralFault::Destroyed(id).into())
    }

    fn take(&mut self, id: WindowId) -> Option<WindowNode> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    pub(crate) fn live_windows(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Free `id` and every descendant, destroying surfaces deepest first.
    /// Teardown continues past surface failures; the first one is returned.
    pub(crate) fn destroy_subtree<S: Surface>(
        &mut self,
        surface: &mut S,
        id: WindowId,
    ) -> std::result::Result<(), SurfaceError> {
        let Some(node) = self.take(id) else {
            return Ok(());
        };
        let mut first_err = None;
        for child in node.child_windows() {
            debug_assert_eq!(
                self.get(child).ok().and_then(|c| c.parent),
                Some(id),
                "window {child} is registered under a window that is not its parent"
            );
            if let Err(e) = self.destroy_subtree(surface, child) {
                first_err.get_or_insert(e);
            }
        }
        if node.root {
            trace!(target: "model.tree", window = node.name.as_str(), "root_freed");
        } else if let Err(e) = surface.destroy(node.surface) {
            warn!(target: "model.tree", window = node.name.as_str(), error = %e, "surface_destroy_failed");
            first_err.get_or_insert(e);
        } else {
            trace!(target: "model.tree", window = node.name.as_str(), surface = %node.surface, "window_destroyed");
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Update children depth-first in insertion order, then flush `id`.
    pub(crate) fn update<S: Surface>(&self, surface: &mut S, id: WindowId) -> Result<()> {
        let node = self.get(id)?;
        for child in node.child_windows() {
            self.update(surface, child)?;
        }
        surface.flush(node.surface)?;
        Ok(())
    }
}
