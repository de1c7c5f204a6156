//! Window composition tree.
//!
//! A `Screen` owns the root surface and an arena of windows. Each window owns
//! a sub-surface of its parent's surface and a keyed, insertion-ordered set of
//! children: text leaves painted eagerly onto the window's surface, and child
//! windows with surfaces of their own.
//!
//! Core invariants (must hold after every public call):
//! * A child's coordinate plus footprint lies inside its parent's content
//!   area (checked at add time; nothing moves afterwards).
//! * Child names are unique per parent.
//! * Window surfaces are created when the window is added and destroyed
//!   exactly once, after all of their descendants.
//! * The screen is always the root; the surface is released when the screen
//!   goes away.
//!
//! Control flow: build a `Screen` over a `Surface`, add windows and texts to
//! the root or to any window reached through its `WindowId`, then call
//! `update` to flush every window depth-first, children before parents.
//!
//! Mutation requires `&mut Screen`, so tree edits and updates are serialized
//! by the borrow checker; there is no internal locking and no background
//! rendering.

pub mod element;
pub mod error;
pub mod geometry;
pub mod screen;
pub mod tree;
pub mod window;

pub use element::{Element, ElementSpec, Text, WindowSpec};
pub use error::{ModelError, Result, StructuralFault};
pub use geometry::{ContentArea, Coordinate, Footprint};
pub use screen::Screen;
pub use tree::{Child, WindowId};
pub use window::WindowMut;
