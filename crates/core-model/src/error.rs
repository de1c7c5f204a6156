//! Error taxonomy for tree operations.
//!
//! Every failure is returned to the immediate caller; the tree never retries
//! and never leaves a partially registered child behind.

use crate::tree::WindowId;
use core_render::SurfaceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(
        "`{name}` ({rows}x{cols} at {x},{y}) is out of bounds for the {usable_rows}x{usable_cols} content area of `{parent}`"
    )]
    Bounds {
        parent: String,
        name: String,
        x: u16,
        y: u16,
        rows: u16,
        cols: u16,
        usable_rows: u16,
        usable_cols: u16,
    },
    #[error("`{parent}` has no child named `{name}`")]
    NotFound { parent: String, name: String },
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
    #[error("structural error: {0}")]
    Structural(#[from] StructuralFault),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuralFault {
    #[error("a screen is always the root and cannot be added to `{parent}`")]
    ScreenAsChild { parent: String },
    #[error("window {0} has been destroyed")]
    Destroyed(WindowId),
    #[error("`{parent}` already has a child named `{name}`")]
    DuplicateName { parent: String, name: String },
}

impl ModelError {
    pub fn is_bounds(&self) -> bool {
        matches!(self, ModelError::Bounds { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound { .. })
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, ModelError::Structural(_))
    }

    pub fn is_surface(&self) -> bool {
        matches!(self, ModelError::Surface(_))
    }
}
