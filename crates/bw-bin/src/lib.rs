//! Demo scenes for the `boxwood` binary.
//!
//! Each scene builds a small window tree on a screen and calls `on_frame`
//! after every `update`, letting the caller pause (terminal mode) or capture
//! the buffer (headless mode).

pub mod scenes;
