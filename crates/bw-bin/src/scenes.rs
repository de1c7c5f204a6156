use anyhow::Result;
use clap::ValueEnum;
use core_model::Screen;
use core_render::{BufferSurface, Surface};
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scene {
    /// A single label on the bare screen.
    Text,
    /// Bordered windows nested two deep, then a removal.
    Nested,
    /// `text` followed by `nested`.
    Both,
}

pub type FrameHook<'h, S> = dyn FnMut(&Screen<S>, &str) -> Result<()> + 'h;

/// Play `scene`, calling `on_frame` after each update.
pub fn run<S: Surface>(
    screen: &mut Screen<S>,
    scene: Scene,
    on_frame: &mut FrameHook<'_, S>,
) -> Result<()> {
    match scene {
        Scene::Text => text(screen, on_frame),
        Scene::Nested => nested(screen, on_frame),
        Scene::Both => {
            text(screen, on_frame)?;
            screen.remove("field")?;
            nested(screen, on_frame)
        }
    }
}

fn frame<S: Surface>(
    screen: &mut Screen<S>,
    label: &str,
    on_frame: &mut FrameHook<'_, S>,
) -> Result<()> {
    screen.update()?;
    debug!(target: "runtime.scene", label, "frame");
    on_frame(&*screen, label)
}

pub fn text<S: Surface>(screen: &mut Screen<S>, on_frame: &mut FrameHook<'_, S>) -> Result<()> {
    screen.add_text("field", 10, 10, "My awesome app")?;
    frame(screen, "text", on_frame)
}

pub fn nested<S: Surface>(screen: &mut Screen<S>, on_frame: &mut FrameHook<'_, S>) -> Result<()> {
    let test = screen.add_window("test", 3, 3, 20, 20, true)?;
    let sub = {
        let mut child = screen.window(test)?;
        child.add_text("field", 0, 0, "window")?;
        let sub = child.add_window("test2", 4, 4, 10, 10, true)?;
        child.child_window("test2")?.add_text("field", 0, 0, "sub")?;
        sub
    };
    frame(screen, "nested", on_frame)?;
    screen.window(sub)?.remove_text("field")?;
    frame(screen, "nested_removed", on_frame)
}

/// Render the back buffer as text, one line per row, trailing blanks trimmed.
pub fn dump<W: Write>(surface: &BufferSurface<W>, rows: u16, cols: u16) -> String {
    (0..rows)
        .map(|r| surface.screen_text(r, 0, cols).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
