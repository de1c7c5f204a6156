#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_model::Screen;
use core_render::{
    BorderGlyphs, BorderStyle, BufferSurface, Surface, SurfaceError, SurfaceId,
};
use std::cell::RefCell;
use std::rc::Rc;

pub const ROWS: u16 = 24;
pub const COLS: u16 = 80;

/// 24x80 in-memory surface painting ASCII borders (`+`, `-`, `|`).
pub fn ascii_surface() -> BufferSurface {
    BufferSurface::headless(ROWS, COLS).with_glyphs(BorderGlyphs::for_style(BorderStyle::Ascii))
}

pub fn screen() -> Screen<BufferSurface> {
    Screen::new(ascii_surface()).expect("headless screen")
}

pub fn text_at(screen: &Screen<BufferSurface>, row: u16, col: u16, len: u16) -> String {
    screen
        .surface()
        .expect("screen surface")
        .screen_text(row, col, len)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Acquire,
    Release,
    Create(SurfaceId),
    Border(SurfaceId),
    Flush(SurfaceId),
    Destroy(SurfaceId),
}

/// Collaborator stub: forwards to a `BufferSurface` and logs every call into
/// a log that outlives the screen.
pub struct Recording {
    inner: BufferSurface,
    pub log: Rc<RefCell<Vec<Event>>>,
    pub fail_acquire: bool,
    pub fail_dimensions: bool,
    pub fail_border: bool,
    pub fail_destroy: bool,
}

impl Recording {
    pub fn new() -> (Self, Rc<RefCell<Vec<Event>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                inner: ascii_surface(),
                log: log.clone(),
                fail_acquire: false,
                fail_dimensions: false,
                fail_border: false,
                fail_destroy: false,
            },
            log,
        )
    }

    fn push(&self, e: Event) {
        self.log.borrow_mut().push(e);
    }
}

impl Surface for Recording {
    fn acquire(&mut self) -> Result<SurfaceId, SurfaceError> {
        if self.fail_acquire {
            return Err(SurfaceError::Unavailable("no tty".into()));
        }
        let id = self.inner.acquire()?;
        self.push(Event::Acquire);
        Ok(id)
    }

    fn release(&mut self) -> Result<(), SurfaceError> {
        self.inner.release()?;
        self.push(Event::Release);
        Ok(())
    }

    fn dimensions(&self, id: SurfaceId) -> Result<(u16, u16), SurfaceError> {
        if self.fail_dimensions {
            return Err(SurfaceError::Io("size query failed".into()));
        }
        self.inner.dimensions(id)
    }

    fn create_subsurface(
        &mut self,
        parent: SurfaceId,
        rows: u16,
        cols: u16,
        y: u16,
        x: u16,
    ) -> Result<SurfaceId, SurfaceError> {
        let id = self.inner.create_subsurface(parent, rows, cols, y, x)?;
        self.push(Event::Create(id));
        Ok(id)
    }

    fn paint_border(&mut self, id: SurfaceId) -> Result<(), SurfaceError> {
        if self.fail_border {
            return Err(SurfaceError::Io("border refused".into()));
        }
        self.inner.paint_border(id)?;
        self.push(Event::Border(id));
        Ok(())
    }

    fn write_text(
        &mut self,
        id: SurfaceId,
        row: u16,
        col: u16,
        text: &str,
    ) -> Result<(), SurfaceError> {
        self.inner.write_text(id, row, col, text)
    }

    fn blank_run(
        &mut self,
        id: SurfaceId,
        row: u16,
        col: u16,
        len: u16,
    ) -> Result<(), SurfaceError> {
        self.inner.blank_run(id, row, col, len)
    }

    fn flush(&mut self, id: SurfaceId) -> Result<(), SurfaceError> {
        self.inner.flush(id)?;
        self.push(Event::Flush(id));
        Ok(())
    }

    fn destroy(&mut self, id: SurfaceId) -> Result<(), SurfaceError> {
        if self.fail_destroy {
            return Err(SurfaceError::Busy(id, 1));
        }
        self.inner.destroy(id)?;
        self.push(Event::Destroy(id));
        Ok(())
    }
}

pub fn count(log: &[Event], pred: impl Fn(&Event) -> bool) -> usize {
    log.iter().filter(|e| pred(e)).count()
}
