//! Terminal backend abstraction and crossterm implementation.
//!
//! The backend owns the terminal mode (raw mode, alternate screen, hidden
//! cursor) for the lifetime of one root screen. Entering claims the
//! process-wide [`TerminalLease`] so a second screen cannot fight over the
//! same terminal; leaving (explicitly or on drop) restores the prior mode and
//! releases the lease.

use anyhow::Result;
use crossterm::{
    cursor::Hide,
    cursor::Show,
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::stdout;
use tracing::debug;

pub mod lease;
pub use lease::TerminalLease;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Current terminal size as `(rows, cols)`.
    fn size(&self) -> Result<(u16, u16)>;
}

#[derive(Default)]
pub struct CrosstermBackend {
    lease: Option<TerminalLease>,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { lease: None }
    }

    pub fn is_entered(&self) -> bool {
        self.lease.is_some()
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if self.lease.is_some() {
            return Ok(());
        }
        let lease = TerminalLease::claim()?;
        enable_raw_mode()?;
        if let Err(e) = execute!(stdout(), EnterAlternateScreen, Clear(ClearType::All), Hide) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        self.lease = Some(lease);
        debug!(target: "terminal", "entered");
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if let Some(lease) = self.lease.take() {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            drop(lease);
            debug!(target: "terminal", "left");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok((rows, cols))
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}
