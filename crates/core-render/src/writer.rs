//! Terminal writer abstraction.
//!
//! A thin layer that batches primitive terminal operations produced by a
//! surface flush and emits them in one pass.
//!
//! Design invariants:
//! * Commands preserve ordering; no flushing mid-frame.
//! * All positions are absolute (0,0) origin; caller ensures bounds.
//! * Writer owns no global state; it is a short-lived object per flush.

use anyhow::Result;
use crossterm::{cursor::MoveTo, queue, style::Print};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    Print(String),
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if s.is_empty() {
            return;
        }
        // Consecutive prints collapse into one command.
        if let Some(Command::Print(prev)) = self.cmds.last_mut() {
            prev.push_str(&s);
        } else {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }
    /// Emit all queued commands into `out` and flush it. Returns the number
    /// of commands written.
    pub fn flush<W: Write>(self, out: &mut W) -> Result<usize> {
        let n = self.cmds.len();
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::Print(s) => {
                    queue!(out, Print(s))?;
                }
            }
        }
        out.flush()?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_prints_merge() {
        let mut w = Writer::new();
        w.move_to(1, 2);
        w.print("a");
        w.print("b");
        w.move_to(0, 0);
        w.print("c");
        assert_eq!(
            w.commands(),
            &[
                Command::MoveTo(1, 2),
                Command::Print("ab".into()),
                Command::MoveTo(0, 0),
                Command::Print("c".into()),
            ]
        );
    }

    #[test]
    fn flush_emits_escape_sequences() {
        let mut w = Writer::new();
        w.move_to(0, 0);
        w.print("hi");
        let mut out = Vec::new();
        let n = w.flush(&mut out).unwrap();
        assert_eq!(n, 2);
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("hi"));
        assert!(s.starts_with("\x1b["));
    }
}
