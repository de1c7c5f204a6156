//! Dirty row tracking.
//!
//! Records absolute frame rows touched by surface writes since the last flush
//! that covered them. A flush only consumes the rows inside its own surface;
//! rows outside stay queued for whichever surface flushes them later.
//!
//! Design constraints:
//! * Duplicate marks are deduped lazily when `take_in_span` is called.
//! * Not thread-safe (owned by a single surface).
//!
//! Invariants:
//! * Returned vector from `take_in_span` is sorted ascending and unique.
//! * After `take_in_span`, no row inside the span remains tracked.

#[derive(Debug, Default)]
pub struct DirtyRows {
    rows: Vec<u16>,
}

impl DirtyRows {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Mark a single row as dirty.
    pub fn mark(&mut self, row: u16) {
        self.rows.push(row);
    }

    /// Mark `count` rows starting at `first` as dirty.
    pub fn mark_range(&mut self, first: u16, count: u16) {
        for r in first..first.saturating_add(count) {
            self.rows.push(r);
        }
    }

    /// Consume and return unique, sorted dirty rows inside `[first, first+count)`.
    /// Rows outside the span are retained.
    pub fn take_in_span(&mut self, first: u16, count: u16) -> Vec<u16> {
        if self.rows.is_empty() || count == 0 {
            return Vec::new();
        }
        let end = first.saturating_add(count);
        let (mut inside, outside): (Vec<u16>, Vec<u16>) =
            self.rows.drain(..).partition(|r| *r >= first && *r < end);
        self.rows = outside;
        inside.sort_unstable();
        inside.dedup();
        inside
    }

    /// True if no rows have been marked since last consumption.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Clear all tracked rows without returning them (reset state).
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
