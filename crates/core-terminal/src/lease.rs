//! Process-wide terminal lease.
//!
//! Only one root screen may drive the physical terminal at a time. The lease
//! is a single atomic flag: `claim` succeeds for exactly one holder and the
//! flag is cleared when that holder drops its lease.

use anyhow::{Result, bail};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{trace, warn};

static HELD: AtomicBool = AtomicBool::new(false);

#[derive(Debug)]
pub struct TerminalLease {
    _private: (),
}

impl TerminalLease {
    /// Claim the terminal for the calling screen.
    pub fn claim() -> Result<Self> {
        if HELD
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(target: "terminal", "lease_contended");
            bail!("terminal is already held by another screen");
        }
        trace!(target: "terminal", "lease_claimed");
        Ok(Self { _private: () })
    }

    pub fn is_held() -> bool {
        HELD.load(Ordering::Acquire)
    }
}

impl Drop for TerminalLease {
    fn drop(&mut self) {
        HELD.store(false, Ordering::Release);
        trace!(target: "terminal", "lease_released");
    }
}
