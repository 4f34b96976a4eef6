//! Process-wide interrupt flag
//!
//! The binary installs [`request`] as its Ctrl-C handler. Work in progress
//! polls [`check`] at step boundaries and after each external process
//! returns, so scoped temporary files still get dropped on the way out.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Mark the run as interrupted
pub fn request() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

pub fn is_requested() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// `Err(Error::Interrupted)` once an interrupt has been requested
pub fn check() -> Result<()> {
    if is_requested() {
        Err(Error::Interrupted)
    } else {
        Ok(())
    }
}
