// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Cooperative cancellation of an analysis pass.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag the host flips to abandon a pass.
///
/// Analyses poll it between types and between fields, never in the middle
/// of one field, so any result they return is complete for what it covers.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let flag = CancellationFlag::new();
        let other = flag.clone();
        assert!(!other.is_cancelled());
        flag.cancel();
        assert!(other.is_cancelled());
    }
}
