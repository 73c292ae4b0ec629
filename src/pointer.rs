//! Pointer tracking.
//!
//! The windowing layer reports cursor positions at whatever rate it likes;
//! the frame tick reads the most recent one. [`PointerTracker`] is a
//! single-slot mailbox: every write replaces the slot, reads never consume
//! it, and there is no queue. Handles are cheap to clone and may live on
//! another thread.
//!
//! ```ignore
//! let pointer = engine.pointer();
//! // In the input handler:
//! pointer.set_position(x, y);
//! ```

use glam::Vec2;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Slot value meaning "no sample reported yet". Both halves are NaN bit
/// patterns, which `set_position` never stores.
const EMPTY: u64 = u64::MAX;

/// Latest known pointer position, last write wins.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    slot: Arc<AtomicU64>,
}

impl PointerTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(AtomicU64::new(EMPTY)),
        }
    }

    /// Record a pointer sample. Non-finite coordinates are ignored.
    ///
    /// Coordinates outside the viewport are stored as-is.
    pub fn set_position(&self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.slot.store(pack(x, y), Ordering::Release);
    }

    /// The most recent sample, or `None` before the first one.
    pub fn current_position(&self) -> Option<Vec2> {
        match self.slot.load(Ordering::Acquire) {
            EMPTY => None,
            bits => Some(unpack(bits)),
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn pack(x: f32, y: f32) -> u64 {
    ((x.to_bits() as u64) << 32) | y.to_bits() as u64
}

#[inline]
fn unpack(bits: u64) -> Vec2 {
    Vec2::new(f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_until_first_sample() {
        let pointer = PointerTracker::new();
        assert_eq!(pointer.current_position(), None);
        pointer.set_position(10.0, 20.0);
        assert_eq!(pointer.current_position(), Some(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn test_last_write_wins() {
        let pointer = PointerTracker::new();
        pointer.set_position(1.0, 2.0);
        pointer.set_position(-30.5, 4000.25);
        assert_eq!(pointer.current_position(), Some(Vec2::new(-30.5, 4000.25)));
        // Reads do not consume the sample
        assert_eq!(pointer.current_position(), Some(Vec2::new(-30.5, 4000.25)));
    }

    #[test]
    fn test_non_finite_ignored() {
        let pointer = PointerTracker::new();
        pointer.set_position(5.0, 5.0);
        pointer.set_position(f32::NAN, 1.0);
        pointer.set_position(1.0, f32::INFINITY);
        assert_eq!(pointer.current_position(), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_clones_share_slot() {
        let pointer = PointerTracker::new();
        let writer = pointer.clone();
        std::thread::spawn(move || writer.set_position(3.0, 4.0))
            .join()
            .unwrap();
        assert_eq!(pointer.current_position(), Some(Vec2::new(3.0, 4.0)));
    }
}
