//! Frame scheduler.
//!
//! The scheduler is a two-state machine (`Stopped` / `Running`) that hands
//! out [`FrameTicket`]s. A ticket is the right to run exactly one frame: the
//! host holds at most one, spends it when the display is ready for the next
//! frame, and gets the next ticket back only if the loop is still running.
//!
//! Tickets are not `Clone`, so a single loop can only ever have one pending
//! invocation. Each `start` opens a new loop generation; tickets from an
//! earlier generation are rejected, so a frame scheduled before `stop` can
//! never run after it, even if the loop was restarted in between.

use crate::time::FpsCounter;
use std::time::Instant;

/// Scheduler run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// Permission to run one frame of a specific loop.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a dropped ticket ends the frame loop"]
pub struct FrameTicket {
    generation: u64,
}

impl FrameTicket {
    /// Loop generation this ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Drives the repeating frame loop and measures its rate.
#[derive(Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    generation: u64,
    fps: FpsCounter,
}

impl FrameScheduler {
    /// Create a stopped scheduler. The FPS window opens at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            state: SchedulerState::Stopped,
            generation: 0,
            fps: FpsCounter::new(now),
        }
    }

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Start the loop.
    ///
    /// Returns the ticket for the first frame, or `None` if the loop was
    /// already running (the existing loop keeps its ticket).
    pub fn start(&mut self) -> Option<FrameTicket> {
        if self.is_running() {
            return None;
        }
        self.state = SchedulerState::Running;
        self.generation += 1;
        log::debug!("frame loop started (generation {})", self.generation);
        Some(FrameTicket {
            generation: self.generation,
        })
    }

    /// Stop the loop. Returns `false` if it was already stopped.
    ///
    /// Any outstanding ticket becomes invalid.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = SchedulerState::Stopped;
        log::debug!("frame loop stopped (generation {})", self.generation);
        true
    }

    /// Stop if running, start if stopped.
    pub fn toggle(&mut self) -> Option<FrameTicket> {
        if self.is_running() {
            self.stop();
            None
        } else {
            self.start()
        }
    }

    /// Whether `ticket` belongs to the live loop and may run a frame.
    pub fn accepts(&self, ticket: &FrameTicket) -> bool {
        self.is_running() && ticket.generation == self.generation
    }

    /// Spend `ticket` on a frame.
    ///
    /// Returns the ticket for the following frame, or `None` if the ticket
    /// was stale or the loop has stopped. Use [`accepts`](Self::accepts)
    /// first to decide whether to do the frame's work.
    pub fn advance(&mut self, ticket: FrameTicket) -> Option<FrameTicket> {
        self.accepts(&ticket).then_some(ticket)
    }

    /// Count a completed frame at `now`; returns a newly published FPS value.
    pub fn record_frame(&mut self, now: Instant) -> Option<u32> {
        let published = self.fps.record_frame(now);
        if let Some(fps) = published {
            log::debug!("fps: {}", fps);
        }
        published
    }

    /// Latest published frames-per-second value.
    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn fps_counter(&self) -> &FpsCounter {
        &self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_idempotent() {
        let mut sched = FrameScheduler::new(Instant::now());
        let first = sched.start();
        assert!(first.is_some());
        assert!(sched.start().is_none());
        assert!(sched.is_running());
        assert!(sched.accepts(first.as_ref().unwrap()));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut sched = FrameScheduler::new(Instant::now());
        assert!(!sched.stop());
        let _ticket = sched.start();
        assert!(sched.stop());
        assert!(!sched.stop());
        assert_eq!(sched.state(), SchedulerState::Stopped);
    }

    #[test]
    fn test_stop_invalidates_pending_ticket() {
        let mut sched = FrameScheduler::new(Instant::now());
        let ticket = sched.start().unwrap();
        sched.stop();
        assert!(!sched.accepts(&ticket));
        assert!(sched.advance(ticket).is_none());
    }

    #[test]
    fn test_restart_rejects_old_generation() {
        let mut sched = FrameScheduler::new(Instant::now());
        let old = sched.start().unwrap();
        sched.stop();
        let new = sched.start().unwrap();
        assert!(!sched.accepts(&old));
        assert!(sched.accepts(&new));
        assert!(new.generation() > old.generation());
    }

    #[test]
    fn test_advance_chains_tickets() {
        let mut sched = FrameScheduler::new(Instant::now());
        let mut ticket = sched.start();
        for _ in 0..10 {
            ticket = sched.advance(ticket.unwrap());
            assert!(ticket.is_some());
        }
    }

    #[test]
    fn test_toggle() {
        let mut sched = FrameScheduler::new(Instant::now());
        let ticket = sched.toggle();
        assert!(ticket.is_some() && sched.is_running());
        assert!(sched.toggle().is_none());
        assert!(!sched.is_running());
    }
}
