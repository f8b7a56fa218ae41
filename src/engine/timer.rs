//! Clock injection and the single-slot cancellable step timer.
//!
//! The engine never sleeps. It records a deadline for its next step and the
//! driver (terminal loop or test) calls `tick()` once the clock has reached it.
//! Scheduling a step replaces whatever step was pending, so at most one step
//! is ever live, and a cancelled handle can never fire.

use log::trace;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Millisecond time source for the engine.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Monotonic wall clock measured from construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock. Clones share the same counter, so a test can keep one
/// copy and move the other into the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingStep {
    handle: TimerHandle,
    due_ms: u64,
}

#[derive(Debug, Default)]
pub struct StepTimer {
    pending: Option<PendingStep>,
    next_id: u64,
}

impl StepTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the next step `delay_ms` after `now_ms`, cancelling any
    /// step that was still pending.
    pub fn schedule_after(&mut self, now_ms: u64, delay_ms: u64) -> TimerHandle {
        if let Some(stale) = self.pending.take() {
            trace!("replacing pending step {:?}", stale.handle);
        }
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let due_ms = now_ms.saturating_add(delay_ms);
        self.pending = Some(PendingStep { handle, due_ms });
        trace!("scheduled step {:?} in {}ms (due at {}ms)", handle, delay_ms, due_ms);
        handle
    }

    /// Cancels `handle` if it is still the pending step. Returns whether
    /// anything was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.pending {
            Some(step) if step.handle == handle => {
                self.pending = None;
                trace!("cancelled step {:?}", handle);
                true
            }
            _ => false,
        }
    }

    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(step) => {
                trace!("cancelled step {:?}", step.handle);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.pending.map(|step| step.due_ms)
    }

    /// Removes and returns the pending step if it is due at `now_ms`.
    pub fn take_due(&mut self, now_ms: u64) -> Option<TimerHandle> {
        match self.pending {
            Some(step) if step.due_ms <= now_ms => {
                self.pending = None;
                Some(step.handle)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared_between_clones() {
        let clock = ManualClock::new();
        let engine_copy = clock.clone();
        clock.advance(250);
        assert_eq!(engine_copy.now_ms(), 250);
        clock.set(1000);
        assert_eq!(engine_copy.now_ms(), 1000);
    }

    #[test]
    fn test_step_not_due_before_deadline() {
        let mut timer = StepTimer::new();
        timer.schedule_after(100, 200);
        assert_eq!(timer.deadline(), Some(300));
        assert_eq!(timer.take_due(299), None);
        assert!(timer.is_pending());
    }

    #[test]
    fn test_step_due_at_deadline_fires_once() {
        let mut timer = StepTimer::new();
        let handle = timer.schedule_after(0, 200);
        assert_eq!(timer.take_due(200), Some(handle));
        assert_eq!(timer.take_due(10_000), None);
    }

    #[test]
    fn test_schedule_replaces_pending_step() {
        let mut timer = StepTimer::new();
        let first = timer.schedule_after(0, 100);
        let second = timer.schedule_after(0, 500);
        assert_ne!(first, second);
        assert_eq!(timer.take_due(100), None);
        assert!(!timer.cancel(first));
        assert_eq!(timer.take_due(500), Some(second));
    }

    #[test]
    fn test_cancelled_step_never_fires() {
        let mut timer = StepTimer::new();
        let handle = timer.schedule_after(0, 100);
        assert!(timer.cancel(handle));
        assert_eq!(timer.take_due(u64::MAX), None);
        assert_eq!(timer.deadline(), None);
    }

    #[test]
    fn test_cancel_pending_reports_activity() {
        let mut timer = StepTimer::new();
        assert!(!timer.cancel_pending());
        timer.schedule_after(0, 100);
        assert!(timer.cancel_pending());
        assert!(!timer.is_pending());
    }
}
