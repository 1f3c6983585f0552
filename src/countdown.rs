//! Countdown engine — owns the single timed pump cycle.
//!
//! Tracks remaining time, advances once per fixed control tick, and
//! reports the cycle's terminal outcome.  The engine is deliberately
//! dumb about actuators: the mode state machine commands the pump and
//! indicators around calls into this engine, so the timing logic stays
//! a pure, host-testable unit.
//!
//! One cycle runs from `initial_seconds` down to zero (or until paused
//! or aborted).  The state is created once at startup and reused — reset,
//! never reallocated — for every subsequent cycle.

/// Remaining/initial pair for the single cycle.
///
/// Invariant: `0 <= remaining_seconds <= initial_seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleState {
    pub remaining_seconds: u32,
    pub initial_seconds: u32,
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The cycle is still counting down.
    Continue,
    /// `remaining_seconds` reached zero this tick.  The caller must
    /// reset the cycle and stop the pump.
    Completed,
}

pub struct CountdownEngine {
    cycle: CycleState,
    running: bool,
}

impl CountdownEngine {
    /// Create the engine with a full cycle loaded.  `initial_seconds`
    /// must be positive.
    pub fn new(initial_seconds: u32) -> Self {
        debug_assert!(initial_seconds > 0, "cycle duration must be positive");
        Self {
            cycle: CycleState {
                remaining_seconds: initial_seconds,
                initial_seconds,
            },
            running: false,
        }
    }

    /// Begin counting.  A fresh cycle starts at `initial_seconds`; after
    /// a pause this resumes from the frozen value — no time lost or
    /// gained.  Exactly one outstanding pause is supported, not a stack.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Advance by exactly one second.  Invocation cadence is one control
    /// tick (nominally 1 Hz wall clock).
    pub fn tick(&mut self) -> TickResult {
        if !self.running {
            return TickResult::Continue;
        }
        self.cycle.remaining_seconds = self.cycle.remaining_seconds.saturating_sub(1);
        if self.cycle.remaining_seconds == 0 {
            self.running = false;
            TickResult::Completed
        } else {
            TickResult::Continue
        }
    }

    /// Freeze `remaining_seconds` at its current value.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stop unconditionally, regardless of remaining time or pause state.
    pub fn abort_to_lockout(&mut self) {
        self.running = false;
    }

    /// Restore a full cycle.  Called after completion and when a lockout
    /// is cleared.
    pub fn reset(&mut self) {
        self.cycle.remaining_seconds = self.cycle.initial_seconds;
        self.running = false;
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.cycle.remaining_seconds
    }

    pub fn initial_seconds(&self) -> u32 {
        self.cycle.initial_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn cycle(&self) -> CycleState {
        self.cycle
    }
}
