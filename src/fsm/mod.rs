//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌──────────┬───────────┬──────────┬───────────────────┐ │
//! │  │ StateId  │ on_enter  │ on_exit  │ on_update         │ │
//! │  ├──────────┼───────────┼──────────┼───────────────────┤ │
//! │  │ Idle     │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  │ Running  │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  │ Paused   │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  │ LockedOut│ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  └──────────┴───────────┴──────────┴───────────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next, and updates the
//! current pointer.  All functions receive `&mut FsmContext` which
//! holds button edges, the temperature reading, actuator commands,
//! the countdown engine, config, and timing.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all operating modes.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    Running = 1,
    Paused = 2,
    LockedOut = 3,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 4;

    /// Convert a `u8` index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `LockedOut` in release (safe fallback — the
    /// pump stays de-energised there).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Running,
            2 => Self::Paused,
            3 => Self::LockedOut,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::LockedOut
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]) and a mutable
/// [`FsmContext`] that is threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Monotonically increasing tick counter (wraps at u64::MAX).
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current state.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    /// 3. Increment tick counter.
    pub fn tick(&mut self, ctx: &mut FsmContext) {
        self.tick_count += 1;
        ctx.ticks_in_state = self.tick_count - self.state_entry_tick;
        ctx.total_ticks = self.tick_count;

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// How many ticks the FSM has been in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        // Exit current state
        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        // Update pointer and timing
        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        // Enter new state
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::context::{FsmContext, IndicatorMode};
    use super::*;
    use crate::config::SystemConfig;

    fn make_ctx() -> FsmContext {
        let config = SystemConfig {
            cycle_duration_secs: 5,
            ..SystemConfig::default()
        };
        FsmContext::new(config)
    }

    fn make_fsm() -> Fsm {
        Fsm::new(states::build_state_table(), StateId::Idle)
    }

    /// Press buttons, tick once, clear the edges — the way the service
    /// drives the machine.
    fn tick_with(fsm: &mut Fsm, ctx: &mut FsmContext, start: bool, stop: bool, reset: bool) {
        ctx.buttons.start = start;
        ctx.buttons.stop = stop;
        ctx.buttons.reset = reset;
        fsm.tick(ctx);
        ctx.buttons.clear();
    }

    #[test]
    fn starts_in_idle() {
        let fsm = make_fsm();
        assert_eq!(fsm.current_state(), StateId::Idle);
    }

    #[test]
    fn start_runs_on_enter() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        assert_eq!(ctx.commands.green, IndicatorMode::Solid);
        assert!(!ctx.commands.pump_on);
    }

    #[test]
    fn tick_increments_counter() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.ticks_in_current_state(), 1);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.ticks_in_current_state(), 2);
    }

    #[test]
    fn idle_to_running_on_start() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        tick_with(&mut fsm, &mut ctx, true, false, false);
        assert_eq!(fsm.current_state(), StateId::Running);
        assert!(ctx.commands.pump_on);
        assert_eq!(ctx.commands.green, IndicatorMode::Blink);
    }

    #[test]
    fn running_decrements_once_per_tick() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        tick_with(&mut fsm, &mut ctx, true, false, false);
        tick_with(&mut fsm, &mut ctx, false, false, false);
        assert_eq!(ctx.countdown.remaining_seconds(), 4);
        tick_with(&mut fsm, &mut ctx, false, false, false);
        assert_eq!(ctx.countdown.remaining_seconds(), 3);
    }

    #[test]
    fn countdown_completion_returns_to_idle_and_rearms() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        tick_with(&mut fsm, &mut ctx, true, false, false);
        for _ in 0..5 {
            assert!(ctx.commands.pump_on, "pump must run for every cycle tick");
            tick_with(&mut fsm, &mut ctx, false, false, false);
        }
        assert_eq!(fsm.current_state(), StateId::Idle);
        assert!(!ctx.commands.pump_on);
        assert!(ctx.cycle_has_run);
        assert_eq!(ctx.countdown.remaining_seconds(), 5);
    }

    #[test]
    fn stop_freezes_remaining_and_resume_continues() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        tick_with(&mut fsm, &mut ctx, true, false, false);
        tick_with(&mut fsm, &mut ctx, false, false, false);
        tick_with(&mut fsm, &mut ctx, false, false, false);
        assert_eq!(ctx.countdown.remaining_seconds(), 3);

        tick_with(&mut fsm, &mut ctx, false, true, false);
        assert_eq!(fsm.current_state(), StateId::Paused);
        assert_eq!(ctx.countdown.remaining_seconds(), 3);
        assert!(!ctx.commands.pump_on);
        assert_eq!(ctx.commands.red, IndicatorMode::Solid);

        // Ticks while paused must not consume cycle time.
        tick_with(&mut fsm, &mut ctx, false, false, false);
        assert_eq!(ctx.countdown.remaining_seconds(), 3);

        tick_with(&mut fsm, &mut ctx, true, false, false);
        assert_eq!(fsm.current_state(), StateId::Running);
        tick_with(&mut fsm, &mut ctx, false, false, false);
        assert_eq!(ctx.countdown.remaining_seconds(), 2);
    }

    #[test]
    fn reset_locks_out_from_every_mode() {
        for setup in 0..3u8 {
            let mut fsm = make_fsm();
            let mut ctx = make_ctx();
            fsm.start(&mut ctx);
            match setup {
                0 => {} // Idle
                1 => tick_with(&mut fsm, &mut ctx, true, false, false), // Running
                _ => {
                    tick_with(&mut fsm, &mut ctx, true, false, false);
                    tick_with(&mut fsm, &mut ctx, false, true, false); // Paused
                }
            }
            tick_with(&mut fsm, &mut ctx, false, false, true);
            assert_eq!(fsm.current_state(), StateId::LockedOut, "from setup {setup}");
            assert!(!ctx.commands.pump_on);
            assert_eq!(ctx.commands.blue, IndicatorMode::Blink);
        }
    }

    #[test]
    fn reset_wins_over_stop_in_same_poll() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        tick_with(&mut fsm, &mut ctx, true, false, false);
        tick_with(&mut fsm, &mut ctx, false, true, true);
        assert_eq!(fsm.current_state(), StateId::LockedOut);
    }

    #[test]
    fn reset_while_locked_is_a_noop() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        tick_with(&mut fsm, &mut ctx, false, false, true);
        tick_with(&mut fsm, &mut ctx, false, false, true);
        assert_eq!(fsm.current_state(), StateId::LockedOut);
    }

    #[test]
    fn start_clears_lockout_and_resets_cycle() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        tick_with(&mut fsm, &mut ctx, true, false, false);
        tick_with(&mut fsm, &mut ctx, false, false, false);
        tick_with(&mut fsm, &mut ctx, false, false, true);
        assert_eq!(fsm.current_state(), StateId::LockedOut);

        tick_with(&mut fsm, &mut ctx, true, false, false);
        assert_eq!(fsm.current_state(), StateId::Idle);
        assert_eq!(ctx.countdown.remaining_seconds(), 5);
        assert!(!ctx.commands.pump_on);
        assert_eq!(ctx.commands.alarm, super::context::AlarmMode::Off);
        assert_eq!(ctx.commands.blue, IndicatorMode::Off);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        tick_with(&mut fsm, &mut ctx, true, false, false);
        tick_with(&mut fsm, &mut ctx, true, false, false);
        assert_eq!(fsm.current_state(), StateId::Running);
        assert_eq!(ctx.countdown.remaining_seconds(), 4);
    }

    #[test]
    fn state_id_from_index_roundtrip() {
        for i in 0..StateId::COUNT {
            let id = StateId::from_index(i);
            assert_eq!(id as usize, i);
        }
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn state_id_from_invalid_index_returns_locked_out() {
        let id = StateId::from_index(99);
        assert_eq!(id, StateId::LockedOut);
    }
}

#[cfg(test)]
mod proptests {
    use super::context::FsmContext;
    use super::*;
    use crate::config::SystemConfig;
    use proptest::prelude::*;

    fn arb_poll() -> impl Strategy<Value = (bool, bool, bool, f32)> {
        (any::<bool>(), any::<bool>(), any::<bool>(), 0.0f32..120.0)
    }

    proptest! {
        #[test]
        fn pump_never_energised_while_locked_out(polls in proptest::collection::vec(arb_poll(), 1..200)) {
            let config = SystemConfig { cycle_duration_secs: 8, ..SystemConfig::default() };
            let mut fsm = Fsm::new(states::build_state_table(), StateId::Idle);
            let mut ctx = FsmContext::new(config);
            fsm.start(&mut ctx);

            for (start, stop, reset, temp) in polls {
                ctx.buttons.start = start;
                ctx.buttons.stop = stop;
                ctx.buttons.reset = reset;
                ctx.temperature_f = temp;
                fsm.tick(&mut ctx);
                ctx.buttons.clear();

                if fsm.current_state() == StateId::LockedOut {
                    prop_assert!(!ctx.commands.pump_on,
                        "relay must never be energised while the lockout is latched");
                }
            }
        }

        #[test]
        fn remaining_never_exceeds_initial(polls in proptest::collection::vec(arb_poll(), 1..200)) {
            let config = SystemConfig { cycle_duration_secs: 8, ..SystemConfig::default() };
            let mut fsm = Fsm::new(states::build_state_table(), StateId::Idle);
            let mut ctx = FsmContext::new(config);
            fsm.start(&mut ctx);

            for (start, stop, reset, _temp) in polls {
                ctx.buttons.start = start;
                ctx.buttons.stop = stop;
                ctx.buttons.reset = reset;
                fsm.tick(&mut ctx);
                ctx.buttons.clear();

                prop_assert!(ctx.countdown.remaining_seconds() <= ctx.countdown.initial_seconds());
            }
        }

        #[test]
        fn pump_on_implies_running(polls in proptest::collection::vec(arb_poll(), 1..200)) {
            let config = SystemConfig { cycle_duration_secs: 8, ..SystemConfig::default() };
            let mut fsm = Fsm::new(states::build_state_table(), StateId::Idle);
            let mut ctx = FsmContext::new(config);
            fsm.start(&mut ctx);

            for (start, stop, reset, _temp) in polls {
                ctx.buttons.start = start;
                ctx.buttons.stop = stop;
                ctx.buttons.reset = reset;
                fsm.tick(&mut ctx);
                ctx.buttons.clear();

                if ctx.commands.pump_on {
                    prop_assert_eq!(fsm.current_state(), StateId::Running);
                }
            }
        }
    }
}
