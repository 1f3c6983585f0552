//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no
//! dynamic dispatch, no heap.  This is the classic embedded C FSM
//! pattern expressed in safe Rust.
//!
//! ```text
//!  IDLE ──[Start]──▶ RUNNING ──[countdown done]──▶ IDLE
//!                       │ ▲
//!                 [Stop]│ │[Start]
//!                       ▼ │
//!                     PAUSED
//!
//!  Any state ──[Reset]──▶ LOCKED OUT ──[Start]──▶ IDLE (cycle reset)
//! ```
//!
//! Button precedence within one tick is Reset over Stop over Start —
//! the lockout is the safety-dominant action, so it always wins when
//! two edges land in the same poll window.

use super::context::{AlarmMode, FsmContext, IndicatorMode};
use super::{StateDescriptor, StateId};
use crate::countdown::TickResult;
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — Running
        StateDescriptor {
            id: StateId::Running,
            name: "Running",
            on_enter: Some(running_enter),
            on_exit: None,
            on_update: running_update,
        },
        // Index 2 — Paused
        StateDescriptor {
            id: StateId::Paused,
            name: "Paused",
            on_enter: Some(paused_enter),
            on_exit: None,
            on_update: paused_update,
        },
        // Index 3 — LockedOut
        StateDescriptor {
            id: StateId::LockedOut,
            name: "LockedOut",
            on_enter: Some(locked_enter),
            on_exit: Some(locked_exit),
            on_update: locked_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state — pump off, waiting for START
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    // A completed or cleared cycle always re-arms at full duration.
    ctx.countdown.reset();
    ctx.commands.pump_on = false;
    ctx.commands.green = IndicatorMode::Solid;
    ctx.commands.red = IndicatorMode::Off;
    ctx.commands.blue = IndicatorMode::Off;
    ctx.commands.alarm = AlarmMode::Off;
    info!(
        "IDLE: pump off, cycle armed at {}s",
        ctx.countdown.initial_seconds()
    );
}

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.buttons.reset {
        return Some(StateId::LockedOut);
    }
    if ctx.buttons.start {
        return Some(StateId::Running);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUNNING state — pump on, countdown advancing
// ═══════════════════════════════════════════════════════════════════════════

fn running_enter(ctx: &mut FsmContext) {
    // Resumes from the frozen value after a pause; a fresh cycle was
    // re-armed to full duration by idle_enter.
    ctx.countdown.start();
    ctx.commands.pump_on = true;
    ctx.commands.green = IndicatorMode::Blink;
    ctx.commands.red = IndicatorMode::Off;
    ctx.commands.blue = IndicatorMode::Off;
    ctx.commands.alarm = AlarmMode::Off;
    info!(
        "RUNNING: pump on, {}s remaining",
        ctx.countdown.remaining_seconds()
    );
}

fn running_update(ctx: &mut FsmContext) -> Option<StateId> {
    // A Stop or Reset edge takes precedence over completing this tick —
    // checked before any countdown or display work.
    if ctx.buttons.reset {
        return Some(StateId::LockedOut);
    }
    if ctx.buttons.stop {
        return Some(StateId::Paused);
    }
    if ctx.buttons.start {
        info!("RUNNING: START ignored, cycle already active");
    }

    match ctx.countdown.tick() {
        TickResult::Completed => {
            ctx.commands.pump_on = false;
            ctx.just_completed = true;
            ctx.cycle_has_run = true;
            info!("RUNNING: countdown complete, pump off");
            Some(StateId::Idle)
        }
        TickResult::Continue => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  PAUSED state — countdown frozen, pump off
// ═══════════════════════════════════════════════════════════════════════════

fn paused_enter(ctx: &mut FsmContext) {
    ctx.countdown.pause();
    ctx.commands.pump_on = false;
    ctx.commands.green = IndicatorMode::Off;
    ctx.commands.red = IndicatorMode::Solid;
    info!(
        "PAUSED: pump off, frozen at {}s",
        ctx.countdown.remaining_seconds()
    );
}

fn paused_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.buttons.reset {
        return Some(StateId::LockedOut);
    }
    if ctx.buttons.start {
        return Some(StateId::Running);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  LOCKED OUT state — safety latch, pump disabled, alarm beeping
// ═══════════════════════════════════════════════════════════════════════════

fn locked_enter(ctx: &mut FsmContext) {
    ctx.countdown.abort_to_lockout();
    ctx.commands.pump_on = false;
    ctx.commands.green = IndicatorMode::Off;
    ctx.commands.red = IndicatorMode::Off;
    ctx.commands.blue = IndicatorMode::Blink;
    ctx.commands.alarm = AlarmMode::Beep;
    warn!("LOCKED OUT: pump disabled, alarm on — press START to clear");
}

fn locked_exit(ctx: &mut FsmContext) {
    ctx.commands.alarm = AlarmMode::Off;
    ctx.commands.blue = IndicatorMode::Off;
    ctx.countdown.reset();
    info!(
        "LOCKED OUT: lock cleared, cycle reset to {}s",
        ctx.countdown.initial_seconds()
    );
}

fn locked_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Reset while already locked out is a no-op; only Start clears
    // the latch.
    if ctx.buttons.start {
        return Some(StateId::Idle);
    }
    None
}
