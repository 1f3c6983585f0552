//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It contains the latched button edges, the latest
//! temperature reading, actuator command outputs, the countdown engine,
//! timing information, and configuration.  Think of it as the
//! "blackboard" in a blackboard architecture.

use crate::config::SystemConfig;
use crate::countdown::CountdownEngine;

// ---------------------------------------------------------------------------
// Button edges (written by the poll loop; consumed by state handlers)
// ---------------------------------------------------------------------------

/// Debounced button edges latched since the last control tick.
/// Transient — cleared after every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonEdges {
    pub start: bool,
    pub stop: bool,
    pub reset: bool,
}

impl ButtonEdges {
    pub fn any(&self) -> bool {
        self.start || self.stop || self.reset
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Actuator commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Requested behaviour for one indicator LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorMode {
    #[default]
    Off,
    Solid,
    /// Periodic toggle at the configured blink period.  The phase is
    /// owned by the pattern engine, never by the state machine.
    Blink,
}

/// Requested behaviour for the audible alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmMode {
    #[default]
    Off,
    /// Periodic beep at the configured beep period.
    Beep,
}

/// Commands that state handlers write to request actuator actions.
/// Derived each tick; never persisted.  The actuator layer only ever
/// observes the latest command.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActuatorCommands {
    pub pump_on: bool,
    pub fan_on: bool,
    pub green: IndicatorMode,
    pub red: IndicatorMode,
    pub blue: IndicatorMode,
    pub alarm: AlarmMode,
}

impl ActuatorCommands {
    /// All actuators off — safe default.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,
    /// Duration of one tick in seconds (inverse of control loop frequency).
    pub tick_period_secs: f32,

    // -- Inputs --
    /// Button edges latched since the previous tick.
    pub buttons: ButtonEdges,
    /// Latest calibrated temperature (°F).  Written before each tick.
    pub temperature_f: f32,

    // -- Outputs --
    /// Commands to be applied to actuators after the FSM tick.
    pub commands: ActuatorCommands,

    // -- Cycle --
    /// The single countdown cycle, reused for the lifetime of the system.
    pub countdown: CountdownEngine,
    /// Set by the Running handler on the tick the countdown reaches zero;
    /// the service consumes it to render the terminal `00:00` frame.
    pub just_completed: bool,
    /// True once at least one cycle has completed (selects the idle banner).
    pub cycle_has_run: bool,

    // -- Configuration --
    /// System configuration (fixed at startup).
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            tick_period_secs: config.control_loop_interval_ms as f32 / 1000.0,
            buttons: ButtonEdges::default(),
            temperature_f: 0.0,
            commands: ActuatorCommands::all_off(),
            countdown: CountdownEngine::new(config.cycle_duration_secs),
            just_completed: false,
            cycle_has_run: false,
            config,
        }
    }

    /// Seconds elapsed since the current state was entered.
    pub fn secs_in_state(&self) -> f32 {
        self.ticks_in_state as f32 * self.tick_period_secs
    }
}
