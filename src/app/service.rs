//! Application service — orchestrates one control tick.
//!
//! Owns the mode state machine, its context, and the lockout interlock,
//! and wires them to the outside world exclusively through the port
//! traits.  The order of operations inside [`AppService::tick`] is the
//! contract of the whole controller:
//!
//! 1. sample the temperature into the context
//! 2. advance the FSM (consumes latched button edges)
//! 3. overlay the fan thermostat (mode-independent)
//! 4. run the interlock clamp over the commanded outputs
//! 5. apply pump/fan commands to the actuators
//! 6. emit milestone events, clear the edges
//! 7. compose and return the display frame for this tick

use log::info;

use crate::app::events::{mode_name, AppEvent, TelemetryData};
use crate::app::ports::{ActuatorPort, EventSink, SensorPort};
use crate::config::SystemConfig;
use crate::drivers::button::ButtonEvent;
use crate::fsm::context::{ActuatorCommands, FsmContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::presenter::{self, DisplayFrame, StatusView};
use crate::safety::LockoutInterlock;
use crate::sensors::temperature::{FanState, TemperatureSensor};

pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    interlock: LockoutInterlock,
}

impl AppService {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Idle),
            ctx: FsmContext::new(config),
            interlock: LockoutInterlock::new(),
        }
    }

    /// Run the initial state's entry action and announce boot.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started);
        info!("service: controller started in {:?}", self.mode());
    }

    /// Latch a debounced button edge for the next control tick.
    /// Edges accumulate across polls and are consumed atomically by the
    /// FSM, which applies the Reset > Stop > Start precedence.
    pub fn handle_button(&mut self, event: ButtonEvent) {
        match event {
            ButtonEvent::Start => self.ctx.buttons.start = true,
            ButtonEvent::Stop => self.ctx.buttons.stop = true,
            ButtonEvent::Reset => self.ctx.buttons.reset = true,
        }
    }

    /// One control tick.  `banner_alt` selects the alternating banner
    /// text for paused/locked displays (phase owned by the pattern
    /// engine).
    pub fn tick<H, E>(&mut self, hw: &mut H, sink: &mut E, banner_alt: bool) -> DisplayFrame
    where
        H: SensorPort + ActuatorPort,
        E: EventSink,
    {
        self.ctx.just_completed = false;
        self.ctx.temperature_f = hw.read_temperature_f();

        let prev_mode = self.fsm.current_state();
        self.fsm.tick(&mut self.ctx);
        let mode = self.fsm.current_state();

        // Thermostat overlay: the fan follows temperature in every mode.
        self.ctx.commands.fan_on = TemperatureSensor::classify(
            self.ctx.temperature_f,
            self.ctx.config.fan_on_threshold_f,
        ) == FanState::On;

        self.interlock.enforce(mode, &mut self.ctx.commands);

        hw.set_pump(self.ctx.commands.pump_on);
        hw.set_fan(self.ctx.commands.fan_on);

        self.emit_milestones(prev_mode, mode, sink);
        self.ctx.buttons.clear();

        presenter::compose(&StatusView {
            mode,
            remaining_seconds: self.ctx.countdown.remaining_seconds(),
            temperature_f: self.ctx.temperature_f,
            just_completed: self.ctx.just_completed,
            cycle_has_run: self.ctx.cycle_has_run,
            banner_alt,
        })
    }

    fn emit_milestones(&self, from: StateId, to: StateId, sink: &mut impl EventSink) {
        if self.ctx.just_completed {
            sink.emit(&AppEvent::CycleCompleted);
        }
        if from == to {
            return;
        }
        sink.emit(&AppEvent::ModeChanged { from, to });
        match to {
            StateId::Paused => sink.emit(&AppEvent::CyclePaused {
                remaining_seconds: self.ctx.countdown.remaining_seconds(),
            }),
            StateId::LockedOut => sink.emit(&AppEvent::LockoutEngaged),
            _ => {
                if from == StateId::LockedOut {
                    sink.emit(&AppEvent::LockoutCleared);
                }
            }
        }
    }

    pub fn mode(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Latest actuator commands (the pattern engine resolves the
    /// indicator modes in here into pin levels).
    pub fn commands(&self) -> &ActuatorCommands {
        &self.ctx.commands
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.ctx.countdown.remaining_seconds()
    }

    pub fn interlock_violations(&self) -> u32 {
        self.interlock.violations()
    }

    /// Snapshot for the periodic telemetry event.
    pub fn telemetry(&self, uptime_secs: u64) -> TelemetryData {
        TelemetryData {
            mode: mode_name(self.mode()),
            remaining_seconds: self.ctx.countdown.remaining_seconds(),
            temperature_f: self.ctx.temperature_f,
            pump_on: self.ctx.commands.pump_on,
            fan_on: self.ctx.commands.fan_on,
            uptime_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeHw {
        temperature_f: f32,
        pump_on: bool,
        fan_on: bool,
    }

    impl FakeHw {
        fn new() -> Self {
            Self {
                temperature_f: 70.0,
                pump_on: false,
                fan_on: false,
            }
        }
    }

    impl SensorPort for FakeHw {
        fn read_temperature_f(&mut self) -> f32 {
            self.temperature_f
        }
    }

    impl ActuatorPort for FakeHw {
        fn set_pump(&mut self, on: bool) {
            self.pump_on = on;
        }
        fn set_fan(&mut self, on: bool) {
            self.fan_on = on;
        }
        fn set_indicators(&mut self, _frame: &crate::drivers::patterns::IndicatorFrame) {}
        fn all_off(&mut self) {
            self.pump_on = false;
            self.fan_on = false;
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<AppEvent>,
    }

    impl EventSink for RecordingSink {
        fn emit(&mut self, event: &AppEvent) {
            self.events.push(*event);
        }
    }

    fn service() -> AppService {
        AppService::new(SystemConfig {
            cycle_duration_secs: 3,
            ..SystemConfig::default()
        })
    }

    #[test]
    fn start_button_energises_the_pump() {
        let mut svc = service();
        let mut hw = FakeHw::new();
        let mut sink = RecordingSink::default();
        svc.start(&mut sink);

        svc.handle_button(ButtonEvent::Start);
        let frame = svc.tick(&mut hw, &mut sink, false);
        assert_eq!(svc.mode(), StateId::Running);
        assert!(hw.pump_on);
        assert!(frame.line1.as_str().starts_with("Countdown:"));
        assert!(sink
            .events
            .contains(&AppEvent::ModeChanged { from: StateId::Idle, to: StateId::Running }));
    }

    #[test]
    fn completion_emits_event_and_renders_zero() {
        let mut svc = service();
        let mut hw = FakeHw::new();
        let mut sink = RecordingSink::default();
        svc.start(&mut sink);

        svc.handle_button(ButtonEvent::Start);
        svc.tick(&mut hw, &mut sink, false);
        svc.tick(&mut hw, &mut sink, false);
        svc.tick(&mut hw, &mut sink, false);
        let frame = svc.tick(&mut hw, &mut sink, false);

        assert_eq!(svc.mode(), StateId::Idle);
        assert!(!hw.pump_on, "relay must open on completion");
        assert_eq!(frame.line1.as_str(), "Countdown: 00:00");
        assert!(sink.events.contains(&AppEvent::CycleCompleted));

        // The tick after the terminal frame shows the idle banner again.
        let frame = svc.tick(&mut hw, &mut sink, false);
        assert_eq!(frame.line1.as_str(), "Press START to");
    }

    #[test]
    fn fan_follows_temperature_in_every_mode() {
        let mut svc = service();
        let mut hw = FakeHw::new();
        let mut sink = RecordingSink::default();
        svc.start(&mut sink);

        hw.temperature_f = 85.0;
        svc.tick(&mut hw, &mut sink, false);
        assert!(hw.fan_on, "fan must run while hot in Idle");

        svc.handle_button(ButtonEvent::Reset);
        svc.tick(&mut hw, &mut sink, false);
        assert_eq!(svc.mode(), StateId::LockedOut);
        assert!(hw.fan_on, "lockout must not silence the thermostat");

        hw.temperature_f = 70.0;
        svc.tick(&mut hw, &mut sink, false);
        assert!(!hw.fan_on);
    }

    #[test]
    fn pause_event_carries_frozen_remaining() {
        let mut svc = service();
        let mut hw = FakeHw::new();
        let mut sink = RecordingSink::default();
        svc.start(&mut sink);

        svc.handle_button(ButtonEvent::Start);
        svc.tick(&mut hw, &mut sink, false);
        svc.tick(&mut hw, &mut sink, false);
        svc.handle_button(ButtonEvent::Stop);
        svc.tick(&mut hw, &mut sink, false);

        assert_eq!(svc.mode(), StateId::Paused);
        assert!(sink
            .events
            .contains(&AppEvent::CyclePaused { remaining_seconds: 2 }));
        assert!(!hw.pump_on);
    }

    #[test]
    fn lockout_lifecycle_emits_engage_and_clear() {
        let mut svc = service();
        let mut hw = FakeHw::new();
        let mut sink = RecordingSink::default();
        svc.start(&mut sink);

        svc.handle_button(ButtonEvent::Reset);
        svc.tick(&mut hw, &mut sink, false);
        assert!(sink.events.contains(&AppEvent::LockoutEngaged));

        svc.handle_button(ButtonEvent::Start);
        svc.tick(&mut hw, &mut sink, false);
        assert_eq!(svc.mode(), StateId::Idle);
        assert!(sink.events.contains(&AppEvent::LockoutCleared));
        assert_eq!(svc.remaining_seconds(), 3, "cycle re-armed after lockout");
    }

    #[test]
    fn edges_latched_between_ticks_are_consumed_once() {
        let mut svc = service();
        let mut hw = FakeHw::new();
        let mut sink = RecordingSink::default();
        svc.start(&mut sink);

        svc.handle_button(ButtonEvent::Start);
        svc.tick(&mut hw, &mut sink, false);
        assert_eq!(svc.mode(), StateId::Running);
        // No fresh edge: the stale Start press must not re-trigger.
        svc.tick(&mut hw, &mut sink, false);
        assert_eq!(svc.mode(), StateId::Running);
        assert_eq!(svc.remaining_seconds(), 2);
    }

    #[test]
    fn telemetry_snapshot_reflects_the_tick() {
        let mut svc = service();
        let mut hw = FakeHw::new();
        let mut sink = RecordingSink::default();
        svc.start(&mut sink);

        hw.temperature_f = 72.5;
        svc.handle_button(ButtonEvent::Start);
        svc.tick(&mut hw, &mut sink, false);

        let t = svc.telemetry(17);
        assert_eq!(t.mode, "running");
        assert_eq!(t.remaining_seconds, 3);
        assert!(t.pump_on);
        assert!(!t.fan_on);
        assert_eq!(t.uptime_secs, 17);
    }
}
