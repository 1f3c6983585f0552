//! Indicator pattern engine.
//!
//! The state machine only ever commands an indicator *mode* (off, solid,
//! blink) and an alarm mode (off, beep).  This engine owns the time
//! phases that turn those modes into instantaneous pin levels, so the
//! FSM never has to know what part of a blink period it is in.
//!
//! All blinking channels share one phase, which keeps the panel visually
//! coherent (LEDs and beeps toggle together).  The slower banner phase
//! drives the alternating two-line display texts.

use crate::fsm::context::{ActuatorCommands, AlarmMode, IndicatorMode};

/// Instantaneous pin levels for the panel, derived from modes + phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorFrame {
    pub green: bool,
    pub red: bool,
    pub blue: bool,
    pub alarm: bool,
}

pub struct PatternEngine {
    blink_period_ms: u32,
    beep_period_ms: u32,
    banner_period_ms: u32,
    blink_elapsed: u32,
    beep_elapsed: u32,
    banner_elapsed: u32,
    blink_phase: bool,
    beep_phase: bool,
    banner_phase: bool,
}

impl PatternEngine {
    pub fn new(blink_period_ms: u32, beep_period_ms: u32, banner_period_ms: u32) -> Self {
        Self {
            blink_period_ms: blink_period_ms.max(1),
            beep_period_ms: beep_period_ms.max(1),
            banner_period_ms: banner_period_ms.max(1),
            blink_elapsed: 0,
            beep_elapsed: 0,
            banner_elapsed: 0,
            // Blink starts in the ON half so a fresh mode shows immediately.
            blink_phase: true,
            beep_phase: true,
            banner_phase: false,
        }
    }

    /// Advance all phases by `delta_ms` of wall time.
    pub fn tick(&mut self, delta_ms: u32) {
        Self::advance(
            &mut self.blink_elapsed,
            &mut self.blink_phase,
            self.blink_period_ms,
            delta_ms,
        );
        Self::advance(
            &mut self.beep_elapsed,
            &mut self.beep_phase,
            self.beep_period_ms,
            delta_ms,
        );
        Self::advance(
            &mut self.banner_elapsed,
            &mut self.banner_phase,
            self.banner_period_ms,
            delta_ms,
        );
    }

    fn advance(elapsed: &mut u32, phase: &mut bool, period: u32, delta_ms: u32) {
        *elapsed += delta_ms;
        while *elapsed >= period {
            *elapsed -= period;
            *phase = !*phase;
        }
    }

    /// Resolve the commanded modes into pin levels at the current phase.
    pub fn frame(&self, commands: &ActuatorCommands) -> IndicatorFrame {
        IndicatorFrame {
            green: self.resolve(commands.green),
            red: self.resolve(commands.red),
            blue: self.resolve(commands.blue),
            alarm: match commands.alarm {
                AlarmMode::Off => false,
                AlarmMode::Beep => self.beep_phase,
            },
        }
    }

    fn resolve(&self, mode: IndicatorMode) -> bool {
        match mode {
            IndicatorMode::Off => false,
            IndicatorMode::Solid => true,
            IndicatorMode::Blink => self.blink_phase,
        }
    }

    /// Phase for the alternating display banners.
    pub fn banner_phase(&self) -> bool {
        self.banner_phase
    }
}
