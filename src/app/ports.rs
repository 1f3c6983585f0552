//! Ports — the traits the application core is written against.
//!
//! Hardware adapters implement these over the real drivers; tests
//! implement them over mocks.  The core never names a pin or a bus.

use crate::drivers::patterns::IndicatorFrame;
use crate::error::Result;
use crate::presenter::DisplayFrame;

/// Everything the core reads from the world.
pub trait SensorPort {
    /// Calibrated, clamped enclosure temperature in °F.
    fn read_temperature_f(&mut self) -> f32;
}

/// Everything the core drives.
pub trait ActuatorPort {
    fn set_pump(&mut self, on: bool);
    fn set_fan(&mut self, on: bool);
    /// Apply an already-resolved indicator frame (levels, not modes).
    fn set_indicators(&mut self, frame: &IndicatorFrame);
    /// Drop every output to its de-energised level.
    fn all_off(&mut self);
}

/// The two-line status surface.
pub trait DisplayPort {
    fn show(&mut self, frame: &DisplayFrame) -> Result<()>;
}

/// Consumer of application events (logging, telemetry).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
