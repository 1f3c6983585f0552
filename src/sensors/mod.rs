//! Sensor subsystem.
//!
//! The enclosure temperature monitor is the only sensor in the system;
//! it feeds both the fan thermostat and the status display.

pub mod temperature;
