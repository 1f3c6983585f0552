//! Hardware drivers.
//!
//! Everything below this module touches pins, buses, or ESP-IDF
//! services.  Each driver is dual-target: real peripheral access under
//! `target_os = "espidf"`, an in-memory simulation everywhere else so
//! the layers above stay host-testable.

pub mod button;
pub mod hbridge;
pub mod hw_init;
pub mod hw_timer;
pub mod indicators;
pub mod lcd;
pub mod patterns;
pub mod watchdog;
