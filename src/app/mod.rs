//! Application layer — hexagonal core.
//!
//! The service orchestrates the mode machine, safety interlock, and
//! presenter behind the port traits in [`ports`]; adapters plug the
//! real hardware (or test mocks) into those ports.

pub mod events;
pub mod ports;
pub mod service;

pub use ports::{ActuatorPort, DisplayPort, EventSink, SensorPort};
pub use service::AppService;
