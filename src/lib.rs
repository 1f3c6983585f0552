//! SumpGuard — sump-pump safety timer firmware.
//!
//! A countdown-driven pump controller: the operator starts a fixed
//! one-hour pump cycle, can pause/resume or hard-reset it, and a
//! temperature thermostat runs the enclosure fan independently of the
//! pump's mode.  The pump relay is guarded by a latched safety lockout.
//!
//! ## Architecture
//!
//! Hexagonal layout.  The pure core (`fsm`, `countdown`, `safety`,
//! `presenter`) never touches hardware and is fully host-testable; the
//! [`app`] layer orchestrates it behind port traits; [`adapters`] and
//! [`drivers`] bind those ports to real ESP-IDF peripherals, with an
//! in-memory simulation on every other target.
//!
//! ```text
//!  buttons ─┐                          ┌─ pump relay (H-bridge A)
//!  temp ADC ┼─▶ AppService ─▶ ports ──┼─ fan        (H-bridge B)
//!  timers ──┘   (FSM + interlock)      ├─ LEDs / buzzer
//!                                      └─ 16x2 LCD
//! ```

pub mod adapters;
pub mod app;
pub mod config;
pub mod countdown;
pub mod drivers;
pub mod error;
pub mod events;
pub mod fsm;
pub mod pins;
pub mod presenter;
pub mod safety;
pub mod sensors;

pub use app::AppService;
pub use config::SystemConfig;
pub use error::{Error, Result};
