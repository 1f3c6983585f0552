//! Event sink that reports milestones through the logger.
//!
//! Milestones go out as human-readable `info!` lines; the periodic
//! telemetry snapshot is serialised to a single JSON line so it can be
//! scraped straight off the serial console.

use log::{info, warn};

use crate::app::events::{mode_name, AppEvent};
use crate::app::ports::EventSink;

pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("event: controller started"),
            AppEvent::ModeChanged { from, to } => {
                info!("event: mode {} -> {}", mode_name(*from), mode_name(*to));
            }
            AppEvent::CycleCompleted => info!("event: cycle completed"),
            AppEvent::CyclePaused { remaining_seconds } => {
                info!("event: cycle paused, {remaining_seconds}s remaining");
            }
            AppEvent::LockoutEngaged => warn!("event: lockout engaged"),
            AppEvent::LockoutCleared => info!("event: lockout cleared"),
            AppEvent::Telemetry(data) => match serde_json::to_string(data) {
                Ok(json) => info!("telemetry: {json}"),
                Err(e) => warn!("telemetry: serialise failed: {e}"),
            },
        }
    }
}
