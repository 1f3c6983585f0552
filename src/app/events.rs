//! Application-level events emitted through the [`EventSink`] port.
//!
//! These are the observable milestones of the controller — mode changes,
//! cycle lifecycle, safety lockout — plus the periodic telemetry record.

use serde::Serialize;

use crate::fsm::StateId;

/// Periodic snapshot of the controller, serialised as one JSON line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetryData {
    pub mode: &'static str,
    pub remaining_seconds: u32,
    pub temperature_f: f32,
    pub pump_on: bool,
    pub fan_on: bool,
    pub uptime_secs: u64,
}

/// Milestones the application reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// Controller finished boot and entered the idle mode.
    Started,
    /// The mode machine transitioned.
    ModeChanged { from: StateId, to: StateId },
    /// A countdown ran all the way to zero.
    CycleCompleted,
    /// A running countdown was paused with this many seconds left.
    CyclePaused { remaining_seconds: u32 },
    /// The safety lockout latched.
    LockoutEngaged,
    /// The lockout was cleared by the operator.
    LockoutCleared,
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// Stable lower-case mode names for logs and telemetry.
pub fn mode_name(mode: StateId) -> &'static str {
    match mode {
        StateId::Idle => "idle",
        StateId::Running => "running",
        StateId::Paused => "paused",
        StateId::LockedOut => "locked_out",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telemetry_serialises_to_flat_json() {
        let data = TelemetryData {
            mode: mode_name(StateId::Running),
            remaining_seconds: 120,
            temperature_f: 75.5,
            pump_on: true,
            fan_on: false,
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"mode\":\"running\""));
        assert!(json.contains("\"remaining_seconds\":120"));
        assert!(json.contains("\"pump_on\":true"));
    }
}
