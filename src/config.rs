//! System configuration parameters
//!
//! All tunable parameters for the SumpGuard timer.  Fixed at startup —
//! the system is deliberately memoryless across power loss, so there is
//! no persistence layer behind this struct.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Cycle ---
    /// Pump cycle duration in seconds (3600 = one hour; use 5 for bench work).
    pub cycle_duration_secs: u32,

    // --- Fan thermostat ---
    /// Enclosure temperature (°F) at or above which the fan runs.
    pub fan_on_threshold_f: f32,
    /// Lower clamp applied to the raw reading before unit conversion (°C).
    pub temp_clamp_min_c: f32,
    /// Upper clamp applied to the raw reading before unit conversion (°C).
    pub temp_clamp_max_c: f32,

    // --- Timing ---
    /// Control tick interval (milliseconds) — one countdown decrement per tick.
    pub control_loop_interval_ms: u32,
    /// Button sampling interval (milliseconds).  Must be faster than the
    /// control tick so a Stop/Reset is never missed for longer than one tick.
    pub button_poll_interval_ms: u32,
    /// Indicator blink half-period (milliseconds).
    pub blink_period_ms: u32,
    /// Alarm beep half-period (milliseconds).
    pub beep_period_ms: u32,
    /// Paused/locked banner alternation half-period (milliseconds).
    pub banner_period_ms: u32,
    /// Bounded settle delay after a mode transition (milliseconds).
    /// The system is unresponsive to input during this window by design.
    pub settle_delay_ms: u32,
    /// Telemetry report interval (seconds).
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Cycle
            cycle_duration_secs: 3600,

            // Fan thermostat
            fan_on_threshold_f: 80.0,
            temp_clamp_min_c: -20.0,
            temp_clamp_max_c: 80.0,

            // Timing
            control_loop_interval_ms: 1000, // 1 Hz
            button_poll_interval_ms: 100,   // 10 Hz
            blink_period_ms: 500,
            beep_period_ms: 500,
            banner_period_ms: 500,
            settle_delay_ms: 2000,
            telemetry_interval_secs: 60, // 1/min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.cycle_duration_secs > 0);
        assert!(c.fan_on_threshold_f > 32.0);
        assert!(c.temp_clamp_min_c < c.temp_clamp_max_c);
        assert!(c.control_loop_interval_ms > 0);
        assert!(c.blink_period_ms > 0);
        assert!(c.beep_period_ms > 0);
    }

    #[test]
    fn button_poll_faster_than_control_tick() {
        let c = SystemConfig::default();
        assert!(
            c.button_poll_interval_ms < c.control_loop_interval_ms,
            "button sampling must happen at least once per control tick"
        );
    }

    #[test]
    fn settle_delay_is_bounded() {
        let c = SystemConfig::default();
        // Accepted input-latency bound from the operating procedure.
        assert!(c.settle_delay_ms <= 3000);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.cycle_duration_secs, c2.cycle_duration_secs);
        assert!((c.fan_on_threshold_f - c2.fan_on_threshold_f).abs() < 0.001);
        assert_eq!(c.settle_delay_ms, c2.settle_delay_ms);
    }
}
