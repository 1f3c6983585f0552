//! L298N dual H-bridge driver.
//!
//! Channel A switches the pump relay, channel B the enclosure fan.  Both
//! loads are unidirectional, so each channel only ever drives forward:
//! on means IN1 high, IN2 low, EN high; off means all three lines low.
//! The IN pair is never asserted together — that would shoot-through the
//! bridge.
//!
//! Writes are idempotent and cached, so re-commanding the current state
//! each control tick costs no GPIO traffic.

use log::debug;

use crate::drivers::hw_init;
use crate::pins;

/// One H-bridge channel: an enable line plus a drive-line pair.
struct Channel {
    en: i32,
    in1: i32,
    in2: i32,
    on: bool,
}

impl Channel {
    fn new(en: i32, in1: i32, in2: i32) -> Self {
        let ch = Self {
            en,
            in1,
            in2,
            on: false,
        };
        ch.drive(false);
        ch
    }

    fn set(&mut self, on: bool, label: &str) {
        if self.on == on {
            return;
        }
        self.drive(on);
        self.on = on;
        debug!("hbridge: {} -> {}", label, if on { "ON" } else { "OFF" });
    }

    fn drive(&self, on: bool) {
        if on {
            // Drive lines settle before the channel is enabled.
            hw_init::gpio_write(self.in2, false);
            hw_init::gpio_write(self.in1, true);
            hw_init::gpio_write(self.en, true);
        } else {
            hw_init::gpio_write(self.en, false);
            hw_init::gpio_write(self.in1, false);
            hw_init::gpio_write(self.in2, false);
        }
    }
}

/// Both output channels of the power board.
pub struct HBridge {
    pump: Channel,
    fan: Channel,
}

impl HBridge {
    /// Construct with both channels de-energised.
    pub fn new() -> Self {
        Self {
            pump: Channel::new(pins::PUMP_EN_GPIO, pins::PUMP_IN1_GPIO, pins::PUMP_IN2_GPIO),
            fan: Channel::new(pins::FAN_EN_GPIO, pins::FAN_IN1_GPIO, pins::FAN_IN2_GPIO),
        }
    }

    pub fn set_pump(&mut self, on: bool) {
        self.pump.set(on, "pump");
    }

    pub fn set_fan(&mut self, on: bool) {
        self.fan.set(on, "fan");
    }

    pub fn pump_on(&self) -> bool {
        self.pump.on
    }

    pub fn fan_on(&self) -> bool {
        self.fan.on
    }

    /// Drop everything to a safe level, cache included.
    pub fn all_off(&mut self) {
        self.set_pump(false);
        self.set_fan(false);
    }
}

impl Default for HBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::hw_init::{gpio_read, sim_set_gpio};
    use std::sync::Mutex;

    // The sim GPIO levels are process-global; serialize the bridge tests.
    static LOCK: Mutex<()> = Mutex::new(());

    fn reset_pins() {
        for pin in [
            pins::PUMP_EN_GPIO,
            pins::PUMP_IN1_GPIO,
            pins::PUMP_IN2_GPIO,
            pins::FAN_EN_GPIO,
            pins::FAN_IN1_GPIO,
            pins::FAN_IN2_GPIO,
        ] {
            sim_set_gpio(pin, false);
        }
    }

    #[test]
    fn pump_on_drives_in1_and_en_only() {
        let _guard = LOCK.lock().unwrap();
        reset_pins();
        let mut hb = HBridge::new();
        hb.set_pump(true);
        assert!(gpio_read(pins::PUMP_EN_GPIO));
        assert!(gpio_read(pins::PUMP_IN1_GPIO));
        assert!(!gpio_read(pins::PUMP_IN2_GPIO));
    }

    #[test]
    fn pump_off_drops_all_lines() {
        let _guard = LOCK.lock().unwrap();
        reset_pins();
        let mut hb = HBridge::new();
        hb.set_pump(true);
        hb.set_pump(false);
        assert!(!gpio_read(pins::PUMP_EN_GPIO));
        assert!(!gpio_read(pins::PUMP_IN1_GPIO));
        assert!(!gpio_read(pins::PUMP_IN2_GPIO));
    }

    #[test]
    fn drive_pair_is_never_both_high() {
        let _guard = LOCK.lock().unwrap();
        reset_pins();
        let mut hb = HBridge::new();
        for on in [true, false, true, true, false] {
            hb.set_pump(on);
            hb.set_fan(!on);
            assert!(
                !(gpio_read(pins::PUMP_IN1_GPIO) && gpio_read(pins::PUMP_IN2_GPIO)),
                "pump drive pair shoot-through"
            );
            assert!(
                !(gpio_read(pins::FAN_IN1_GPIO) && gpio_read(pins::FAN_IN2_GPIO)),
                "fan drive pair shoot-through"
            );
        }
    }

    #[test]
    fn channels_are_independent() {
        let _guard = LOCK.lock().unwrap();
        reset_pins();
        let mut hb = HBridge::new();
        hb.set_fan(true);
        assert!(gpio_read(pins::FAN_EN_GPIO));
        assert!(!gpio_read(pins::PUMP_EN_GPIO));
        hb.all_off();
        assert!(!hb.pump_on() && !hb.fan_on());
    }
}
