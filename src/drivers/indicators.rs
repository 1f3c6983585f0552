//! Front-panel indicator driver: three status LEDs and the piezo buzzer.
//!
//! This layer only knows about raw on/off levels.  Blink and beep phases
//! are computed upstream by [`patterns`](crate::drivers::patterns); by the
//! time a level reaches this driver it is already the instantaneous one.

use crate::drivers::hw_init;
use crate::pins;

/// The three status LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedChannel {
    Green,
    Red,
    Blue,
}

impl LedChannel {
    fn gpio(self) -> i32 {
        match self {
            Self::Green => pins::LED_GREEN_GPIO,
            Self::Red => pins::LED_RED_GPIO,
            Self::Blue => pins::LED_BLUE_GPIO,
        }
    }
}

/// Cached levels for the LEDs and buzzer.
pub struct Indicators {
    green: bool,
    red: bool,
    blue: bool,
    buzzer: bool,
}

impl Indicators {
    /// Construct with everything dark and quiet.
    pub fn new() -> Self {
        let ind = Self {
            green: false,
            red: false,
            blue: false,
            buzzer: false,
        };
        for ch in [LedChannel::Green, LedChannel::Red, LedChannel::Blue] {
            hw_init::gpio_write(ch.gpio(), false);
        }
        hw_init::gpio_write(pins::BUZZER_GPIO, false);
        ind
    }

    pub fn set_led(&mut self, channel: LedChannel, on: bool) {
        let cached = match channel {
            LedChannel::Green => &mut self.green,
            LedChannel::Red => &mut self.red,
            LedChannel::Blue => &mut self.blue,
        };
        if *cached != on {
            *cached = on;
            hw_init::gpio_write(channel.gpio(), on);
        }
    }

    pub fn set_buzzer(&mut self, on: bool) {
        if self.buzzer != on {
            self.buzzer = on;
            hw_init::gpio_write(pins::BUZZER_GPIO, on);
        }
    }

    pub fn all_off(&mut self) {
        for ch in [LedChannel::Green, LedChannel::Red, LedChannel::Blue] {
            self.set_led(ch, false);
        }
        self.set_buzzer(false);
    }
}

impl Default for Indicators {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::hw_init::gpio_read;
    use std::sync::Mutex;

    static LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn led_levels_reach_their_pins() {
        let _guard = LOCK.lock().unwrap();
        let mut ind = Indicators::new();
        ind.set_led(LedChannel::Green, true);
        ind.set_led(LedChannel::Blue, true);
        assert!(gpio_read(pins::LED_GREEN_GPIO));
        assert!(!gpio_read(pins::LED_RED_GPIO));
        assert!(gpio_read(pins::LED_BLUE_GPIO));
        ind.all_off();
        assert!(!gpio_read(pins::LED_GREEN_GPIO));
        assert!(!gpio_read(pins::LED_BLUE_GPIO));
    }

    #[test]
    fn buzzer_follows_commands() {
        let _guard = LOCK.lock().unwrap();
        let mut ind = Indicators::new();
        ind.set_buzzer(true);
        assert!(gpio_read(pins::BUZZER_GPIO));
        ind.set_buzzer(false);
        assert!(!gpio_read(pins::BUZZER_GPIO));
    }
}
