//! Polled button bank.
//!
//! The three momentary switches are active-low with internal pull-ups
//! and are sampled at the button-poll cadence (10 Hz).  A press is only
//! reported once its level has agreed across two consecutive samples,
//! which rides out contact bounce at this poll rate.  Each press yields
//! exactly one edge event; holding a button does not repeat.

use log::debug;

use crate::drivers::hw_init;
use crate::pins;

/// Which physical button produced an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Start,
    Stop,
    Reset,
}

/// One debounced active-low input.
struct DebouncedInput {
    gpio: i32,
    /// Raw level from the previous sample.
    last_raw: bool,
    /// Debounced (confirmed) pressed state.
    pressed: bool,
}

impl DebouncedInput {
    fn new(gpio: i32) -> Self {
        Self {
            gpio,
            last_raw: true, // idle high
            pressed: false,
        }
    }

    /// Sample once; returns `true` on a confirmed press edge.
    fn poll(&mut self) -> bool {
        let raw = hw_init::gpio_read(self.gpio);
        let stable = raw == self.last_raw;
        self.last_raw = raw;
        if !stable {
            return false;
        }
        let now_pressed = !raw; // active-low
        let edge = now_pressed && !self.pressed;
        self.pressed = now_pressed;
        edge
    }
}

/// The full front-panel button bank.
pub struct ButtonBank {
    start: DebouncedInput,
    stop: DebouncedInput,
    reset: DebouncedInput,
}

impl ButtonBank {
    pub fn new() -> Self {
        Self {
            start: DebouncedInput::new(pins::BTN_START_GPIO),
            stop: DebouncedInput::new(pins::BTN_STOP_GPIO),
            reset: DebouncedInput::new(pins::BTN_RESET_GPIO),
        }
    }

    /// Sample all three buttons once, collecting press edges in wiring
    /// order (Start, Stop, Reset).
    pub fn poll(&mut self, out: &mut heapless::Vec<ButtonEvent, 3>) {
        if self.start.poll() {
            debug!("button: START edge");
            let _ = out.push(ButtonEvent::Start);
        }
        if self.stop.poll() {
            debug!("button: STOP edge");
            let _ = out.push(ButtonEvent::Stop);
        }
        if self.reset.poll() {
            debug!("button: RESET edge");
            let _ = out.push(ButtonEvent::Reset);
        }
    }
}

impl Default for ButtonBank {
    fn default() -> Self {
        Self::new()
    }
}
