//! GPIO / peripheral pin assignments for the SumpGuard control board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// I²C bus (HD44780 character LCD behind a PCF8574 backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 0;
pub const I2C_SCL_GPIO: i32 = 1;
/// 7-bit I²C address of the PCF8574 LCD backpack.
pub const LCD_I2C_ADDR: u8 = 0x27;
/// I²C bus clock (400 kHz fast mode).
pub const I2C_FREQ_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// L298N dual H-bridge — channel A drives the pump relay, channel B the fan
// ---------------------------------------------------------------------------

/// Enable A — pump relay channel.
pub const PUMP_EN_GPIO: i32 = 2;
/// Pump drive line 1 (IN1).
pub const PUMP_IN1_GPIO: i32 = 3;
/// Pump drive line 2 (IN2).  Never asserted together with IN1.
pub const PUMP_IN2_GPIO: i32 = 4;

/// Enable B — enclosure fan channel.
pub const FAN_EN_GPIO: i32 = 7;
/// Fan drive line 1 (IN3).
pub const FAN_IN1_GPIO: i32 = 5;
/// Fan drive line 2 (IN4).  Never asserted together with IN3.
pub const FAN_IN2_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Indicators and alarm
// ---------------------------------------------------------------------------

/// Piezo buzzer — beeps while the lockout is latched.
pub const BUZZER_GPIO: i32 = 9;
/// Green "ready/running" LED.
pub const LED_GREEN_GPIO: i32 = 10;
/// Red "paused" LED.
pub const LED_RED_GPIO: i32 = 11;
/// Blue "locked" LED.
pub const LED_BLUE_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Buttons (active-low momentary switches with internal pull-ups)
// ---------------------------------------------------------------------------

pub const BTN_START_GPIO: i32 = 13;
pub const BTN_STOP_GPIO: i32 = 14;
pub const BTN_RESET_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Temperature sensor (analog, ADC1)
// ---------------------------------------------------------------------------

/// Enclosure temperature sensor — analog voltage into ADC1.
pub const TEMP_ADC_GPIO: i32 = 8;
