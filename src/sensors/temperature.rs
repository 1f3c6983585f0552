//! Enclosure temperature monitor.
//!
//! Reads a raw 16-bit ADC sample, applies the fixed linear calibration
//! for the on-die sensor, clamps to the physical range, converts to °F,
//! and rounds to one decimal place.  There is no error path: out-of-range
//! hardware noise is clamped, never rejected, so the reading is total
//! over its input domain.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the ADC channel via the oneshot API (initialised by
//! hw_init).  On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Sim default corresponds to ~0.706 V, i.e. a calibrated 27 °C (80.6 °F).
static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(14021);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temp_adc(raw: u16) {
    SIM_TEMP_ADC.store(raw, Ordering::Relaxed);
}

const ADC_MAX: f32 = 65535.0;
const V_REF: f32 = 3.3;
/// Sensor voltage at the 27 °C calibration point.
const V_CAL: f32 = 0.706;
/// Sensor slope: volts per degree Celsius.
const SLOPE_V_PER_C: f32 = 0.001721;
const T_CAL_C: f32 = 27.0;

/// Fan thermostat output — a pure comparison against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanState {
    On,
    Off,
}

/// A calibrated, clamped, display-ready reading.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureReading {
    pub raw: u16,
    /// Degrees Fahrenheit, rounded to one decimal place.
    pub fahrenheit: f32,
}

pub struct TemperatureSensor {
    clamp_min_c: f32,
    clamp_max_c: f32,
    _adc_gpio: i32,
}

impl TemperatureSensor {
    pub fn new(adc_gpio: i32, clamp_min_c: f32, clamp_max_c: f32) -> Self {
        Self {
            clamp_min_c,
            clamp_max_c,
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read(&self) -> TemperatureReading {
        let raw = self.read_adc();
        TemperatureReading {
            raw,
            fahrenheit: self.raw_to_fahrenheit(raw),
        }
    }

    /// `On` iff the reading is at or above the threshold — independent of
    /// the operating mode.
    pub fn classify(fahrenheit: f32, threshold_f: f32) -> FanState {
        if fahrenheit >= threshold_f {
            FanState::On
        } else {
            FanState::Off
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_TEMP)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_TEMP_ADC.load(Ordering::Relaxed)
    }

    fn raw_to_fahrenheit(&self, raw: u16) -> f32 {
        let voltage = (raw as f32 / ADC_MAX) * V_REF;
        let celsius = T_CAL_C - (voltage - V_CAL) / SLOPE_V_PER_C;
        let celsius = celsius.clamp(self.clamp_min_c, self.clamp_max_c);
        let fahrenheit = 1.8 * celsius + 32.0;
        (fahrenheit * 10.0).round() / 10.0
    }
}
