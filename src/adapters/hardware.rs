//! Hardware adapter — plugs the real drivers into the application ports.

use crate::app::ports::{ActuatorPort, DisplayPort, SensorPort};
use crate::config::SystemConfig;
use crate::drivers::hbridge::HBridge;
use crate::drivers::indicators::{Indicators, LedChannel};
use crate::drivers::lcd::Lcd;
use crate::drivers::patterns::IndicatorFrame;
use crate::error::Result;
use crate::pins;
use crate::presenter::DisplayFrame;
use crate::sensors::temperature::TemperatureSensor;

/// The physical board behind the port traits.
pub struct HardwareAdapter {
    sensor: TemperatureSensor,
    bridge: HBridge,
    indicators: Indicators,
    lcd: Lcd,
}

impl HardwareAdapter {
    /// Construct over already-initialised peripherals (hw_init has run).
    pub fn new(config: &SystemConfig) -> Result<Self> {
        Ok(Self {
            sensor: TemperatureSensor::new(
                pins::TEMP_ADC_GPIO,
                config.temp_clamp_min_c,
                config.temp_clamp_max_c,
            ),
            bridge: HBridge::new(),
            indicators: Indicators::new(),
            lcd: Lcd::new()?,
        })
    }
}

impl SensorPort for HardwareAdapter {
    fn read_temperature_f(&mut self) -> f32 {
        self.sensor.read().fahrenheit
    }
}

impl ActuatorPort for HardwareAdapter {
    fn set_pump(&mut self, on: bool) {
        self.bridge.set_pump(on);
    }

    fn set_fan(&mut self, on: bool) {
        self.bridge.set_fan(on);
    }

    fn set_indicators(&mut self, frame: &IndicatorFrame) {
        self.indicators.set_led(LedChannel::Green, frame.green);
        self.indicators.set_led(LedChannel::Red, frame.red);
        self.indicators.set_led(LedChannel::Blue, frame.blue);
        self.indicators.set_buzzer(frame.alarm);
    }

    fn all_off(&mut self) {
        self.bridge.all_off();
        self.indicators.all_off();
    }
}

impl DisplayPort for HardwareAdapter {
    fn show(&mut self, frame: &DisplayFrame) -> Result<()> {
        self.lcd.show(frame)
    }
}
