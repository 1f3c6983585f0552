//! HD44780 character LCD behind a PCF8574 I²C backpack.
//!
//! The backpack exposes the LCD's 4-bit bus plus RS/EN/backlight on a
//! single I/O expander byte, so every nibble goes out as three I²C
//! writes (data, data+EN, data).  The init dance and timing follow the
//! HD44780 datasheet.
//!
//! Frames are cached: `show()` is called every control tick but only
//! touches the bus when a line actually changed.

use log::warn;

use crate::adapters::time;
use crate::drivers::hw_init;
use crate::error::{DisplayError, Error, Result};
use crate::pins;
use crate::presenter::DisplayFrame;

// PCF8574 bit assignments (standard backpack wiring).
const BIT_RS: u8 = 0x01;
const BIT_EN: u8 = 0x04;
const BIT_BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const DDRAM_LINE1: u8 = 0x80;
const DDRAM_LINE2: u8 = 0xC0;

pub const COLUMNS: usize = 16;

pub struct Lcd {
    addr: u8,
    last: Option<DisplayFrame>,
}

impl Lcd {
    /// Initialise the panel in 4-bit, 2-line mode with the backlight on.
    pub fn new() -> Result<Self> {
        let mut lcd = Self {
            addr: pins::LCD_I2C_ADDR,
            last: None,
        };
        lcd.init()?;
        Ok(lcd)
    }

    fn init(&mut self) -> Result<()> {
        // Power-on settle, then the datasheet's 8-bit → 4-bit handshake.
        time::delay_ms(50);
        self.write_nibble(0x30, false)?;
        time::delay_ms(5);
        self.write_nibble(0x30, false)?;
        time::delay_ms(1);
        self.write_nibble(0x30, false)?;
        time::delay_ms(1);
        self.write_nibble(0x20, false)?;
        time::delay_ms(1);

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.command(CMD_ENTRY_MODE)?;
        self.clear()?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.command(CMD_CLEAR)?;
        // Clear is the one slow instruction.
        time::delay_ms(2);
        self.last = None;
        Ok(())
    }

    /// Render a frame, skipping the bus entirely if nothing changed.
    pub fn show(&mut self, frame: &DisplayFrame) -> Result<()> {
        if self.last.as_ref() == Some(frame) {
            return Ok(());
        }
        self.write_line(DDRAM_LINE1, frame.line1.as_str())?;
        self.write_line(DDRAM_LINE2, frame.line2.as_str())?;
        self.last = Some(frame.clone());
        Ok(())
    }

    /// The last frame actually rendered (bench assertions).
    pub fn last_frame(&self) -> Option<&DisplayFrame> {
        self.last.as_ref()
    }

    fn write_line(&mut self, ddram: u8, text: &str) -> Result<()> {
        self.command(ddram)?;
        let bytes = text.as_bytes();
        for col in 0..COLUMNS {
            // Pad with spaces so stale characters never linger.
            let ch = bytes.get(col).copied().unwrap_or(b' ');
            self.write_byte(ch, true)?;
        }
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<()> {
        self.write_byte(cmd, false)
    }

    fn write_byte(&mut self, byte: u8, is_data: bool) -> Result<()> {
        self.write_nibble(byte & 0xF0, is_data)?;
        self.write_nibble(byte << 4, is_data)?;
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8, is_data: bool) -> Result<()> {
        let mut out = (nibble & 0xF0) | BIT_BACKLIGHT;
        if is_data {
            out |= BIT_RS;
        }
        // Latch on the EN falling edge.
        self.bus_write(&[out, out | BIT_EN, out])
    }

    fn bus_write(&mut self, data: &[u8]) -> Result<()> {
        hw_init::i2c_write(self.addr, data).map_err(|e| {
            warn!("lcd: I2C write failed: {e}");
            Error::Display(DisplayError::I2cWriteFailed)
        })
    }
}
