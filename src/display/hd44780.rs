use super::{fit_line, TextDisplay};
use crate::config::LcdConfig;
use crate::error::{LapsecamError, Result};
use rppal::gpio::{Gpio, OutputPin};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x06;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_DISPLAY_OFF: u8 = 0x08;
const CMD_SET_DDRAM: u8 = 0x80;

const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// HD44780-compatible character LCD in 4-bit mode, bit-banged over GPIO.
pub struct Hd44780Display {
    rs: OutputPin,
    en: OutputPin,
    data: [OutputPin; 4],
    columns: usize,
}

impl Hd44780Display {
    pub fn new(config: &LcdConfig) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| LapsecamError::display(e.to_string()))?;
        let claim = |bcm: u8| -> Result<OutputPin> {
            Ok(gpio
                .get(bcm)
                .map_err(|e| LapsecamError::display(format!("pin {}: {}", bcm, e)))?
                .into_output_low())
        };

        let mut display = Self {
            rs: claim(config.rs)?,
            en: claim(config.en)?,
            data: [
                claim(config.d4)?,
                claim(config.d5)?,
                claim(config.d6)?,
                claim(config.d7)?,
            ],
            columns: config.columns as usize,
        };

        display.init();
        let columns = display.columns;
        info!("LCD initialized ({} columns)", columns);
        Ok(display)
    }

    // Standard power-on sequence for 4-bit operation.
    fn init(&mut self) {
        thread::sleep(Duration::from_millis(50));
        self.rs.set_low();
        for _ in 0..3 {
            self.write_nibble(0x03);
            thread::sleep(Duration::from_millis(5));
        }
        self.write_nibble(0x02);
        thread::sleep(Duration::from_millis(1));

        self.command(CMD_FUNCTION_4BIT_2LINE);
        self.command(CMD_DISPLAY_ON);
        self.command(CMD_ENTRY_MODE);
        self.command(CMD_CLEAR);
        thread::sleep(Duration::from_millis(2));
    }

    fn write_nibble(&mut self, nibble: u8) {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            if nibble & (1 << bit) != 0 {
                pin.set_high();
            } else {
                pin.set_low();
            }
        }
        // latch on the falling edge of enable
        self.en.set_high();
        thread::sleep(Duration::from_micros(1));
        self.en.set_low();
        thread::sleep(Duration::from_micros(100));
    }

    fn write_byte(&mut self, byte: u8) {
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
    }

    fn command(&mut self, cmd: u8) {
        self.rs.set_low();
        self.write_byte(cmd);
    }

    fn write_text(&mut self, text: &str) {
        self.rs.set_high();
        for ch in text.chars() {
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.write_byte(byte);
        }
    }

    fn set_cursor(&mut self, column: u8, row: usize) {
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row.min(1)] + column));
    }
}

impl TextDisplay for Hd44780Display {
    fn write_lines(&mut self, line1: &str, line2: &str) -> Result<()> {
        debug!("LCD: {:?} / {:?}", line1, line2);
        for (row, line) in [line1, line2].into_iter().enumerate() {
            let padded = fit_line(line);
            self.set_cursor(0, row);
            self.write_text(&padded[..padded.len().min(self.columns)]);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.command(CMD_CLEAR);
        thread::sleep(Duration::from_millis(2));
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.command(if enabled {
            CMD_DISPLAY_ON
        } else {
            CMD_DISPLAY_OFF
        });
        Ok(())
    }
}
