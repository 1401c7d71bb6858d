use super::{ButtonInput, PinSample};
use crate::config::PinConfig;
use crate::error::{LapsecamError, Result};
use rppal::gpio::{Gpio, InputPin};
use tracing::{debug, info};

/// Button and dial input over the Raspberry Pi GPIO header.
///
/// Buttons are wired with negative logic (pressed pulls the pin low); the
/// dial contacts read positive. Pins are claimed with internal pull-ups and
/// released when this value drops.
pub struct GpioButtons {
    buttons: [InputPin; 3],
    dial: [InputPin; 4],
}

impl GpioButtons {
    pub fn new(pins: &PinConfig) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| LapsecamError::gpio(e.to_string()))?;

        let claim = |bcm: u8| -> Result<InputPin> {
            let pin = gpio
                .get(bcm)
                .map_err(|e| LapsecamError::gpio(format!("pin {}: {}", bcm, e)))?
                .into_input_pullup();
            debug!("Claimed input pin {}", bcm);
            Ok(pin)
        };

        let buttons = [
            claim(pins.toggle_button)?,
            claim(pins.menu_button)?,
            claim(pins.select_button)?,
        ];
        let dial = [
            claim(pins.dial[0])?,
            claim(pins.dial[1])?,
            claim(pins.dial[2])?,
            claim(pins.dial[3])?,
        ];

        info!(
            "GPIO inputs ready (buttons {:?}, dial {:?})",
            [pins.toggle_button, pins.menu_button, pins.select_button],
            pins.dial
        );

        Ok(Self { buttons, dial })
    }
}

impl ButtonInput for GpioButtons {
    fn sample(&mut self) -> Result<PinSample> {
        let mut sample = PinSample::default();
        for (level, pin) in sample.buttons.iter_mut().zip(self.buttons.iter()) {
            // negative logic on buttons
            *level = pin.is_low();
        }
        for (level, pin) in sample.dial.iter_mut().zip(self.dial.iter()) {
            *level = pin.is_high();
        }
        Ok(sample)
    }
}
