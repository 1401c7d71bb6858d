use super::{ButtonInput, PinSample};
use crate::error::Result;

/// Scripted input source for tests: holds one sample that the test mutates
/// between ticks.
pub struct MockButtons {
    sample: PinSample,
}

impl MockButtons {
    pub fn new() -> Self {
        Self {
            // an idle dial resting on position 3
            sample: PinSample {
                buttons: [false; 3],
                dial: [true, true, false, false],
            },
        }
    }

    pub fn set_buttons(&mut self, buttons: [bool; 3]) {
        self.sample.buttons = buttons;
    }

    pub fn set_dial(&mut self, dial: [bool; 4]) {
        self.sample.dial = dial;
    }
}

impl ButtonInput for MockButtons {
    fn sample(&mut self) -> Result<PinSample> {
        Ok(self.sample)
    }
}

impl Default for MockButtons {
    fn default() -> Self {
        Self::new()
    }
}
