use super::{Button, PinSample};

/// Per-tick edge facts for one button.
///
/// `held` mirrors the debounced level; the edge flags compare it against the
/// previous tick's level and are therefore valid for exactly one tick. At
/// most one of the two edge flags is set, and repeated queries within a tick
/// always return the same answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputChannel {
    held: bool,
    just_pressed: bool,
    just_released: bool,
}

impl InputChannel {
    pub fn held(&self) -> bool {
        self.held
    }

    pub fn just_pressed(&self) -> bool {
        self.just_pressed
    }

    pub fn just_released(&self) -> bool {
        self.just_released
    }

    fn update(&mut self, level: bool) {
        self.just_pressed = level && !self.held;
        self.just_released = !level && self.held;
        self.held = level;
    }
}

/// Edge tracker for the three logical buttons.
pub struct ButtonBank {
    channels: [InputChannel; 3],
}

impl ButtonBank {
    pub fn new() -> Self {
        Self {
            channels: [InputChannel::default(); 3],
        }
    }

    /// Fold this tick's levels into every channel. Called exactly once per tick.
    pub fn scan(&mut self, sample: &PinSample) {
        for (channel, level) in self.channels.iter_mut().zip(sample.buttons) {
            channel.update(level);
        }
    }

    pub fn channel(&self, button: Button) -> &InputChannel {
        &self.channels[button as usize]
    }
}

impl Default for ButtonBank {
    fn default() -> Self {
        Self::new()
    }
}
