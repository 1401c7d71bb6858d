use crate::error::Result;
use std::time::{Duration, Instant};

/// Status LED flashed on every successful capture.
pub trait Indicator {
    fn set_on(&mut self) -> Result<()>;
    fn set_off(&mut self) -> Result<()>;
}

/// One-shot timer for the capture flash. `trigger` arms it at capture time;
/// `poll` reports exactly one "switch off now" per arming. Never blocks.
pub struct FlashTimer {
    duration: Duration,
    off_at: Option<Instant>,
}

impl FlashTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            off_at: None,
        }
    }

    /// Arm the flash-off deadline for a capture that happened at `now`.
    pub fn trigger(&mut self, now: Instant) {
        self.off_at = Some(now + self.duration);
    }

    /// True exactly when the pending deadline has elapsed; clears it.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.off_at {
            Some(at) if now >= at => {
                self.off_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.off_at.is_some()
    }
}

#[cfg(all(target_os = "linux", feature = "hardware"))]
pub use hardware::GpioLed;

#[cfg(all(target_os = "linux", feature = "hardware"))]
mod hardware {
    use super::Indicator;
    use crate::error::{LapsecamError, Result};
    use rppal::gpio::{Gpio, OutputPin};

    /// Indicator LED on a GPIO output pin.
    pub struct GpioLed {
        pin: OutputPin,
    }

    impl GpioLed {
        pub fn new(bcm: u8) -> Result<Self> {
            let pin = Gpio::new()
                .map_err(|e| LapsecamError::gpio(e.to_string()))?
                .get(bcm)
                .map_err(|e| LapsecamError::gpio(format!("pin {}: {}", bcm, e)))?
                .into_output_low();
            Ok(Self { pin })
        }
    }

    impl Indicator for GpioLed {
        fn set_on(&mut self) -> Result<()> {
            self.pin.set_high();
            Ok(())
        }

        fn set_off(&mut self) -> Result<()> {
            self.pin.set_low();
            Ok(())
        }
    }
}

/// Recording indicator for tests.
#[derive(Debug, Default)]
pub struct MockIndicator {
    pub on: bool,
    /// Every state written, in order.
    pub transitions: Vec<bool>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Indicator for MockIndicator {
    fn set_on(&mut self) -> Result<()> {
        self.on = true;
        self.transitions.push(true);
        Ok(())
    }

    fn set_off(&mut self) -> Result<()> {
        self.on = false;
        self.transitions.push(false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_timer_fires_once_after_duration() {
        let mut timer = FlashTimer::new(Duration::from_millis(200));
        let start = Instant::now();

        timer.trigger(start);
        assert!(timer.pending());

        assert!(!timer.poll(start + Duration::from_millis(100)));
        assert!(timer.poll(start + Duration::from_millis(200)));
        assert!(!timer.pending());

        // no second fire without re-arming
        assert!(!timer.poll(start + Duration::from_millis(400)));
    }

    #[test]
    fn test_flash_timer_rearm_moves_deadline() {
        let mut timer = FlashTimer::new(Duration::from_millis(200));
        let start = Instant::now();

        timer.trigger(start);
        timer.trigger(start + Duration::from_millis(150));
        assert!(!timer.poll(start + Duration::from_millis(200)));
        assert!(timer.poll(start + Duration::from_millis(350)));
    }

    #[test]
    fn test_idle_timer_never_fires() {
        let mut timer = FlashTimer::new(Duration::from_millis(200));
        assert!(!timer.poll(Instant::now() + Duration::from_secs(5)));
    }
}
