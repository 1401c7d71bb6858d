use crate::error::Result;
use std::fmt;
use std::path::Path;

/// Sensor frame size. Displays as "WxH", which is also what the idle screen
/// shows for the selected resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Film-speed selection. `Auto` leaves the sensor gain floating and also
/// disables exposure locking for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iso {
    Auto,
    Fixed(u32),
}

/// Shutter speed and white-balance gains as measured by the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureReadout {
    pub shutter_micros: u64,
    /// Red and blue white-balance gains.
    pub awb_gains: (f64, f64),
}

/// Exposure behavior requested when opening the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Exposure {
    /// Auto-exposure and auto white balance on every frame.
    Auto,
    /// Shutter and gains held fixed at the given values.
    Locked(ExposureReadout),
}

/// Everything the device needs to know at open time.
///
/// The device has no live-settable parameters: changing any of these means
/// dropping the handle and opening a new one. That close-then-reopen
/// transition happens in exactly one place, when the scheduler locks
/// exposure after a session's first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub resolution: Resolution,
    pub iso: Iso,
    pub rotation: u16,
    pub exposure: Exposure,
}

impl CameraSettings {
    /// The same settings with exposure and white balance pinned to `readout`.
    pub fn locked(mut self, readout: ExposureReadout) -> Self {
        self.exposure = Exposure::Locked(readout);
        self
    }
}

/// An open capture device, exclusively owned by the scheduler.
/// Dropping the value closes it.
pub trait Camera {
    /// Capture one still frame to `path`. Allowed to block the tick; the
    /// scheduler's deadline math absorbs the latency.
    fn capture_to(&mut self, path: &Path) -> Result<()>;

    /// Shutter speed and white-balance gains of the most recent capture.
    fn exposure(&self) -> Result<ExposureReadout>;
}

/// Opens capture devices. One provider outlives every session; each session
/// opens (and on exposure lock, reopens) its own device through it.
pub trait CameraProvider {
    fn open(&self, settings: &CameraSettings) -> Result<Box<dyn Camera>>;
}
