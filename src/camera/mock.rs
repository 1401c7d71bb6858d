use super::interface::{Camera, CameraProvider, CameraSettings, ExposureReadout};
use crate::error::Result;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Everything the mock devices were asked to do, for test inspection.
#[derive(Debug, Default)]
pub struct MockCameraLog {
    /// Settings of every `open` call, in order.
    pub opened: Vec<CameraSettings>,
    /// Target path of every capture, in order.
    pub captures: Vec<PathBuf>,
}

/// Camera provider for tests: records opens and captures, hands out a fixed
/// exposure readout.
pub struct MockProvider {
    log: Rc<RefCell<MockCameraLog>>,
    readout: ExposureReadout,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(MockCameraLog::default())),
            readout: ExposureReadout {
                shutter_micros: 33_000,
                awb_gains: (1.6, 1.4),
            },
        }
    }

    pub fn with_readout(mut self, readout: ExposureReadout) -> Self {
        self.readout = readout;
        self
    }

    /// Shared handle to the call log.
    pub fn log(&self) -> Rc<RefCell<MockCameraLog>> {
        Rc::clone(&self.log)
    }
}

impl CameraProvider for MockProvider {
    fn open(&self, settings: &CameraSettings) -> Result<Box<dyn Camera>> {
        self.log.borrow_mut().opened.push(settings.clone());
        Ok(Box::new(MockCamera {
            log: Rc::clone(&self.log),
            readout: self.readout,
        }))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

struct MockCamera {
    log: Rc<RefCell<MockCameraLog>>,
    readout: ExposureReadout,
}

impl Camera for MockCamera {
    fn capture_to(&mut self, path: &Path) -> Result<()> {
        self.log.borrow_mut().captures.push(path.to_path_buf());
        Ok(())
    }

    fn exposure(&self) -> Result<ExposureReadout> {
        Ok(self.readout)
    }
}
