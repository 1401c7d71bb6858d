mod interface;
mod libcamera;
mod mock;

pub use interface::{Camera, CameraProvider, CameraSettings, Exposure, ExposureReadout, Iso, Resolution};
pub use libcamera::{LibcameraProvider, LibcameraStill};
pub use mock::{MockCameraLog, MockProvider};
