pub mod app;
pub mod camera;
pub mod config;
pub mod display;
pub mod error;
pub mod indicator;
pub mod input;
pub mod menu;
pub mod scheduler;
pub mod storage;

pub use app::{LoopExit, MainLoop, Peripherals, PowerControl, ShutdownWatchdog, SystemPower};
pub use camera::{
    Camera, CameraProvider, CameraSettings, Exposure, ExposureReadout, Iso, LibcameraProvider,
    Resolution,
};
pub use config::LapsecamConfig;
pub use display::{status_lines, StatusView, TextDisplay, LINE_WIDTH};
pub use error::{LapsecamError, Result};
pub use indicator::{FlashTimer, Indicator};
pub use input::{Button, ButtonBank, ButtonInput, InputChannel, IntervalDial, PinSample};
pub use menu::{CaptureMode, CycleMode, MenuNavigator, MenuSet, SelectableList};
pub use scheduler::{CaptureScheduler, SessionParams, TickReport};

#[cfg(all(target_os = "linux", feature = "hardware"))]
pub use display::Hd44780Display;
#[cfg(all(target_os = "linux", feature = "hardware"))]
pub use indicator::GpioLed;
#[cfg(all(target_os = "linux", feature = "hardware"))]
pub use input::GpioButtons;
