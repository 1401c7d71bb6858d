#[cfg(all(target_os = "linux", feature = "hardware"))]
mod hd44780;
mod mock;
mod presenter;
#[cfg(test)]
mod tests;

#[cfg(all(target_os = "linux", feature = "hardware"))]
pub use hd44780::Hd44780Display;
pub use mock::MockDisplay;
pub use presenter::{fit_line, status_lines, StatusView, LINE_WIDTH};

use crate::error::Result;

/// Two-line fixed-width character display.
///
/// Callers always hand over full-width lines; the presenter pads and
/// truncates so the device never sees a variable-length string.
pub trait TextDisplay {
    fn write_lines(&mut self, line1: &str, line2: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    fn set_enabled(&mut self, enabled: bool) -> Result<()>;
}
