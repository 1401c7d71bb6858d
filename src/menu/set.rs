use super::list::{MenuEntry, SelectableList};
use crate::camera::{Iso, Resolution};

/// What the session writes to stdout for the downstream assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    FramesOnly,
    VideoAndFrames,
}

/// Whether a session restarts itself when its recording length elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleMode {
    Once,
    Repeat,
}

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const YEAR: u64 = DAY * 365 + DAY / 4; // 365.25 days

/// The fixed set of operator-configurable parameters, one typed list each.
///
/// Built once at startup with compiled-in items and defaults; selections are
/// not persisted across restarts.
pub struct MenuSet {
    pub resolution: SelectableList<Resolution>,
    pub iso: SelectableList<Iso>,
    pub mode: SelectableList<CaptureMode>,
    pub fps: SelectableList<u32>,
    pub length: SelectableList<u64>,
    pub cycle: SelectableList<CycleMode>,
}

impl MenuSet {
    /// Number of lists the menu-cycle button walks through.
    pub const COUNT: usize = 6;

    pub fn new() -> Self {
        let mut resolution = SelectableList::new("Resolution");
        resolution.append("1920x1080 16:9", Resolution::new(1920, 1080), false);
        resolution.append("1280x720 16:9", Resolution::new(1280, 720), true);
        resolution.append("1640x922 16:9", Resolution::new(1640, 922), false);
        resolution.append("2592x1944 4:3", Resolution::new(2592, 1944), false);
        resolution.append("1296x972 4:3", Resolution::new(1296, 972), false);
        resolution.append("800x600 4:3", Resolution::new(800, 600), false);
        resolution.append("640x480 4:3", Resolution::new(640, 480), false);

        let mut iso = SelectableList::new("ISO");
        iso.append("100", Iso::Fixed(100), false);
        iso.append("200", Iso::Fixed(200), false);
        iso.append("400", Iso::Fixed(400), false);
        iso.append("800", Iso::Fixed(800), false);
        iso.append("Auto", Iso::Auto, true);

        let mut mode = SelectableList::new("Mode");
        mode.append("Frames only", CaptureMode::FramesOnly, false);
        mode.append("Video & frames", CaptureMode::VideoAndFrames, true);

        let mut fps = SelectableList::new("FPS");
        fps.append("6", 6, false);
        fps.append("12", 12, false);
        fps.append("18", 18, false);
        fps.append("24", 24, true);
        fps.append("30", 30, false);

        let mut length = SelectableList::new("Recording length");
        length.append("10 minutes", 10 * MINUTE, false);
        length.append("30 minutes", 30 * MINUTE, false);
        length.append("1 hour", HOUR, false);
        length.append("2 hours", 2 * HOUR, false);
        length.append("3 hours", 3 * HOUR, false);
        length.append("6 hours", 6 * HOUR, false);
        length.append("12 hours", 12 * HOUR, false);
        length.append("24 hours", 24 * HOUR, false);
        // 12 years feels like forever
        length.append("forever", 12 * YEAR, true);

        let mut cycle = SelectableList::new("Cycles");
        cycle.append("Once", CycleMode::Once, true);
        cycle.append("Repeat", CycleMode::Repeat, false);

        Self {
            resolution,
            iso,
            mode,
            fps,
            length,
            cycle,
        }
    }

    /// List at `index` in menu-cycle order.
    pub fn entry(&self, index: usize) -> &dyn MenuEntry {
        match index % Self::COUNT {
            0 => &self.resolution,
            1 => &self.iso,
            2 => &self.mode,
            3 => &self.fps,
            4 => &self.length,
            _ => &self.cycle,
        }
    }

    pub fn entry_mut(&mut self, index: usize) -> &mut dyn MenuEntry {
        match index % Self::COUNT {
            0 => &mut self.resolution,
            1 => &mut self.iso,
            2 => &mut self.mode,
            3 => &mut self.fps,
            4 => &mut self.length,
            _ => &mut self.cycle,
        }
    }
}

impl Default for MenuSet {
    fn default() -> Self {
        Self::new()
    }
}
