use super::protocol;
use crate::camera::{Camera, CameraProvider, CameraSettings, Exposure, Iso, Resolution};
use crate::error::{LapsecamError, Result};
use crate::menu::{CaptureMode, CycleMode, MenuSet};
use crate::storage;
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Snapshot of every menu value a session is parametrized by, taken at the
/// moment the session starts (or restarts).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionParams {
    pub resolution: Resolution,
    pub iso: Iso,
    pub mode: CaptureMode,
    pub fps: u32,
    pub length: Duration,
    pub cycle: CycleMode,
}

impl SessionParams {
    pub fn from_menus(menus: &MenuSet) -> Self {
        Self {
            resolution: menus
                .resolution
                .current_value()
                .copied()
                .unwrap_or(Resolution::new(1280, 720)),
            iso: menus.iso.current_value().copied().unwrap_or(Iso::Auto),
            mode: menus
                .mode
                .current_value()
                .copied()
                .unwrap_or(CaptureMode::VideoAndFrames),
            fps: menus.fps.current_value().copied().unwrap_or(24),
            length: Duration::from_secs(
                menus.length.current_value().copied().unwrap_or(u64::MAX / 2),
            ),
            cycle: menus.cycle.current_value().copied().unwrap_or(CycleMode::Once),
        }
    }
}

/// What a scheduler poll did this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickReport {
    /// One frame was captured; the indicator flash should be armed.
    pub captured: bool,
    /// The running session ended (recording length elapsed).
    pub ended: bool,
    /// A fresh session immediately replaced the ended one (cycle = Repeat).
    pub restarted: bool,
}

struct Session {
    // Option only so the exposure-lock transition can close the device
    // before its locked replacement opens; never None across ticks.
    camera: Option<Box<dyn Camera>>,
    settings: CameraSettings,
    params: SessionParams,
    directory: PathBuf,
    frame_count: u64,
    interval_secs: u32,
    deadline: Instant,
    started: Instant,
    locked: bool,
}

impl Session {
    fn camera_mut(&mut self) -> Result<&mut (dyn Camera + 'static)> {
        self.camera
            .as_deref_mut()
            .ok_or_else(|| LapsecamError::camera("Capture device is not open"))
    }
}

/// The capture/idle state machine.
///
/// Owns the capture device for the lifetime of each session, the next-frame
/// deadline and the monotonically advancing output-directory index. All
/// deadline math starts from the tick-start instant handed in by the main
/// loop, so capture latency never accumulates more than one tick of drift.
pub struct CaptureScheduler<P, W> {
    provider: P,
    out: W,
    base_dir: PathBuf,
    rotation: u16,
    last_dir_index: u32,
    session: Option<Session>,
}

impl<P: CameraProvider, W: Write> CaptureScheduler<P, W> {
    pub fn new(provider: P, out: W, base_dir: PathBuf, rotation: u16) -> Self {
        Self {
            provider,
            out,
            base_dir,
            rotation,
            last_dir_index: 0,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Frames captured by the running session; 0 when idle.
    pub fn frame_count(&self) -> u64 {
        self.session.as_ref().map(|s| s.frame_count).unwrap_or(0)
    }

    /// Index of the most recently claimed session directory.
    pub fn directory_index(&self) -> u32 {
        self.last_dir_index
    }

    /// The running session's seconds-per-frame, if any.
    pub fn active_interval(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.interval_secs)
    }

    /// Toggle button edge outside the menu: start or stop a session.
    pub fn toggle(&mut self, now: Instant, params: SessionParams, dial_secs: u32) -> Result<()> {
        match self.session.take() {
            Some(session) => {
                info!("Capture off");
                self.finish(session)
            }
            None => {
                info!("Capture on");
                self.start(now, params, dial_secs)
            }
        }
    }

    /// Per-tick work while active: fold in the dial value, retire the session
    /// when its recording length elapses (restarting it when cycling), and
    /// capture once the deadline arrives.
    pub fn poll(&mut self, now: Instant, dial_secs: u32, params: SessionParams) -> Result<TickReport> {
        let mut report = TickReport::default();
        let Some(mut session) = self.session.take() else {
            return Ok(report);
        };

        // operator may change cadence mid-session; takes effect from the
        // next deadline computation
        session.interval_secs = dial_secs;

        if now.saturating_duration_since(session.started) >= session.params.length {
            let cycle = session.params.cycle;
            info!("Recording length reached");
            self.finish(session)?;
            report.ended = true;
            if cycle == CycleMode::Repeat {
                self.start(now, params, dial_secs)?;
                report.restarted = true;
            }
            return Ok(report);
        }

        if now >= session.deadline {
            self.capture_frame(&mut session, now)?;
            report.captured = true;
        }

        self.session = Some(session);
        Ok(report)
    }

    fn start(&mut self, now: Instant, params: SessionParams, dial_secs: u32) -> Result<()> {
        let (dir_index, directory) = storage::next_directory(&self.base_dir, self.last_dir_index)?;
        self.last_dir_index = dir_index;

        let settings = CameraSettings {
            resolution: params.resolution,
            iso: params.iso,
            rotation: self.rotation,
            exposure: Exposure::Auto,
        };
        let camera = self.provider.open(&settings)?;

        protocol::write_session_start(&mut self.out, params.mode, &self.base_dir, dir_index, params.fps)?;

        info!(
            "Session {} started: {} every {}s",
            storage::directory_name(dir_index),
            params.resolution,
            dial_secs
        );

        self.session = Some(Session {
            camera: Some(camera),
            settings,
            params,
            directory,
            frame_count: 0,
            interval_secs: dial_secs,
            deadline: now + Duration::from_secs(u64::from(dial_secs)),
            started: now,
            locked: false,
        });
        Ok(())
    }

    fn finish(&mut self, session: Session) -> Result<()> {
        protocol::write_session_end(&mut self.out)?;
        info!("Session ended after {} frames", session.frame_count);
        // dropping the session closes the capture device
        Ok(())
    }

    fn capture_frame(&mut self, session: &mut Session, now: Instant) -> Result<()> {
        let filename = storage::image_filename(Local::now());
        let path = session.directory.join(filename);

        session.camera_mut()?.capture_to(&path)?;
        protocol::write_frame(&mut self.out, &path)?;

        session.deadline = now + Duration::from_secs(u64::from(session.interval_secs));
        session.frame_count += 1;
        debug!(frame = session.frame_count, "Captured {}", path.display());

        // The first frame is taken with auto exposure still hunting; lock
        // shutter and white balance to its measured values for every frame
        // after it. Happens at most once per session.
        if session.frame_count == 1 && !session.locked && matches!(session.params.iso, Iso::Fixed(_))
        {
            let readout = session.camera_mut()?.exposure()?;
            info!(
                shutter_micros = readout.shutter_micros,
                "Locking exposure and white balance"
            );
            let settings = session.settings.clone().locked(readout);
            // close the auto-exposure handle before the locked reopen
            session.camera = None;
            session.camera = Some(self.provider.open(&settings)?);
            session.settings = settings;
            session.locked = true;
        }

        Ok(())
    }
}
