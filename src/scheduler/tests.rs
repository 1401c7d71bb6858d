use super::*;
use crate::camera::{Exposure, Iso, MockCameraLog, MockProvider, Resolution};
use crate::menu::{CaptureMode, CycleMode, MenuSet};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct Rig {
    scheduler: CaptureScheduler<MockProvider, SharedBuf>,
    out: SharedBuf,
    log: Rc<RefCell<MockCameraLog>>,
    base: TempDir,
}

fn rig() -> Rig {
    let base = TempDir::new().unwrap();
    let provider = MockProvider::new();
    let log = provider.log();
    let out = SharedBuf::default();
    let scheduler = CaptureScheduler::new(provider, out.clone(), base.path().to_path_buf(), 270);
    Rig {
        scheduler,
        out,
        log,
        base,
    }
}

fn params() -> SessionParams {
    SessionParams {
        resolution: Resolution::new(1280, 720),
        iso: Iso::Auto,
        mode: CaptureMode::VideoAndFrames,
        fps: 24,
        length: Duration::from_secs(3600),
        cycle: CycleMode::Once,
    }
}

#[test]
fn test_session_start_emits_video_marker() {
    let mut r = rig();
    let t0 = Instant::now();

    r.scheduler.toggle(t0, params(), 3).unwrap();

    assert!(r.scheduler.is_active());
    assert_eq!(r.scheduler.directory_index(), 1);
    let expected = format!(
        "#VIDEO vidpath={}/VIDEO/lapse-0001.mp4 fps=24",
        r.base.path().display()
    );
    assert_eq!(r.out.lines(), vec![expected]);
}

#[test]
fn test_session_start_emits_images_marker_in_frames_mode() {
    let mut r = rig();
    let p = SessionParams {
        mode: CaptureMode::FramesOnly,
        ..params()
    };

    r.scheduler.toggle(Instant::now(), p, 3).unwrap();
    assert_eq!(r.out.lines(), vec!["#IMAGES"]);
}

#[test]
fn test_toggle_off_emits_end_and_resets() {
    let mut r = rig();
    let t0 = Instant::now();

    r.scheduler.toggle(t0, params(), 3).unwrap();
    r.scheduler.toggle(t0 + Duration::from_secs(1), params(), 3).unwrap();

    assert!(!r.scheduler.is_active());
    assert_eq!(r.scheduler.frame_count(), 0);
    assert_eq!(r.out.lines().last().map(String::as_str), Some("#END"));
}

#[test]
fn test_capture_fires_at_deadline_not_before() {
    let mut r = rig();
    let t0 = Instant::now();
    r.scheduler.toggle(t0, params(), 3).unwrap();

    let report = r
        .scheduler
        .poll(t0 + Duration::from_secs(2), 3, params())
        .unwrap();
    assert!(!report.captured);
    assert_eq!(r.scheduler.frame_count(), 0);

    let report = r
        .scheduler
        .poll(t0 + Duration::from_secs(3), 3, params())
        .unwrap();
    assert!(report.captured);
    assert_eq!(r.scheduler.frame_count(), 1);

    let captures = &r.log.borrow().captures;
    assert_eq!(captures.len(), 1);
    let expected_dir = r.base.path().join("D0001");
    assert!(captures[0].starts_with(&expected_dir));
    assert!(captures[0]
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("image-"));

    // the frame path is emitted verbatim, right after the start marker
    let lines = r.out.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], captures[0].to_string_lossy());
}

#[test]
fn test_deadline_advances_from_tick_start() {
    let mut r = rig();
    let t0 = Instant::now();
    r.scheduler.toggle(t0, params(), 3).unwrap();

    // the tick that captures starts late; the next deadline is measured
    // from that tick's start, not from when the capture finished
    let late_tick = t0 + Duration::from_millis(3200);
    assert!(r.scheduler.poll(late_tick, 3, params()).unwrap().captured);

    let just_before = late_tick + Duration::from_millis(2900);
    assert!(!r.scheduler.poll(just_before, 3, params()).unwrap().captured);

    let on_time = late_tick + Duration::from_secs(3);
    assert!(r.scheduler.poll(on_time, 3, params()).unwrap().captured);
}

#[test]
fn test_exposure_lock_fires_exactly_once() {
    let mut r = rig();
    let p = SessionParams {
        iso: Iso::Fixed(400),
        ..params()
    };
    let t0 = Instant::now();
    r.scheduler.toggle(t0, p, 2).unwrap();

    // first frame: capture, then reopen locked
    r.scheduler.poll(t0 + Duration::from_secs(2), 2, p).unwrap();
    {
        let log = r.log.borrow();
        assert_eq!(log.opened.len(), 2);
        assert_eq!(log.opened[0].exposure, Exposure::Auto);
        match log.opened[1].exposure {
            Exposure::Locked(readout) => {
                assert_eq!(readout.shutter_micros, 33_000);
                assert_eq!(readout.awb_gains, (1.6, 1.4));
            }
            Exposure::Auto => panic!("second open should be locked"),
        }
        assert_eq!(log.opened[1].iso, Iso::Fixed(400));
    }

    // further frames never reopen
    r.scheduler.poll(t0 + Duration::from_secs(4), 2, p).unwrap();
    r.scheduler.poll(t0 + Duration::from_secs(6), 2, p).unwrap();
    assert_eq!(r.log.borrow().opened.len(), 2);
    assert_eq!(r.scheduler.frame_count(), 3);
}

#[test]
fn test_auto_iso_never_locks() {
    let mut r = rig();
    let t0 = Instant::now();
    r.scheduler.toggle(t0, params(), 2).unwrap();

    for i in 1..=3 {
        r.scheduler
            .poll(t0 + Duration::from_secs(2 * i), 2, params())
            .unwrap();
    }

    assert_eq!(r.log.borrow().opened.len(), 1);
    assert_eq!(r.scheduler.frame_count(), 3);
}

#[test]
fn test_interval_can_change_mid_session() {
    let mut r = rig();
    let t0 = Instant::now();
    r.scheduler.toggle(t0, params(), 3).unwrap();

    let first = t0 + Duration::from_secs(3);
    assert!(r.scheduler.poll(first, 5, params()).unwrap().captured);
    assert_eq!(r.scheduler.active_interval(), Some(5));

    // the new cadence applies from the capture that saw it
    assert!(!r
        .scheduler
        .poll(first + Duration::from_secs(3), 5, params())
        .unwrap()
        .captured);
    assert!(r
        .scheduler
        .poll(first + Duration::from_secs(5), 5, params())
        .unwrap()
        .captured);
}

#[test]
fn test_recording_length_stops_session() {
    let mut r = rig();
    let p = SessionParams {
        length: Duration::from_secs(10),
        ..params()
    };
    let t0 = Instant::now();
    r.scheduler.toggle(t0, p, 3).unwrap();

    let report = r.scheduler.poll(t0 + Duration::from_secs(9), 3, p).unwrap();
    assert!(!report.ended);

    let report = r.scheduler.poll(t0 + Duration::from_secs(10), 3, p).unwrap();
    assert!(report.ended);
    assert!(!report.restarted);
    assert!(!r.scheduler.is_active());
    assert_eq!(r.out.lines().last().map(String::as_str), Some("#END"));
}

#[test]
fn test_repeat_cycle_starts_fresh_session() {
    let mut r = rig();
    let p = SessionParams {
        length: Duration::from_secs(10),
        cycle: CycleMode::Repeat,
        ..params()
    };
    let t0 = Instant::now();
    r.scheduler.toggle(t0, p, 3).unwrap();
    r.scheduler.poll(t0 + Duration::from_secs(3), 3, p).unwrap();

    let report = r.scheduler.poll(t0 + Duration::from_secs(10), 3, p).unwrap();
    assert!(report.ended);
    assert!(report.restarted);
    assert!(r.scheduler.is_active());
    assert_eq!(r.scheduler.frame_count(), 0);
    assert_eq!(r.scheduler.directory_index(), 2);

    let lines = r.out.lines();
    let end_at = lines.iter().position(|l| l == "#END").unwrap();
    assert!(lines[end_at + 1].starts_with("#VIDEO "));
    assert!(lines[end_at + 1].contains("lapse-0002.mp4"));
}

#[test]
fn test_successive_sessions_use_fresh_directories() {
    let mut r = rig();
    let t0 = Instant::now();

    r.scheduler.toggle(t0, params(), 3).unwrap();
    r.scheduler.toggle(t0 + Duration::from_secs(1), params(), 3).unwrap();
    r.scheduler.toggle(t0 + Duration::from_secs(2), params(), 3).unwrap();

    assert_eq!(r.scheduler.directory_index(), 2);
    assert!(r.base.path().join("D0001").is_dir());
    assert!(r.base.path().join("D0002").is_dir());
}

#[test]
fn test_session_params_read_menu_values() {
    let menus = MenuSet::new();
    let p = SessionParams::from_menus(&menus);
    assert_eq!(p.resolution, Resolution::new(1280, 720));
    assert_eq!(p.iso, Iso::Auto);
    assert_eq!(p.mode, CaptureMode::VideoAndFrames);
    assert_eq!(p.fps, 24);
    assert_eq!(p.cycle, CycleMode::Once);
}
