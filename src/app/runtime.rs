use super::shutdown::{PowerControl, ShutdownWatchdog};
use crate::camera::CameraProvider;
use crate::config::LapsecamConfig;
use crate::display::{fit_line, status_lines, StatusView, TextDisplay};
use crate::error::Result;
use crate::indicator::{FlashTimer, Indicator};
use crate::input::{Button, ButtonBank, ButtonInput, IntervalDial};
use crate::menu::{MenuEntry, MenuNavigator, MenuSet};
use crate::scheduler::{CaptureScheduler, SessionParams};
use crate::storage;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// The hardware surface of the appliance, one implementation per collaborator.
pub struct Peripherals<B, D, I, Pw> {
    pub buttons: B,
    pub display: D,
    pub indicator: I,
    pub power: Pw,
}

/// Why the main loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Shutdown gesture completed; the OS halt was invoked.
    Shutdown,
    /// Interrupt signal; cleanup ran.
    Interrupted,
}

/// What one tick decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Shutdown,
}

/// Fixed-tick cooperative driver owning every component as explicit state.
///
/// One tick: scan inputs, dispatch button edges through the modal menu /
/// scheduler split, check the shutdown gesture, retire the indicator flash,
/// advance the capture schedule, render. The sleep between ticks is the
/// nominal period minus however long the tick took, clamped at zero, so
/// processing time (including a blocking capture) does not accumulate drift.
pub struct MainLoop<B, D, I, Pw, C, W> {
    pub(crate) buttons: B,
    pub(crate) display: D,
    pub(crate) indicator: I,
    pub(crate) power: Pw,
    pub(crate) scheduler: CaptureScheduler<C, W>,
    pub(crate) menus: MenuSet,
    pub(crate) navigator: MenuNavigator,
    pub(crate) bank: ButtonBank,
    pub(crate) dial: IntervalDial,
    pub(crate) watchdog: ShutdownWatchdog,
    pub(crate) flash: FlashTimer,
    base_dir: PathBuf,
    tick_period: Duration,
    banner: Duration,
    interrupt: Arc<AtomicBool>,
}

impl<B, D, I, Pw, C, W> MainLoop<B, D, I, Pw, C, W>
where
    B: ButtonInput,
    D: TextDisplay,
    I: Indicator,
    Pw: PowerControl,
    C: CameraProvider,
    W: Write,
{
    pub fn new(
        peripherals: Peripherals<B, D, I, Pw>,
        scheduler: CaptureScheduler<C, W>,
        config: &LapsecamConfig,
        interrupt: Arc<AtomicBool>,
    ) -> Self {
        Self {
            buttons: peripherals.buttons,
            display: peripherals.display,
            indicator: peripherals.indicator,
            power: peripherals.power,
            scheduler,
            menus: MenuSet::new(),
            navigator: MenuNavigator::new(),
            bank: ButtonBank::new(),
            dial: IntervalDial::new(),
            watchdog: ShutdownWatchdog::new(Duration::from_secs(config.timing.shutdown_hold_secs)),
            flash: FlashTimer::new(Duration::from_millis(config.timing.flash_millis)),
            base_dir: PathBuf::from(&config.storage.base_dir),
            tick_period: Duration::from_millis(config.timing.tick_millis),
            banner: Duration::from_millis(config.timing.banner_millis),
            interrupt,
        }
    }

    /// Run until the shutdown gesture or an interrupt. Hardware failures
    /// propagate out and stop the loop; this appliance fails stop.
    pub fn run(&mut self) -> Result<LoopExit> {
        self.startup()?;

        let mut sleep_for = self.tick_period;
        loop {
            thread::sleep(sleep_for);

            if self.interrupt.load(Ordering::Relaxed) {
                info!("Interrupted, cleaning up");
                self.cleanup();
                return Ok(LoopExit::Interrupted);
            }

            let tick_start = Instant::now();
            if self.tick(tick_start)? == TickOutcome::Shutdown {
                return Ok(LoopExit::Shutdown);
            }
            sleep_for = self.next_sleep(tick_start, Instant::now());
        }
    }

    /// Version banner, then the idle summary.
    fn startup(&mut self) -> Result<()> {
        let line1 = format!("lapsecam v{}", env!("CARGO_PKG_VERSION"));
        self.display.set_enabled(true)?;
        self.display.clear()?;
        self.display
            .write_lines(&fit_line(&line1), &fit_line("ready"))?;
        thread::sleep(self.banner);
        self.render_status()
    }

    /// One iteration of the control loop, entered at `now`.
    pub fn tick(&mut self, now: Instant) -> Result<TickOutcome> {
        let sample = self.buttons.sample()?;
        self.bank.scan(&sample);

        // Toggle is modal: exit the menu when browsing, otherwise flip the
        // capture session.
        if self.bank.channel(Button::Toggle).just_pressed() {
            if self.navigator.exit() {
                self.render_status()?;
            } else {
                let dial_secs = self.dial.read(sample.dial);
                let params = SessionParams::from_menus(&self.menus);
                self.scheduler.toggle(now, params, dial_secs)?;
                self.render_status()?;
            }
        }

        if self.bank.channel(Button::Menu).just_pressed() {
            if let Some((name, label)) = self.navigator.cycle(&self.menus, self.scheduler.is_active())
            {
                self.display
                    .write_lines(&fit_line(&name), &fit_line(&label))?;
            }
        }

        if self.bank.channel(Button::Select).just_pressed() {
            if let Some(label) = self.navigator.select(&mut self.menus) {
                let name = self.menus.entry(self.navigator.active_index()).name().to_string();
                self.display
                    .write_lines(&fit_line(&name), &fit_line(&label))?;
            }
        }

        // Menu + select held together long enough halts the appliance.
        let menu_channel = *self.bank.channel(Button::Menu);
        let select_channel = *self.bank.channel(Button::Select);
        if self.watchdog.observe(now, menu_channel, select_channel) {
            self.display.clear()?;
            self.display
                .write_lines(&fit_line("Shutting down"), &fit_line(""))?;
            self.power.shutdown()?;
            return Ok(TickOutcome::Shutdown);
        }

        if self.flash.poll(now) {
            self.indicator.set_off()?;
        }

        if self.scheduler.is_active() {
            let dial_secs = self.dial.read(sample.dial);
            let params = SessionParams::from_menus(&self.menus);
            let report = self.scheduler.poll(now, dial_secs, params)?;
            if report.captured {
                self.indicator.set_on()?;
                self.flash.trigger(now);
            }
            self.render_status()?;
        }

        Ok(TickOutcome::Continue)
    }

    /// Remaining sleep after a tick that ran from `tick_start` to `tick_end`.
    pub fn next_sleep(&self, tick_start: Instant, tick_end: Instant) -> Duration {
        self.tick_period
            .saturating_sub(tick_end.saturating_duration_since(tick_start))
    }

    fn render_status(&mut self) -> Result<()> {
        let free = storage::free_space_summary(storage::disk_free(&self.base_dir)?);
        let view = StatusView {
            capturing: self.scheduler.is_active(),
            frame_count: self.scheduler.frame_count(),
            directory_index: self.scheduler.directory_index(),
            interval_secs: self
                .scheduler
                .active_interval()
                .unwrap_or_else(|| self.dial.current()),
            free_space: free,
            mode_label: self
                .menus
                .resolution
                .current_value()
                .map(|r| r.to_string())
                .unwrap_or_default(),
        };
        let [line1, line2] = status_lines(&view);
        self.display.write_lines(&line1, &line2)
    }

    // Best-effort: the process is exiting either way, and the pins release
    // when their owners drop.
    fn cleanup(&mut self) {
        if let Err(e) = self.display.clear() {
            debug!("Cleanup: display clear failed: {}", e);
        }
        if let Err(e) = self.display.set_enabled(false) {
            debug!("Cleanup: display disable failed: {}", e);
        }
    }
}
