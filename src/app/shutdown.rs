use crate::error::{LapsecamError, Result};
use crate::input::InputChannel;
use std::process::Command;
use std::time::{Duration, Instant};
use tracing::info;

/// Invokes the operating system's halt path.
pub trait PowerControl {
    fn shutdown(&mut self) -> Result<()>;
}

/// Halts the machine. Requires the process to run with the privileges the
/// appliance image grants it.
pub struct SystemPower;

impl PowerControl for SystemPower {
    fn shutdown(&mut self) -> Result<()> {
        info!("Invoking system shutdown");
        let status = Command::new("shutdown")
            .args(["-h", "now"])
            .status()
            .map_err(|e| LapsecamError::system(format!("shutdown: {}", e)))?;
        if !status.success() {
            return Err(LapsecamError::system(format!(
                "shutdown exited with {}",
                status
            )));
        }
        Ok(())
    }
}

/// Power control stub for tests; counts invocations.
#[derive(Debug, Default)]
pub struct MockPower {
    pub invoked: u32,
}

impl PowerControl for MockPower {
    fn shutdown(&mut self) -> Result<()> {
        self.invoked += 1;
        Ok(())
    }
}

/// Detects the co-incident long-press that requests a graceful halt.
///
/// Both watched buttons must be held, and each must have been held for the
/// full threshold measured from its own most recent press edge. Releasing
/// either button restarts its clock at the next press.
pub struct ShutdownWatchdog {
    threshold: Duration,
    last_press: [Option<Instant>; 2],
    fired: bool,
}

impl ShutdownWatchdog {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last_press: [None; 2],
            fired: false,
        }
    }

    /// Fold in this tick's channel states; true exactly once, on the tick
    /// the gesture completes.
    pub fn observe(&mut self, now: Instant, first: InputChannel, second: InputChannel) -> bool {
        if first.just_pressed() {
            self.last_press[0] = Some(now);
        }
        if second.just_pressed() {
            self.last_press[1] = Some(now);
        }

        if self.fired || !(first.held() && second.held()) {
            return false;
        }

        match (self.last_press[0], self.last_press[1]) {
            (Some(a), Some(b))
                if now.saturating_duration_since(a) >= self.threshold
                    && now.saturating_duration_since(b) >= self.threshold =>
            {
                self.fired = true;
                true
            }
            _ => false,
        }
    }
}
