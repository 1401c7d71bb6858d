mod runtime;
mod shutdown;

pub use runtime::{LoopExit, MainLoop, Peripherals, TickOutcome};
pub use shutdown::{MockPower, PowerControl, ShutdownWatchdog, SystemPower};
