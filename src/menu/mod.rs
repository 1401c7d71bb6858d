mod list;
mod navigator;
mod set;
#[cfg(test)]
mod tests;

pub use list::{MenuEntry, SelectableList};
pub use navigator::MenuNavigator;
pub use set::{CaptureMode, CycleMode, MenuSet};
