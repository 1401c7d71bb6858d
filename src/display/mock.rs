use super::TextDisplay;
use crate::error::Result;

/// In-memory display for tests: keeps the current lines and a history of
/// everything rendered.
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub lines: [String; 2],
    pub history: Vec<[String; 2]>,
    pub cleared: u32,
    pub enabled: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

impl TextDisplay for MockDisplay {
    fn write_lines(&mut self, line1: &str, line2: &str) -> Result<()> {
        self.lines = [line1.to_string(), line2.to_string()];
        self.history.push(self.lines.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.lines = [String::new(), String::new()];
        self.cleared += 1;
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.enabled = enabled;
        Ok(())
    }
}
