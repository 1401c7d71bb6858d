/// Character width of one display line.
pub const LINE_WIDTH: usize = 16;

/// Everything the status screen shows, captured by value so rendering is a
/// pure function of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub capturing: bool,
    pub frame_count: u64,
    pub directory_index: u32,
    pub interval_secs: u32,
    /// Humanized free-space summary for the storage volume.
    pub free_space: String,
    /// Display form of the selected resolution.
    pub mode_label: String,
}

/// Pad or truncate to exactly `LINE_WIDTH` characters.
pub fn fit_line(s: &str) -> String {
    let mut line: String = s.chars().take(LINE_WIDTH).collect();
    while line.len() < LINE_WIDTH {
        line.push(' ');
    }
    line
}

/// Format the idle/capturing summary into the two display lines.
///
/// Capturing: frame counter left, free space right; directory index and
/// interval below. Idle: free space alone, then the selected resolution and
/// an OFF marker.
pub fn status_lines(view: &StatusView) -> [String; 2] {
    if view.capturing {
        let counter: String = format!("# {}", view.frame_count).chars().take(11).collect();
        let line1 = format!("{:<11}{:>5}", counter, view.free_space);
        let line2 = format!("D{:04} {:>9}s", view.directory_index, view.interval_secs);
        [fit_line(&line1), fit_line(&line2)]
    } else {
        let line1 = format!("{:>16}", view.free_space);
        let label: String = view.mode_label.chars().take(9).collect();
        let line2 = format!("{:<9}{:>7}", label, "OFF");
        [fit_line(&line1), fit_line(&line2)]
    }
}
