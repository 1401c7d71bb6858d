use super::*;

fn capturing_view() -> StatusView {
    StatusView {
        capturing: true,
        frame_count: 42,
        directory_index: 7,
        interval_secs: 3,
        free_space: "12 G".to_string(),
        mode_label: "1280x720".to_string(),
    }
}

#[test]
fn test_capturing_layout() {
    let lines = status_lines(&capturing_view());
    assert_eq!(lines[0], "# 42        12 G");
    assert_eq!(lines[1], "D0007         3s");
    assert_eq!(lines[0].len(), LINE_WIDTH);
    assert_eq!(lines[1].len(), LINE_WIDTH);
}

#[test]
fn test_idle_layout() {
    let view = StatusView {
        capturing: false,
        ..capturing_view()
    };
    let lines = status_lines(&view);
    assert_eq!(lines[0], "            12 G");
    assert_eq!(lines[1], "1280x720     OFF");
}

#[test]
fn test_long_mode_label_is_truncated() {
    let view = StatusView {
        capturing: false,
        mode_label: "2592x1944".to_string(),
        ..capturing_view()
    };
    let lines = status_lines(&view);
    assert_eq!(lines[1], "2592x1944    OFF");
    assert_eq!(lines[1].len(), LINE_WIDTH);

    let view = StatusView {
        mode_label: "a-very-long-resolution-label".to_string(),
        ..view
    };
    let lines = status_lines(&view);
    assert!(lines[1].starts_with("a-very-lo"));
    assert_eq!(lines[1].len(), LINE_WIDTH);
}

#[test]
fn test_huge_frame_count_is_truncated_to_counter_field() {
    let view = StatusView {
        frame_count: 123_456_789_012,
        ..capturing_view()
    };
    let lines = status_lines(&view);
    // "# 123456789012" cut to 11 chars
    assert!(lines[0].starts_with("# 123456789"));
    assert_eq!(lines[0].len(), LINE_WIDTH);
}

#[test]
fn test_rendering_is_idempotent() {
    let view = capturing_view();
    assert_eq!(status_lines(&view), status_lines(&view));
}

#[test]
fn test_fit_line_pads_and_truncates() {
    assert_eq!(fit_line("ab").len(), LINE_WIDTH);
    assert_eq!(fit_line("ab"), "ab              ");
    assert_eq!(fit_line("0123456789abcdefXYZ"), "0123456789abcdef");
}

#[test]
fn test_mock_display_records_history() {
    let mut display = MockDisplay::new();
    display.write_lines("one", "two").unwrap();
    display.write_lines("three", "four").unwrap();
    assert_eq!(display.history.len(), 2);
    assert_eq!(display.lines[0], "three");
    display.clear().unwrap();
    assert_eq!(display.cleared, 1);
    assert_eq!(display.lines[0], "");
}
