use super::*;

fn sample_list() -> SelectableList<u32> {
    let mut list = SelectableList::new("Sample");
    list.append("one", 1, false);
    list.append("two", 2, true);
    list.append("three", 3, false);
    list
}

#[test]
fn test_first_item_selected_unless_default_given() {
    let mut list = SelectableList::new("L");
    assert_eq!(list.append("a", 'a', false), 0);
    assert_eq!(list.selected_index(), 0);
    assert_eq!(list.append("b", 'b', true), 1);
    assert_eq!(list.selected_index(), 1);
    assert_eq!(list.append("c", 'c', false), 2);
    assert_eq!(list.selected_index(), 1);
}

#[test]
fn test_advance_wraps_back_to_start() {
    let mut list = sample_list();
    let start = list.selected_index();
    for _ in 0..list.len() {
        list.advance_selection();
    }
    assert_eq!(list.selected_index(), start);
}

#[test]
fn test_at_is_modular_and_does_not_move_selection() {
    let list = sample_list();
    let n = list.len();
    for i in 0..n {
        assert_eq!(list.at(i), list.at(i + n));
    }
    assert_eq!(list.selected_index(), 1);
}

#[test]
fn test_set_selection_rejects_out_of_range() {
    let mut list = sample_list();
    assert!(list.set_selection(2).is_ok());
    assert!(list.set_selection(3).is_err());
    // rejected call leaves the selection unchanged
    assert_eq!(list.selected_index(), 2);
}

#[test]
fn test_empty_list_returns_sentinel_without_mutating() {
    let mut list: SelectableList<u32> = SelectableList::new("Empty");
    assert_eq!(list.current(), None);
    assert_eq!(list.current_value(), None);
    assert_eq!(list.at(5), None);
    assert_eq!(list.advance_selection(), None);
    assert_eq!(list.selected_index(), 0);
}

#[test]
fn test_advance_returns_new_pair() {
    let mut list = sample_list();
    assert_eq!(list.advance_selection(), Some(("three", &3)));
    assert_eq!(list.advance_selection(), Some(("one", &1)));
}

#[test]
fn test_menu_set_defaults_match_compiled_in_choices() {
    let menus = MenuSet::new();
    assert_eq!(menus.resolution.current().unwrap().0, "1280x720 16:9");
    assert_eq!(menus.iso.current_value(), Some(&crate::camera::Iso::Auto));
    assert_eq!(
        menus.mode.current_value(),
        Some(&CaptureMode::VideoAndFrames)
    );
    assert_eq!(menus.fps.current_value(), Some(&24));
    assert_eq!(menus.length.current().unwrap().0, "forever");
    assert_eq!(menus.cycle.current_value(), Some(&CycleMode::Once));
}

#[test]
fn test_navigator_enters_at_first_list_and_cycles() {
    let menus = MenuSet::new();
    let mut nav = MenuNavigator::new();

    let (name, label) = nav.cycle(&menus, false).unwrap();
    assert!(nav.is_browsing());
    assert_eq!(nav.active_index(), 0);
    assert_eq!(name, "Resolution");
    assert_eq!(label, "1280x720 16:9");

    let (name, _) = nav.cycle(&menus, false).unwrap();
    assert_eq!(name, "ISO");

    // wraps around the whole set
    for _ in 0..(MenuSet::COUNT - 1) {
        nav.cycle(&menus, false);
    }
    assert_eq!(nav.active_index(), 0);
}

#[test]
fn test_navigator_blocked_while_capture_active() {
    let menus = MenuSet::new();
    let mut nav = MenuNavigator::new();

    assert!(nav.cycle(&menus, true).is_none());
    assert!(!nav.is_browsing());
}

#[test]
fn test_navigator_select_advances_active_list_only() {
    let mut menus = MenuSet::new();
    let mut nav = MenuNavigator::new();

    // select outside the menu does nothing
    assert!(nav.select(&mut menus).is_none());

    nav.cycle(&menus, false);
    let label = nav.select(&mut menus).unwrap();
    assert_eq!(label, "1640x922 16:9");
    // other lists untouched
    assert_eq!(menus.fps.current_value(), Some(&24));
}

#[test]
fn test_navigator_exit_consumes_toggle_press() {
    let menus = MenuSet::new();
    let mut nav = MenuNavigator::new();

    assert!(!nav.exit());

    nav.cycle(&menus, false);
    nav.cycle(&menus, false);
    assert!(nav.exit());
    assert!(!nav.is_browsing());

    // re-entering starts back at the first list
    nav.cycle(&menus, false);
    assert_eq!(nav.active_index(), 0);
}
