use super::set::MenuSet;
use tracing::debug;

/// Modal menu browser over the fixed list set.
///
/// Browsing is only enterable while no capture session is active. The
/// capture-toggle button doubles as the menu-exit control while browsing;
/// that overload is the whole state machine, so both edges route through
/// here before the scheduler ever sees them.
pub struct MenuNavigator {
    browsing: bool,
    active: usize,
}

impl MenuNavigator {
    pub fn new() -> Self {
        Self {
            browsing: false,
            active: 0,
        }
    }

    pub fn is_browsing(&self) -> bool {
        self.browsing
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Menu-cycle button edge. Enters browsing at the first list, or advances
    /// to the next list when already browsing. Gated on capture being
    /// inactive; returns the (name, label) prompt to render, or `None` when
    /// the press had no effect.
    pub fn cycle(&mut self, menus: &MenuSet, capture_active: bool) -> Option<(String, String)> {
        if capture_active {
            return None;
        }
        if self.browsing {
            self.active = (self.active + 1) % MenuSet::COUNT;
        } else {
            self.browsing = true;
            self.active = 0;
            debug!("Entering menu mode");
        }
        let entry = menus.entry(self.active);
        Some((entry.name().to_string(), entry.current_label().to_string()))
    }

    /// Select button edge. Advances the active list's selection and returns
    /// the new label for the prompt line; `None` when not browsing.
    pub fn select(&mut self, menus: &mut MenuSet) -> Option<String> {
        if !self.browsing {
            return None;
        }
        let label = menus.entry_mut(self.active).advance().to_string();
        debug!(list = self.active, %label, "Menu selection advanced");
        Some(label)
    }

    /// Toggle button edge while browsing exits menu mode instead of toggling
    /// capture. Returns whether the press was consumed.
    pub fn exit(&mut self) -> bool {
        if self.browsing {
            self.browsing = false;
            debug!("Leaving menu mode");
            true
        } else {
            false
        }
    }
}

impl Default for MenuNavigator {
    fn default() -> Self {
        Self::new()
    }
}
