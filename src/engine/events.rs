//! Window and screen event handling
//!
//! These methods are the engine's inputs from the compositor glue: the
//! window tracker reports open/close/focus, the screen manager reports
//! geometry changes. Events arrive and are processed in compositor
//! order on the engine's control thread.

use tracing::{debug, warn};

use crate::config::InsertPosition;

use super::core::{AutotileEngine, ScreenManager};

impl<S: ScreenManager> AutotileEngine<S> {
    /// A window appeared on `screen_name`
    ///
    /// On a screen without autotiling only the window-to-screen mapping
    /// is recorded so later focus events still route. Windows rejected
    /// by the tile filter are skipped entirely. Otherwise the window is
    /// inserted per the configured insert position and the screen is
    /// retiled.
    pub fn window_opened(&mut self, window_id: &str, screen_name: &str) {
        if window_id.is_empty() || screen_name.is_empty() {
            warn!("ignoring window-opened event with empty id or screen");
            return;
        }

        if !self.autotile_screens.contains(screen_name) {
            self.window_to_screen
                .insert(window_id.to_string(), screen_name.to_string());
            return;
        }

        if let Some(filter) = &self.tile_filter
            && !filter(window_id)
        {
            debug!(window_id, "window excluded from tiling by filter");
            return;
        }

        self.ensure_state(screen_name);
        let Some(state) = self.screen_states.get_mut(screen_name) else {
            return;
        };

        let inserted = match self.config.insert_position {
            InsertPosition::End => state.add_window(window_id, None),
            InsertPosition::AfterFocused => state.insert_after_focused(window_id),
            InsertPosition::AsMaster => {
                let added = state.add_window(window_id, None);
                if added {
                    state.move_to_front(window_id);
                }
                added
            }
        };

        if !inserted {
            warn!(window_id, "window already tracked, ignoring duplicate open");
            return;
        }

        if self.config.focus_new_windows {
            state.set_focused_window(window_id);
            self.focused_window = Some(window_id.to_string());
        }

        self.window_to_screen
            .insert(window_id.to_string(), screen_name.to_string());

        self.retile_screen(screen_name);
    }

    /// A window disappeared
    ///
    /// Unknown windows are a no-op. The screen it lived on is retiled
    /// when autotiling is enabled there.
    pub fn window_closed(&mut self, window_id: &str) {
        let Some(screen_name) = self.window_to_screen.remove(window_id) else {
            return;
        };

        if let Some(state) = self.screen_states.get_mut(&screen_name) {
            state.remove_window(window_id);
        }
        if self.focused_window.as_deref() == Some(window_id) {
            self.focused_window = None;
        }

        if self.autotile_screens.contains(&screen_name) {
            self.retile_screen(&screen_name);
        }
    }

    /// The compositor moved focus to a window
    ///
    /// Records focus for the window's screen. Never triggers a retile.
    pub fn window_focus_changed(&mut self, window_id: &str) {
        let Some(screen_name) = self.window_to_screen.get(window_id).cloned() else {
            return;
        };

        self.focused_window = Some(window_id.to_string());
        if let Some(state) = self.screen_states.get_mut(&screen_name) {
            state.set_focused_window(window_id);
        }
    }

    /// A screen's available geometry changed (resolution, panels)
    pub fn screen_geometry_changed(&mut self, screen_name: &str) {
        if self.autotile_screens.contains(screen_name) && self.screen_states.contains_key(screen_name)
        {
            self.retile_screen(screen_name);
        }
    }
}
