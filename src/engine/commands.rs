//! User-triggered tiling commands
//!
//! Layout commands mutate the relevant screen state and retile; focus
//! commands only emit a focus request for the external applier and never
//! change the layout. Ratio and master-count adjustments are global
//! knobs applied to every enabled screen uniformly.

use tracing::warn;

use super::core::{AutotileEngine, EngineEvent, ScreenManager};

impl<S: ScreenManager> AutotileEngine<S> {
    /// Swaps two windows' positions in the tiling order
    ///
    /// Both windows must be known and live on the same screen.
    pub fn swap_windows(&mut self, first: &str, second: &str) {
        if first == second {
            return;
        }

        let (Some(screen_a), Some(screen_b)) = (
            self.window_to_screen.get(first).cloned(),
            self.window_to_screen.get(second).cloned(),
        ) else {
            warn!("swap ignored, window not tracked");
            return;
        };
        if screen_a != screen_b {
            warn!("swap ignored, windows on different screens");
            return;
        }

        let Some(state) = self.screen_states.get_mut(&screen_a) else {
            return;
        };
        if state.swap_windows_by_id(first, second) {
            self.retile_screen(&screen_a);
        }
    }

    /// Moves a window to the master slot at the front of the order
    pub fn promote_to_master(&mut self, window_id: &str) {
        let Some(screen_name) = self.window_to_screen.get(window_id).cloned() else {
            return;
        };
        let Some(state) = self.screen_states.get_mut(&screen_name) else {
            return;
        };
        if state.move_to_front(window_id) {
            self.retile_screen(&screen_name);
        }
    }

    /// Moves a window out of the master area to the top of the stack
    pub fn demote_from_master(&mut self, window_id: &str) {
        let Some(screen_name) = self.window_to_screen.get(window_id).cloned() else {
            return;
        };
        let Some(state) = self.screen_states.get_mut(&screen_name) else {
            return;
        };

        let master_count = state.master_count() as usize;
        let demoted = match state.window_index(window_id) {
            Some(position) if position < master_count => {
                state.move_to_position(window_id, master_count)
            }
            _ => false,
        };
        if demoted {
            self.retile_screen(&screen_name);
        }
    }

    /// Requests focus for the next tiled window after the focused one
    pub fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    /// Requests focus for the previous tiled window
    pub fn focus_previous(&mut self) {
        self.cycle_focus(-1);
    }

    /// Requests focus for the master window on the focused screen
    pub fn focus_master(&mut self) {
        let Some(screen_name) = self.focused_screen() else {
            return;
        };
        let Some(state) = self.screen_states.get_mut(&screen_name) else {
            return;
        };
        if let Some(master) = state.tiled_windows().into_iter().next() {
            self.events
                .push(EngineEvent::FocusWindowRequested { window_id: master });
        }
    }

    /// Grows the master area on every enabled screen
    pub fn increase_master_ratio(&mut self, delta: f64) {
        self.adjust_split_ratio(delta);
    }

    /// Shrinks the master area on every enabled screen
    pub fn decrease_master_ratio(&mut self, delta: f64) {
        self.adjust_split_ratio(-delta);
    }

    /// Adds a window slot to the master area on every enabled screen
    pub fn increase_master_count(&mut self) {
        let screens: Vec<String> = self.autotile_screens.iter().cloned().collect();
        for screen_name in &screens {
            if let Some(state) = self.screen_states.get_mut(screen_name) {
                state.set_master_count(state.master_count() + 1);
            }
        }
        self.retile(None);
    }

    /// Removes a window slot from the master area on every enabled screen
    pub fn decrease_master_count(&mut self) {
        let screens: Vec<String> = self.autotile_screens.iter().cloned().collect();
        for screen_name in &screens {
            if let Some(state) = self.screen_states.get_mut(screen_name) {
                let current = state.master_count();
                if current > 1 {
                    state.set_master_count(current - 1);
                }
            }
        }
        self.retile(None);
    }

    fn adjust_split_ratio(&mut self, delta: f64) {
        let screens: Vec<String> = self.autotile_screens.iter().cloned().collect();
        for screen_name in &screens {
            if let Some(state) = self.screen_states.get_mut(screen_name) {
                state.increase_split_ratio(delta);
            }
        }
        self.retile(None);
    }

    fn focused_screen(&self) -> Option<String> {
        let focused = self.focused_window.as_deref()?;
        self.window_to_screen.get(focused).cloned()
    }

    fn cycle_focus(&mut self, step: isize) {
        let Some(focused) = self.focused_window.clone() else {
            return;
        };
        let Some(screen_name) = self.window_to_screen.get(&focused).cloned() else {
            return;
        };
        let Some(state) = self.screen_states.get_mut(&screen_name) else {
            return;
        };

        let tiled = state.tiled_windows();
        if tiled.is_empty() {
            return;
        }

        // A focused floating window (or stale focus) restarts the cycle
        // at the first tiled window.
        let target = match tiled.iter().position(|id| *id == focused) {
            Some(index) => {
                let len = tiled.len() as isize;
                let next = (index as isize + step).rem_euclid(len) as usize;
                tiled[next].clone()
            }
            None => tiled[0].clone(),
        };

        self.events
            .push(EngineEvent::FocusWindowRequested { window_id: target });
    }
}
