//! Per-screen tiling state
//!
//! `TilingState` tracks everything mutable the engine needs for one
//! screen: window order (insertion order decides tiling position), the
//! floating set, the focused window, master count, and split ratio. State
//! survives algorithm switches and screen disconnects; the engine creates
//! it lazily and keeps it until teardown.

use std::collections::HashSet;

use serde_json::{Value, json};

use crate::geometry::Rect;
use crate::layout::LayoutParams;
use crate::layout::constants::{master, ratio};

/// Change notification produced by state mutations
///
/// Mutations enqueue their notifications in order; the embedder drains
/// them with [`TilingState::take_changes`]. `StateChanged` is the
/// umbrella entry pushed once per public mutation that changed anything
/// requiring a retile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    WindowCountChanged,
    WindowOrderChanged,
    MasterCountChanged,
    SplitRatioChanged,
    FloatingChanged { window_id: String, floating: bool },
    FocusedWindowChanged,
    StateChanged,
}

/// Tiling state for a single screen
#[derive(Debug)]
pub struct TilingState {
    screen_name: String,
    /// Every tracked window in tiling order, floating ones included
    window_order: Vec<String>,
    floating_windows: HashSet<String>,
    focused_window: Option<String>,
    master_count: i32,
    split_ratio: f64,
    /// Cache of the last algorithm output for `tiled_windows()`
    calculated_zones: Vec<Rect>,
    changes: Vec<StateChange>,
}

impl TilingState {
    /// Creates state for a screen with default parameters
    pub fn new(screen_name: &str) -> Self {
        Self {
            screen_name: screen_name.to_string(),
            window_order: Vec::new(),
            floating_windows: HashSet::new(),
            focused_window: None,
            master_count: master::DEFAULT,
            split_ratio: ratio::DEFAULT,
            calculated_zones: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// The screen this state belongs to
    pub fn screen_name(&self) -> &str {
        &self.screen_name
    }

    /// Drains the queued change notifications
    pub fn take_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.changes)
    }

    fn notify_state_changed(&mut self) {
        self.changes.push(StateChange::StateChanged);
    }

    // ════════════════════════════════════════════════════════════════════
    // Window order
    // ════════════════════════════════════════════════════════════════════

    /// Total number of tracked windows, floating included
    pub fn window_count(&self) -> usize {
        self.window_order.len()
    }

    /// Number of windows participating in the layout
    pub fn tiled_window_count(&self) -> usize {
        self.window_order
            .iter()
            .filter(|id| !self.floating_windows.contains(*id))
            .count()
    }

    /// Tracked windows in tiling order
    pub fn window_order(&self) -> &[String] {
        &self.window_order
    }

    /// Non-floating windows in tiling order
    pub fn tiled_windows(&self) -> Vec<String> {
        self.window_order
            .iter()
            .filter(|id| !self.floating_windows.contains(*id))
            .cloned()
            .collect()
    }

    /// Adds a window at `position` (`None` or out-of-range appends)
    ///
    /// Returns false for an empty id or one that is already tracked.
    pub fn add_window(&mut self, window_id: &str, position: Option<usize>) -> bool {
        if window_id.is_empty() || self.contains_window(window_id) {
            return false;
        }

        match position {
            Some(pos) if pos < self.window_order.len() => {
                self.window_order.insert(pos, window_id.to_string());
            }
            _ => self.window_order.push(window_id.to_string()),
        }

        self.changes.push(StateChange::WindowCountChanged);
        self.notify_state_changed();
        true
    }

    /// Removes a window, clearing its floating flag and focus if held
    pub fn remove_window(&mut self, window_id: &str) -> bool {
        let Some(index) = self.window_index(window_id) else {
            return false;
        };

        self.window_order.remove(index);
        self.floating_windows.remove(window_id);

        if self.focused_window.as_deref() == Some(window_id) {
            self.focused_window = None;
            self.changes.push(StateChange::FocusedWindowChanged);
        }

        self.changes.push(StateChange::WindowCountChanged);
        self.notify_state_changed();
        true
    }

    /// Moves the window at `from` to `to`
    ///
    /// `from == to` succeeds without signalling.
    pub fn move_window(&mut self, from: usize, to: usize) -> bool {
        if from >= self.window_order.len() || to >= self.window_order.len() {
            return false;
        }
        if from == to {
            return true;
        }

        let id = self.window_order.remove(from);
        self.window_order.insert(to, id);
        self.changes.push(StateChange::WindowOrderChanged);
        self.notify_state_changed();
        true
    }

    /// Swaps the windows at two positions
    pub fn swap_windows(&mut self, a: usize, b: usize) -> bool {
        if a >= self.window_order.len() || b >= self.window_order.len() {
            return false;
        }
        if a == b {
            return true;
        }

        self.window_order.swap(a, b);
        self.changes.push(StateChange::WindowOrderChanged);
        self.notify_state_changed();
        true
    }

    /// Swaps two windows by id
    pub fn swap_windows_by_id(&mut self, first: &str, second: &str) -> bool {
        let (Some(a), Some(b)) = (self.window_index(first), self.window_index(second)) else {
            return false;
        };
        if a == b {
            return true;
        }
        self.swap_windows(a, b)
    }

    /// Position of a window in the tiling order
    pub fn window_index(&self, window_id: &str) -> Option<usize> {
        self.window_order.iter().position(|id| id == window_id)
    }

    /// Whether a window is tracked on this screen
    pub fn contains_window(&self, window_id: &str) -> bool {
        self.window_order.iter().any(|id| id == window_id)
    }

    /// Moves a window to the front of the order (the master slot)
    pub fn promote_to_master(&mut self, window_id: &str) -> bool {
        let Some(index) = self.window_index(window_id) else {
            return false;
        };
        if index == 0 {
            return true;
        }

        let id = self.window_order.remove(index);
        self.window_order.insert(0, id);
        self.changes.push(StateChange::WindowOrderChanged);
        self.notify_state_changed();
        true
    }

    /// Alias for [`promote_to_master`](Self::promote_to_master)
    pub fn move_to_front(&mut self, window_id: &str) -> bool {
        self.promote_to_master(window_id)
    }

    /// Adds a window right after the focused one (or at the end when
    /// nothing is focused)
    pub fn insert_after_focused(&mut self, window_id: &str) -> bool {
        if window_id.is_empty() || self.contains_window(window_id) {
            return false;
        }

        let position = self
            .focused_window
            .as_deref()
            .and_then(|focused| self.window_index(focused))
            .map(|index| index + 1);

        self.add_window(window_id, position)
    }

    /// Moves a tracked window to `position`
    pub fn move_to_position(&mut self, window_id: &str, position: usize) -> bool {
        let Some(from) = self.window_index(window_id) else {
            return false;
        };
        self.move_window(from, position)
    }

    /// Rotates the tiled windows one step
    ///
    /// Clockwise moves the last tiled window to the front of the tiled
    /// sequence; counter-clockwise moves the first to the back. Floating
    /// windows keep their absolute positions in the order.
    pub fn rotate_windows(&mut self, clockwise: bool) -> bool {
        let tiled_indices: Vec<usize> = self
            .window_order
            .iter()
            .enumerate()
            .filter(|(_, id)| !self.floating_windows.contains(*id))
            .map(|(index, _)| index)
            .collect();

        if tiled_indices.len() < 2 {
            return false;
        }

        let mut tiled_ids: Vec<String> = tiled_indices
            .iter()
            .map(|&index| self.window_order[index].clone())
            .collect();

        if clockwise {
            tiled_ids.rotate_right(1);
        } else {
            tiled_ids.rotate_left(1);
        }

        for (&index, id) in tiled_indices.iter().zip(tiled_ids) {
            self.window_order[index] = id;
        }

        self.changes.push(StateChange::WindowOrderChanged);
        self.notify_state_changed();
        true
    }

    // ════════════════════════════════════════════════════════════════════
    // Master management
    // ════════════════════════════════════════════════════════════════════

    /// Number of windows assigned to the master area
    pub fn master_count(&self) -> i32 {
        self.master_count
    }

    /// Sets the master count, clamped to the absolute valid range
    ///
    /// The count may exceed the current tiled window count; algorithms
    /// clamp operationally when laying out.
    pub fn set_master_count(&mut self, count: i32) {
        let count = count.clamp(master::MIN, master::MAX);
        if self.master_count != count {
            self.master_count = count;
            self.changes.push(StateChange::MasterCountChanged);
            self.notify_state_changed();
        }
    }

    /// Whether a window currently sits in the master area
    pub fn is_master(&self, window_id: &str) -> bool {
        if self.floating_windows.contains(window_id) {
            return false;
        }
        self.tiled_windows()
            .iter()
            .position(|id| id == window_id)
            .is_some_and(|index| index < self.master_count as usize)
    }

    /// Windows currently in the master area, in order
    pub fn master_windows(&self) -> Vec<String> {
        let mut tiled = self.tiled_windows();
        tiled.truncate(self.master_count as usize);
        tiled
    }

    /// Windows currently in the stack area, in order
    pub fn stack_windows(&self) -> Vec<String> {
        let tiled = self.tiled_windows();
        let skip = (self.master_count as usize).min(tiled.len());
        tiled[skip..].to_vec()
    }

    // ════════════════════════════════════════════════════════════════════
    // Split ratio
    // ════════════════════════════════════════════════════════════════════

    /// Master/stack split ratio (0.6 = master gets 60%)
    pub fn split_ratio(&self) -> f64 {
        self.split_ratio
    }

    /// Sets the split ratio, clamped to the valid range
    pub fn set_split_ratio(&mut self, value: f64) {
        let value = value.clamp(ratio::MIN, ratio::MAX);
        if (self.split_ratio - value).abs() > ratio::EPSILON {
            self.split_ratio = value;
            self.changes.push(StateChange::SplitRatioChanged);
            self.notify_state_changed();
        }
    }

    /// Nudges the split ratio up by `delta`
    pub fn increase_split_ratio(&mut self, delta: f64) {
        self.set_split_ratio(self.split_ratio + delta);
    }

    /// Nudges the split ratio down by `delta`
    pub fn decrease_split_ratio(&mut self, delta: f64) {
        self.set_split_ratio(self.split_ratio - delta);
    }

    /// Parameter view handed to algorithms for a layout pass
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            split_ratio: self.split_ratio,
            master_count: self.master_count.max(master::MIN) as usize,
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Floating
    // ════════════════════════════════════════════════════════════════════

    /// Whether a window is excluded from the layout
    pub fn is_floating(&self, window_id: &str) -> bool {
        self.floating_windows.contains(window_id)
    }

    /// Marks or unmarks a window as floating
    ///
    /// Untracked windows are ignored.
    pub fn set_floating(&mut self, window_id: &str, floating: bool) {
        if !self.contains_window(window_id) {
            return;
        }
        if self.floating_windows.contains(window_id) == floating {
            return;
        }

        if floating {
            self.floating_windows.insert(window_id.to_string());
        } else {
            self.floating_windows.remove(window_id);
        }

        self.changes.push(StateChange::FloatingChanged {
            window_id: window_id.to_string(),
            floating,
        });
        // The tiled window count changed even though the order did not.
        self.changes.push(StateChange::WindowCountChanged);
        self.notify_state_changed();
    }

    /// Toggles a window's floating flag, returning the resulting state
    ///
    /// Untracked windows are left alone and report not-floating.
    pub fn toggle_floating(&mut self, window_id: &str) -> bool {
        if !self.contains_window(window_id) {
            return self.is_floating(window_id);
        }
        let flipped = !self.is_floating(window_id);
        self.set_floating(window_id, flipped);
        self.is_floating(window_id)
    }

    /// Floating windows, sorted for deterministic output
    pub fn floating_windows(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.floating_windows.iter().cloned().collect();
        ids.sort();
        ids
    }

    // ════════════════════════════════════════════════════════════════════
    // Focus
    // ════════════════════════════════════════════════════════════════════

    /// The focused window, if any
    pub fn focused_window(&self) -> Option<&str> {
        self.focused_window.as_deref()
    }

    /// Records focus; an empty id clears it
    ///
    /// Untracked non-empty ids are ignored.
    pub fn set_focused_window(&mut self, window_id: &str) {
        if !window_id.is_empty() && !self.contains_window(window_id) {
            return;
        }

        let new_focus = if window_id.is_empty() {
            None
        } else {
            Some(window_id.to_string())
        };

        if self.focused_window != new_focus {
            self.focused_window = new_focus;
            self.changes.push(StateChange::FocusedWindowChanged);
        }
    }

    /// Index of the focused window within the tiled sequence
    pub fn focused_tiled_index(&self) -> Option<usize> {
        let focused = self.focused_window.as_deref()?;
        if self.floating_windows.contains(focused) {
            return None;
        }
        self.tiled_windows().iter().position(|id| id == focused)
    }

    // ════════════════════════════════════════════════════════════════════
    // Calculated zones
    // ════════════════════════════════════════════════════════════════════

    /// Stores the zones from the most recent layout pass
    pub fn set_calculated_zones(&mut self, zones: Vec<Rect>) {
        self.calculated_zones = zones;
    }

    /// The most recently calculated zones, one per tiled window
    pub fn calculated_zones(&self) -> &[Rect] {
        &self.calculated_zones
    }

    // ════════════════════════════════════════════════════════════════════
    // Serialization
    // ════════════════════════════════════════════════════════════════════

    /// Serializes the state to JSON
    pub fn to_json(&self) -> Value {
        json!({
            "screenName": self.screen_name,
            "windowOrder": self.window_order,
            "floatingWindows": self.floating_windows(),
            "focusedWindow": self.focused_window.as_deref().unwrap_or(""),
            "masterCount": self.master_count,
            "splitRatio": self.split_ratio,
        })
    }

    /// Restores state from JSON
    ///
    /// A missing or empty `screenName` fails the load. Floating entries
    /// that are not part of the window order are dropped, an unknown
    /// focused window is reset, and numeric fields are clamped.
    pub fn from_json(json: &Value) -> Option<Self> {
        let screen_name = json.get("screenName")?.as_str()?;
        if screen_name.is_empty() {
            return None;
        }

        let mut state = Self::new(screen_name);

        if let Some(order) = json.get("windowOrder").and_then(Value::as_array) {
            for id in order.iter().filter_map(Value::as_str) {
                if !id.is_empty() && !state.contains_window(id) {
                    state.window_order.push(id.to_string());
                }
            }
        }

        if let Some(floating) = json.get("floatingWindows").and_then(Value::as_array) {
            for id in floating.iter().filter_map(Value::as_str) {
                if state.contains_window(id) {
                    state.floating_windows.insert(id.to_string());
                }
            }
        }

        if let Some(focused) = json.get("focusedWindow").and_then(Value::as_str)
            && state.contains_window(focused)
        {
            state.focused_window = Some(focused.to_string());
        }

        state.master_count = json
            .get("masterCount")
            .and_then(Value::as_i64)
            .map_or(master::DEFAULT, |count| count as i32)
            .clamp(master::MIN, master::MAX);

        state.split_ratio = json
            .get("splitRatio")
            .and_then(Value::as_f64)
            .unwrap_or(ratio::DEFAULT)
            .clamp(ratio::MIN, ratio::MAX);

        Some(state)
    }

    /// Resets every mutable field to defaults, keeping the screen name
    ///
    /// Signals are only emitted when something actually changed.
    pub fn clear(&mut self) {
        let at_defaults = self.window_order.is_empty()
            && self.floating_windows.is_empty()
            && self.focused_window.is_none()
            && self.master_count == master::DEFAULT
            && (self.split_ratio - ratio::DEFAULT).abs() <= ratio::EPSILON;
        if at_defaults {
            return;
        }

        self.window_order.clear();
        self.floating_windows.clear();
        self.focused_window = None;
        self.master_count = master::DEFAULT;
        self.split_ratio = ratio::DEFAULT;
        self.calculated_zones.clear();

        self.changes.push(StateChange::WindowCountChanged);
        self.changes.push(StateChange::FocusedWindowChanged);
        self.changes.push(StateChange::MasterCountChanged);
        self.changes.push(StateChange::SplitRatioChanged);
        self.notify_state_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(windows: &[&str]) -> TilingState {
        let mut state = TilingState::new("HDMI-1");
        for id in windows {
            state.add_window(id, None);
        }
        state.take_changes();
        state
    }

    #[test]
    fn test_add_window_basic() {
        let mut state = TilingState::new("HDMI-1");
        assert!(state.add_window("w1", None));
        assert!(state.add_window("w2", None));
        assert_eq!(state.window_order(), &["w1", "w2"]);
        assert_eq!(state.window_count(), 2);
    }

    #[test]
    fn test_add_window_rejects_duplicates_and_empty() {
        let mut state = state_with(&["w1"]);
        assert!(!state.add_window("w1", None));
        assert!(!state.add_window("", None));
        assert_eq!(state.window_count(), 1);
    }

    #[test]
    fn test_add_window_position_insertion() {
        let mut state = state_with(&["w1", "w2"]);
        assert!(state.add_window("w3", Some(1)));
        assert_eq!(state.window_order(), &["w1", "w3", "w2"]);
        assert!(state.add_window("w4", Some(0)));
        assert_eq!(state.window_order(), &["w4", "w1", "w3", "w2"]);
    }

    #[test]
    fn test_add_window_position_out_of_range_appends() {
        let mut state = state_with(&["w1"]);
        assert!(state.add_window("w2", Some(99)));
        assert_eq!(state.window_order(), &["w1", "w2"]);
    }

    #[test]
    fn test_add_window_signals() {
        let mut state = TilingState::new("HDMI-1");
        state.add_window("w1", None);
        let changes = state.take_changes();
        assert_eq!(
            changes,
            vec![StateChange::WindowCountChanged, StateChange::StateChanged]
        );
    }

    #[test]
    fn test_remove_window() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        assert!(state.remove_window("w2"));
        assert_eq!(state.window_order(), &["w1", "w3"]);
        assert!(!state.remove_window("w2"));
    }

    #[test]
    fn test_remove_window_clears_focus_and_floating() {
        let mut state = state_with(&["w1", "w2"]);
        state.set_focused_window("w2");
        state.set_floating("w2", true);
        state.take_changes();

        assert!(state.remove_window("w2"));
        assert_eq!(state.focused_window(), None);
        assert!(!state.is_floating("w2"));
        let changes = state.take_changes();
        assert!(changes.contains(&StateChange::FocusedWindowChanged));
        assert!(changes.contains(&StateChange::WindowCountChanged));
        assert!(changes.contains(&StateChange::StateChanged));
    }

    #[test]
    fn test_move_window() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        assert!(state.move_window(0, 2));
        assert_eq!(state.window_order(), &["w2", "w3", "w1"]);
        assert!(!state.move_window(0, 3));
        assert!(!state.move_window(5, 0));
    }

    #[test]
    fn test_move_window_same_index_is_silent_success() {
        let mut state = state_with(&["w1", "w2"]);
        assert!(state.move_window(1, 1));
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn test_swap_windows() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        assert!(state.swap_windows(0, 2));
        assert_eq!(state.window_order(), &["w3", "w2", "w1"]);
        assert!(!state.swap_windows(0, 9));
    }

    #[test]
    fn test_swap_windows_by_id() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        assert!(state.swap_windows_by_id("w1", "w3"));
        assert_eq!(state.window_order(), &["w3", "w2", "w1"]);
        assert!(!state.swap_windows_by_id("w1", "ghost"));
        assert!(state.swap_windows_by_id("w2", "w2"));
    }

    #[test]
    fn test_promote_to_master() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        assert!(state.promote_to_master("w3"));
        assert_eq!(state.window_order(), &["w3", "w1", "w2"]);
        assert!(state.promote_to_master("w3"));
        assert!(!state.promote_to_master("ghost"));
    }

    #[test]
    fn test_promote_already_first_does_not_signal() {
        let mut state = state_with(&["w1", "w2"]);
        assert!(state.promote_to_master("w1"));
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn test_insert_after_focused() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        state.set_focused_window("w1");
        assert!(state.insert_after_focused("w4"));
        assert_eq!(state.window_order(), &["w1", "w4", "w2", "w3"]);
    }

    #[test]
    fn test_insert_after_focused_without_focus_appends() {
        let mut state = state_with(&["w1", "w2"]);
        assert!(state.insert_after_focused("w3"));
        assert_eq!(state.window_order(), &["w1", "w2", "w3"]);
    }

    #[test]
    fn test_insert_after_focused_rejects_duplicates() {
        let mut state = state_with(&["w1"]);
        assert!(!state.insert_after_focused("w1"));
        assert!(!state.insert_after_focused(""));
    }

    #[test]
    fn test_move_to_position() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        assert!(state.move_to_position("w3", 0));
        assert_eq!(state.window_order(), &["w3", "w1", "w2"]);
        assert!(!state.move_to_position("ghost", 0));
    }

    #[test]
    fn test_rotate_windows_clockwise() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        assert!(state.rotate_windows(true));
        assert_eq!(state.window_order(), &["w3", "w1", "w2"]);
    }

    #[test]
    fn test_rotate_windows_counterclockwise() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        assert!(state.rotate_windows(false));
        assert_eq!(state.window_order(), &["w2", "w3", "w1"]);
    }

    #[test]
    fn test_rotate_windows_keeps_floating_in_place() {
        let mut state = state_with(&["w1", "f", "w2", "w3"]);
        state.set_floating("f", true);
        state.take_changes();

        assert!(state.rotate_windows(true));
        // The tiled sequence w1,w2,w3 rotated to w3,w1,w2; "f" stayed at
        // index 1.
        assert_eq!(state.window_order(), &["w3", "f", "w1", "w2"]);
    }

    #[test]
    fn test_rotate_windows_needs_two_tiled() {
        let mut state = state_with(&["w1", "w2"]);
        state.set_floating("w2", true);
        assert!(!state.rotate_windows(true));

        let mut empty = TilingState::new("HDMI-1");
        assert!(!empty.rotate_windows(false));
    }

    #[test]
    fn test_master_count_clamped() {
        let mut state = state_with(&["w1"]);
        state.set_master_count(99);
        assert_eq!(state.master_count(), 5);
        state.set_master_count(-3);
        assert_eq!(state.master_count(), 1);
        state.set_master_count(3);
        assert_eq!(state.master_count(), 3);
    }

    #[test]
    fn test_master_count_no_signal_on_same_value() {
        let mut state = state_with(&["w1"]);
        state.set_master_count(1);
        assert!(state.take_changes().is_empty());
        state.set_master_count(2);
        assert_eq!(
            state.take_changes(),
            vec![StateChange::MasterCountChanged, StateChange::StateChanged]
        );
    }

    #[test]
    fn test_master_and_stack_windows() {
        let mut state = state_with(&["w1", "w2", "w3", "w4"]);
        state.set_master_count(2);
        assert_eq!(state.master_windows(), &["w1", "w2"]);
        assert_eq!(state.stack_windows(), &["w3", "w4"]);
        assert!(state.is_master("w1"));
        assert!(!state.is_master("w3"));
    }

    #[test]
    fn test_floating_excluded_from_master() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        state.set_floating("w1", true);
        assert!(!state.is_master("w1"));
        // w2 is now the first tiled window.
        assert!(state.is_master("w2"));
        assert_eq!(state.master_windows(), &["w2"]);
    }

    #[test]
    fn test_split_ratio_clamped() {
        let mut state = TilingState::new("HDMI-1");
        state.set_split_ratio(0.05);
        assert_eq!(state.split_ratio(), 0.1);
        state.set_split_ratio(2.0);
        assert_eq!(state.split_ratio(), 0.9);
    }

    #[test]
    fn test_split_ratio_increase_decrease() {
        let mut state = TilingState::new("HDMI-1");
        state.set_split_ratio(0.5);
        state.increase_split_ratio(0.05);
        assert!((state.split_ratio() - 0.55).abs() < 1e-9);
        state.decrease_split_ratio(0.1);
        assert!((state.split_ratio() - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_split_ratio_no_signal_on_same_value() {
        let mut state = TilingState::new("HDMI-1");
        state.set_split_ratio(0.6);
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn test_floating_set_and_toggle() {
        let mut state = state_with(&["w1", "w2"]);
        state.set_floating("w1", true);
        assert!(state.is_floating("w1"));
        assert_eq!(state.tiled_window_count(), 1);
        assert_eq!(state.tiled_windows(), &["w2"]);

        assert!(!state.toggle_floating("w1"));
        assert!(!state.is_floating("w1"));
        assert_eq!(state.tiled_window_count(), 2);
    }

    #[test]
    fn test_floating_untracked_ignored() {
        let mut state = state_with(&["w1"]);
        state.set_floating("ghost", true);
        assert!(!state.is_floating("ghost"));
        assert!(!state.toggle_floating("ghost"));
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn test_floating_signals() {
        let mut state = state_with(&["w1"]);
        state.set_floating("w1", true);
        let changes = state.take_changes();
        assert_eq!(
            changes,
            vec![
                StateChange::FloatingChanged {
                    window_id: "w1".to_string(),
                    floating: true
                },
                StateChange::WindowCountChanged,
                StateChange::StateChanged,
            ]
        );

        // Setting the same value again is silent.
        state.set_floating("w1", true);
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn test_focused_window() {
        let mut state = state_with(&["w1", "w2"]);
        assert_eq!(state.focused_window(), None);

        state.set_focused_window("w1");
        assert_eq!(state.focused_window(), Some("w1"));

        // Untracked ids are ignored, empty clears.
        state.set_focused_window("ghost");
        assert_eq!(state.focused_window(), Some("w1"));
        state.set_focused_window("");
        assert_eq!(state.focused_window(), None);
    }

    #[test]
    fn test_focused_window_no_signal_on_same_value() {
        let mut state = state_with(&["w1"]);
        state.set_focused_window("w1");
        state.take_changes();
        state.set_focused_window("w1");
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn test_focused_tiled_index_skips_floating() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        state.set_floating("w1", true);
        state.set_focused_window("w3");
        assert_eq!(state.focused_tiled_index(), Some(1));

        state.set_focused_window("w1");
        assert_eq!(state.focused_tiled_index(), None);
    }

    #[test]
    fn test_no_duplicates_after_operation_storm() {
        let mut state = state_with(&["w1", "w2", "w3", "w4"]);
        state.promote_to_master("w3");
        state.rotate_windows(true);
        state.swap_windows(0, 3);
        state.move_window(2, 0);
        state.insert_after_focused("w5");
        state.rotate_windows(false);

        let mut seen = state.window_order().to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), state.window_count());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut state = state_with(&["w1", "w2", "w3"]);
        state.set_floating("w2", true);
        state.set_focused_window("w1");
        state.set_master_count(2);
        state.set_split_ratio(0.7);

        let restored = TilingState::from_json(&state.to_json());
        let Some(restored) = restored else {
            panic!("roundtrip failed");
        };
        assert_eq!(restored.screen_name(), "HDMI-1");
        assert_eq!(restored.window_order(), state.window_order());
        assert_eq!(restored.floating_windows(), state.floating_windows());
        assert_eq!(restored.focused_window(), Some("w1"));
        assert_eq!(restored.master_count(), 2);
        assert!((restored.split_ratio() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_json_missing_screen_name_fails() {
        assert!(TilingState::from_json(&json!({})).is_none());
        assert!(TilingState::from_json(&json!({ "screenName": "" })).is_none());
        assert!(TilingState::from_json(&json!({ "windowOrder": ["w1"] })).is_none());
    }

    #[test]
    fn test_json_invalid_entries_dropped() {
        let state = TilingState::from_json(&json!({
            "screenName": "DP-1",
            "windowOrder": ["w1", "w2"],
            "floatingWindows": ["w2", "ghost"],
            "focusedWindow": "ghost",
            "masterCount": 42,
            "splitRatio": 7.5,
        }));
        let Some(state) = state else {
            panic!("load failed");
        };
        assert_eq!(state.floating_windows(), &["w2"]);
        assert_eq!(state.focused_window(), None);
        assert_eq!(state.master_count(), 5);
        assert_eq!(state.split_ratio(), 0.9);
    }

    #[test]
    fn test_json_empty_state() {
        let state = TilingState::new("DP-1");
        let restored = TilingState::from_json(&state.to_json());
        let Some(restored) = restored else {
            panic!("load failed");
        };
        assert_eq!(restored.window_count(), 0);
        assert_eq!(restored.focused_window(), None);
        assert_eq!(restored.master_count(), master::DEFAULT);
    }

    #[test]
    fn test_clear_resets_everything_but_screen_name() {
        let mut state = state_with(&["w1", "w2"]);
        state.set_floating("w1", true);
        state.set_focused_window("w2");
        state.set_master_count(3);
        state.set_split_ratio(0.8);
        state.set_calculated_zones(vec![Rect::new(0, 0, 10, 10)]);
        state.take_changes();

        state.clear();
        assert_eq!(state.screen_name(), "HDMI-1");
        assert_eq!(state.window_count(), 0);
        assert_eq!(state.focused_window(), None);
        assert_eq!(state.master_count(), master::DEFAULT);
        assert_eq!(state.split_ratio(), ratio::DEFAULT);
        assert!(state.calculated_zones().is_empty());

        let changes = state.take_changes();
        assert!(changes.contains(&StateChange::StateChanged));
    }

    #[test]
    fn test_clear_on_default_state_is_silent() {
        let mut state = TilingState::new("HDMI-1");
        state.clear();
        assert!(state.take_changes().is_empty());
    }

    #[test]
    fn test_calculated_zones_snapshot() {
        let mut state = state_with(&["w1"]);
        assert!(state.calculated_zones().is_empty());
        state.set_calculated_zones(vec![Rect::new(0, 0, 100, 100)]);
        assert_eq!(state.calculated_zones(), &[Rect::new(0, 0, 100, 100)]);
    }
}
