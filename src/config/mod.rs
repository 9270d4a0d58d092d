//! Autotile configuration
//!
//! `AutotileConfig` bundles every user-facing tiling option as a plain
//! value type with JSON persistence. Out-of-range values clamp on read
//! and unknown fields are ignored, so a stale or hand-edited file never
//! prevents startup.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

pub mod validation;

use crate::layout::constants::{border, gap, master, ratio};
use validation::{clamps, fuzzy_eq, is_valid_color};

/// Fallback for the active border when the configured colour is invalid
const DEFAULT_BORDER_COLOR: &str = "#FF3DAEE9";

/// Where newly opened windows are inserted into the tiling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertPosition {
    /// Append to the end of the stack
    #[default]
    End,
    /// Insert right after the currently focused window
    AfterFocused,
    /// New window becomes the master
    AsMaster,
}

impl InsertPosition {
    fn from_json_str(value: &str) -> Self {
        match value {
            "after-focused" => Self::AfterFocused,
            "as-master" => Self::AsMaster,
            _ => Self::End,
        }
    }
}

/// User-configurable autotiling options
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutotileConfig {
    /// Id of the tiling algorithm to use (see the algorithm registry)
    pub algorithm_id: String,
    /// Screen share of the master area, 0.1 to 0.9
    pub split_ratio: f64,
    /// Number of windows in the master area, 1 to 5
    pub master_count: i32,
    /// Gap between adjacent windows in pixels, 0 to 50
    pub inner_gap: i32,
    /// Gap at screen edges in pixels, 0 to 50
    pub outer_gap: i32,
    pub insert_position: InsertPosition,
    /// Moving the mouse over a window focuses it
    pub focus_follows_mouse: bool,
    /// Newly opened windows receive focus
    pub focus_new_windows: bool,
    pub show_active_border: bool,
    pub active_border_width: i32,
    /// `#AARRGGBB` or `#RRGGBB`
    pub active_border_color: String,
    /// Monocle hides every window except the active one
    pub monocle_hide_others: bool,
    /// Monocle shows a tab bar for the hidden windows
    pub monocle_show_tabs: bool,
    /// Drop gaps when they would not separate anything
    pub smart_gaps: bool,
    /// Honour window minimum-size hints when applying zones
    pub respect_minimum_size: bool,
}

impl Default for AutotileConfig {
    fn default() -> Self {
        Self {
            algorithm_id: "master-stack".to_string(),
            split_ratio: ratio::DEFAULT,
            master_count: master::DEFAULT,
            inner_gap: gap::DEFAULT,
            outer_gap: gap::DEFAULT,
            insert_position: InsertPosition::End,
            focus_follows_mouse: false,
            focus_new_windows: true,
            show_active_border: true,
            active_border_width: border::DEFAULT_WIDTH,
            active_border_color: DEFAULT_BORDER_COLOR.to_string(),
            monocle_hide_others: true,
            monocle_show_tabs: false,
            smart_gaps: true,
            respect_minimum_size: true,
        }
    }
}

impl PartialEq for AutotileConfig {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm_id == other.algorithm_id
            && fuzzy_eq(self.split_ratio, other.split_ratio)
            && self.master_count == other.master_count
            && self.inner_gap == other.inner_gap
            && self.outer_gap == other.outer_gap
            && self.insert_position == other.insert_position
            && self.focus_follows_mouse == other.focus_follows_mouse
            && self.focus_new_windows == other.focus_new_windows
            && self.show_active_border == other.show_active_border
            && self.active_border_width == other.active_border_width
            && self.active_border_color == other.active_border_color
            && self.monocle_hide_others == other.monocle_hide_others
            && self.monocle_show_tabs == other.monocle_show_tabs
            && self.smart_gaps == other.smart_gaps
            && self.respect_minimum_size == other.respect_minimum_size
    }
}

impl AutotileConfig {
    /// Serializes to a JSON object with camelCase keys
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|error| {
            warn!("failed to serialize autotile config: {error}");
            Value::Null
        })
    }

    /// Restores a config from JSON
    ///
    /// Each field is read independently: missing or wrongly-typed fields
    /// keep their defaults, numeric fields clamp to their valid ranges,
    /// and an invalid colour falls back to the default highlight.
    pub fn from_json(json: &Value) -> Self {
        let mut config = Self::default();

        if let Some(id) = json.get("algorithmId").and_then(Value::as_str)
            && !id.is_empty()
        {
            config.algorithm_id = id.to_string();
        }
        if let Some(value) = json.get("splitRatio").and_then(Value::as_f64) {
            config.split_ratio = clamps::split_ratio(value);
        }
        if let Some(value) = json.get("masterCount").and_then(Value::as_i64) {
            config.master_count = clamps::master_count(value as i32);
        }
        if let Some(value) = json.get("innerGap").and_then(Value::as_i64) {
            config.inner_gap = clamps::gap(value as i32);
        }
        if let Some(value) = json.get("outerGap").and_then(Value::as_i64) {
            config.outer_gap = clamps::gap(value as i32);
        }
        if let Some(value) = json.get("insertPosition").and_then(Value::as_str) {
            config.insert_position = InsertPosition::from_json_str(value);
        }
        if let Some(value) = json.get("focusFollowsMouse").and_then(Value::as_bool) {
            config.focus_follows_mouse = value;
        }
        if let Some(value) = json.get("focusNewWindows").and_then(Value::as_bool) {
            config.focus_new_windows = value;
        }
        if let Some(value) = json.get("showActiveBorder").and_then(Value::as_bool) {
            config.show_active_border = value;
        }
        if let Some(value) = json.get("activeBorderWidth").and_then(Value::as_i64) {
            config.active_border_width = clamps::border_width(value as i32);
        }
        if let Some(value) = json.get("activeBorderColor").and_then(Value::as_str) {
            if is_valid_color(value) {
                config.active_border_color = value.to_string();
            } else if !value.is_empty() {
                warn!("invalid activeBorderColor {value:?}, using default");
            }
        }
        if let Some(value) = json.get("monocleHideOthers").and_then(Value::as_bool) {
            config.monocle_hide_others = value;
        }
        if let Some(value) = json.get("monocleShowTabs").and_then(Value::as_bool) {
            config.monocle_show_tabs = value;
        }
        if let Some(value) = json.get("smartGaps").and_then(Value::as_bool) {
            config.smart_gaps = value;
        }
        if let Some(value) = json.get("respectMinimumSize").and_then(Value::as_bool) {
            config.respect_minimum_size = value;
        }

        config
    }

    /// Loads the configuration from disk, creating defaults if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            info!("Loading autotile config from: {config_path:?}");
            let content = std::fs::read_to_string(&config_path)?;
            match serde_json::from_str::<Value>(&content) {
                Ok(json) => Ok(Self::from_json(&json)),
                Err(error) => {
                    warn!("Malformed autotile config, using defaults: {error}");
                    Ok(Self::default())
                }
            }
        } else {
            info!("Autotile config not found, creating default at: {config_path:?}");
            let default_config = Self::default();
            default_config.save()?;
            Ok(default_config)
        }
    }

    /// Saves the configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.to_json())?;
        std::fs::write(&config_path, content)?;
        info!("Saved autotile config to: {config_path:?}");
        Ok(())
    }

    fn config_path() -> Result<std::path::PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;

        Ok(config_dir.join("autotile").join("autotile.json"))
    }
}
