//! The tiling algorithm trait and its shared helpers

use crate::geometry::Rect;

use super::constants::ratio;

/// Read-only view of the per-screen parameters an algorithm may consult
///
/// Built by the engine from the screen's tiling state right before each
/// layout pass. Algorithms never see the mutable state itself.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    /// Master/stack split ratio, already clamped to the valid range
    pub split_ratio: f64,
    /// Requested number of master windows (may exceed the window count;
    /// algorithms clamp operationally)
    pub master_count: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            split_ratio: ratio::DEFAULT,
            master_count: 1,
        }
    }
}

/// Trait for window tiling algorithms
///
/// Each algorithm turns a window count and a screen rectangle into exactly
/// that many zone rectangles. The zones must tile the screen: every zone
/// lies inside the screen, their union covers it, and interiors do not
/// overlap. Gap spacing is applied in a separate pass afterwards.
///
/// `calculate_zones` takes `&mut self` because the BSP algorithm keeps a
/// persistent split tree between calls. All other implementations are
/// stateless and ignore the mutability. Algorithms are driven from the
/// engine's single control thread.
pub trait TilingAlgorithm: Send {
    /// Stable identifier used in configuration and the registry
    fn id(&self) -> &'static str;

    /// Human-readable name for UI display
    fn name(&self) -> &'static str;

    /// Short description suitable for tooltips
    fn description(&self) -> &'static str;

    /// Icon name for UI display
    fn icon_name(&self) -> &'static str;

    /// Index of the master zone, if the algorithm has a master concept
    fn master_zone_index(&self) -> Option<usize> {
        None
    }

    /// Whether the algorithm honours the master window count
    fn supports_master_count(&self) -> bool {
        false
    }

    /// Whether the algorithm honours the split ratio
    fn supports_split_ratio(&self) -> bool {
        false
    }

    /// Preferred split ratio when creating fresh tiling state
    fn default_split_ratio(&self) -> f64 {
        0.5
    }

    /// Smallest window count for which the layout is meaningful
    fn minimum_windows(&self) -> usize {
        1
    }

    /// Calculates zone geometries for `window_count` windows
    ///
    /// Returns an empty vector for zero windows and a single zone equal to
    /// `screen` for one window. `screen` is assumed valid; the engine
    /// checks geometry before calling.
    fn calculate_zones(
        &mut self,
        window_count: usize,
        screen: Rect,
        params: &LayoutParams,
    ) -> Vec<Rect>;
}

/// Divides `total` pixels into `count` parts that sum exactly to `total`
///
/// Remainder pixels go to the first parts, e.g. `distribute_evenly(100, 3)`
/// returns `[34, 33, 33]`.
pub fn distribute_evenly(total: i32, count: usize) -> Vec<i32> {
    if count == 0 || total <= 0 {
        return Vec::new();
    }

    let base = total / count as i32;
    let remainder = total % count as i32;

    (0..count as i32)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}
