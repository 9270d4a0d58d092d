//! Monocle tiling algorithm

use crate::geometry::Rect;

use super::traits::{LayoutParams, TilingAlgorithm};

/// Every window gets the full screen
///
/// All zones are identical; which window is visible on top (and whether
/// the others are hidden) is a renderer decision, not a layout one. The
/// gap pass applies outer gaps only since identical zones have no
/// interior edges.
#[derive(Debug, Default)]
pub struct MonocleAlgorithm;

impl TilingAlgorithm for MonocleAlgorithm {
    fn id(&self) -> &'static str {
        "monocle"
    }

    fn name(&self) -> &'static str {
        "Monocle"
    }

    fn description(&self) -> &'static str {
        "Single fullscreen window, others behind it"
    }

    fn icon_name(&self) -> &'static str {
        "view-fullscreen"
    }

    fn calculate_zones(
        &mut self,
        window_count: usize,
        screen: Rect,
        _params: &LayoutParams,
    ) -> Vec<Rect> {
        vec![screen; window_count]
    }
}
