//! Columns tiling algorithm

use crate::geometry::Rect;

use super::traits::{LayoutParams, TilingAlgorithm};

/// Equal-width vertical columns spanning the full screen height
///
/// Division remainder pixels are absorbed by the last column so the
/// columns always cover the screen width exactly.
#[derive(Debug, Default)]
pub struct ColumnsAlgorithm;

impl TilingAlgorithm for ColumnsAlgorithm {
    fn id(&self) -> &'static str {
        "columns"
    }

    fn name(&self) -> &'static str {
        "Columns"
    }

    fn description(&self) -> &'static str {
        "Equal-width vertical columns"
    }

    fn icon_name(&self) -> &'static str {
        "view-split-left-right"
    }

    fn calculate_zones(
        &mut self,
        window_count: usize,
        screen: Rect,
        _params: &LayoutParams,
    ) -> Vec<Rect> {
        let mut zones = Vec::with_capacity(window_count);

        if window_count == 0 {
            return zones;
        }
        if window_count == 1 {
            zones.push(screen);
            return zones;
        }

        let base_width = screen.width / window_count as i32;
        let mut current_x = screen.x;
        for i in 0..window_count {
            let width = if i == window_count - 1 {
                screen.right() - current_x
            } else {
                base_width
            };
            zones.push(Rect::new(current_x, screen.y, width, screen.height));
            current_x += width;
        }

        zones
    }
}
