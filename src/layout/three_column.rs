//! Three-column tiling algorithm
//!
//! Centered master column flanked by two side columns. The first window
//! takes the center; the rest alternate right, left, right, ... so the
//! right column receives the extra window when the stack count is odd.

use crate::geometry::Rect;

use super::constants::ratio;
use super::traits::{LayoutParams, TilingAlgorithm, distribute_evenly};

/// Center master with side columns
#[derive(Debug, Default)]
pub struct ThreeColumnAlgorithm;

impl TilingAlgorithm for ThreeColumnAlgorithm {
    fn id(&self) -> &'static str {
        "three-column"
    }

    fn name(&self) -> &'static str {
        "Three Column"
    }

    fn description(&self) -> &'static str {
        "Center master with side columns"
    }

    fn icon_name(&self) -> &'static str {
        "view-column-three"
    }

    fn master_zone_index(&self) -> Option<usize> {
        Some(0)
    }

    fn supports_split_ratio(&self) -> bool {
        true
    }

    fn calculate_zones(
        &mut self,
        window_count: usize,
        screen: Rect,
        params: &LayoutParams,
    ) -> Vec<Rect> {
        let mut zones = Vec::with_capacity(window_count);

        if window_count == 0 {
            return zones;
        }
        if window_count == 1 {
            zones.push(screen);
            return zones;
        }

        // Two windows: plain vertical halves, no center concept yet.
        if window_count == 2 {
            let half = screen.width / 2;
            zones.push(Rect::new(screen.x, screen.y, half, screen.height));
            zones.push(Rect::new(
                screen.x + half,
                screen.y,
                screen.width - half,
                screen.height,
            ));
            return zones;
        }

        // The split ratio controls the center column; the sides share the
        // remainder equally.
        let center_ratio = params.split_ratio.clamp(ratio::MIN, ratio::MAX);
        let side_ratio = (1.0 - center_ratio) / 2.0;

        let left_width = (screen.width as f64 * side_ratio) as i32;
        let center_width = (screen.width as f64 * center_ratio) as i32;
        let right_width = screen.width - left_width - center_width;

        let left_x = screen.x;
        let center_x = screen.x + left_width;
        let right_x = screen.x + left_width + center_width;

        let stack_count = window_count - 1;
        let right_count = stack_count.div_ceil(2);
        let left_count = stack_count - right_count;

        let right_heights = distribute_evenly(screen.height, right_count);
        let left_heights = distribute_evenly(screen.height, left_count);

        // Center/master first, full height.
        zones.push(Rect::new(center_x, screen.y, center_width, screen.height));

        let mut left_idx = 0;
        let mut right_idx = 0;
        let mut left_y = screen.y;
        let mut right_y = screen.y;

        for i in 0..stack_count {
            if i % 2 == 0 && right_idx < right_count {
                zones.push(Rect::new(
                    right_x,
                    right_y,
                    right_width,
                    right_heights[right_idx],
                ));
                right_y += right_heights[right_idx];
                right_idx += 1;
            } else if left_idx < left_count {
                zones.push(Rect::new(
                    left_x,
                    left_y,
                    left_width,
                    left_heights[left_idx],
                ));
                left_y += left_heights[left_idx];
                left_idx += 1;
            }
        }

        zones
    }
}
