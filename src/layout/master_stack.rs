//! Master-stack tiling algorithm
//!
//! The classical dwm arrangement: up to `master_count` windows share a
//! master column on the left, everything else stacks in rows on the right.

use crate::geometry::Rect;

use super::constants::ratio;
use super::traits::{LayoutParams, TilingAlgorithm, distribute_evenly};

/// Large master area with stacked secondary windows
#[derive(Debug, Default)]
pub struct MasterStackAlgorithm;

impl TilingAlgorithm for MasterStackAlgorithm {
    fn id(&self) -> &'static str {
        "master-stack"
    }

    fn name(&self) -> &'static str {
        "Master + Stack"
    }

    fn description(&self) -> &'static str {
        "Large master area with stacked secondary windows"
    }

    fn icon_name(&self) -> &'static str {
        "view-split-left-right"
    }

    fn master_zone_index(&self) -> Option<usize> {
        Some(0)
    }

    fn supports_master_count(&self) -> bool {
        true
    }

    fn supports_split_ratio(&self) -> bool {
        true
    }

    fn default_split_ratio(&self) -> f64 {
        ratio::DEFAULT
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

        let master_count = params.master_count.clamp(1, window_count);
        let stack_count = window_count - master_count;
        let split_ratio = params.split_ratio.clamp(ratio::MIN, ratio::MAX);

        // With no stack the masters take the full width.
        let master_width = if stack_count == 0 {
            screen.width
        } else {
            (screen.width as f64 * split_ratio) as i32
        };
        let stack_width = screen.width - master_width;

        let mut current_y = screen.y;
        for height in distribute_evenly(screen.height, master_count) {
            zones.push(Rect::new(screen.x, current_y, master_width, height));
            current_y += height;
        }

        if stack_count > 0 {
            let stack_x = screen.x + master_width;
            let mut current_y = screen.y;
            for height in distribute_evenly(screen.height, stack_count) {
                zones.push(Rect::new(stack_x, current_y, stack_width, height));
                current_y += height;
            }
        }

        zones
    }
}
