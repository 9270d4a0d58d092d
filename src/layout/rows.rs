//! Rows tiling algorithm

use crate::geometry::Rect;

use super::traits::{LayoutParams, TilingAlgorithm};

/// Equal-height horizontal rows spanning the full screen width
///
/// Division remainder pixels are absorbed by the last row, mirroring the
/// columns layout rotated by ninety degrees.
#[derive(Debug, Default)]
pub struct RowsAlgorithm;

impl TilingAlgorithm for RowsAlgorithm {
    fn id(&self) -> &'static str {
        "rows"
    }

    fn name(&self) -> &'static str {
        "Rows"
    }

    fn description(&self) -> &'static str {
        "Equal-height horizontal rows"
    }

    fn icon_name(&self) -> &'static str {
        "view-split-top-bottom"
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

        let base_height = screen.height / window_count as i32;
        let mut current_y = screen.y;
        for i in 0..window_count {
            let height = if i == window_count - 1 {
                screen.bottom() - current_y
            } else {
                base_height
            };
            zones.push(Rect::new(screen.x, current_y, screen.width, height));
            current_y += height;
        }

        zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    #[test]
    fn test_empty() {
        let mut algo = RowsAlgorithm;
        assert!(
            algo.calculate_zones(0, SCREEN, &LayoutParams::default())
                .is_empty()
        );
    }

    #[test]
    fn test_single_window_fullscreen() {
        let mut algo = RowsAlgorithm;
        let zones = algo.calculate_zones(1, SCREEN, &LayoutParams::default());
        assert_eq!(zones, vec![SCREEN]);
    }

    #[test]
    fn test_three_rows_cover_height() {
        let mut algo = RowsAlgorithm;
        let zones = algo.calculate_zones(3, SCREEN, &LayoutParams::default());
        assert_eq!(zones[0], Rect::new(0, 0, 1920, 360));
        assert_eq!(zones[1], Rect::new(0, 360, 1920, 360));
        assert_eq!(zones[2], Rect::new(0, 720, 1920, 360));
    }

    #[test]
    fn test_last_row_absorbs_remainder() {
        let mut algo = RowsAlgorithm;
        // 1080 / 7 = 154 remainder 2.
        let zones = algo.calculate_zones(7, SCREEN, &LayoutParams::default());
        for z in &zones[..6] {
            assert_eq!(z.height, 154);
        }
        assert_eq!(zones[6].height, 156);
        assert_eq!(zones[6].bottom(), 1080);
    }
}
