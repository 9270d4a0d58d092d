//! Fibonacci spiral tiling algorithm
//!
//! Each window peels off a share of the remaining region along a rotating
//! direction (right, down, left, up). The first split uses the user's
//! split ratio; every later split halves the remainder, producing a
//! monotonically shrinking spiral. The last window takes whatever is left.

use crate::geometry::Rect;

use super::constants::ratio;
use super::traits::{LayoutParams, TilingAlgorithm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpiralDirection {
    Right,
    Down,
    Left,
    Up,
}

impl SpiralDirection {
    fn next(self) -> Self {
        match self {
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::Up => Self::Right,
        }
    }

    /// Whether this direction cuts the region's width (as opposed to height)
    fn cuts_width(self) -> bool {
        matches!(self, Self::Right | Self::Left)
    }
}

/// Spiral subdivision inspired by the golden ratio
#[derive(Debug, Default)]
pub struct FibonacciAlgorithm;

/// Strip thickness for the current window along an axis of length `total`
/// with `cross` pixels on the perpendicular axis
///
/// The remainder must keep room for the `windows_left` windows still to
/// be placed (one pixel each), so the strip is capped accordingly; `None`
/// means this axis cannot host both the strip and the reserve. Rounding
/// to nearest keeps the strip at least as large as the remainder's share
/// on even halvings, preserving the shrinking-areas property.
fn window_strip(total: i32, cross: i32, split_ratio: f64, windows_left: i32) -> Option<i32> {
    let reserve = (windows_left + cross - 1) / cross;
    if total < reserve + 1 {
        return None;
    }
    let strip = (total as f64 * split_ratio).round() as i32;
    Some(strip.clamp(1, total - reserve))
}

impl TilingAlgorithm for FibonacciAlgorithm {
    fn id(&self) -> &'static str {
        "fibonacci"
    }

    fn name(&self) -> &'static str {
        "Fibonacci"
    }

    fn description(&self) -> &'static str {
        "Spiral subdivision inspired by golden ratio"
    }

    fn icon_name(&self) -> &'static str {
        "shape-spiral"
    }

    fn supports_split_ratio(&self) -> bool {
        true
    }

    fn default_split_ratio(&self) -> f64 {
        0.618
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

        let user_ratio = params.split_ratio.clamp(ratio::MIN, ratio::MAX);

        let mut remaining = screen;
        let mut direction = SpiralDirection::Right;

        for i in 0..window_count {
            if i == window_count - 1 {
                zones.push(remaining);
                break;
            }

            // Only the first cut follows the user ratio; the spiral then
            // halves the remainder every step.
            let split_ratio = if i == 0 { user_ratio } else { 0.5 };
            let windows_left = (window_count - 1 - i) as i32;

            // When the scheduled axis cannot fit the strip plus the
            // reserve for later windows, rotate once to cut the other
            // axis. A region too small for either cut takes the current
            // window and ends the spiral; the short result fails the
            // zone-count contract upstream instead of overlapping.
            let mut dir = direction;
            let mut strip = if dir.cuts_width() {
                window_strip(remaining.width, remaining.height, split_ratio, windows_left)
            } else {
                window_strip(remaining.height, remaining.width, split_ratio, windows_left)
            };
            if strip.is_none() {
                dir = dir.next();
                strip = if dir.cuts_width() {
                    window_strip(remaining.width, remaining.height, split_ratio, windows_left)
                } else {
                    window_strip(remaining.height, remaining.width, split_ratio, windows_left)
                };
            }
            let Some(strip) = strip else {
                zones.push(remaining);
                break;
            };

            let (zone, rest) = match dir {
                SpiralDirection::Right => {
                    let split_x = remaining.x + strip;
                    (
                        Rect::from_edges(remaining.x, remaining.y, split_x, remaining.bottom()),
                        Rect::from_edges(split_x, remaining.y, remaining.right(), remaining.bottom()),
                    )
                }
                SpiralDirection::Down => {
                    let split_y = remaining.y + strip;
                    (
                        Rect::from_edges(remaining.x, remaining.y, remaining.right(), split_y),
                        Rect::from_edges(remaining.x, split_y, remaining.right(), remaining.bottom()),
                    )
                }
                SpiralDirection::Left => {
                    let split_x = remaining.right() - strip;
                    (
                        Rect::from_edges(split_x, remaining.y, remaining.right(), remaining.bottom()),
                        Rect::from_edges(remaining.x, remaining.y, split_x, remaining.bottom()),
                    )
                }
                SpiralDirection::Up => {
                    let split_y = remaining.bottom() - strip;
                    (
                        Rect::from_edges(remaining.x, split_y, remaining.right(), remaining.bottom()),
                        Rect::from_edges(remaining.x, remaining.y, remaining.right(), split_y),
                    )
                }
            };

            zones.push(zone);
            remaining = rest;
            direction = dir.next();
        }

        zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);
    const OFFSET_SCREEN: Rect = Rect::new(64, 32, 1856, 1048);

    const WINDOW_COUNTS: [usize; 8] = [0, 1, 2, 3, 4, 5, 8, 20];
    const SPLIT_RATIOS: [f64; 4] = [0.1, 0.5, 0.618, 0.9];

    fn params(split_ratio: f64) -> LayoutParams {
        LayoutParams {
            split_ratio,
            master_count: 1,
        }
    }

    #[test]
    fn test_empty() {
        let mut algo = FibonacciAlgorithm;
        assert!(algo.calculate_zones(0, SCREEN, &params(0.5)).is_empty());
    }

    #[test]
    fn test_single_window_fullscreen() {
        let mut algo = FibonacciAlgorithm;
        let zones = algo.calculate_zones(1, SCREEN, &params(0.5));
        assert_eq!(zones, vec![SCREEN]);
    }

    #[test]
    fn test_first_split_uses_user_ratio() {
        let mut algo = FibonacciAlgorithm;
        let zones = algo.calculate_zones(2, SCREEN, &params(0.6));
        assert_eq!(zones[0], Rect::new(0, 0, 1152, 1080));
        assert_eq!(zones[1], Rect::new(1152, 0, 768, 1080));
    }

    #[test]
    fn test_spiral_rotation() {
        let mut algo = FibonacciAlgorithm;
        let zones = algo.calculate_zones(4, SCREEN, &params(0.5));

        // Right, then down, then left; last window takes the rest.
        assert_eq!(zones[0], Rect::new(0, 0, 960, 1080));
        assert_eq!(zones[1], Rect::new(960, 0, 960, 540));
        assert_eq!(zones[2], Rect::new(1440, 540, 480, 540));
        assert_eq!(zones[3], Rect::new(960, 540, 480, 540));
    }

    #[test]
    fn test_later_splits_halve_regardless_of_ratio() {
        let mut algo = FibonacciAlgorithm;
        let zones = algo.calculate_zones(3, SCREEN, &params(0.9));
        // First cut takes 90%; the second halves the remaining strip.
        assert_eq!(zones[0].width, 1728);
        assert_eq!(zones[1].height, 540);
        assert_eq!(zones[2].height, 540);
    }

    #[test]
    fn test_monotone_shrinking_areas() {
        let mut algo = FibonacciAlgorithm;
        for screen in [SCREEN, OFFSET_SCREEN] {
            for split_ratio in SPLIT_RATIOS {
                for count in WINDOW_COUNTS {
                    let zones = algo.calculate_zones(count, screen, &params(split_ratio));
                    // Below 0.5 the first window is deliberately smaller
                    // than the rest of the spiral; the halving steps from
                    // the second window on must still shrink.
                    let start = if split_ratio >= 0.5 { 0 } else { 1 };
                    for (i, pair) in zones.windows(2).enumerate().skip(start) {
                        assert!(
                            pair[1].area() <= pair[0].area() + 1,
                            "areas must shrink along the spiral \
                             (screen {screen:?} ratio {split_ratio} count {count} index {i})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_deep_spiral_has_no_duplicate_zones() {
        // Aggressive first cut plus a deep spiral once exhausted the
        // remainder and emitted the same rect twice.
        let mut algo = FibonacciAlgorithm;
        for screen in [SCREEN, OFFSET_SCREEN] {
            let zones = algo.calculate_zones(20, screen, &params(0.9));
            assert_eq!(zones.len(), 20);
            for (i, a) in zones.iter().enumerate() {
                for b in &zones[i + 1..] {
                    assert_ne!(a, b, "duplicate zone on {screen:?}");
                }
            }
        }
    }

    #[test]
    fn test_zones_tile_screen_exactly() {
        let mut algo = FibonacciAlgorithm;
        for count in [2, 3, 5, 8, 20] {
            for ratio in [0.1, 0.5, 0.618, 0.9] {
                let zones = algo.calculate_zones(count, SCREEN, &params(ratio));
                assert_eq!(zones.len(), count);
                let total: i64 = zones.iter().map(Rect::area).sum();
                assert_eq!(total, SCREEN.area(), "count={count} ratio={ratio}");
                for (i, a) in zones.iter().enumerate() {
                    assert!(a.is_valid(), "degenerate zone at count={count} ratio={ratio}");
                    assert!(SCREEN.contains_rect(a));
                    for b in &zones[i + 1..] {
                        assert!(!a.intersects(b), "overlap at count={count} ratio={ratio}");
                    }
                }
            }
        }
    }
}
