//! Gap application pass
//!
//! Shrinks algorithm-computed zones so that edges on the screen boundary
//! get the outer gap and adjacent zones split the inner gap between them.
//! Runs after every layout pass; algorithms themselves produce gap-free,
//! exactly-tiling rectangles.

use crate::geometry::Rect;

use super::constants::{gap, zone};

/// Applies inner/outer gap spacing to calculated zones in place
///
/// Edges are classified by proximity: a zone edge within
/// [`gap::EDGE_THRESHOLD`] pixels of the screen edge is an outer edge and
/// is inset by `outer_gap`; every other edge is interior and is inset by
/// half the inner gap. The half-split uses ceiling on left/top and floor
/// on right/bottom so two zones sharing an edge end up exactly
/// `inner_gap` pixels apart.
///
/// Zones that would collapse below [`zone::MIN_SIZE`] along an axis are
/// re-centred at minimum size within their original bounds instead of
/// expanding into neighbours.
pub fn apply_gaps(zones: &mut [Rect], screen: Rect, inner_gap: i32, outer_gap: i32) {
    if zones.is_empty() {
        return;
    }

    let inner_gap = inner_gap.clamp(gap::MIN, gap::MAX);
    let outer_gap = outer_gap.clamp(gap::MIN, gap::MAX);

    // A single zone has no neighbours: outer gaps only, kept at minimum
    // size by re-centring inside the outer-gap frame.
    if zones.len() == 1 {
        let z = &mut zones[0];
        let mut left = z.left() + outer_gap;
        let mut top = z.top() + outer_gap;
        let mut right = z.right() - outer_gap;
        let mut bottom = z.bottom() - outer_gap;

        if right - left < zone::MIN_SIZE {
            let center = z.left() + z.width / 2;
            left = (center - zone::MIN_SIZE / 2).max(screen.left() + outer_gap);
            right = (left + zone::MIN_SIZE).min(screen.right() - outer_gap);
        }
        if bottom - top < zone::MIN_SIZE {
            let center = z.top() + z.height / 2;
            top = (center - zone::MIN_SIZE / 2).max(screen.top() + outer_gap);
            bottom = (top + zone::MIN_SIZE).min(screen.bottom() - outer_gap);
        }

        *z = Rect::from_edges(left, top, right, bottom);
        return;
    }

    // Interior edges: left/top take the ceiling half, right/bottom the
    // floor half, so the two sides of a shared edge sum to inner_gap.
    let half_floor = inner_gap / 2;
    let half_ceil = inner_gap - half_floor;

    for z in zones.iter_mut() {
        let original = *z;

        let mut left = z.left();
        let mut top = z.top();
        let mut right = z.right();
        let mut bottom = z.bottom();

        if (left - screen.left()).abs() <= gap::EDGE_THRESHOLD {
            left = screen.left() + outer_gap;
        } else {
            left += half_ceil;
        }

        if (top - screen.top()).abs() <= gap::EDGE_THRESHOLD {
            top = screen.top() + outer_gap;
        } else {
            top += half_ceil;
        }

        if (right - screen.right()).abs() <= gap::EDGE_THRESHOLD {
            right = screen.right() - outer_gap;
        } else {
            right -= half_floor;
        }

        if (bottom - screen.bottom()).abs() <= gap::EDGE_THRESHOLD {
            bottom = screen.bottom() - outer_gap;
        } else {
            bottom -= half_floor;
        }

        // Collapsed zones re-centre at minimum size within their original
        // bounds so they never bleed into a neighbour's space.
        if right - left < zone::MIN_SIZE {
            let center = original.left() + original.width / 2;
            left = (center - zone::MIN_SIZE / 2).max(original.left());
            right = (left + zone::MIN_SIZE).min(original.right());
        }
        if bottom - top < zone::MIN_SIZE {
            let center = original.top() + original.height / 2;
            top = (center - zone::MIN_SIZE / 2).max(original.top());
            bottom = (top + zone::MIN_SIZE).min(original.bottom());
        }

        *z = Rect::from_edges(left, top, right, bottom);
    }
}
