//! Binary space partitioning tiling algorithm
//!
//! Unlike the other algorithms, BSP keeps a persistent split tree between
//! layout passes, matching the behavior of bspwm and Hyprland's dwindle
//! layout. Single-step window count changes modify only one leaf's
//! neighbourhood, so existing splits keep their directions when windows
//! come and go:
//!
//! ```text
//! +-------------+-------------+
//! |             |             |
//! |      1      |      2      |
//! |             |             |
//! +-------------+------+------+
//! |             |      |      |
//! |      3      |  4   |  5   |
//! |             |      |      |
//! +-------------+------+------+
//! ```
//!
//! Nodes live in an index arena owned by the algorithm; parent links are
//! plain indices, and the whole arena is dropped on rebuild. The tree is
//! mutated inside `calculate_zones`, so a `BspAlgorithm` instance must
//! only be driven from one thread (the engine's control thread).

use tracing::warn;

use crate::geometry::Rect;

use super::constants::ratio;
use super::traits::{LayoutParams, TilingAlgorithm};

/// Window-count jumps larger than this rebuild the tree from scratch
/// instead of stepping it leaf by leaf.
const INCREMENTAL_STEP: i64 = 1;

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    Leaf,
    Split {
        /// true = top/bottom split, false = left/right
        horizontal: bool,
        ratio: f64,
        first: usize,
        second: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct Node {
    parent: Option<usize>,
    kind: NodeKind,
    /// Computed geometry, written during the layout pass
    rect: Rect,
}

/// Recursive split layout with a persistent tree
#[derive(Debug, Default)]
pub struct BspAlgorithm {
    nodes: Vec<Node>,
    free_slots: Vec<usize>,
    root: Option<usize>,
    leaf_count: usize,
}

/// Cut position inside `total`, keeping a pixel on each side when possible
fn split_point(total: i32, split_ratio: f64) -> i32 {
    let cut = (total as f64 * split_ratio) as i32;
    if total >= 2 { cut.clamp(1, total - 1) } else { cut.max(0) }
}

/// Split direction for a region: perpendicular to its longest axis,
/// vertical (left/right) when square
fn direction_for(rect: Rect) -> bool {
    rect.height > rect.width
}

impl BspAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, node: Node) -> usize {
        if let Some(idx) = self.free_slots.pop() {
            self.nodes[idx] = node;
            idx
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    fn release(&mut self, idx: usize) {
        self.free_slots.push(idx);
    }

    /// Drops the whole tree
    fn reset(&mut self) {
        self.nodes.clear();
        self.free_slots.clear();
        self.root = None;
        self.leaf_count = 0;
    }

    /// Builds a balanced tree for `count` windows from scratch
    fn rebuild(&mut self, count: usize, screen: Rect) {
        self.reset();
        if count == 0 {
            return;
        }
        let root = self.build_subtree(screen, count, None);
        self.root = Some(root);
        self.leaf_count = count;
    }

    fn build_subtree(&mut self, rect: Rect, count: usize, parent: Option<usize>) -> usize {
        if count <= 1 {
            return self.alloc(Node {
                parent,
                kind: NodeKind::Leaf,
                rect,
            });
        }

        let idx = self.alloc(Node {
            parent,
            kind: NodeKind::Leaf,
            rect,
        });

        // First child gets the ceiling half of the windows.
        let first_count = count.div_ceil(2);
        let second_count = count - first_count;

        let horizontal = direction_for(rect);
        let (first_rect, second_rect) = if horizontal {
            let split_y = rect.y + split_point(rect.height, 0.5);
            (
                Rect::from_edges(rect.x, rect.y, rect.right(), split_y),
                Rect::from_edges(rect.x, split_y, rect.right(), rect.bottom()),
            )
        } else {
            let split_x = rect.x + split_point(rect.width, 0.5);
            (
                Rect::from_edges(rect.x, rect.y, split_x, rect.bottom()),
                Rect::from_edges(split_x, rect.y, rect.right(), rect.bottom()),
            )
        };

        let first = self.build_subtree(first_rect, first_count, Some(idx));
        let second = self.build_subtree(second_rect, second_count, Some(idx));
        self.nodes[idx].kind = NodeKind::Split {
            horizontal,
            ratio: 0.5,
            first,
            second,
        };
        idx
    }

    /// Collects `(index, depth)` for every leaf in tree order
    fn leaves(&self, idx: usize, depth: usize, out: &mut Vec<(usize, usize)>) {
        match self.nodes[idx].kind {
            NodeKind::Leaf => out.push((idx, depth)),
            NodeKind::Split { first, second, .. } => {
                self.leaves(first, depth + 1, out);
                self.leaves(second, depth + 1, out);
            }
        }
    }

    fn count_leaves(&self, idx: usize) -> usize {
        match self.nodes[idx].kind {
            NodeKind::Leaf => 1,
            NodeKind::Split { first, second, .. } => {
                self.count_leaves(first) + self.count_leaves(second)
            }
        }
    }

    /// Splits one leaf to make room for an extra window
    ///
    /// The largest leaf (by area) is split for the most balanced result;
    /// ties prefer the deepest, then leftmost candidate. When geometry has
    /// not been assigned yet the deepest-rightmost leaf is used instead.
    fn grow(&mut self, screen: Rect) {
        let Some(root) = self.root else {
            let idx = self.alloc(Node {
                parent: None,
                kind: NodeKind::Leaf,
                rect: screen,
            });
            self.root = Some(idx);
            self.leaf_count = 1;
            return;
        };

        let mut leaf_info = Vec::new();
        self.leaves(root, 0, &mut leaf_info);

        let geometry_assigned = leaf_info.iter().all(|(i, _)| self.nodes[*i].rect.is_valid());
        let mut target = leaf_info[0].0;
        if geometry_assigned {
            let mut best_area = self.nodes[target].rect.area();
            let mut best_depth = leaf_info[0].1;
            for &(idx, depth) in &leaf_info[1..] {
                let area = self.nodes[idx].rect.area();
                if area > best_area || (area == best_area && depth > best_depth) {
                    target = idx;
                    best_area = area;
                    best_depth = depth;
                }
            }
        } else {
            let mut best_depth = leaf_info[0].1;
            for &(idx, depth) in &leaf_info[1..] {
                if depth >= best_depth {
                    target = idx;
                    best_depth = depth;
                }
            }
        }

        let rect = self.nodes[target].rect;
        let basis = if rect.is_valid() { rect } else { screen };
        let horizontal = direction_for(basis);
        let (first_rect, second_rect) = if horizontal {
            let split_y = rect.y + split_point(rect.height, 0.5);
            (
                Rect::from_edges(rect.x, rect.y, rect.right(), split_y),
                Rect::from_edges(rect.x, split_y, rect.right(), rect.bottom()),
            )
        } else {
            let split_x = rect.x + split_point(rect.width, 0.5);
            (
                Rect::from_edges(rect.x, rect.y, split_x, rect.bottom()),
                Rect::from_edges(split_x, rect.y, rect.right(), rect.bottom()),
            )
        };

        let first = self.alloc(Node {
            parent: Some(target),
            kind: NodeKind::Leaf,
            rect: first_rect,
        });
        let second = self.alloc(Node {
            parent: Some(target),
            kind: NodeKind::Leaf,
            rect: second_rect,
        });
        self.nodes[target].kind = NodeKind::Split {
            horizontal,
            ratio: 0.5,
            first,
            second,
        };
        self.leaf_count += 1;
    }

    /// Removes the deepest-rightmost leaf, promoting its sibling
    ///
    /// The promoted subtree keeps all of its split directions and ratios;
    /// nothing else in the tree moves.
    fn shrink(&mut self) {
        let Some(root) = self.root else {
            return;
        };
        if self.leaf_count <= 1 {
            self.reset();
            return;
        }

        let mut leaf_info = Vec::new();
        self.leaves(root, 0, &mut leaf_info);

        let mut target = leaf_info[0].0;
        let mut best_depth = leaf_info[0].1;
        for &(idx, depth) in &leaf_info[1..] {
            if depth >= best_depth {
                target = idx;
                best_depth = depth;
            }
        }

        let Some(parent) = self.nodes[target].parent else {
            // Lone leaf as root; leaf_count said otherwise, so start over.
            self.reset();
            return;
        };

        let sibling = match self.nodes[parent].kind {
            NodeKind::Split { first, second, .. } => {
                if first == target {
                    second
                } else {
                    first
                }
            }
            NodeKind::Leaf => {
                self.reset();
                return;
            }
        };

        // Move the sibling's contents into the parent slot so references
        // to the parent stay valid, then fix up child back-links.
        let sibling_node = self.nodes[sibling];
        let grandparent = self.nodes[parent].parent;
        self.nodes[parent] = Node {
            parent: grandparent,
            ..sibling_node
        };
        if let NodeKind::Split { first, second, .. } = self.nodes[parent].kind {
            self.nodes[first].parent = Some(parent);
            self.nodes[second].parent = Some(parent);
        }

        self.release(target);
        self.release(sibling);
        self.leaf_count -= 1;
    }

    /// Writes geometry top-down from `rect`, overriding every split with
    /// the uniform state ratio (the ratio slider is one knob, not
    /// per-node)
    fn apply_geometry(&mut self, idx: usize, rect: Rect, split_ratio: f64) {
        self.nodes[idx].rect = rect;

        let (horizontal, first, second) = match &mut self.nodes[idx].kind {
            NodeKind::Leaf => return,
            NodeKind::Split {
                horizontal,
                ratio,
                first,
                second,
            } => {
                *ratio = split_ratio;
                (*horizontal, *first, *second)
            }
        };

        let (first_rect, second_rect) = if horizontal {
            let split_y = rect.y + split_point(rect.height, split_ratio);
            (
                Rect::from_edges(rect.x, rect.y, rect.right(), split_y),
                Rect::from_edges(rect.x, split_y, rect.right(), rect.bottom()),
            )
        } else {
            let split_x = rect.x + split_point(rect.width, split_ratio);
            (
                Rect::from_edges(rect.x, rect.y, split_x, rect.bottom()),
                Rect::from_edges(split_x, rect.y, rect.right(), rect.bottom()),
            )
        };

        self.apply_geometry(first, first_rect, split_ratio);
        self.apply_geometry(second, second_rect, split_ratio);
    }

    fn collect_zones(&self, idx: usize, zones: &mut Vec<Rect>) {
        match self.nodes[idx].kind {
            NodeKind::Leaf => zones.push(self.nodes[idx].rect),
            NodeKind::Split { first, second, .. } => {
                self.collect_zones(first, zones);
                self.collect_zones(second, zones);
            }
        }
    }
}

impl TilingAlgorithm for BspAlgorithm {
    fn id(&self) -> &'static str {
        "bsp"
    }

    fn name(&self) -> &'static str {
        "BSP"
    }

    fn description(&self) -> &'static str {
        "Binary space partitioning - recursive split layout"
    }

    fn icon_name(&self) -> &'static str {
        "view-grid-symbolic"
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
        if window_count == 0 {
            self.reset();
            return Vec::new();
        }

        let split_ratio = params.split_ratio.clamp(ratio::MIN, ratio::MAX);

        let current = if self.root.is_some() {
            self.leaf_count as i64
        } else {
            0
        };
        let delta = window_count as i64 - current;

        if self.root.is_none() || delta.abs() > INCREMENTAL_STEP {
            self.rebuild(window_count, screen);
        } else if delta == 1 {
            self.grow(screen);
        } else if delta == -1 {
            self.shrink();
        }

        // A tree that lost track of its leaves is rebuilt, not reported.
        match self.root {
            Some(root) if self.count_leaves(root) == window_count => {}
            _ => {
                warn!(
                    window_count,
                    "bsp tree leaf count out of sync, rebuilding"
                );
                self.rebuild(window_count, screen);
            }
        }

        let Some(root) = self.root else {
            return Vec::new();
        };

        self.apply_geometry(root, screen, split_ratio);

        let mut zones = Vec::with_capacity(window_count);
        self.collect_zones(root, &mut zones);
        zones
    }
}
