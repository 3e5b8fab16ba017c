#![forbid(unsafe_code)]

//! Grid drag mode.
//!
//! Some containers lay their children out on their own grid and render
//! their own placeholder instead of the generic insertion indicator. While
//! the pointer is over such a container the controller hands the gesture to
//! the grid through [`GridEvent`]s and stops producing drop locations.

use dragon_core::geometry::Point;

use crate::document::{Document, NodeId};

/// Decides whether the node under the pointer belongs to a grid.
pub trait GridStrategy {
    /// The grid container for `node`, if any.
    fn grid_of(&self, document: &dyn Document, node: NodeId) -> Option<NodeId>;
}

/// Metadata-driven strategy: a node is in a grid when it, or its parent,
/// renders a component flagged `is_grid`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaGrid;

impl GridStrategy for MetaGrid {
    fn grid_of(&self, document: &dyn Document, node: NodeId) -> Option<NodeId> {
        let is_grid = |n: NodeId| document.component_meta(n).is_some_and(|m| m.is_grid);
        if is_grid(node) {
            return Some(node);
        }
        document.parent(node).filter(|p| is_grid(*p))
    }
}

/// Notifications for grid containers.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// `false` while the pointer is over a grid, `true` once it leaves.
    Sleeping(bool),
    /// Show a placeholder for the dragged node.
    AddPlaceholder {
        grid: NodeId,
        from_grid: Option<NodeId>,
        node: Option<NodeId>,
        global: Point,
    },
    RemovePlaceholder,
    /// The dragged node was released over `grid`.
    Drop { grid: NodeId, node: Option<NodeId> },
}
