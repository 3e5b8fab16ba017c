#![forbid(unsafe_code)]

//! Nearest-child insertion search.
//!
//! Given a pointer inside a container, find the child whose box is nearest
//! and decide whether the payload goes before or after it. When the
//! container's own top or bottom edge is nearer than any child (block flow
//! only), the insertion snaps to the start or end of the child list.
//!
//! # Invariants
//!
//! 1. The returned index is in `0..=children.len()`.
//! 2. A pointer inside a child's box stops the scan: later children are
//!    never measured.
//! 3. Children without a box are skipped; if none has a box the result is
//!    index 0 with no hint.

use dragon_core::geometry::{
    Point, Rect, distance_to_edge, distance_to_rect, is_near_after, point_in_rect,
};

use crate::document::NodeId;
use crate::location::{Align, LocationDetail, NearInfo, NearPos};

/// How a rendered element flows relative to its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildLayout {
    /// Inline-level element.
    pub inline: bool,
    /// Its parent lays children out horizontally (a flex row).
    pub row: bool,
}

impl ChildLayout {
    #[must_use]
    pub const fn block() -> Self {
        Self {
            inline: false,
            row: false,
        }
    }

    #[must_use]
    pub const fn inline() -> Self {
        Self {
            inline: true,
            row: false,
        }
    }

    #[must_use]
    pub const fn row() -> Self {
        Self {
            inline: false,
            row: true,
        }
    }

    /// Siblings sit side by side.
    #[must_use]
    pub const fn is_vertical_bar(&self) -> bool {
        self.inline || self.row
    }
}

/// Geometry lookups for the children of one container.
pub trait ChildGeometry {
    /// Box of `child` in canvas space.
    fn child_rect(&mut self, child: NodeId) -> Option<Rect>;

    /// Layout of `child`. Only called for the chosen nearest child.
    fn child_layout(&mut self, child: NodeId) -> ChildLayout;
}

struct Candidate {
    index: usize,
    node: NodeId,
    rect: Rect,
    distance: f64,
}

/// Compute the insertion detail for `point` inside a container whose box
/// is `edge`.
pub fn search<G: ChildGeometry + ?Sized>(
    point: Point,
    edge: Rect,
    children: &[NodeId],
    geometry: &mut G,
) -> LocationDetail {
    let mut detail = LocationDetail::at(0, edge);
    let mut nearest: Option<Candidate> = None;
    let mut min_top: Option<f64> = None;
    let mut max_bottom: Option<f64> = None;

    for (index, &node) in children.iter().enumerate() {
        let Some(rect) = geometry.child_rect(node) else {
            continue;
        };
        if point_in_rect(point, &rect) {
            nearest = Some(Candidate {
                index,
                node,
                rect,
                distance: 0.0,
            });
            break;
        }
        let distance = distance_to_rect(point, &rect);
        min_top = Some(min_top.map_or(rect.top(), |t| t.min(rect.top())));
        max_bottom = Some(max_bottom.map_or(rect.bottom(), |b| b.max(rect.bottom())));
        if nearest.as_ref().is_none_or(|n| distance < n.distance) {
            nearest = Some(Candidate {
                index,
                node,
                rect,
                distance,
            });
        }
    }

    let Some(near) = nearest else {
        return detail;
    };

    let layout = geometry.child_layout(near.node);
    let vertical = layout.is_vertical_bar();
    let mut info = NearInfo {
        node: near.node,
        pos: NearPos::Before,
        rect: None,
        align: if vertical { Align::V } else { Align::H },
    };
    detail.index = near.index;
    if is_near_after(point, &near.rect, vertical) {
        info.pos = NearPos::After;
        detail.index = near.index + 1;
    }

    // Block flow: the container's own top/bottom edge can beat the child.
    if !layout.row && near.distance != 0.0 {
        let to_edge = distance_to_edge(point, &edge);
        if to_edge.distance < near.distance {
            let top = min_top.unwrap_or(edge.top());
            let bottom = max_bottom.unwrap_or(edge.bottom());
            info.rect = Some(Rect::from_edges(edge.left(), top, edge.right(), bottom));
            info.align = Align::H;
            if to_edge.near_after {
                info.pos = NearPos::After;
                detail.index = children.len();
            } else {
                info.pos = NearPos::Before;
                detail.index = 0;
            }
        }
    }

    detail.near = Some(info);
    detail
}
