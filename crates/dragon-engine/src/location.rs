#![forbid(unsafe_code)]

//! Drop containers and drop locations.

use dragon_core::geometry::Rect;

use crate::document::NodeId;
use crate::surface::InstanceId;

/// A node judged able to receive the payload, plus the rendered instance
/// used for geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropContainer {
    pub container: NodeId,
    pub instance: Option<InstanceId>,
}

/// Where the insertion indicator renders relative to [`NearInfo::node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NearPos {
    #[default]
    Before,
    After,
    /// The indicator fills the node's area instead of sitting at an edge.
    Replace,
}

/// Orientation of the insertion indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// A vertical bar between inline or row siblings.
    V,
    /// A horizontal bar between block siblings.
    #[default]
    H,
}

/// Hint for rendering the insertion indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearInfo {
    pub node: NodeId,
    pub pos: NearPos,
    /// Band spanning the container width when the drop snaps to a
    /// container edge.
    pub rect: Option<Rect>,
    pub align: Align,
}

/// Insertion index and geometry inside a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationDetail {
    /// In `0..=children.len()`.
    pub index: usize,
    /// Container's bounding rectangle in canvas space.
    pub edge: Rect,
    pub near: Option<NearInfo>,
}

impl LocationDetail {
    /// Insertion at `index` with no indicator hint.
    #[must_use]
    pub const fn at(index: usize, edge: Rect) -> Self {
        Self {
            index,
            edge,
            near: None,
        }
    }

    /// True when the indicator should fill the whole container (no
    /// sibling to attach to).
    #[must_use]
    pub fn fills_container(&self) -> bool {
        self.near.is_none()
    }
}

/// A concrete place where the payload would land.
#[derive(Debug, Clone, PartialEq)]
pub struct DropLocation {
    pub target: NodeId,
    pub detail: LocationDetail,
    /// Label of the sensor that produced the location.
    pub source: String,
}

impl DropLocation {
    #[must_use]
    pub fn new(target: NodeId, detail: LocationDetail, source: impl Into<String>) -> Self {
        Self {
            target,
            detail,
            source: source.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.detail.index
    }
}
