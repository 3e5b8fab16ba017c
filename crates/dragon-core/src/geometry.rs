#![forbid(unsafe_code)]

//! Geometric primitives for drop positioning.
//!
//! All coordinates are CSS-like pixels with the origin at the top-left and
//! `y` growing downwards. Unlike layout rectangles, hit tests here are
//! inclusive on every edge: a pointer sitting exactly on the shared border
//! of two stacked children is inside both, and the first one scanned wins.

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    #[inline]
    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Offset by another point treated as a vector.
    #[inline]
    pub fn offset(&self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }

    /// True when both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from its four edges.
    ///
    /// A `right` left of `left` (or `bottom` above `top`) collapses to zero
    /// extent instead of producing a negative size.
    #[inline]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Inclusive containment test. See [`point_in_rect`].
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        point_in_rect(p, self)
    }

    /// Vertical midpoint.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Result of [`distance_to_edge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDistance {
    /// Distance to the nearer of the top and bottom edges.
    pub distance: f64,
    /// True when the bottom edge is strictly nearer than the top edge.
    pub near_after: bool,
}

/// True iff `r.top <= p.y <= r.bottom` and `r.left <= p.x <= r.right`.
#[inline]
pub fn point_in_rect(p: Point, r: &Rect) -> bool {
    p.y >= r.top() && p.y <= r.bottom() && p.x >= r.left() && p.x <= r.right()
}

/// Euclidean distance from `p` to the closest point of `r`.
///
/// Each axis contributes zero when the point's projection falls within the
/// rectangle's span on that axis, otherwise the distance to the nearer of
/// the two bounding edges.
pub fn distance_to_rect(p: Point, r: &Rect) -> f64 {
    let mut dx = (p.x - r.left()).abs().min((p.x - r.right()).abs());
    let mut dy = (p.y - r.top()).abs().min((p.y - r.bottom()).abs());

    if p.x >= r.left() && p.x <= r.right() {
        dx = 0.0;
    }
    if p.y >= r.top() && p.y <= r.bottom() {
        dy = 0.0;
    }

    (dx * dx + dy * dy).sqrt()
}

/// Vertical distance from `p` to the nearer horizontal edge of `r`.
pub fn distance_to_edge(p: Point, r: &Rect) -> EdgeDistance {
    let to_top = (p.y - r.top()).abs();
    let to_bottom = (p.y - r.bottom()).abs();
    EdgeDistance {
        distance: to_top.min(to_bottom),
        near_after: to_bottom < to_top,
    }
}

/// Classify `p` as closer to the trailing side of `r`.
///
/// Inline (row) layouts compare Manhattan distance to the top-left corner
/// against the bottom-right corner. Block layouts compare only the vertical
/// distance to the top and bottom edges. Ties classify as "before".
pub fn is_near_after(p: Point, r: &Rect, inline: bool) -> bool {
    if inline {
        let to_start = (p.x - r.left()).abs() + (p.y - r.top()).abs();
        let to_end = (p.x - r.right()).abs() + (p.y - r.bottom()).abs();
        return to_start > to_end;
    }
    (p.y - r.top()).abs() > (p.y - r.bottom()).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(top: f64, bottom: f64) -> Rect {
        Rect::from_edges(0.0, top, 100.0, bottom)
    }

    #[test]
    fn point_in_rect_is_inclusive() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(point_in_rect(Point::new(10.0, 10.0), &r));
        assert!(point_in_rect(Point::new(30.0, 30.0), &r));
        assert!(point_in_rect(Point::new(20.0, 15.0), &r));
        assert!(!point_in_rect(Point::new(30.1, 15.0), &r));
        assert!(!point_in_rect(Point::new(15.0, 9.9), &r));
    }

    #[test]
    fn from_edges_collapses_inverted() {
        let r = Rect::from_edges(10.0, 10.0, 5.0, 5.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
        assert!(r.is_empty());
    }

    #[test]
    fn distance_inside_is_zero() {
        assert_eq!(distance_to_rect(Point::new(5.0, 5.0), &rect(0.0, 10.0)), 0.0);
    }

    #[test]
    fn distance_single_axis() {
        // Directly below: only the vertical axis contributes.
        let d = distance_to_rect(Point::new(50.0, 13.0), &rect(0.0, 10.0));
        assert!((d - 3.0).abs() < f64::EPSILON);
        // Directly right.
        let d = distance_to_rect(Point::new(104.0, 5.0), &rect(0.0, 10.0));
        assert!((d - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_diagonal_is_euclidean() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let d = distance_to_rect(Point::new(13.0, 14.0), &r);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn edge_distance_prefers_nearer_edge() {
        let r = rect(0.0, 100.0);
        let e = distance_to_edge(Point::new(0.0, 90.0), &r);
        assert_eq!(e.distance, 10.0);
        assert!(e.near_after);

        let e = distance_to_edge(Point::new(0.0, 3.0), &r);
        assert_eq!(e.distance, 3.0);
        assert!(!e.near_after);
    }

    #[test]
    fn edge_distance_tie_is_before() {
        let e = distance_to_edge(Point::new(0.0, 50.0), &rect(0.0, 100.0));
        assert!(!e.near_after);
    }

    #[test]
    fn near_after_block_uses_vertical_only() {
        let r = rect(0.0, 10.0);
        assert!(!is_near_after(Point::new(500.0, 4.0), &r, false));
        assert!(is_near_after(Point::new(-500.0, 6.0), &r, false));
    }

    #[test]
    fn near_after_block_midpoint_symmetry() {
        let r = rect(10.0, 30.0);
        let mid = r.center_y();
        assert!(!is_near_after(Point::new(5.0, mid - 1.0), &r, false));
        assert!(is_near_after(Point::new(5.0, mid + 1.0), &r, false));
    }

    #[test]
    fn near_after_inline_uses_corners() {
        let r = Rect::new(0.0, 0.0, 40.0, 10.0);
        // Left part of a wide inline box is "before" even low in the box.
        assert!(!is_near_after(Point::new(5.0, 9.0), &r, true));
        assert!(is_near_after(Point::new(35.0, 1.0), &r, true));
    }

    #[test]
    fn point_distance_squared() {
        let a = Point::new(1.0, 1.0);
        assert_eq!(a.distance_squared(Point::new(4.0, 5.0)), 25.0);
        assert_eq!(a.offset(Point::new(2.0, -1.0)), Point::new(3.0, 0.0));
    }
}
