//! Property-based invariant tests for positioning geometry.
//!
//! These tests verify invariants that must hold for any valid inputs:
//!
//! 1. `distance_to_rect` is zero exactly when `point_in_rect` holds.
//! 2. `distance_to_rect` never exceeds the distance to any corner.
//! 3. `distance_to_edge` picks the nearer horizontal edge.
//! 4. Block before/after classification is symmetric around the midpoint.
//! 5. Presses that stay within the shake radius over the same target never shake.
//! 6. Viewport canvas <-> global conversion round-trips.

use dragon_core::event::ElementId;
use dragon_core::geometry::{
    Point, Rect, distance_to_edge, distance_to_rect, is_near_after, point_in_rect,
};
use dragon_core::shake::{DEFAULT_SHAKE_DISTANCE, ShakeDetector};
use dragon_core::viewport::Viewport;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500i32..=500, -500i32..=500, 1i32..=400, 1i32..=400)
        .prop_map(|(x, y, w, h)| Rect::new(x as f64, y as f64, w as f64, h as f64))
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-1000i32..=1000, -1000i32..=1000).prop_map(|(x, y)| Point::new(x as f64, y as f64))
}

fn corners(r: &Rect) -> [Point; 4] {
    [
        Point::new(r.left(), r.top()),
        Point::new(r.right(), r.top()),
        Point::new(r.left(), r.bottom()),
        Point::new(r.right(), r.bottom()),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Zero distance iff inside
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zero_distance_iff_inside(r in rect_strategy(), p in point_strategy()) {
        let inside = point_in_rect(p, &r);
        let d = distance_to_rect(p, &r);
        prop_assert_eq!(inside, d == 0.0, "p={:?} r={:?} d={}", p, r, d);
        prop_assert!(d >= 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Distance bounded by corners
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn distance_bounded_by_corners(r in rect_strategy(), p in point_strategy()) {
        let d = distance_to_rect(p, &r);
        for c in corners(&r) {
            let to_corner = p.distance_squared(c).sqrt();
            prop_assert!(
                d <= to_corner + 1e-9,
                "distance {} exceeds corner distance {} for p={:?} r={:?}",
                d, to_corner, p, r
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Edge distance is the smaller edge gap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edge_distance_is_min(r in rect_strategy(), p in point_strategy()) {
        let e = distance_to_edge(p, &r);
        let top = (p.y - r.top()).abs();
        let bottom = (p.y - r.bottom()).abs();
        prop_assert_eq!(e.distance, top.min(bottom));
        prop_assert_eq!(e.near_after, bottom < top);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Block classification symmetric around the midpoint
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn block_midpoint_symmetry(
        top in -500i32..=500,
        height in 4i32..=400,
        x in -1000i32..=1000,
    ) {
        let r = Rect::new(0.0, top as f64, 100.0, height as f64);
        let mid = r.center_y();
        let before = Point::new(x as f64, mid - 1.0);
        let after = Point::new(x as f64, mid + 1.0);
        prop_assert!(!is_near_after(before, &r, false));
        prop_assert!(is_near_after(after, &r, false));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Shake threshold
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn small_moves_never_shake(
        origin in point_strategy(),
        dx in -4i32..=4,
        dy in -4i32..=4,
        target in proptest::option::of(0u64..10),
    ) {
        prop_assume!(dx * dx + dy * dy <= 16);
        let target = target.map(ElementId);
        let d = ShakeDetector::new(origin, target, DEFAULT_SHAKE_DISTANCE);
        let pos = Point::new(origin.x + dx as f64, origin.y + dy as f64);
        prop_assert!(!d.is_shaken(pos, target));
    }

    #[test]
    fn large_moves_always_shake(
        origin in point_strategy(),
        dx in -50i32..=50,
        dy in -50i32..=50,
    ) {
        prop_assume!(dx * dx + dy * dy > 16);
        let d = ShakeDetector::new(origin, None, DEFAULT_SHAKE_DISTANCE);
        let pos = Point::new(origin.x + dx as f64, origin.y + dy as f64);
        prop_assert!(d.is_shaken(pos, None));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Viewport round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn viewport_round_trip(
        bounds in rect_strategy(),
        scale_pct in 10u32..=400,
        scroll in point_strategy(),
        canvas in point_strategy(),
    ) {
        let vp = Viewport::new(bounds)
            .with_scale(scale_pct as f64 / 100.0)
            .with_scroll(scroll);
        let back = vp.global_to_canvas(vp.canvas_to_global(canvas));
        prop_assert!((back.x - canvas.x).abs() < 1e-6, "{:?} vs {:?}", back, canvas);
        prop_assert!((back.y - canvas.y).abs() < 1e-6, "{:?} vs {:?}", back, canvas);
    }
}
