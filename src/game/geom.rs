//! Point-set geometry for polygon comparison
//!
//! Small pure helpers shared by the scorer, the comparison builder and the
//! pattern generator.

use glam::DVec2;
use std::f64::consts::PI;

/// Direction of the edge from `a` to `b`, in (-π, π]
#[inline]
pub fn heading(a: DVec2, b: DVec2) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Arithmetic mean of a point set
///
/// Callers guarantee a non-empty slice; every call site holds at least
/// three points.
pub fn centroid(points: &[DVec2]) -> DVec2 {
    let sum = points.iter().fold(DVec2::ZERO, |acc, p| acc + *p);
    sum / points.len() as f64
}

/// Map a non-negative angular delta onto the shortest arc, [0, π]
#[inline]
pub fn normalize_angle_difference(diff: f64) -> f64 {
    if diff > PI { 2.0 * PI - diff } else { diff }
}

/// Sort points by angle around `center`, ascending
///
/// The sort is stable: points at equal angles keep their input order, so
/// canonicalization stays deterministic.
pub fn sort_by_angle(points: &[DVec2], center: DVec2) -> Vec<DVec2> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        let angle_a = (a.y - center.y).atan2(a.x - center.x);
        let angle_b = (b.y - center.y).atan2(b.x - center.x);
        angle_a
            .partial_cmp(&angle_b)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
}
