//! Target pattern generation
//!
//! Vertices land on a randomized ring centered in the target zone, get a
//! per-vertex distortion, and are rotated so the vertex nearest the canvas
//! origin comes first (that vertex renders as the reference marker).

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use std::f64::consts::{PI, TAU};

use super::coords::{LayoutMode, Viewport};
use crate::consts::{MAX_DISTORTION, MAX_PATTERN_RADIUS, MIN_PATTERN_RADIUS};

/// Generate a target polygon in pixel space, whole-pixel coordinates
pub fn generate(rng: &mut Pcg32, num_points: usize, viewport: &Viewport) -> Vec<DVec2> {
    let radius = rng.random_range(MIN_PATTERN_RADIUS..MAX_PATTERN_RADIUS);

    let center = match viewport.layout {
        LayoutMode::Horizontal => DVec2::new(viewport.width / 4.0, viewport.height / 2.0),
        LayoutMode::Vertical => DVec2::new(viewport.width / 2.0, viewport.height / 4.0),
    };

    let start_angle = rng.random_range(0.0..TAU);
    // Two points sit on a diameter; more spread evenly around the ring
    let angle_increment = if num_points == 2 {
        PI
    } else {
        TAU / num_points as f64
    };

    let points: Vec<DVec2> = (0..num_points)
        .map(|i| {
            let angle = start_angle + i as f64 * angle_increment;
            let ideal = center + radius * DVec2::new(angle.cos(), angle.sin());
            let distortion = DVec2::new(
                (rng.random::<f64>() - 0.5) * MAX_DISTORTION,
                (rng.random::<f64>() - 0.5) * MAX_DISTORTION,
            );
            (ideal + distortion).round()
        })
        .collect();

    reorder_closest_to_origin(points)
}

/// Rotate the ring so the vertex nearest the canvas origin is first
fn reorder_closest_to_origin(points: Vec<DVec2>) -> Vec<DVec2> {
    let mut closest = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        if p.length_squared() < points[closest].length_squared() {
            closest = i;
        }
    }
    (0..points.len())
        .map(|i| points[(closest + i) % points.len()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_generates_requested_point_count() {
        let mut rng = Pcg32::seed_from_u64(1);
        for n in 2..=8 {
            assert_eq!(generate(&mut rng, n, &viewport()).len(), n);
        }
    }

    #[test]
    fn test_same_seed_same_pattern() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        assert_eq!(generate(&mut a, 5, &viewport()), generate(&mut b, 5, &viewport()));
    }

    #[test]
    fn test_points_stay_near_target_zone_center() {
        let mut rng = Pcg32::seed_from_u64(7);
        let vp = viewport();
        let center = DVec2::new(200.0, 300.0);
        // Ring radius plus the diagonal of the per-axis distortion band,
        // plus rounding slack
        let diagonal = (MAX_DISTORTION / 2.0) * std::f64::consts::SQRT_2;
        let reach = MAX_PATTERN_RADIUS + diagonal + 1.0;

        for _ in 0..50 {
            for p in generate(&mut rng, 6, &vp) {
                assert!((p - center).length() <= reach, "{p} too far from {center}");
            }
        }
    }

    #[test]
    fn test_coordinates_are_whole_pixels() {
        let mut rng = Pcg32::seed_from_u64(3);
        for p in generate(&mut rng, 8, &viewport()) {
            assert_eq!(p.x, p.x.round());
            assert_eq!(p.y, p.y.round());
        }
    }

    #[test]
    fn test_first_point_is_closest_to_origin() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..20 {
            let points = generate(&mut rng, 5, &viewport());
            let min = points
                .iter()
                .map(|p| p.length_squared())
                .fold(f64::INFINITY, f64::min);
            assert_eq!(points[0].length_squared(), min);
        }
    }

    #[test]
    fn test_reorder_is_cyclic() {
        let ring = vec![
            DVec2::new(300.0, 300.0),
            DVec2::new(100.0, 100.0),
            DVec2::new(300.0, 100.0),
        ];
        let reordered = reorder_closest_to_origin(ring);
        assert_eq!(
            reordered,
            vec![
                DVec2::new(100.0, 100.0),
                DVec2::new(300.0, 100.0),
                DVec2::new(300.0, 300.0),
            ]
        );
    }
}
