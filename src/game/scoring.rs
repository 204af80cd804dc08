//! Alignment search and round scoring
//!
//! Finds the rotational correspondence between the target polygon and the
//! canonicalized user clicks that minimizes summed squared positional
//! error, then derives the distance score, the per-edge angle error and
//! the displayed percentage.

use glam::DVec2;

use super::coords::LayoutMode;
use super::geom::{centroid, heading, normalize_angle_difference, sort_by_angle};
use super::placement::{PlacementFrame, expected_position};
use crate::consts::MAX_SCORED_ERROR;

/// Outcome of scoring a sealed round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundScore {
    /// RMS pixel error, rounded to the nearest pixel
    pub distance_error: u32,
    /// Mean per-edge angular error in degrees
    pub angle_error: f64,
    /// 100 at zero error, falling linearly to 0 at an average error of
    /// `MAX_SCORED_ERROR` pixels or more
    pub percentage: u32,
    /// Which canonicalized user point corresponds to target point 0
    pub best_start_index: usize,
}

impl RoundScore {
    /// Angle error as displayed, one decimal place
    pub fn angle_error_text(&self) -> String {
        format!("{:.1}", self.angle_error)
    }
}

/// Canonical user point order shared by the scorer and comparison builder
///
/// Fewer than three points keep click order. Otherwise points sort by
/// angle around their own centroid; a mirrored target winds the opposite
/// way, so the sorted ring is reversed in mirror mode.
pub fn order_user_points(points: &[DVec2], mirror: bool) -> Vec<DVec2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let center = centroid(points);
    let mut sorted = sort_by_angle(points, center);
    if mirror {
        sorted.reverse();
    }
    sorted
}

/// Score a sealed round
///
/// `user_clicks` must hold exactly as many points as `target_points` (the
/// session seals a round only once the counts match) and the polygon must
/// have at least two vertices. All outputs are finite for finite input.
pub fn score_round(
    target_points: &[DVec2],
    user_clicks: &[DVec2],
    frame: &PlacementFrame,
) -> RoundScore {
    debug_assert_eq!(
        user_clicks.len(),
        target_points.len(),
        "scoring invoked with a partial click set"
    );
    debug_assert!(target_points.len() >= 2);

    let ordered = order_user_points(user_clicks, frame.mirror);
    let (min_error, best_start_index) = best_alignment(target_points, &ordered, frame);
    let angle_error = mean_edge_angle_error(target_points, &ordered, best_start_index, frame);

    let distance_error = (min_error / target_points.len() as f64).sqrt().round() as u32;
    let fraction = 1.0 - (distance_error as f64).min(MAX_SCORED_ERROR) / MAX_SCORED_ERROR;
    let percentage = (fraction * 100.0).round().max(0.0) as u32;

    RoundScore {
        distance_error,
        angle_error,
        percentage,
        best_start_index,
    }
}

/// Minimum summed squared error over the candidate start offsets
///
/// Ties resolve to the first (lowest) offset via the strict comparison.
fn best_alignment(target: &[DVec2], user: &[DVec2], frame: &PlacementFrame) -> (f64, usize) {
    // Relative mode with three or more points must still search every
    // start offset because the angular sort decouples the ring from click
    // order; only the two-point relative case has a single correspondence.
    let try_all_offsets = frame.absolute || user.len() >= 3;
    if !try_all_offsets {
        return (alignment_error(target, user, 0, frame), 0);
    }

    let mut min_error = f64::INFINITY;
    let mut best_start_index = 0;
    for start_offset in 0..target.len() {
        let error = alignment_error(target, user, start_offset, frame);
        if error < min_error {
            min_error = error;
            best_start_index = start_offset;
        }
    }
    (min_error, best_start_index)
}

/// Summed squared distance between each user point and where it belongs
/// under the hypothesis that `user[start_offset]` matches target point 0
fn alignment_error(
    target: &[DVec2],
    user: &[DVec2],
    start_offset: usize,
    frame: &PlacementFrame,
) -> f64 {
    let ref_target = target[0];
    let ref_user = user[start_offset];

    let mut error_squared = 0.0;
    for (i, &t) in target.iter().enumerate() {
        let u = user[(start_offset + i) % user.len()];
        let expected = expected_position(frame, t, ref_target, ref_user);
        error_squared += expected.distance_squared(u);
    }
    error_squared
}

/// Mean per-edge angular error in degrees at the winning offset
fn mean_edge_angle_error(
    target: &[DVec2],
    user: &[DVec2],
    start_index: usize,
    frame: &PlacementFrame,
) -> f64 {
    let n = target.len();
    let mut total = 0.0;

    for i in 0..n {
        let t1 = target[i];
        let t2 = target[(i + 1) % n];
        let u1 = user[(start_index + i) % n];
        let u2 = user[(start_index + i + 1) % n];

        // A mirrored target edge is judged by its reflected direction
        let target_angle = if frame.mirror {
            match frame.layout {
                LayoutMode::Horizontal => (t2.y - t1.y).atan2(-(t2.x - t1.x)),
                LayoutMode::Vertical => (-(t2.y - t1.y)).atan2(t2.x - t1.x),
            }
        } else {
            heading(t1, t2)
        };
        let user_angle = heading(u1, u2);

        let diff = normalize_angle_difference((target_angle - user_angle).abs());
        total += diff.to_degrees();
    }

    total / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(0.0, 10.0),
        ]
    }

    fn frame(mirror: bool, absolute: bool) -> PlacementFrame {
        PlacementFrame {
            layout: LayoutMode::Horizontal,
            divider: 100.0,
            mirror,
            absolute,
        }
    }

    #[test]
    fn test_identical_points_score_perfect() {
        let target = square();
        let score = score_round(&target, &target, &frame(false, false));

        assert_eq!(score.distance_error, 0);
        assert_eq!(score.percentage, 100);
        assert_eq!(score.angle_error_text(), "0.0");
        assert_eq!(score.best_start_index, 0);
    }

    #[test]
    fn test_relative_mode_ignores_translation() {
        let target = square();
        let user: Vec<DVec2> = target.iter().map(|p| *p + DVec2::new(3.0, 0.0)).collect();
        let score = score_round(&target, &user, &frame(false, false));

        assert_eq!(score.percentage, 100);
        assert_eq!(score.distance_error, 0);
    }

    #[test]
    fn test_rotated_click_order_scores_perfect() {
        let target = square();
        // Same vertices, clicked starting from a different corner
        for start in 1..target.len() {
            let user: Vec<DVec2> = (0..target.len())
                .map(|i| target[(start + i) % target.len()])
                .collect();
            let score = score_round(&target, &user, &frame(false, false));
            assert_eq!(score.percentage, 100, "start {start}");
            assert_eq!(score.angle_error_text(), "0.0", "start {start}");
        }
    }

    #[test]
    fn test_absolute_mode_expected_placement_scores_perfect() {
        let target = square();
        let user: Vec<DVec2> = target
            .iter()
            .map(|p| DVec2::new(p.x + 100.0, p.y))
            .collect();
        let score = score_round(&target, &user, &frame(false, true));

        assert_eq!(score.distance_error, 0);
        assert_eq!(score.percentage, 100);
    }

    #[test]
    fn test_absolute_mirror_reflection_scores_perfect() {
        let target = square();
        let user: Vec<DVec2> = target
            .iter()
            .map(|p| DVec2::new(100.0 + (100.0 - p.x), p.y))
            .collect();
        let score = score_round(&target, &user, &frame(true, true));

        assert_eq!(score.distance_error, 0);
        assert_eq!(score.percentage, 100);
        assert_eq!(score.angle_error_text(), "0.0");
    }

    #[test]
    fn test_two_point_relative_skips_offset_search() {
        let target = vec![DVec2::new(0.0, 0.0), DVec2::new(50.0, 0.0)];

        // Click order matching the target's order: perfect
        let user = vec![DVec2::new(200.0, 5.0), DVec2::new(250.0, 5.0)];
        let score = score_round(&target, &user, &frame(false, false));
        assert_eq!(score.percentage, 100);
        assert_eq!(score.best_start_index, 0);

        // Reversed click order: no search for n < 3 in relative mode, so
        // the mismatch is scored as-is
        let user = vec![DVec2::new(250.0, 5.0), DVec2::new(200.0, 5.0)];
        let score = score_round(&target, &user, &frame(false, false));
        assert!(score.percentage < 100);
        assert_eq!(score.best_start_index, 0);
    }

    #[test]
    fn test_tie_breaks_to_lowest_offset() {
        // Two coincident clicks make both start offsets equally wrong
        let target = vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
        let user = vec![DVec2::new(105.0, 0.0), DVec2::new(105.0, 0.0)];
        let score = score_round(&target, &user, &frame(false, true));

        assert_eq!(score.best_start_index, 0);
        // Each point sits 5 px from its expected position
        assert_eq!(score.distance_error, 5);
        assert_eq!(score.percentage, 95);
    }

    #[test]
    fn test_percentage_bottoms_out_at_zero() {
        let target = vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
        // Clicks hundreds of pixels from the expected absolute placement
        let user = vec![DVec2::new(500.0, 400.0), DVec2::new(510.0, 400.0)];
        let score = score_round(&target, &user, &frame(false, true));

        assert!(score.distance_error >= 100);
        assert_eq!(score.percentage, 0);
    }

    #[test]
    fn test_distance_error_is_rms() {
        // One point dead on, one point 10 px off: rms = sqrt(100/2) ≈ 7
        let target = vec![DVec2::new(0.0, 0.0), DVec2::new(50.0, 0.0)];
        let user = vec![DVec2::new(100.0, 0.0), DVec2::new(160.0, 0.0)];
        let score = score_round(&target, &user, &frame(false, true));

        assert_eq!(score.distance_error, 7);
        assert_eq!(score.percentage, 93);
    }

    #[test]
    fn test_relative_mirror_accepts_reflected_translated_copy() {
        // Reflect the square across a vertical axis, then translate it
        // somewhere arbitrary: relative mirror scoring must still find a
        // zero-error alignment even though the winding flipped.
        let target = square();
        let user: Vec<DVec2> = target
            .iter()
            .map(|p| DVec2::new(-p.x + 437.0, p.y + 82.0))
            .collect();
        let score = score_round(&target, &user, &frame(true, false));

        assert_eq!(score.distance_error, 0);
        assert_eq!(score.percentage, 100);
        assert_eq!(score.angle_error_text(), "0.0");
    }

    #[test]
    fn test_angle_error_for_skewed_copy() {
        // Horizontal segment copied with a vertical skew: the single edge
        // pair differs by atan2(10, 50) ≈ 11.3°, and a two-point polygon
        // wraps into two identical edges, so the mean stays 11.3°.
        let target = vec![DVec2::new(0.0, 0.0), DVec2::new(50.0, 0.0)];
        let user = vec![DVec2::new(200.0, 0.0), DVec2::new(250.0, 10.0)];
        let score = score_round(&target, &user, &frame(false, false));

        assert_eq!(score.angle_error_text(), "11.3");
    }

    #[test]
    fn test_outputs_always_finite() {
        let target = square();
        let user = vec![
            DVec2::new(430.0, 210.0),
            DVec2::new(470.0, 230.0),
            DVec2::new(450.0, 260.0),
            DVec2::new(420.0, 240.0),
        ];
        for mirror in [false, true] {
            for absolute in [false, true] {
                let score = score_round(&target, &user, &frame(mirror, absolute));
                assert!(score.angle_error.is_finite());
                assert!(score.percentage <= 100);
            }
        }
    }
}
