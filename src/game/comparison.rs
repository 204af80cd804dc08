//! Ideal-placement overlay for post-round feedback
//!
//! After a round seals, every user click gets paired with the spot it
//! should have landed on, rendered as an overlay in the copy zone.

use glam::DVec2;

use super::placement::{PlacementFrame, expected_position};
use super::scoring::order_user_points;

/// Where each user click should have landed under the winning alignment
///
/// Reapplies the scorer's canonicalization (this runs independently after
/// scoring), then projects every target point through the shared placement
/// transform. Output length always equals the click count.
pub fn comparison_shape(
    user_clicks: &[DVec2],
    target_points: &[DVec2],
    best_start_index: usize,
    frame: &PlacementFrame,
) -> Vec<DVec2> {
    let ordered = order_user_points(user_clicks, frame.mirror);
    let ref_target = target_points[0];
    let ref_user = ordered[best_start_index];

    (0..ordered.len())
        .map(|i| {
            let target = target_points[(best_start_index + i) % target_points.len()];
            expected_position(frame, target, ref_target, ref_user)
        })
        .collect()
}
