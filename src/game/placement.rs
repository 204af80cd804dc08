//! Expected point placement under the active mode flags
//!
//! The scorer and the comparison-shape builder must agree exactly on where
//! a user point belongs, so both go through this one transform.

use glam::DVec2;

use super::coords::LayoutMode;

/// Mode flags and geometry the placement transform depends on
#[derive(Debug, Clone, Copy)]
pub struct PlacementFrame {
    pub layout: LayoutMode,
    /// Pixel coordinate of the zone divider along the layout axis
    pub divider: f64,
    pub mirror: bool,
    pub absolute: bool,
}

/// Where a user point belongs for a given target point
///
/// Absolute mode carries the target across the divider into the copy zone,
/// reflected when mirrored. Relative mode reproduces the target's offset
/// from its anchor (`ref_target`, always target point 0) starting at the
/// user's anchor (`ref_user`), with the divider axis negated when mirrored.
pub fn expected_position(
    frame: &PlacementFrame,
    target: DVec2,
    ref_target: DVec2,
    ref_user: DVec2,
) -> DVec2 {
    if frame.absolute {
        return match frame.layout {
            LayoutMode::Horizontal => {
                let x = if frame.mirror {
                    frame.divider + (frame.divider - target.x)
                } else {
                    target.x + frame.divider
                };
                DVec2::new(x, target.y)
            }
            LayoutMode::Vertical => {
                let y = if frame.mirror {
                    frame.divider + (frame.divider - target.y)
                } else {
                    target.y + frame.divider
                };
                DVec2::new(target.x, y)
            }
        };
    }

    let mut d = target - ref_target;
    if frame.mirror {
        match frame.layout {
            LayoutMode::Horizontal => d.x = -d.x,
            LayoutMode::Vertical => d.y = -d.y,
        }
    }
    ref_user + d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(layout: LayoutMode, mirror: bool, absolute: bool) -> PlacementFrame {
        PlacementFrame {
            layout,
            divider: 100.0,
            mirror,
            absolute,
        }
    }

    #[test]
    fn test_absolute_translates_across_divider() {
        let f = frame(LayoutMode::Horizontal, false, true);
        let target = DVec2::new(10.0, 20.0);
        let p = expected_position(&f, target, DVec2::ZERO, DVec2::ZERO);
        assert_eq!(p, DVec2::new(110.0, 20.0));
    }

    #[test]
    fn test_absolute_mirror_reflects_across_divider() {
        let f = frame(LayoutMode::Horizontal, true, true);
        let target = DVec2::new(10.0, 20.0);
        let p = expected_position(&f, target, DVec2::ZERO, DVec2::ZERO);
        // 100 + (100 - 10)
        assert_eq!(p, DVec2::new(190.0, 20.0));
    }

    #[test]
    fn test_absolute_vertical_layout_uses_y_axis() {
        let f = frame(LayoutMode::Vertical, false, true);
        let p = expected_position(&f, DVec2::new(10.0, 20.0), DVec2::ZERO, DVec2::ZERO);
        assert_eq!(p, DVec2::new(10.0, 120.0));

        let f = frame(LayoutMode::Vertical, true, true);
        let p = expected_position(&f, DVec2::new(10.0, 20.0), DVec2::ZERO, DVec2::ZERO);
        assert_eq!(p, DVec2::new(10.0, 180.0));
    }

    #[test]
    fn test_relative_reproduces_anchor_offset() {
        let f = frame(LayoutMode::Horizontal, false, false);
        let ref_target = DVec2::new(5.0, 5.0);
        let ref_user = DVec2::new(500.0, 50.0);
        let target = DVec2::new(15.0, 2.0);
        let p = expected_position(&f, target, ref_target, ref_user);
        assert_eq!(p, DVec2::new(510.0, 47.0));
    }

    #[test]
    fn test_relative_mirror_negates_divider_axis() {
        let ref_target = DVec2::ZERO;
        let ref_user = DVec2::new(500.0, 50.0);
        let target = DVec2::new(10.0, 4.0);

        let f = frame(LayoutMode::Horizontal, true, false);
        assert_eq!(
            expected_position(&f, target, ref_target, ref_user),
            DVec2::new(490.0, 54.0)
        );

        let f = frame(LayoutMode::Vertical, true, false);
        assert_eq!(
            expected_position(&f, target, ref_target, ref_user),
            DVec2::new(510.0, 46.0)
        );
    }
}
