//! Split-canvas coordinate spaces
//!
//! The canvas divides into a target zone and a copy zone along a
//! layout-dependent axis. Points persist in a zone-local normalized space
//! (-0.5..0.5 per axis) so a resize or layout flip can reproject them
//! without losing the shape.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::MOBILE_BREAKPOINT;

/// Which axis carries the divider between the two zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Side-by-side zones, divider is a vertical line
    Horizontal,
    /// Stacked zones, divider is a horizontal line
    Vertical,
}

impl LayoutMode {
    /// Layout for a given viewport width (narrow screens stack vertically)
    pub fn for_width(width: f64) -> Self {
        if width < MOBILE_BREAKPOINT {
            LayoutMode::Vertical
        } else {
            LayoutMode::Horizontal
        }
    }
}

/// One half of the split canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub center: DVec2,
    /// Square working size: the smaller zone dimension, so the usable area
    /// keeps its aspect ratio whatever shape the zone has
    pub size: f64,
}

/// Fraction of the zone size actually used; the rest is edge padding
const ZONE_SCALE: f64 = 0.85;

/// Canvas dimensions plus the active layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub layout: LayoutMode,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            layout: LayoutMode::for_width(width),
            width,
            height,
        }
    }

    /// Center and working size of one zone
    pub fn zone(&self, is_target_zone: bool) -> Zone {
        match self.layout {
            LayoutMode::Horizontal => {
                let section_width = self.width / 2.0;
                let center_x = if is_target_zone {
                    section_width / 2.0
                } else {
                    section_width * 1.5
                };
                Zone {
                    center: DVec2::new(center_x, self.height / 2.0),
                    size: section_width.min(self.height),
                }
            }
            LayoutMode::Vertical => {
                let section_height = self.height / 2.0;
                let center_y = if is_target_zone {
                    section_height / 2.0
                } else {
                    section_height * 1.5
                };
                Zone {
                    center: DVec2::new(self.width / 2.0, center_y),
                    size: self.width.min(section_height),
                }
            }
        }
    }

    /// Map a zone-local normalized point (-0.5..0.5 per axis) to pixels
    pub fn to_pixels(&self, normalized: DVec2, is_target_zone: bool) -> DVec2 {
        let zone = self.zone(is_target_zone);
        zone.center + normalized * (zone.size * ZONE_SCALE)
    }

    /// Map a pixel point back into the zone-local normalized space
    pub fn to_normalized(&self, pixel: DVec2, is_target_zone: bool) -> DVec2 {
        let zone = self.zone(is_target_zone);
        (pixel - zone.center) / (zone.size * ZONE_SCALE)
    }

    /// Pixel coordinate of the line splitting the two zones
    pub fn divider(&self) -> f64 {
        match self.layout {
            LayoutMode::Horizontal => self.width / 2.0,
            LayoutMode::Vertical => self.height / 2.0,
        }
    }

    /// Whether a pixel point lies in the copy (click-accepting) zone
    pub fn accepts_copy_click(&self, p: DVec2) -> bool {
        match self.layout {
            LayoutMode::Horizontal => p.x >= self.divider(),
            LayoutMode::Vertical => p.y >= self.divider(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_layout_breakpoint() {
        assert_eq!(LayoutMode::for_width(1024.0), LayoutMode::Horizontal);
        assert_eq!(LayoutMode::for_width(768.0), LayoutMode::Horizontal);
        assert_eq!(LayoutMode::for_width(500.0), LayoutMode::Vertical);
    }

    #[test]
    fn test_horizontal_zone_split() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.layout, LayoutMode::Horizontal);

        let target = vp.zone(true);
        assert_eq!(target.center, DVec2::new(200.0, 300.0));
        assert_eq!(target.size, 400.0);

        let copy = vp.zone(false);
        assert_eq!(copy.center, DVec2::new(600.0, 300.0));
        assert_eq!(copy.size, 400.0);
    }

    #[test]
    fn test_vertical_zone_split() {
        let vp = Viewport::new(400.0, 900.0);
        assert_eq!(vp.layout, LayoutMode::Vertical);

        let target = vp.zone(true);
        assert_eq!(target.center, DVec2::new(200.0, 225.0));
        assert_eq!(target.size, 400.0);

        let copy = vp.zone(false);
        assert_eq!(copy.center, DVec2::new(200.0, 675.0));
    }

    #[test]
    fn test_zone_size_preserves_aspect() {
        // Short wide canvas: height limits the zone size
        let vp = Viewport::new(1200.0, 300.0);
        assert_eq!(vp.zone(true).size, 300.0);
    }

    #[test]
    fn test_zone_center_maps_to_origin() {
        let vp = Viewport::new(800.0, 600.0);
        let center = vp.zone(false).center;
        assert_eq!(vp.to_normalized(center, false), DVec2::ZERO);
        assert_eq!(vp.to_pixels(DVec2::ZERO, false), center);
    }

    #[test]
    fn test_divider_per_layout() {
        assert_eq!(Viewport::new(800.0, 600.0).divider(), 400.0);
        assert_eq!(Viewport::new(400.0, 900.0).divider(), 450.0);
    }

    #[test]
    fn test_copy_zone_click_acceptance() {
        let vp = Viewport::new(800.0, 600.0);
        assert!(vp.accepts_copy_click(DVec2::new(401.0, 10.0)));
        assert!(vp.accepts_copy_click(DVec2::new(400.0, 10.0)));
        assert!(!vp.accepts_copy_click(DVec2::new(399.0, 10.0)));

        let vp = Viewport::new(400.0, 900.0);
        assert!(vp.accepts_copy_click(DVec2::new(10.0, 451.0)));
        assert!(!vp.accepts_copy_click(DVec2::new(10.0, 449.0)));
    }

    proptest! {
        #[test]
        fn round_trip_within_relative_tolerance(
            x in -0.5f64..0.5,
            y in -0.5f64..0.5,
            width in 100.0f64..4000.0,
            height in 100.0f64..4000.0,
            is_target in proptest::bool::ANY,
        ) {
            let vp = Viewport::new(width, height);
            let p = DVec2::new(x, y);
            let back = vp.to_normalized(vp.to_pixels(p, is_target), is_target);
            prop_assert!((back - p).length() <= 1e-9 * (1.0 + p.length()));
        }
    }
}
