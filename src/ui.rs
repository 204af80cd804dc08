//! Display formatting and severity-tier colors
//!
//! Pure helpers consumed by the HUD: threshold-bucketed colors for the
//! score and angle-error readouts, the shared palette, and the
//! placeholder strings shown before the first result.

/// One severity tier: the color applies at or above `threshold`
#[derive(Debug, Clone, Copy)]
pub struct ColorTier {
    pub threshold: f64,
    pub color: &'static str,
}

/// Highest-threshold-met-wins lookup over a descending tier table
pub fn tier_color(tiers: &[ColorTier], value: f64) -> Option<&'static str> {
    tiers.iter().find(|t| value >= t.threshold).map(|t| t.color)
}

/// Canvas and HUD colors
pub mod palette {
    pub const MASK: &str = "#18181b";
    pub const MASK_TEXT: &str = "#9a9aa3";
    pub const TARGET_DEFAULT: &str = "#4fd1c5";
    pub const TARGET_REFERENCE: &str = "#e6f7f4";
    pub const USER_LINES_PROGRESS: &str = "rgba(79, 209, 197, 0.25)";
    pub const USER_LINES_FINAL: &str = "#7dd3fc";
    pub const USER_POINTS_PROGRESS: &str = "#93c5fd";
    pub const USER_POINTS_FINAL: &str = "#a5d8ff";
    pub const GHOST_LINE: &str = "#a5b4fc";
    pub const CROSSHAIR: &str = "#8a8a8e";
    pub const COMPARISON: &str = "#c4b5fd";
    pub const DIVIDER: &str = "#e5e7eb";
    pub const PRECISION_FULL: &str = "#34d399";
    pub const PRECISION_HIGH: &str = "#fbbf24";
    pub const PRECISION_MEDIUM: &str = "#fb923c";
    pub const PRECISION_LOW: &str = "#f87171";
    pub const PROGRESS_BAR_FALLBACK: &str = "oklch(48% 0.05 250)";
    pub const TEXT_FALLBACK: &str = "#cccccc";
}

/// HUD placeholder strings
pub mod placeholder {
    pub const SCORE: &str = "--";
    pub const ANGLE_ERROR: &str = "--";
    pub const STREAK: &str = "--";
    pub const AVERAGE: &str = "n/a";
    pub const MASK: &str = "Wait...";
}

/// Font for the copy-zone mask caption
pub const MASK_FONT: &str =
    "bold 2.4rem Roboto, Inter, system-ui, -apple-system, Segoe UI, sans-serif";

/// Score percentage tiers, best first
pub const SCORE_TIERS: [ColorTier; 4] = [
    ColorTier { threshold: 85.0, color: palette::PRECISION_FULL },
    ColorTier { threshold: 70.0, color: palette::PRECISION_HIGH },
    ColorTier { threshold: 50.0, color: palette::PRECISION_MEDIUM },
    ColorTier { threshold: 0.0, color: palette::PRECISION_LOW },
];

/// Angle-error tiers in degrees; inverted, low is good
pub const ANGLE_ERROR_TIERS: [ColorTier; 4] = [
    ColorTier { threshold: 15.0, color: palette::PRECISION_LOW },
    ColorTier { threshold: 10.0, color: palette::PRECISION_MEDIUM },
    ColorTier { threshold: 5.0, color: palette::PRECISION_HIGH },
    ColorTier { threshold: 0.0, color: palette::PRECISION_FULL },
];

pub fn score_color(percentage: u32) -> &'static str {
    tier_color(&SCORE_TIERS, percentage as f64).unwrap_or(palette::TEXT_FALLBACK)
}

pub fn angle_error_color(degrees: f64) -> &'static str {
    tier_color(&ANGLE_ERROR_TIERS, degrees).unwrap_or(palette::TEXT_FALLBACK)
}

/// "Round" vs "Rounds" for the attempts readout
pub fn attempts_label(attempts: usize) -> &'static str {
    if attempts == 1 { "Round" } else { "Rounds" }
}

/// Streak readout; a broken streak shows the placeholder
pub fn format_streak(streak: u32) -> String {
    if streak > 0 {
        streak.to_string()
    } else {
        placeholder::STREAK.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_tier_boundaries() {
        assert_eq!(score_color(100), palette::PRECISION_FULL);
        assert_eq!(score_color(85), palette::PRECISION_FULL);
        assert_eq!(score_color(84), palette::PRECISION_HIGH);
        assert_eq!(score_color(70), palette::PRECISION_HIGH);
        assert_eq!(score_color(69), palette::PRECISION_MEDIUM);
        assert_eq!(score_color(50), palette::PRECISION_MEDIUM);
        assert_eq!(score_color(49), palette::PRECISION_LOW);
        assert_eq!(score_color(0), palette::PRECISION_LOW);
    }

    #[test]
    fn test_angle_tiers_inverted() {
        assert_eq!(angle_error_color(0.0), palette::PRECISION_FULL);
        assert_eq!(angle_error_color(4.9), palette::PRECISION_FULL);
        assert_eq!(angle_error_color(5.0), palette::PRECISION_HIGH);
        assert_eq!(angle_error_color(10.0), palette::PRECISION_MEDIUM);
        assert_eq!(angle_error_color(15.0), palette::PRECISION_LOW);
        assert_eq!(angle_error_color(90.0), palette::PRECISION_LOW);
    }

    #[test]
    fn test_tier_color_below_all_tiers_is_none() {
        assert_eq!(tier_color(&SCORE_TIERS, -1.0), None);
    }

    #[test]
    fn test_attempts_label_pluralizes() {
        assert_eq!(attempts_label(0), "Rounds");
        assert_eq!(attempts_label(1), "Round");
        assert_eq!(attempts_label(2), "Rounds");
    }

    #[test]
    fn test_format_streak() {
        assert_eq!(format_streak(0), "--");
        assert_eq!(format_streak(3), "3");
    }
}
