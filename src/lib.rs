//! Shape Trace - a split-canvas shape tracing game
//!
//! Core modules:
//! - `game`: Deterministic game core (geometry, scoring, session state)
//! - `stats`: Per-round results, streak and rolling average
//! - `settings`: Player options with boundary validation
//! - `ui`: Display formatting and severity-tier colors
//! - `render`: Canvas2D drawing (wasm only)

pub mod game;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod settings;
pub mod stats;
pub mod ui;

pub use settings::Settings;
pub use stats::SessionStats;

/// Game configuration constants
pub mod consts {
    /// Pattern ring radius range (pixels)
    pub const MIN_PATTERN_RADIUS: f64 = 50.0;
    pub const MAX_PATTERN_RADIUS: f64 = 120.0;
    /// Full width of the per-vertex distortion band (±half on each axis)
    pub const MAX_DISTORTION: f64 = 40.0;

    /// Rendered dot radius for placed points
    pub const POINT_RADIUS: f64 = 3.0;

    /// Average pixel error at (or past) which the score bottoms out at 0%
    pub const MAX_SCORED_ERROR: f64 = 100.0;
    /// Accuracy recorded for a round abandoned before all points landed
    pub const FAILED_ROUND_ERROR: f64 = 200.0;

    /// Default target visibility window in memory mode (ms)
    pub const TARGET_VISIBILITY_MS: f64 = 2000.0;
    /// Default copy-area mask duration in memory mode (ms)
    pub const COPY_AREA_MASK_MS: f64 = 3000.0;
    /// Default pass threshold for streak tracking (percent)
    pub const DEFAULT_PASS_THRESHOLD: u32 = 90;

    /// Vertex count bounds for generated patterns
    pub const MIN_POINTS: usize = 2;
    pub const MAX_POINTS: usize = 8;

    /// Viewport width below which the canvas splits vertically
    pub const MOBILE_BREAKPOINT: f64 = 768.0;

    /// Pointer-up within this distance of pointer-down counts as a click
    pub const DRAG_THRESHOLD: f64 = 15.0;
    /// Pointer travel past this distance marks the gesture as a drag
    pub const DRAG_MOVE_EPSILON: f64 = 5.0;
    /// Minimum gap between accepted clicks (ms)
    pub const CLICK_COOLDOWN_MS: f64 = 150.0;
}
