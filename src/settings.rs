//! Game settings and preferences
//!
//! Validated at the boundary before the core ever sees them; persisted in
//! LocalStorage on the web target.

use serde::{Deserialize, Serialize};

use crate::consts::{
    COPY_AREA_MASK_MS, DEFAULT_PASS_THRESHOLD, MAX_POINTS, MIN_POINTS, TARGET_VISIBILITY_MS,
};

/// Player-facing game options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Vertices per pattern (2-8)
    pub point_count: usize,
    /// Judge the copy as a reflection across the divider
    pub mirror_mode: bool,
    /// Judge literal mirrored position instead of shape-relative offsets
    pub absolute_mode: bool,
    /// Hide the target and mask the copy zone on round-start timers
    pub memory_mode: bool,
    /// Dashed preview line from the last placed point to the cursor
    pub ghost_line: bool,
    /// Full-canvas crosshair under the cursor
    pub alignment_guides: bool,
    /// How long the target stays visible in memory mode (ms)
    pub target_visibility_ms: f64,
    /// How long the copy zone stays masked in memory mode (ms)
    pub copy_mask_ms: f64,
    /// Minimum percentage that keeps a streak alive
    pub pass_threshold: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            point_count: MIN_POINTS,
            mirror_mode: false,
            absolute_mode: false,
            memory_mode: false,
            ghost_line: true,
            alignment_guides: false,
            target_visibility_ms: TARGET_VISIBILITY_MS,
            copy_mask_ms: COPY_AREA_MASK_MS,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

impl Settings {
    /// Clamp every field into its valid range
    ///
    /// Non-finite durations fall back to their defaults; negative
    /// durations clamp to zero.
    pub fn sanitize(&mut self) {
        self.point_count = self.point_count.clamp(MIN_POINTS, MAX_POINTS);
        if !self.target_visibility_ms.is_finite() {
            self.target_visibility_ms = TARGET_VISIBILITY_MS;
        }
        self.target_visibility_ms = self.target_visibility_ms.max(0.0);
        if !self.copy_mask_ms.is_finite() {
            self.copy_mask_ms = COPY_AREA_MASK_MS;
        }
        self.copy_mask_ms = self.copy_mask_ms.max(0.0);
        self.pass_threshold = self.pass_threshold.min(100);
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "shape_trace_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(mut settings) = serde_json::from_str::<Settings>(&json) {
                    settings.sanitize();
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
