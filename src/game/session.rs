//! Session state and round lifecycle
//!
//! Single-writer state object: every mutation goes through a named
//! operation so the platform layer stays a thin adapter. Memory-mode
//! timers are deadlines tagged with a round serial and applied in
//! `advance`, so a deadline scheduled in an earlier round can never leak
//! into the current one.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::comparison::comparison_shape;
use super::coords::Viewport;
use super::pattern;
use super::placement::PlacementFrame;
use super::scoring::{RoundScore, score_round};
use crate::settings::Settings;
use crate::stats::SessionStats;

/// Where the session is in the round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start screen, no round on the canvas
    Menu,
    /// Round open, clicks accepted
    Tracing,
    /// Round sealed and scored, comparison overlay visible
    Review,
}

/// A memory-mode deadline, valid only for the round it was scheduled in
#[derive(Debug, Clone, Copy)]
struct Deadline {
    round: u64,
    at_ms: f64,
}

/// One player session: the current round plus accumulated statistics
#[derive(Debug)]
pub struct Session {
    pub settings: Settings,
    pub phase: Phase,
    pub viewport: Viewport,

    /// Frozen at round start
    pub target_points: Vec<DVec2>,
    pub normalized_target_points: Vec<DVec2>,
    /// One entry per accepted click, in click order
    pub user_clicks: Vec<DVec2>,
    pub normalized_user_clicks: Vec<DVec2>,
    /// Ideal placements, built when the round seals
    pub comparison_shape: Vec<DVec2>,
    pub normalized_comparison_shape: Vec<DVec2>,

    pub is_target_visible: bool,
    pub is_copy_area_hidden: bool,

    pub last_score: Option<RoundScore>,
    pub stats: SessionStats,

    /// Bumped at every round start; tags the memory-mode deadlines
    round_serial: u64,
    hide_target: Option<Deadline>,
    reveal_copy: Option<Deadline>,

    rng: Pcg32,
}

impl Session {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            settings: Settings::default(),
            phase: Phase::Menu,
            viewport,
            target_points: Vec::new(),
            normalized_target_points: Vec::new(),
            user_clicks: Vec::new(),
            normalized_user_clicks: Vec::new(),
            comparison_shape: Vec::new(),
            normalized_comparison_shape: Vec::new(),
            is_target_visible: true,
            is_copy_area_hidden: false,
            last_score: None,
            stats: SessionStats::new(),
            round_serial: 0,
            hide_target: None,
            reveal_copy: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The placement transform for the current viewport and mode flags
    pub fn placement_frame(&self) -> PlacementFrame {
        PlacementFrame {
            layout: self.viewport.layout,
            divider: self.viewport.divider(),
            mirror: self.settings.mirror_mode,
            absolute: self.settings.absolute_mode,
        }
    }

    /// Whether the memory-mode mask currently blocks the copy zone
    pub fn mask_active(&self) -> bool {
        self.phase == Phase::Tracing && self.settings.memory_mode && self.is_copy_area_hidden
    }

    pub fn can_undo(&self) -> bool {
        self.phase == Phase::Tracing && !self.user_clicks.is_empty()
    }

    /// Open a new round: snapshot settings, freeze a fresh target, arm the
    /// memory-mode deadlines
    pub fn start_round(&mut self, mut settings: Settings, now_ms: f64) {
        settings.sanitize();
        self.settings = settings;
        self.round_serial += 1;

        self.user_clicks.clear();
        self.normalized_user_clicks.clear();
        self.comparison_shape.clear();
        self.normalized_comparison_shape.clear();
        self.last_score = None;
        self.phase = Phase::Tracing;
        self.is_target_visible = true;
        self.is_copy_area_hidden = self.settings.memory_mode;

        self.target_points =
            pattern::generate(&mut self.rng, self.settings.point_count, &self.viewport);
        self.normalized_target_points = self
            .target_points
            .iter()
            .map(|&p| self.viewport.to_normalized(p, true))
            .collect();

        self.hide_target = None;
        self.reveal_copy = None;
        if self.settings.memory_mode {
            self.hide_target = Some(Deadline {
                round: self.round_serial,
                at_ms: now_ms + self.settings.target_visibility_ms,
            });
            self.reveal_copy = Some(Deadline {
                round: self.round_serial,
                at_ms: now_ms + self.settings.copy_mask_ms,
            });
        }

        log::info!(
            "round {} started: {} points, mirror={} absolute={} memory={}",
            self.round_serial,
            self.settings.point_count,
            self.settings.mirror_mode,
            self.settings.absolute_mode,
            self.settings.memory_mode,
        );
    }

    /// Accept a click in the copy zone; seals the round once the click
    /// count matches the target. Returns whether the click was accepted.
    pub fn record_click(&mut self, p: DVec2) -> bool {
        if self.phase != Phase::Tracing
            || self.mask_active()
            || !self.viewport.accepts_copy_click(p)
        {
            return false;
        }

        self.user_clicks.push(p);
        self.normalized_user_clicks
            .push(self.viewport.to_normalized(p, false));

        if self.user_clicks.len() == self.settings.point_count {
            self.end_round();
        }
        true
    }

    /// Remove the most recent click while the round is open
    pub fn undo_last_click(&mut self) {
        if self.phase != Phase::Tracing || self.user_clicks.is_empty() {
            return;
        }
        self.user_clicks.pop();
        self.normalized_user_clicks.pop();
    }

    /// Seal the round. A complete click set is scored; anything short of
    /// that records the fixed failure penalty (not an error path; the
    /// round may be force-ended from outside).
    pub fn end_round(&mut self) {
        if self.phase != Phase::Tracing {
            return;
        }
        self.phase = Phase::Review;
        self.is_target_visible = true;
        self.is_copy_area_hidden = false;
        self.hide_target = None;
        self.reveal_copy = None;

        if self.user_clicks.len() != self.settings.point_count {
            self.stats.record_failure();
            log::info!(
                "round {} abandoned with {}/{} points",
                self.round_serial,
                self.user_clicks.len(),
                self.settings.point_count,
            );
            return;
        }

        let frame = self.placement_frame();
        let score = score_round(&self.target_points, &self.user_clicks, &frame);
        self.comparison_shape = comparison_shape(
            &self.user_clicks,
            &self.target_points,
            score.best_start_index,
            &frame,
        );
        self.normalized_comparison_shape = self
            .comparison_shape
            .iter()
            .map(|&p| self.viewport.to_normalized(p, false))
            .collect();

        let passed = score.percentage >= self.settings.pass_threshold;
        self.stats.record(score.distance_error as f64, passed);
        log::info!(
            "round {} scored: {}% ({} px rms, {}°)",
            self.round_serial,
            score.percentage,
            score.distance_error,
            score.angle_error_text(),
        );
        self.last_score = Some(score);
    }

    /// Apply any due memory-mode deadline. A deadline fires only if its
    /// round serial still matches the current round; stale ones are
    /// dropped unapplied. Returns whether visible state changed.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let mut changed = false;

        if let Some(d) = self.hide_target {
            if now_ms >= d.at_ms {
                self.hide_target = None;
                if d.round == self.round_serial && self.phase == Phase::Tracing {
                    self.is_target_visible = false;
                    changed = true;
                }
            }
        }

        if let Some(d) = self.reveal_copy {
            if now_ms >= d.at_ms {
                self.reveal_copy = None;
                if d.round == self.round_serial && self.phase == Phase::Tracing {
                    self.is_copy_area_hidden = false;
                    changed = true;
                }
            }
        }

        changed
    }

    /// Clear results, streak and all round-scoped state back to the menu
    pub fn reset(&mut self) {
        self.stats.reset();
        self.target_points.clear();
        self.normalized_target_points.clear();
        self.user_clicks.clear();
        self.normalized_user_clicks.clear();
        self.comparison_shape.clear();
        self.normalized_comparison_shape.clear();
        self.last_score = None;
        self.phase = Phase::Menu;
        self.is_target_visible = true;
        self.is_copy_area_hidden = false;
        self.hide_target = None;
        self.reveal_copy = None;
        log::info!("session stats reset");
    }

    /// Reproject every pixel-space point set after a resize or layout flip
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.target_points = self
            .normalized_target_points
            .iter()
            .map(|&p| viewport.to_pixels(p, true))
            .collect();
        self.user_clicks = self
            .normalized_user_clicks
            .iter()
            .map(|&p| viewport.to_pixels(p, false))
            .collect();
        self.comparison_shape = self
            .normalized_comparison_shape
            .iter()
            .map(|&p| viewport.to_pixels(p, false))
            .collect();
    }

    /// Redraw-only toggles that may flip mid-round
    pub fn set_ghost_line(&mut self, enabled: bool) {
        self.settings.ghost_line = enabled;
    }

    pub fn set_alignment_guides(&mut self, enabled: bool) {
        self.settings.alignment_guides = enabled;
    }
}
