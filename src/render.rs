//! Canvas2D drawing
//!
//! Pure consumer of session state. Primitives mirror what the game needs
//! (polylines, dots, the memory-mode mask, guide overlays); `draw_scene`
//! owns draw order and visibility rules.

use glam::DVec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::POINT_RADIUS;
use crate::game::{LayoutMode, Phase, Session};
use crate::ui::{MASK_FONT, palette, placeholder};

// Style setters via property assignment, avoiding the deprecated
// JsValue-typed web-sys accessors.
fn set_fill_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(color),
    );
}

fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(color),
    );
}

fn dash_pattern(on: f64, off: f64) -> JsValue {
    js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)).into()
}

/// Polyline rendering options
#[derive(Debug, Clone, Copy, Default)]
pub struct LineOptions {
    pub closed: bool,
    pub dashed: bool,
}

/// Thin wrapper around a 2d context, sized in CSS pixels
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    pub fn draw_lines(&self, points: &[DVec2], color: &str, options: LineOptions) {
        if points.len() < 2 {
            return;
        }

        self.ctx.save();
        self.ctx.begin_path();
        set_stroke_style(&self.ctx, color);
        self.ctx.set_line_width(2.0);
        self.ctx.set_global_alpha(0.7);

        if options.dashed {
            let _ = self.ctx.set_line_dash(&dash_pattern(5.0, 5.0));
        }

        self.ctx.move_to(points[0].x, points[0].y);
        for p in &points[1..] {
            self.ctx.line_to(p.x, p.y);
        }
        if options.closed {
            self.ctx.close_path();
        }

        self.ctx.stroke();
        self.ctx.restore();
    }

    pub fn draw_point(&self, p: DVec2, color: &str, small: bool, reference: bool) {
        let fill = if reference {
            palette::TARGET_REFERENCE
        } else {
            color
        };
        let radius = if small { 2.0 } else { POINT_RADIUS };

        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(p.x, p.y, radius, 0.0, std::f64::consts::TAU);
        set_fill_style(&self.ctx, fill);
        self.ctx.fill();
    }

    pub fn draw_ghost_line(&self, from: DVec2, to: DVec2) {
        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        set_stroke_style(&self.ctx, palette::GHOST_LINE);
        self.ctx.set_line_width(2.0);
        let _ = self.ctx.set_line_dash(&dash_pattern(6.0, 4.0));
        self.ctx.stroke();
        self.ctx.restore();
    }

    pub fn draw_crosshair(&self, p: DVec2) {
        self.ctx.save();
        set_stroke_style(&self.ctx, palette::CROSSHAIR);
        self.ctx.set_line_width(1.0);
        let _ = self.ctx.set_line_dash(&dash_pattern(2.0, 2.0));

        self.ctx.begin_path();
        self.ctx.move_to(p.x, 0.0);
        self.ctx.line_to(p.x, self.height);
        self.ctx.move_to(0.0, p.y);
        self.ctx.line_to(self.width, p.y);
        self.ctx.stroke();

        self.ctx.restore();
    }

    /// Opaque cover over the copy zone with a wave texture and a caption
    pub fn draw_mask(&self, layout: LayoutMode, divider: f64, text: &str) {
        set_fill_style(&self.ctx, palette::MASK);
        match layout {
            LayoutMode::Horizontal => {
                self.ctx
                    .fill_rect(divider, 0.0, self.width - divider, self.height);
            }
            LayoutMode::Vertical => {
                self.ctx
                    .fill_rect(0.0, divider, self.width, self.height - divider);
            }
        }

        self.draw_mask_waves(layout, divider);

        set_fill_style(&self.ctx, palette::MASK_TEXT);
        self.ctx.set_font(MASK_FONT);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");

        let (text_x, text_y) = match layout {
            LayoutMode::Horizontal => (divider + (self.width - divider) / 2.0, self.height / 2.0),
            LayoutMode::Vertical => (self.width / 2.0, divider + (self.height - divider) / 2.0),
        };
        let _ = self.ctx.fill_text(text, text_x, text_y);
    }

    fn draw_mask_waves(&self, layout: LayoutMode, divider: f64) {
        let is_horizontal = layout == LayoutMode::Horizontal;
        let (start_x, start_y) = if is_horizontal {
            (divider, 0.0)
        } else {
            (0.0, divider)
        };
        let (zone_w, zone_h) = if is_horizontal {
            (self.width - divider, self.height)
        } else {
            (self.width, self.height - divider)
        };

        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.rect(start_x, start_y, zone_w, zone_h);
        let _ = self.ctx.clip();

        const WAVE_SPACING: f64 = 30.0;
        const AMPLITUDE: f64 = 20.0;
        const FREQUENCY: f64 = 0.02;

        let draw_pass = |color: &str, line_width: f64, spacing_mult: f64| {
            set_stroke_style(&self.ctx, color);
            self.ctx.set_line_width(line_width);

            let along = if is_horizontal { zone_w } else { zone_h };
            let across = if is_horizontal { zone_h } else { zone_w };

            let mut offset = 0.0;
            while offset < across + AMPLITUDE {
                self.ctx.begin_path();
                let mut t = 0.0;
                while t <= along {
                    let wave = (t * FREQUENCY).sin() * AMPLITUDE
                        + (t * FREQUENCY * 2.0 + offset * 0.05).sin() * (AMPLITUDE / 3.0);
                    let (x, y) = if is_horizontal {
                        (start_x + t, offset + wave)
                    } else {
                        (offset + wave, start_y + t)
                    };
                    if t == 0.0 {
                        self.ctx.move_to(x, y);
                    } else {
                        self.ctx.line_to(x, y);
                    }
                    t += 1.0;
                }
                self.ctx.stroke();
                offset += WAVE_SPACING * spacing_mult;
            }
        };

        draw_pass("rgba(255, 255, 255, 0.04)", 1.5, 1.0);
        draw_pass("rgba(255, 255, 255, 0.08)", 2.0, 5.0);

        self.ctx.restore();
    }

    pub fn draw_comparison_shape(&self, points: &[DVec2]) {
        self.draw_lines(
            points,
            palette::COMPARISON,
            LineOptions {
                closed: true,
                ..Default::default()
            },
        );
        for p in points {
            self.draw_point(*p, palette::COMPARISON, true, false);
        }
    }
}

/// Render the whole frame for the current session state
pub fn draw_scene(renderer: &CanvasRenderer, session: &Session, mouse: DVec2) {
    renderer.clear();

    if session.target_points.is_empty() || session.phase == Phase::Menu {
        return;
    }

    let layout = session.viewport.layout;
    let divider = session.viewport.divider();
    let tracing = session.phase == Phase::Tracing;

    draw_divider(renderer, session);

    // Target pattern, unless memory mode has hidden it mid-round
    let target_shown = !tracing || !session.settings.memory_mode || session.is_target_visible;
    if target_shown {
        renderer.draw_lines(
            &session.target_points,
            palette::TARGET_DEFAULT,
            LineOptions {
                closed: true,
                ..Default::default()
            },
        );
        for (index, p) in session.target_points.iter().enumerate() {
            // The first vertex marks the anchor, meaningless in absolute mode
            let reference = index == 0 && !session.settings.absolute_mode;
            renderer.draw_point(*p, palette::TARGET_DEFAULT, false, reference);
        }
    }

    if session.mask_active() {
        renderer.draw_mask(layout, divider, placeholder::MASK);
    } else {
        draw_user_interaction(renderer, session, mouse, tracing);
    }

    if session.phase == Phase::Review && !session.comparison_shape.is_empty() {
        renderer.draw_comparison_shape(&session.comparison_shape);
    }
}

fn draw_divider(renderer: &CanvasRenderer, session: &Session) {
    let divider = session.viewport.divider();
    let line = match session.viewport.layout {
        LayoutMode::Horizontal => [
            DVec2::new(divider, 0.0),
            DVec2::new(divider, session.viewport.height),
        ],
        LayoutMode::Vertical => [
            DVec2::new(0.0, divider),
            DVec2::new(session.viewport.width, divider),
        ],
    };
    renderer.draw_lines(&line, palette::DIVIDER, LineOptions::default());
}

fn draw_user_interaction(
    renderer: &CanvasRenderer,
    session: &Session,
    mouse: DVec2,
    tracing: bool,
) {
    if tracing && session.settings.alignment_guides {
        renderer.draw_crosshair(mouse);
    }

    let in_progress = tracing && session.user_clicks.len() < session.settings.point_count;

    if session.user_clicks.len() >= 2 {
        let color = if in_progress {
            palette::USER_LINES_PROGRESS
        } else {
            palette::USER_LINES_FINAL
        };
        renderer.draw_lines(
            &session.user_clicks,
            color,
            LineOptions {
                closed: !tracing,
                ..Default::default()
            },
        );
    }

    let ghost_shown = tracing
        && session.settings.ghost_line
        && !session.user_clicks.is_empty()
        && session.user_clicks.len() < session.settings.point_count;
    if ghost_shown {
        let last = session.user_clicks[session.user_clicks.len() - 1];
        renderer.draw_ghost_line(last, mouse);
    }

    let point_color = if in_progress {
        palette::USER_POINTS_PROGRESS
    } else {
        palette::USER_POINTS_FINAL
    };
    for p in &session.user_clicks {
        renderer.draw_point(*p, point_color, false, false);
    }
}
