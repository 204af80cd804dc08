//! Shape Trace entry point
//!
//! Handles platform-specific initialization: DOM and event wiring plus the
//! frame loop on the web target, a scripted smoke round on native.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement,
        HtmlSelectElement, KeyboardEvent, PointerEvent,
    };

    use shape_trace::Settings;
    use shape_trace::consts::{CLICK_COOLDOWN_MS, DRAG_MOVE_EPSILON, DRAG_THRESHOLD};
    use shape_trace::game::{Phase, Session, Viewport};
    use shape_trace::render::{CanvasRenderer, draw_scene};
    use shape_trace::ui;

    /// Pointer gesture tracking for drag-vs-click disambiguation
    #[derive(Default)]
    struct PointerState {
        down_pos: DVec2,
        dragging: bool,
        moved: bool,
        last_click_ms: f64,
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: CanvasRenderer,
        mouse: DVec2,
        pointer: PointerState,
    }

    impl Game {
        fn draw(&self) {
            draw_scene(&self.renderer, &self.session, self.mouse);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Shape Trace starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = setup_canvas(&canvas);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, Viewport::new(width, height));
        let renderer = CanvasRenderer::new(ctx, width, height);

        // Stored options pre-fill the menu controls
        apply_settings_to_controls(&document, &Settings::load());

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            mouse: DVec2::ZERO,
            pointer: PointerState::default(),
        }));

        log::info!("Session initialized with seed: {}", seed);

        setup_pointer_handlers(&canvas, game.clone());
        setup_keyboard_handlers(game.clone());
        setup_control_handlers(&document, game.clone());
        setup_resize_handler(&canvas, game.clone());

        update_hud(&game.borrow());
        request_animation_frame(game);

        log::info!("Shape Trace running!");
    }

    /// Size the backing store for the device pixel ratio; returns the CSS
    /// pixel dimensions all game coordinates live in
    fn setup_canvas(canvas: &HtmlCanvasElement) -> (f64, f64) {
        let window = web_sys::window().expect("no window");
        let dpr = window.device_pixel_ratio();
        let width = canvas.client_width() as f64;
        let height = canvas.client_height() as f64;
        canvas.set_width((width * dpr).round() as u32);
        canvas.set_height((height * dpr).round() as u32);

        if let Ok(Some(obj)) = canvas.get_context("2d") {
            if let Ok(ctx) = obj.dyn_into::<CanvasRenderingContext2d>() {
                let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
            }
        }

        (width, height)
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer move: track the cursor for ghost line and crosshair
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let coords = DVec2::new(event.offset_x() as f64, event.offset_y() as f64);
                g.mouse = coords;

                if g.pointer.dragging
                    && (coords - g.pointer.down_pos).length() > DRAG_MOVE_EPSILON
                {
                    g.pointer.moved = true;
                }

                if g.session.phase == Phase::Tracing {
                    g.draw();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer down: start gesture tracking, capture the pointer
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let coords = DVec2::new(event.offset_x() as f64, event.offset_y() as f64);
                g.pointer.down_pos = coords;
                g.pointer.dragging = true;
                g.pointer.moved = false;
                g.mouse = coords;
                let _ = canvas_clone.set_pointer_capture(event.pointer_id());

                if g.session.phase == Phase::Tracing {
                    g.draw();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up: a short, still, non-rapid-fire gesture is a click
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                if !g.pointer.dragging {
                    return;
                }
                let coords = DVec2::new(event.offset_x() as f64, event.offset_y() as f64);

                let now = js_sys::Date::now();
                let distance = (coords - g.pointer.down_pos).length();
                let in_cooldown = now - g.pointer.last_click_ms < CLICK_COOLDOWN_MS;

                if distance < DRAG_THRESHOLD && !g.pointer.moved && !in_cooldown {
                    if g.session.record_click(coords) {
                        g.pointer.last_click_ms = now;
                    }
                }

                g.pointer.dragging = false;
                g.pointer.moved = false;
                let _ = canvas_clone.release_pointer_capture(event.pointer_id());

                update_hud(&g);
                g.draw();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if is_typing_target(&event) {
                    return;
                }
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        start_round(&game);
                    }
                    "r" | "R" => reset_stats(&game),
                    "z" | "Z" if event.ctrl_key() => {
                        event.prevent_default();
                        undo_click(&game);
                    }
                    "Shift" => {
                        // Momentary crosshair while the option stays off
                        if !checkbox_checked(&document(), "alignmentGuidesOption") {
                            let mut g = game.borrow_mut();
                            g.session.set_alignment_guides(true);
                            g.draw();
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Shift"
                    && !checkbox_checked(&document(), "alignmentGuidesOption")
                {
                    let mut g = game.borrow_mut();
                    g.session.set_alignment_guides(false);
                    g.draw();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_control_handlers(doc: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = doc.get_element_by_id("startButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                start_round(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = doc.get_element_by_id("resetButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                reset_stats(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = doc.get_element_by_id("undoButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                undo_click(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(el) = doc.get_element_by_id("ghostLineOption") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let enabled = checkbox_checked(&document(), "ghostLineOption");
                let mut g = game.borrow_mut();
                g.session.set_ghost_line(enabled);
                update_touch_mode(&g.session);
                if g.session.phase == Phase::Tracing {
                    g.draw();
                }
            });
            let _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(el) = doc.get_element_by_id("alignmentGuidesOption") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let enabled = checkbox_checked(&document(), "alignmentGuidesOption");
                let mut g = game.borrow_mut();
                g.session.set_alignment_guides(enabled);
                update_touch_mode(&g.session);
                if g.session.phase == Phase::Tracing {
                    g.draw();
                }
            });
            let _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = setup_canvas(&canvas);
            let mut g = game.borrow_mut();
            g.session.set_viewport(Viewport::new(width, height));
            g.renderer.set_size(width, height);
            log::info!("resized to {width}x{height}");
            g.draw();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            // Memory-mode deadlines fire from the frame loop
            if g.session.advance(js_sys::Date::now()) {
                g.draw();
            }
        }
        request_animation_frame(game);
    }

    fn start_round(game: &Rc<RefCell<Game>>) {
        let document = document();
        let settings = read_settings(&document);
        settings.save();

        {
            let mut g = game.borrow_mut();
            g.session.start_round(settings, js_sys::Date::now());
            update_touch_mode(&g.session);
        }

        set_start_screen_visible(&document, false);
        let g = game.borrow();
        update_hud(&g);
        g.draw();
    }

    fn reset_stats(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.session.reset();
            update_touch_mode(&g.session);
        }

        let document = document();
        set_start_screen_visible(&document, true);
        let g = game.borrow();
        update_hud(&g);
        g.draw();
    }

    fn undo_click(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        g.session.undo_last_click();
        update_hud(&g);
        g.draw();
    }

    /// Read the menu controls into a sanitized settings snapshot
    fn read_settings(document: &Document) -> Settings {
        let mut settings = Settings::default();

        if let Some(select) = select_element(document, "points") {
            if let Ok(n) = select.value().parse::<usize>() {
                settings.point_count = n;
            }
        }

        settings.mirror_mode = checkbox_checked(document, "mirrorOption");
        settings.absolute_mode = checkbox_checked(document, "absoluteOption");
        settings.memory_mode = checkbox_checked(document, "memoryOption");
        settings.ghost_line = checkbox_checked(document, "ghostLineOption");
        settings.alignment_guides = checkbox_checked(document, "alignmentGuidesOption");

        if let Some(v) = number_value(document, "targetVisibilityDuration") {
            settings.target_visibility_ms = v;
        }
        if let Some(v) = number_value(document, "copyAreaHiddenDuration") {
            settings.copy_mask_ms = v;
        }
        if let Some(v) = number_value(document, "passThreshold") {
            settings.pass_threshold = v.clamp(0.0, 100.0) as u32;
        }

        settings.sanitize();
        settings
    }

    /// Push stored settings back into the menu controls
    fn apply_settings_to_controls(document: &Document, settings: &Settings) {
        if let Some(select) = select_element(document, "points") {
            select.set_value(&settings.point_count.to_string());
        }
        set_checkbox(document, "mirrorOption", settings.mirror_mode);
        set_checkbox(document, "absoluteOption", settings.absolute_mode);
        set_checkbox(document, "memoryOption", settings.memory_mode);
        set_checkbox(document, "ghostLineOption", settings.ghost_line);
        set_checkbox(document, "alignmentGuidesOption", settings.alignment_guides);
        set_input_value(
            document,
            "targetVisibilityDuration",
            &(settings.target_visibility_ms as u64).to_string(),
        );
        set_input_value(
            document,
            "copyAreaHiddenDuration",
            &(settings.copy_mask_ms as u64).to_string(),
        );
        set_input_value(document, "passThreshold", &settings.pass_threshold.to_string());
    }

    /// Update HUD readouts from session state
    fn update_hud(game: &Game) {
        let document = document();
        let session = &game.session;

        match &session.last_score {
            Some(score) => {
                set_text_and_color(
                    &document,
                    "scoreValue",
                    &score.percentage.to_string(),
                    ui::score_color(score.percentage),
                );
                // Color by the displayed (one-decimal) value, not the raw one
                let displayed_angle = (score.angle_error * 10.0).round() / 10.0;
                set_text_and_color(
                    &document,
                    "angleErrorValue",
                    &score.angle_error_text(),
                    ui::angle_error_color(displayed_angle),
                );
            }
            None => {
                set_text_and_color(
                    &document,
                    "scoreValue",
                    ui::placeholder::SCORE,
                    ui::palette::TEXT_FALLBACK,
                );
                set_text_and_color(
                    &document,
                    "angleErrorValue",
                    ui::placeholder::ANGLE_ERROR,
                    ui::palette::TEXT_FALLBACK,
                );
            }
        }

        set_text(&document, "streakValue", &ui::format_streak(session.stats.streak()));

        let attempts = session.stats.attempts();
        set_text(
            &document,
            "attemptsDisplay",
            &format!("{} {}", attempts, ui::attempts_label(attempts)),
        );

        match session.stats.average_percent() {
            Some(average) => {
                set_text(&document, "averagePercentage", &format!("{average}%"));
                if let Some(bar) = html_element(&document, "progressBar") {
                    let style = bar.style();
                    let _ = style.set_property("width", &format!("{average}%"));
                    let _ = style.set_property("background-color", ui::score_color(average));
                }
            }
            None => {
                set_text(&document, "averagePercentage", ui::placeholder::AVERAGE);
                if let Some(bar) = html_element(&document, "progressBar") {
                    let _ = bar.style().set_property("width", "0%");
                }
            }
        }

        if let Some(button) = document
            .get_element_by_id("undoButton")
            .and_then(|el| el.dyn_into::<web_sys::HtmlButtonElement>().ok())
        {
            button.set_disabled(!session.can_undo());
        }
    }

    /// Lock touch scrolling while the round needs pointer tracking
    fn update_touch_mode(session: &Session) {
        let needs_tracking =
            session.settings.ghost_line || session.settings.alignment_guides;
        let lock = session.phase == Phase::Tracing && needs_tracking;

        if let Some(canvas) = html_element(&document(), "canvas") {
            let _ = canvas
                .style()
                .set_property("touch-action", if lock { "none" } else { "auto" });
        }
    }

    fn set_start_screen_visible(document: &Document, visible: bool) {
        if let Some(el) = document.get_element_by_id("startScreen") {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    // --- small DOM accessors ---

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn html_element(document: &Document, id: &str) -> Option<web_sys::HtmlElement> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    }

    fn input_element(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn select_element(document: &Document, id: &str) -> Option<HtmlSelectElement> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    }

    fn checkbox_checked(document: &Document, id: &str) -> bool {
        input_element(document, id)
            .map(|el| el.checked())
            .unwrap_or(false)
    }

    fn set_checkbox(document: &Document, id: &str, checked: bool) {
        if let Some(el) = input_element(document, id) {
            el.set_checked(checked);
        }
    }

    fn number_value(document: &Document, id: &str) -> Option<f64> {
        input_element(document, id)?.value().parse().ok()
    }

    fn set_input_value(document: &Document, id: &str, value: &str) {
        if let Some(el) = input_element(document, id) {
            el.set_value(value);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_text_and_color(document: &Document, id: &str, text: &str, color: &str) {
        if let Some(el) = html_element(document, id) {
            el.set_text_content(Some(text));
            let _ = el.style().set_property("color", color);
        }
    }

    fn is_typing_target(event: &KeyboardEvent) -> bool {
        event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .map(|el| {
                matches!(
                    el.tag_name().as_str(),
                    "INPUT" | "SELECT" | "TEXTAREA" | "BUTTON"
                )
            })
            .unwrap_or(false)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shape Trace (native) starting...");
    log::info!("Native mode has no canvas - run with `trunk serve` for the web version");

    println!("\nRunning scripted round...");
    run_scripted_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_scripted_round() {
    use glam::DVec2;
    use shape_trace::Settings;
    use shape_trace::game::{Phase, Session, Viewport};

    let mut session = Session::new(7, Viewport::new(800.0, 600.0));
    let settings = Settings {
        point_count: 5,
        ..Default::default()
    };
    session.start_round(settings, 0.0);

    // Trace the target exactly, shifted into the copy zone
    let shift = DVec2::new(session.viewport.divider(), 0.0);
    let clicks: Vec<DVec2> = session.target_points.iter().map(|&p| p + shift).collect();
    for p in clicks {
        session.record_click(p);
    }

    assert_eq!(session.phase, Phase::Review);
    let score = session.last_score.clone().expect("round should be scored");
    assert_eq!(score.percentage, 100, "a perfect trace must score 100%");
    println!(
        "✓ Scripted round scored {}% ({}° edge error, streak {})",
        score.percentage,
        score.angle_error_text(),
        session.stats.streak()
    );
}
