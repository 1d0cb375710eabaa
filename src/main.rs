//! Drip Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//! - wasm32: canvas front-end driven by `requestAnimationFrame`
//! - native: headless autopilot run that logs every event

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, PointerEvent,
    };

    use drip_drop::audio::{AudioManager, SoundEffect};
    use drip_drop::input::{Command, Direction, Source};
    use drip_drop::persistence::LocalStorageStore;
    use drip_drop::sim::{Callout, EventSink, GameEvent, Scene, Session};
    use drip_drop::{Game, Settings, Tuning};

    /// Floating callout text (purely visual)
    struct FloatingText {
        callout: Callout,
        y: f64,
        alpha: f64,
    }

    /// Presentation sink: HUD text, overlay, callouts and sound
    struct Presenter {
        document: Document,
        audio: AudioManager,
        settings: Settings,
        floating: Vec<FloatingText>,
    }

    impl Presenter {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn show_overlay(&self, title: &str, sub: &str) {
            self.set_text("overlay-title", title);
            self.set_text("overlay-sub", sub);
            if let Some(el) = self.document.get_element_by_id("overlay") {
                let _ = el.set_attribute("class", "");
            }
        }

        fn hide_overlay(&self) {
            if let Some(el) = self.document.get_element_by_id("overlay") {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }

    impl EventSink for Presenter {
        fn emit(&mut self, event: GameEvent) {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.audio.play(effect);
            }
            match event {
                GameEvent::ScoreChanged(score) => self.set_text("score", &score.to_string()),
                GameEvent::LivesChanged(lives) => self.set_text("lives", &lives.to_string()),
                GameEvent::BestScoreChanged(best) => self.set_text("best", &best.to_string()),
                GameEvent::Callout(callout) => {
                    if self.settings.callouts {
                        self.floating.push(FloatingText {
                            callout,
                            y: 140.0,
                            alpha: 1.0,
                        });
                    }
                }
                GameEvent::SceneChanged(Scene::Playing) => self.hide_overlay(),
                GameEvent::SceneChanged(Scene::Paused) => {
                    self.show_overlay("Paused", "Tap to resume")
                }
                GameEvent::SceneChanged(Scene::Menu) => {
                    self.show_overlay("Drip Drop", "Tap to start")
                }
                GameEvent::GameOver { final_score } => self.show_overlay(
                    "Game Over",
                    &format!("Score {final_score} - tap to restart"),
                ),
                GameEvent::SceneChanged(Scene::GameOver) | GameEvent::Impact(_) => {}
            }
        }
    }

    /// Everything the page needs between frames
    struct App {
        game: Game,
        presenter: Presenter,
        ctx: CanvasRenderingContext2d,
    }

    impl App {
        fn render(&mut self, time: f64) {
            let session = &self.game.session;
            let ctx = &self.ctx;
            let (w, h) = (
                session.tuning.world_width as f64,
                session.tuning.world_height as f64,
            );

            // Background with drifting ripple lines
            ctx.set_fill_style_str("#0c4a6e");
            ctx.fill_rect(0.0, 0.0, w, h);
            ctx.set_global_alpha(0.12);
            ctx.set_stroke_style_str("#e0f2fe");
            ctx.set_line_width(2.0);
            let drift = if self.presenter.settings.reduced_motion {
                0.0
            } else {
                (time / 30.0) % 46.0
            };
            for i in 0..16 {
                ctx.begin_path();
                let y = i as f64 * 46.0 + drift;
                let _ = ctx.arc(w / 2.0, y, 320.0, std::f64::consts::PI, 0.0);
                ctx.stroke();
            }
            ctx.set_global_alpha(1.0);

            draw_entities(ctx, session);

            // Callouts float up and fade
            ctx.set_font("bold 20px system-ui, sans-serif");
            ctx.set_text_align("center");
            for text in &mut self.presenter.floating {
                text.y -= 0.2;
                text.alpha -= 0.01;
                if text.alpha > 0.0 {
                    ctx.set_global_alpha(text.alpha);
                    ctx.set_fill_style_str(text.callout.color_tag());
                    let _ = ctx.fill_text(text.callout.text(), w / 2.0, text.y);
                }
            }
            ctx.set_global_alpha(1.0);
            self.presenter.floating.retain(|t| t.alpha > 0.0);
        }
    }

    fn draw_entities(ctx: &CanvasRenderingContext2d, session: &Session) {
        for droplet in &session.droplets {
            let color = if droplet.rewarding {
                "#22d3ee"
            } else {
                "#93c5fd"
            };
            ctx.set_fill_style_str(color);
            ctx.begin_path();
            let _ = ctx.arc(
                droplet.pos.x as f64,
                droplet.pos.y as f64,
                droplet.radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
        }

        ctx.set_stroke_style_str("#f59e0b");
        ctx.set_line_width(2.0);
        for hazard in &session.hazards {
            let x = (hazard.pos.x - hazard.width / 2.0) as f64;
            let y = (hazard.pos.y - hazard.height / 2.0) as f64;
            ctx.set_fill_style_str("#0f172a");
            ctx.fill_rect(x, y, hazard.width as f64, hazard.height as f64);
            ctx.stroke_rect(x, y, hazard.width as f64, hazard.height as f64);
        }

        let rect = session.player.rect();
        let size = rect.max - rect.min;
        ctx.set_fill_style_str(if session.player.is_powered() {
            "#22d3ee"
        } else {
            "#e11d48"
        });
        ctx.fill_rect(
            rect.min.x as f64,
            rect.min.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Drip Drop starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("game")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #game canvas found");
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let tuning = Tuning::default();
        canvas.set_width(tuning.world_width as u32);
        canvas.set_height(tuning.world_height as u32);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, tuning, Box::new(LocalStorageStore::new()));

        let presenter = Presenter {
            document: document.clone(),
            audio: AudioManager::new(&settings),
            settings,
            floating: Vec::new(),
        };
        presenter.set_text("best", &game.best_score().to_string());
        presenter.show_overlay("Drip Drop", "Tap to start");

        let app = Rc::new(RefCell::new(App {
            game,
            presenter,
            ctx,
        }));

        setup_keyboard(app.clone());
        setup_buttons(app.clone(), &document);
        setup_auto_pause(app.clone(), &document);

        request_animation_frame(app);
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                a.presenter.audio.resume();
                let code = event.code();
                if code == "KeyM" && !event.repeat() {
                    let presenter = &mut a.presenter;
                    presenter.settings.muted = !presenter.settings.muted;
                    presenter.settings.save();
                    presenter.audio.apply_settings(&presenter.settings);
                    if presenter.settings.muted {
                        presenter.audio.stop_all();
                    }
                    return;
                }
                if a.game.input.key_down(&code) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            app.borrow_mut().game.input.key_up(&event.code());
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn hold_button(app: Rc<RefCell<App>>, document: &Document, id: &str, direction: Direction) {
        let Some(btn) = document.get_element_by_id(id) else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut a = app.borrow_mut();
                a.presenter.audio.resume();
                a.game.input.press(direction, Source::Pointer(event.pointer_id()));
            });
            let _ = btn
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for release in ["pointerup", "pointercancel", "pointerleave"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                app.borrow_mut()
                    .game
                    .input
                    .release(direction, Source::Pointer(event.pointer_id()));
            });
            let _ = btn.add_event_listener_with_callback(release, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(el) = document.get_element_by_id(id) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>, document: &Document) {
        hold_button(app.clone(), document, "btn-left", Direction::Left);
        hold_button(app.clone(), document, "btn-right", Direction::Right);

        {
            let app = app.clone();
            click(document, "btn-pause", move || {
                app.borrow_mut().game.input.command(Command::Pause);
            });
        }
        {
            let app = app.clone();
            click(document, "btn-restart", move || {
                app.borrow_mut().game.input.command(Command::Restart);
            });
        }

        // The overlay means "continue": start, resume or restart depending on scene
        click(document, "overlay", move || {
            let mut a = app.borrow_mut();
            a.presenter.audio.resume();
            let command = match a.game.scene() {
                Scene::Menu => Command::Start,
                Scene::Paused => Command::Pause,
                Scene::GameOver => Command::Restart,
                Scene::Playing => return,
            };
            a.game.input.command(command);
        });
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>, document: &Document) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() != web_sys::VisibilityState::Hidden {
                return;
            }
            let mut a = app.borrow_mut();
            a.game.input.release_all();
            a.game.suspend_clock();
            a.presenter.audio.stop_all();
            if a.presenter.settings.pause_on_blur && a.game.scene() == Scene::Playing {
                a.game.input.command(Command::Pause);
                log::info!("Auto-paused (tab hidden)");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let App { game, presenter, .. } = &mut *a;
            game.frame(time, presenter);
            presenter.audio.update();
            a.render(time);
        }

        // Always schedule the next frame so paused/over scenes keep drawing
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use drip_drop::persistence::MemoryStore;
    use drip_drop::sim::{LogSink, Scene};
    use drip_drop::{Game, Tuning, input::Command};

    env_logger::init();
    log::info!("Drip Drop (native) starting...");
    log::info!("Native mode runs a headless autopilot session - build for wasm32 to play");

    let seed = std::env::var("DRIP_DROP_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let tuning = match std::env::var("DRIP_DROP_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {path}: {e}");
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    let mut game = Game::new(seed, tuning, Box::new(MemoryStore::new()));
    game.input.autopilot = true;
    game.input.command(Command::Start);

    let mut sink = LogSink;
    let mut frames: u32 = 0;
    while frames < MAX_FRAMES {
        game.frame(frames as f64 * FRAME_MS, &mut sink);
        frames += 1;
        if game.scene() == Scene::GameOver {
            break;
        }
    }

    println!(
        "Seed {seed}: score {} after {frames} frames ({:.1}s), best {}",
        game.session.score,
        frames as f64 * FRAME_MS / 1000.0,
        game.best_score()
    );
}
