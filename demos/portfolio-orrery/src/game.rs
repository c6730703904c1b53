//! Portfolio orrery - frame driver.
//!
//! Routes input to the interaction layer, forwards texture loading to the
//! intro screen, builds the scene once loading settles and runs the update
//! loop while the clock is running.

use cosmo_engine::api::game::GameConfig;
use cosmo_engine::input::queue::{InputEvent, InputQueue};
use cosmo_engine::{Camera3D, EngineContext, Game, GameEvent, SimClock};
use glam::{Vec2, Vec3};

use crate::assets::builtin_manifest;
use crate::builder::{build_scene, SolarScene};
use crate::interaction::{FocusTracker, InteractionResult, InteractionSystem};
use crate::ui::{self, UiMessage};
use crate::update::{update_frame, SceneTuning};

/// Custom event kinds from the host UI.
pub mod events {
    /// a = speed multiplier
    pub const SET_SPEED: u32 = 1;
    pub const TOGGLE_PAUSE: u32 = 2;
    pub const RESET_VIEW: u32 = 3;
    /// a = 0 hides, anything else shows
    pub const SET_ORBITS: u32 = 4;
    pub const SET_ATMOSPHERES: u32 = 5;
    pub const SET_BLOOM: u32 = 6;
    pub const CLOSE_PANEL: u32 = 7;

    /// Text event kinds.
    pub const SEARCH: u32 = 1;
    /// Planet-list click; text = body key.
    pub const FOCUS_KEY: u32 = 2;

    pub const KEY_SPACE: u32 = 32;
}

/// Game event kinds to the host.
mod game_events {
    /// a = simulated time, b = speed, c = 1 while paused
    pub const FRAME_INFO: f32 = 1.0;
    /// a = focused body index, or -1
    pub const FOCUS: f32 = 2.0;
}

const INITIAL_SPEED: f32 = 0.5;
const MAX_FRAME_DT: f32 = 0.1;
const HOME_POSITION: Vec3 = Vec3::new(0.0, 80.0, 250.0);
const CAMERA_FOV: f32 = 50.0;

/// Receives texture-loading progress while the scene is not yet built.
pub trait LoadingObserver {
    fn progress(&mut self, percent: f32);
    /// One texture source failed; later sources or a placeholder follow.
    fn source_failed(&mut self, url: &str);
    /// Every texture settled and the scene is built.
    fn finished(&mut self);
}

/// Forwards loading to the intro screen, when one is running.
pub struct IntroLink;

impl LoadingObserver for IntroLink {
    fn progress(&mut self, percent: f32) {
        crate::with_intro(|intro| intro.update_progress(percent, None));
    }

    fn source_failed(&mut self, url: &str) {
        let status = format!("Failed to load {url}");
        crate::with_intro(|intro| intro.set_status(Some(&status)));
    }

    fn finished(&mut self) {
        crate::with_intro(|intro| intro.mark_complete());
    }
}

pub struct PortfolioOrrery {
    clock: SimClock,
    tuning: SceneTuning,
    scene: Option<SolarScene>,
    focus: FocusTracker,
    interaction: InteractionSystem,
    atmospheres_visible: bool,
    observer: Box<dyn LoadingObserver>,
    last_progress: Option<f32>,
    last_days: Option<i64>,
}

impl PortfolioOrrery {
    pub fn new() -> Self {
        let tuning = SceneTuning::default();
        Self {
            clock: SimClock::new(INITIAL_SPEED, MAX_FRAME_DT),
            interaction: InteractionSystem::new(&tuning),
            tuning,
            scene: None,
            focus: FocusTracker::new(),
            atmospheres_visible: true,
            observer: Box::new(IntroLink),
            last_progress: None,
            last_days: None,
        }
    }

    pub fn with_tuning(mut self, tuning: SceneTuning) -> Self {
        self.interaction = InteractionSystem::new(&tuning);
        self.tuning = tuning;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn LoadingObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn scene(&self) -> Option<&SolarScene> {
        self.scene.as_ref()
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus.current()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    // ── Input ────────────────────────────────────────────────────────

    fn handle_input(&mut self, ctx: &mut EngineContext, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.interaction.on_pointer_down(Vec2::new(*x, *y)),
            InputEvent::PointerMove { x, y } => {
                self.interaction.on_pointer_move(Vec2::new(*x, *y), &mut ctx.camera);
            }
            InputEvent::PointerUp { x, y } => {
                if let InteractionResult::Click { pos } = self.interaction.on_pointer_up(Vec2::new(*x, *y)) {
                    if let Some(scene) = self.scene.as_ref() {
                        self.focus.pick(ctx, scene, pos);
                    }
                }
            }
            InputEvent::Wheel { delta } => {
                self.interaction.on_wheel(*delta, &mut ctx.camera);
            }
            InputEvent::KeyDown { key_code } if *key_code == events::KEY_SPACE => self.toggle_pause(ctx),
            InputEvent::Custom { kind, a, .. } => self.handle_custom_event(ctx, *kind, *a),
            InputEvent::Text { kind, text } => self.handle_text(ctx, *kind, text),
            _ => {}
        }
    }

    fn handle_custom_event(&mut self, ctx: &mut EngineContext, kind: u32, a: f32) {
        match kind {
            events::SET_SPEED => {
                self.clock.set_speed(a.max(0.0));
                ctx.post_ui(&UiMessage::speed_label(self.clock.speed()));
            }
            events::TOGGLE_PAUSE => self.toggle_pause(ctx),
            events::RESET_VIEW => self.focus.reset_view(ctx),
            events::SET_ORBITS => {
                #[cfg(feature = "vectors")]
                ctx.guides.set_visible(a != 0.0);
                self.post_layers(ctx);
            }
            events::SET_ATMOSPHERES => {
                self.atmospheres_visible = a != 0.0;
                self.apply_atmospheres(ctx);
                self.post_layers(ctx);
            }
            events::SET_BLOOM => {
                ctx.settings.bloom_enabled = a != 0.0;
                self.post_layers(ctx);
            }
            events::CLOSE_PANEL => self.focus.close_panel(ctx),
            _ => log::debug!("unknown custom event {}", kind),
        }
    }

    fn handle_text(&mut self, ctx: &mut EngineContext, kind: u32, text: &str) {
        let Some(scene) = self.scene.as_ref() else {
            log::debug!("text event {} before the scene is built", kind);
            return;
        };
        match kind {
            events::SEARCH => self.focus.search(ctx, scene, text),
            events::FOCUS_KEY => {
                if !self.focus.focus_key(ctx, scene, text) {
                    log::warn!("no focusable body {:?}", text);
                }
            }
            _ => log::debug!("unknown text event {}", kind),
        }
    }

    fn toggle_pause(&mut self, ctx: &mut EngineContext) {
        let paused = self.clock.toggle_pause();
        ctx.post_ui(&UiMessage::pause_state(paused));
    }

    fn apply_atmospheres(&self, ctx: &mut EngineContext) {
        let Some(scene) = self.scene.as_ref() else { return };
        for id in scene.atmospheres() {
            if let Some(node) = ctx.scene.get_mut(id) {
                node.visible = self.atmospheres_visible;
            }
        }
    }

    fn post_layers(&self, ctx: &mut EngineContext) {
        #[cfg(feature = "vectors")]
        let orbits = ctx.guides.is_visible();
        #[cfg(not(feature = "vectors"))]
        let orbits = false;
        ctx.post_ui(&UiMessage::LayerToggles {
            orbits,
            atmospheres: self.atmospheres_visible,
            bloom: ctx.settings.bloom_enabled,
        });
    }

    // ── Loading ──────────────────────────────────────────────────────

    fn poll_loading(&mut self, ctx: &mut EngineContext) {
        if self.scene.is_some() {
            return;
        }
        for url in ctx.assets.take_failures() {
            self.observer.source_failed(&url);
        }
        let progress = ctx.assets.progress_percent();
        if self.last_progress != Some(progress) {
            self.last_progress = Some(progress);
            self.observer.progress(progress);
        }
        if ctx.assets.is_settled() {
            self.scene = Some(build_scene(ctx, &self.tuning));
            self.apply_atmospheres(ctx);
            self.observer.finished();
        }
    }
}

impl Default for PortfolioOrrery {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for PortfolioOrrery {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 512,
            max_events: 8,
            max_frame_dt: MAX_FRAME_DT,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.assets.load_manifest(&builtin_manifest());
        let aspect = ctx.viewport.x / ctx.viewport.y.max(1.0);
        ctx.camera = Camera3D::new(HOME_POSITION, Vec3::ZERO, CAMERA_FOV, aspect)
            .with_clip(0.1, 50_000.0)
            .with_distance_limits(5.0, 1000.0)
            .with_damping(0.05);

        ctx.post_ui(&UiMessage::speed_label(self.clock.speed()));
        ctx.post_ui(&UiMessage::pause_state(self.clock.is_paused()));
        self.post_layers(ctx);
        log::info!("orrery waiting for {} textures", ctx.assets.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        for event in input.iter() {
            self.handle_input(ctx, event);
        }

        self.poll_loading(ctx);

        // Simulated time starts with the scene.
        if let Some(scene) = self.scene.as_mut() {
            let frame = self.clock.advance(dt);
            if !self.clock.is_paused() {
                update_frame(scene, ctx, &frame, &self.tuning);
            }
            self.focus.track(ctx, scene, frame.real_dt, &self.tuning);
        }
        ctx.camera.update_controls();

        let days = ui::elapsed_days(self.clock.elapsed());
        if self.last_days != Some(days) {
            self.last_days = Some(days);
            ctx.post_ui(&UiMessage::time_display(days));
        }

        ctx.emit_event(GameEvent {
            kind: game_events::FRAME_INFO,
            a: self.clock.elapsed(),
            b: self.clock.speed(),
            c: if self.clock.is_paused() { 1.0 } else { 0.0 },
        });
        ctx.emit_event(GameEvent {
            kind: game_events::FOCUS,
            a: self.focus.current().map_or(-1.0, |i| i as f32),
            b: 0.0,
            c: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        progress: Vec<f32>,
        failures: Vec<String>,
        finished: usize,
    }

    struct Recorder(Rc<RefCell<Recorded>>);

    impl LoadingObserver for Recorder {
        fn progress(&mut self, percent: f32) {
            self.0.borrow_mut().progress.push(percent);
        }
        fn source_failed(&mut self, url: &str) {
            self.0.borrow_mut().failures.push(url.to_string());
        }
        fn finished(&mut self) {
            self.0.borrow_mut().finished += 1;
        }
    }

    fn game() -> (PortfolioOrrery, EngineContext, Rc<RefCell<Recorded>>) {
        let log = Rc::new(RefCell::new(Recorded::default()));
        let tuning = SceneTuning { star_count: 10, dust_count: 10, ..SceneTuning::default() };
        let mut game = PortfolioOrrery::new()
            .with_tuning(tuning)
            .with_observer(Box::new(Recorder(log.clone())));
        let mut ctx = EngineContext::with_config(&game.config());
        game.init(&mut ctx);
        (game, ctx, log)
    }

    fn settle(ctx: &mut EngineContext) {
        for desc in builtin_manifest().textures {
            ctx.assets.mark_loaded(&desc.key);
        }
    }

    fn tick(game: &mut PortfolioOrrery, ctx: &mut EngineContext, events: Vec<InputEvent>, dt: f32) {
        let mut input = InputQueue::new();
        for e in events {
            input.push(e);
        }
        ctx.clear_frame_data();
        game.update(ctx, &input, dt);
        ctx.transforms.propagate(&mut ctx.scene);
    }

    fn ui_types(ctx: &mut EngineContext) -> Vec<serde_json::Value> {
        let json: serde_json::Value = serde_json::from_str(&ctx.take_ui_messages()).unwrap();
        json.as_array().unwrap().clone()
    }

    #[test]
    fn init_configures_camera_and_manifest() {
        let (_, mut ctx, _) = game();
        assert_eq!(ctx.camera.position, HOME_POSITION);
        assert!(ctx.assets.len() > 10);
        assert!(!ctx.assets.is_settled());
        let msgs = ui_types(&mut ctx);
        assert_eq!(msgs[0]["label"], "0.5x");
        assert_eq!(msgs[1]["label"], "Pause");
        assert_eq!(msgs[2]["type"], "layer_toggles");
    }

    #[test]
    fn scene_builds_once_loading_settles() {
        let (mut game, mut ctx, log) = game();
        tick(&mut game, &mut ctx, vec![], 0.016);
        assert!(game.scene().is_none());
        assert_eq!(log.borrow().progress, vec![0.0]);

        let first = builtin_manifest().textures[0].key.clone();
        let url = ctx.assets.mark_failed(&first);
        assert!(url.is_some());
        tick(&mut game, &mut ctx, vec![], 0.016);
        assert_eq!(log.borrow().failures.len(), 1);

        settle(&mut ctx);
        tick(&mut game, &mut ctx, vec![], 0.016);
        tick(&mut game, &mut ctx, vec![], 0.016);
        assert!(game.scene().is_some());
        assert_eq!(log.borrow().finished, 1);
        assert_eq!(log.borrow().progress.last().copied(), Some(100.0));
    }

    #[test]
    fn clock_waits_for_the_scene() {
        let (mut game, mut ctx, _) = game();
        for _ in 0..5 {
            tick(&mut game, &mut ctx, vec![], 0.1);
        }
        assert!(game.scene().is_none());
        assert_eq!(game.clock().elapsed(), 0.0);
        let msgs = ui_types(&mut ctx);
        assert!(msgs.iter().filter(|m| m["type"] == "time_display").all(|m| m["text"] == "0 days"));

        settle(&mut ctx);
        tick(&mut game, &mut ctx, vec![], 0.1);
        assert!(game.scene().is_some());
        assert!((game.clock().elapsed() - 0.1 * INITIAL_SPEED).abs() < 1e-6);
    }

    #[test]
    fn space_pauses_but_camera_still_tracks_focus() {
        let (mut game, mut ctx, _) = game();
        settle(&mut ctx);
        tick(&mut game, &mut ctx, vec![], 0.05);

        tick(&mut game, &mut ctx, vec![InputEvent::KeyDown { key_code: events::KEY_SPACE }], 0.05);
        assert!(game.clock().is_paused());
        let msgs = ui_types(&mut ctx);
        assert!(msgs.iter().any(|m| m["type"] == "pause_state" && m["label"] == "Resume"));

        let elapsed = game.clock().elapsed();
        tick(
            &mut game,
            &mut ctx,
            vec![InputEvent::Text { kind: events::FOCUS_KEY, text: "saturn".into() }],
            0.05,
        );
        let before = ctx.camera.target;
        tick(&mut game, &mut ctx, vec![], 0.05);
        assert_eq!(game.clock().elapsed(), elapsed);
        assert!(ctx.camera.target != before);
        assert_eq!(game.focus(), game.scene().unwrap().find("saturn"));
    }

    #[test]
    fn speed_slider_updates_label_and_time() {
        let (mut game, mut ctx, _) = game();
        settle(&mut ctx);
        tick(&mut game, &mut ctx, vec![InputEvent::Custom { kind: events::SET_SPEED, a: 2.0, b: 0.0, c: 0.0 }], 0.1);
        assert!((game.clock().elapsed() - 0.2).abs() < 1e-6);
        let msgs = ui_types(&mut ctx);
        assert!(msgs.iter().any(|m| m["type"] == "speed_label" && m["label"] == "2.0x"));
        assert!(msgs.iter().any(|m| m["type"] == "time_display" && m["text"] == "2 days"));
    }

    #[test]
    fn time_display_posts_only_on_change() {
        let (mut game, mut ctx, _) = game();
        settle(&mut ctx);
        tick(&mut game, &mut ctx, vec![], 0.01);
        ctx.take_ui_messages();
        tick(&mut game, &mut ctx, vec![], 0.01);
        let msgs = ui_types(&mut ctx);
        assert!(!msgs.iter().any(|m| m["type"] == "time_display"));
    }

    #[test]
    fn layer_toggles_change_visibility() {
        let (mut game, mut ctx, _) = game();
        settle(&mut ctx);
        tick(&mut game, &mut ctx, vec![], 0.016);
        ctx.take_ui_messages();

        tick(
            &mut game,
            &mut ctx,
            vec![
                InputEvent::Custom { kind: events::SET_ATMOSPHERES, a: 0.0, b: 0.0, c: 0.0 },
                InputEvent::Custom { kind: events::SET_BLOOM, a: 0.0, b: 0.0, c: 0.0 },
            ],
            0.016,
        );
        let scene = game.scene().unwrap();
        assert!(scene.atmospheres().all(|id| !ctx.scene.get(id).unwrap().visible));
        assert!(!ctx.settings.bloom_enabled);
        let msgs = ui_types(&mut ctx);
        let last = msgs.iter().rev().find(|m| m["type"] == "layer_toggles").unwrap();
        assert_eq!(last["atmospheres"], false);
        assert_eq!(last["bloom"], false);
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn orbit_toggle_hides_guides() {
        let (mut game, mut ctx, _) = game();
        settle(&mut ctx);
        tick(&mut game, &mut ctx, vec![], 0.016);
        tick(&mut game, &mut ctx, vec![InputEvent::Custom { kind: events::SET_ORBITS, a: 0.0, b: 0.0, c: 0.0 }], 0.016);
        assert!(!ctx.guides.is_visible());
        assert_eq!(ctx.guides.vertex_count(), 0);
    }

    #[test]
    fn emits_frame_and_focus_events() {
        let (mut game, mut ctx, _) = game();
        tick(&mut game, &mut ctx, vec![], 0.05);
        assert_eq!(ctx.events.len(), 2);
        assert_eq!(ctx.events[0].kind, game_events::FRAME_INFO);
        assert!((ctx.events[0].b - INITIAL_SPEED).abs() < 1e-6);
        assert_eq!(ctx.events[1].a, -1.0);
    }
}
