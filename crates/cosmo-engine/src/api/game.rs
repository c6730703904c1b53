use serde::Serialize;
use glam::{Vec2, Vec3};
use crate::core::scene::Scene;
use crate::core::rng::Rng;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::TextureRegistry;
use crate::extensions::transform::TransformGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::renderer::geometry::GeometryStore;
use crate::renderer::instance::RenderBuffer;
#[cfg(feature = "vectors")]
use crate::systems::guides::OrbitGuides;

/// Pending UI messages kept when the host stops draining them.
const MAX_PENDING_UI_MESSAGES: usize = 1024;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Initial viewport width in CSS pixels.
    pub viewport_width: f32,
    /// Initial viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of orbit-guide vertices (default: 65536).
    pub max_guide_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Frame deltas above this many seconds are clamped (default: 0.1).
    pub max_frame_dt: f32,
    /// Seed for the context RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            max_instances: 512,
            max_guide_vertices: 65536,
            max_events: 32,
            max_frame_dt: 0.1,
            seed: 42,
        }
    }
}

/// Post-processing switches the host applies to the composed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub bloom_enabled: bool,
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub bloom_threshold: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            bloom_enabled: true,
            bloom_strength: 0.3,
            bloom_radius: 0.4,
            bloom_threshold: 0.85,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, configure the camera and asset manifest.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One animation frame. `dt` is the wall-clock delta in seconds.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub transforms: TransformGraph,
    pub camera: Camera3D,
    /// Viewport size in CSS pixels; pointer coordinates use the same space.
    pub viewport: Vec2,
    pub assets: TextureRegistry,
    pub geometry: GeometryStore,
    #[cfg(feature = "vectors")]
    pub guides: OrbitGuides,
    pub settings: RenderSettings,
    pub rng: Rng,
    pub events: Vec<GameEvent>,
    /// Serialized UI messages waiting for the host.
    pub ui_messages: Vec<String>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        let aspect = config.viewport_width / config.viewport_height.max(1.0);
        Self {
            scene: Scene::new(),
            transforms: TransformGraph::new(),
            camera: Camera3D::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 50.0, aspect),
            viewport: Vec2::new(config.viewport_width, config.viewport_height),
            assets: TextureRegistry::new(),
            geometry: GeometryStore::new(),
            #[cfg(feature = "vectors")]
            guides: OrbitGuides::new(),
            settings: RenderSettings::default(),
            rng: Rng::new(config.seed),
            events: Vec::new(),
            ui_messages: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Serialize a UI message for the host. Failures are logged and dropped.
    pub fn post_ui<T: Serialize>(&mut self, message: &T) {
        match serde_json::to_string(message) {
            Ok(json) => {
                if self.ui_messages.len() >= MAX_PENDING_UI_MESSAGES {
                    log::warn!("UI message queue full; dropping oldest message");
                    self.ui_messages.remove(0);
                }
                self.ui_messages.push(json);
            }
            Err(e) => log::warn!("failed to serialize UI message: {}", e),
        }
    }

    /// Drain pending UI messages as one JSON array.
    pub fn take_ui_messages(&mut self) -> String {
        let messages = std::mem::take(&mut self.ui_messages);
        format!("[{}]", messages.join(","))
    }

    /// Convert a pointer position to normalized device coordinates (y up).
    pub fn pointer_ndc(&self, x: f32, y: f32) -> Vec2 {
        let size = self.viewport.max(Vec2::ONE);
        Vec2::new(x / size.x * 2.0 - 1.0, -(y / size.y * 2.0 - 1.0))
    }

    /// Clear per-frame transient data (events).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(tag = "type")]
    enum Msg {
        Speed { label: String },
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert!(b > a);
    }

    #[test]
    fn ui_messages_drain_as_json_array() {
        let mut ctx = EngineContext::new();
        assert_eq!(ctx.take_ui_messages(), "[]");

        ctx.post_ui(&Msg::Speed { label: "1.0x".into() });
        ctx.post_ui(&Msg::Speed { label: "2.0x".into() });
        let json = ctx.take_ui_messages();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["label"], "2.0x");
        assert!(ctx.ui_messages.is_empty());
    }

    #[test]
    fn frame_data_clears_events_only() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent { kind: 1.0, a: 0.0, b: 0.0, c: 0.0 });
        ctx.post_ui(&Msg::Speed { label: "1.0x".into() });
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
        assert_eq!(ctx.ui_messages.len(), 1);
    }

    #[test]
    fn camera_aspect_follows_viewport() {
        let config = GameConfig { viewport_width: 800.0, viewport_height: 400.0, ..GameConfig::default() };
        let ctx = EngineContext::with_config(&config);
        assert!((ctx.camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn pointer_ndc_maps_corners() {
        let config = GameConfig { viewport_width: 800.0, viewport_height: 400.0, ..GameConfig::default() };
        let ctx = EngineContext::with_config(&config);
        assert_eq!(ctx.pointer_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(ctx.pointer_ndc(800.0, 400.0), Vec2::new(1.0, -1.0));
        assert_eq!(ctx.pointer_ndc(400.0, 200.0), Vec2::ZERO);
    }
}
