use cosmo_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, RenderBuffer, CameraUniform,
    AssetManifest, ProtocolLayout, GeometryId,
};
use cosmo_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `portfolio-orrery`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    camera_uniform: CameraUniform,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame_counter: u32,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::with_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);
        let camera_uniform = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            render_buffer,
            camera_uniform,
            layout,
            config,
            initialized: false,
            frame_counter: 0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.game.init(&mut self.ctx);
        self.camera_uniform = self.ctx.camera.uniform();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: update game, propagate transforms, build render buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.game.update(&mut self.ctx, &self.input, dt);

        // Drain input after update
        self.input.drain();

        if self.ctx.events.len() > self.config.max_events {
            log::warn!(
                "event overflow: {} events, capacity {}",
                self.ctx.events.len(),
                self.config.max_events
            );
            self.ctx.events.truncate(self.config.max_events);
        }

        // Children follow their parents before anything is drawn
        self.ctx.transforms.propagate(&mut self.ctx.scene);

        build_render_buffer(
            self.ctx.scene.iter(),
            &mut self.render_buffer,
            self.config.max_instances,
        );

        // Allow game to add custom render commands
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }

        self.camera_uniform = self.ctx.camera.uniform();
        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    /// Viewport changed size (CSS pixels).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self.ctx.viewport = glam::Vec2::new(width, height);
        self.ctx.camera.resize(width, height);
    }

    // ---- Assets ----

    /// Replace the texture manifest. Malformed JSON keeps the current one.
    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                if self.ctx.assets.load_manifest(&manifest) {
                    log::info!("manifest loaded: {} textures", manifest.textures.len());
                }
            }
            Err(e) => log::warn!("ignoring malformed manifest: {}", e),
        }
    }

    /// Undispatched texture work as a JSON array.
    pub fn texture_requests_json(&mut self) -> String {
        let requests = self.ctx.assets.take_requests();
        serde_json::to_string(&requests).unwrap_or_else(|e| {
            log::warn!("failed to serialize texture requests: {}", e);
            "[]".to_string()
        })
    }

    pub fn texture_loaded(&mut self, key: &str) -> f32 {
        self.ctx.assets.mark_loaded(key)
    }

    /// Next URL to try, or an empty string when the placeholder takes over.
    pub fn texture_failed(&mut self, key: &str) -> String {
        self.ctx.assets.mark_failed(key).unwrap_or_default()
    }

    pub fn placeholder_pixels(&self, key: &str) -> Vec<u8> {
        self.ctx.assets.placeholder_pixels(key).unwrap_or_default()
    }

    pub fn texture_offsets_ptr(&self) -> *const f32 {
        self.ctx.assets.offsets().as_ptr()
    }

    pub fn texture_offsets_len(&self) -> u32 {
        self.ctx.assets.offsets().len() as u32
    }

    pub fn texture_epoch(&self) -> u32 {
        self.ctx.assets.epoch()
    }

    // ---- UI ----

    pub fn ui_messages_json(&mut self) -> String {
        self.ctx.take_ui_messages()
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn blend_split(&self) -> u32 {
        self.render_buffer.blend_split
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn viewport_width(&self) -> f32 {
        self.config.viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.config.viewport_height
    }

    // ---- Geometry ----

    pub fn geometry_descriptors_json(&self) -> String {
        self.ctx.geometry.descriptors_json().unwrap_or_else(|e| {
            log::warn!("failed to serialize geometry descriptors: {}", e);
            "[]".to_string()
        })
    }

    pub fn geometry_vertices_ptr(&self, id: u32) -> *const f32 {
        self.ctx.geometry.vertices(GeometryId(id)).as_ptr()
    }

    pub fn geometry_vertices_len(&self, id: u32) -> u32 {
        self.ctx.geometry.vertices(GeometryId(id)).len() as u32
    }

    pub fn geometry_indices_ptr(&self, id: u32) -> *const u32 {
        self.ctx.geometry.indices(GeometryId(id)).as_ptr()
    }

    pub fn geometry_indices_len(&self, id: u32) -> u32 {
        self.ctx.geometry.indices(GeometryId(id)).len() as u32
    }

    // ---- Post-processing ----

    pub fn bloom_enabled(&self) -> bool {
        self.ctx.settings.bloom_enabled
    }

    pub fn bloom_strength(&self) -> f32 {
        self.ctx.settings.bloom_strength
    }

    pub fn bloom_radius(&self) -> f32 {
        self.ctx.settings.bloom_radius
    }

    pub fn bloom_threshold(&self) -> f32 {
        self.ctx.settings.bloom_threshold
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_guide_vertices(&self) -> u32 {
        self.layout.max_guide_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }
}

#[cfg(feature = "vectors")]
impl<G: Game> GameRunner<G> {
    pub fn guide_vertices_ptr(&self) -> *const f32 {
        self.ctx.guides.buffer_ptr()
    }

    /// Guide vertices to draw, clipped to the protocol capacity.
    pub fn guide_vertex_count(&self) -> u32 {
        self.ctx.guides.vertex_count().min(self.layout.max_guide_vertices) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmo_engine::{
        EntityId, GameEvent, GeometryId, MaterialSlot, Node, ShaderId, LocalTransform,
        TextureDescriptor,
    };
    use glam::Vec3;

    struct Orbiter {
        parent: EntityId,
        child: EntityId,
        updates: u32,
        last_dt: f32,
    }

    impl Game for Orbiter {
        fn config(&self) -> GameConfig {
            GameConfig { max_events: 2, ..GameConfig::default() }
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            self.parent = ctx.next_id();
            self.child = ctx.next_id();
            let material = MaterialSlot::new(ShaderId(0), GeometryId(0));
            ctx.scene.spawn(Node::new(self.parent).with_material(material));
            ctx.scene.spawn(Node::new(self.child).with_material(material));
            ctx.transforms.attach(
                self.child,
                self.parent,
                LocalTransform::new().with_offset(Vec3::new(2.0, 0.0, 0.0)),
            );
            let mut manifest = AssetManifest::default();
            manifest.push(TextureDescriptor::new("sun").with_source("sun.jpg"));
            ctx.assets.load_manifest(&manifest);
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
            self.updates += 1;
            self.last_dt = dt;
            if let Some(n) = ctx.scene.get_mut(self.parent) {
                n.pos.y += 1.0;
            }
            for _ in 0..input.len() + 3 {
                ctx.emit_event(GameEvent::default());
            }
        }
    }

    fn runner() -> GameRunner<Orbiter> {
        GameRunner::new(Orbiter {
            parent: EntityId(0),
            child: EntityId(0),
            updates: 0,
            last_dt: 0.0,
        })
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut r = runner();
        r.tick(0.016);
        assert_eq!(r.frame_counter(), 0);
        assert_eq!(r.instance_count(), 0);
    }

    #[test]
    fn tick_updates_propagates_and_renders() {
        let mut r = runner();
        r.init();
        r.push_input(InputEvent::KeyDown { key_code: 32 });
        r.tick(0.25);

        assert_eq!(r.game.updates, 1);
        assert!((r.game.last_dt - 0.25).abs() < 1e-6);
        assert_eq!(r.instance_count(), 2);
        assert_eq!(r.frame_counter(), 1);
        let child = r.context().scene.get(r.game.child).unwrap();
        assert!((child.pos - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-6);
        assert_eq!(r.game_events_len(), 2);
    }

    #[test]
    fn texture_callbacks_flow_through_the_registry() {
        let mut r = runner();
        r.init();
        let json = r.texture_requests_json();
        assert!(json.contains("\"action\":\"fetch\""));
        assert!(json.contains("sun.jpg"));
        assert_eq!(r.texture_requests_json(), "[]");
        assert_eq!(r.texture_failed("sun"), "");
        assert_eq!(r.placeholder_pixels("sun").len(), 512 * 512 * 4);
    }

    #[test]
    fn malformed_manifest_keeps_previous() {
        let mut r = runner();
        r.init();
        r.load_manifest("not json");
        assert_eq!(r.context().assets.len(), 1);
        r.load_manifest(r#"{"textures":[{"key":"a","sources":["a.png"]},{"key":"b"}]}"#);
        assert_eq!(r.context().assets.len(), 2);
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut r = runner();
        r.init();
        r.resize(1000.0, 500.0);
        assert!((r.context().camera.aspect - 2.0).abs() < 1e-6);
        assert_eq!(r.viewport_width(), 1000.0);
    }
}
