pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, input, asset callbacks, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use cosmo_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// cosmo_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `cosmo_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn game_text(kind: u32, text: &str) {
            with_runner(|r| r.push_input(InputEvent::Text { kind, text: text.to_string() }));
        }

        // ---- Assets ----

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) {
            with_runner(|r| r.load_manifest(json));
        }

        #[wasm_bindgen]
        pub fn game_texture_requests() -> String {
            with_runner(|r| r.texture_requests_json())
        }

        #[wasm_bindgen]
        pub fn game_texture_loaded(key: &str) -> f32 {
            with_runner(|r| r.texture_loaded(key))
        }

        #[wasm_bindgen]
        pub fn game_texture_failed(key: &str) -> String {
            with_runner(|r| r.texture_failed(key))
        }

        #[wasm_bindgen]
        pub fn get_placeholder_pixels(key: &str) -> Vec<u8> {
            with_runner(|r| r.placeholder_pixels(key))
        }

        #[wasm_bindgen]
        pub fn get_texture_offsets_ptr() -> *const f32 {
            with_runner(|r| r.texture_offsets_ptr())
        }

        #[wasm_bindgen]
        pub fn get_texture_offsets_len() -> u32 {
            with_runner(|r| r.texture_offsets_len())
        }

        #[wasm_bindgen]
        pub fn get_texture_epoch() -> u32 {
            with_runner(|r| r.texture_epoch())
        }

        // ---- UI ----

        #[wasm_bindgen]
        pub fn get_ui_messages() -> String {
            with_runner(|r| r.ui_messages_json())
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_blend_split() -> u32 {
            with_runner(|r| r.blend_split())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_frame_counter() -> u32 {
            with_runner(|r| r.frame_counter())
        }

        #[wasm_bindgen]
        pub fn get_viewport_width() -> f32 {
            with_runner(|r| r.viewport_width())
        }

        #[wasm_bindgen]
        pub fn get_viewport_height() -> f32 {
            with_runner(|r| r.viewport_height())
        }

        // ---- Geometry ----

        #[wasm_bindgen]
        pub fn get_geometry_descriptors() -> String {
            with_runner(|r| r.geometry_descriptors_json())
        }

        #[wasm_bindgen]
        pub fn get_geometry_vertices_ptr(id: u32) -> *const f32 {
            with_runner(|r| r.geometry_vertices_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_vertices_len(id: u32) -> u32 {
            with_runner(|r| r.geometry_vertices_len(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_indices_ptr(id: u32) -> *const u32 {
            with_runner(|r| r.geometry_indices_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_indices_len(id: u32) -> u32 {
            with_runner(|r| r.geometry_indices_len(id))
        }

        // ---- Post-processing ----

        #[wasm_bindgen]
        pub fn get_bloom_enabled() -> bool {
            with_runner(|r| r.bloom_enabled())
        }

        #[wasm_bindgen]
        pub fn get_bloom_strength() -> f32 {
            with_runner(|r| r.bloom_strength())
        }

        #[wasm_bindgen]
        pub fn get_bloom_radius() -> f32 {
            with_runner(|r| r.bloom_radius())
        }

        #[wasm_bindgen]
        pub fn get_bloom_threshold() -> f32 {
            with_runner(|r| r.bloom_threshold())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_guide_vertices() -> u32 {
            with_runner(|r| r.max_guide_vertices())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };

    // Variant with vectors feature
    ($game_type:ty, $game_name:literal, vectors) => {
        $crate::export_game!($game_type, $game_name);

        // ---- Orbit guide accessors (only when vectors feature is enabled) ----

        #[wasm_bindgen]
        pub fn get_guide_vertices_ptr() -> *const f32 {
            with_runner(|r| r.guide_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_guide_vertex_count() -> u32 {
            with_runner(|r| r.guide_vertex_count())
        }
    };
}
