pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext, RenderSettings};
pub use api::types::{EntityId, GameEvent};
pub use components::node::Node;
pub use components::material::{MaterialSlot, BlendMode, ShaderId, GeometryId, TextureId, MATERIAL_UNIFORMS};
pub use core::scene::{Scene, Ray, RayHit};
pub use core::time::{SimClock, FrameTime};
pub use core::rng::Rng;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::geometry::{GeometryStore, GeometryDesc, MeshData, PointVertex};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{AssetManifest, TextureDescriptor};
pub use assets::registry::{TextureRegistry, TextureStatus, TextureRequest};
pub use bridge::protocol::ProtocolLayout;
pub use systems::render::build_render_buffer;

#[cfg(feature = "vectors")]
pub use systems::guides::{OrbitGuides, GuideStyle, GuideColor, GuideVertex};

// Extensions — decoupled optional systems
pub use extensions::{TransformGraph, LocalTransform};
