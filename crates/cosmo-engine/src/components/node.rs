use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::material::MaterialSlot;

/// Fat scene node: a single struct with optional parts.
/// Designed for simplicity over ECS purity.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Hidden nodes are neither rendered nor picked.
    pub visible: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Orientation in world space.
    pub rotation: Quat,
    /// Per-axis world-space scale.
    pub scale: Vec3,
    /// Bounding-sphere radius for ray picking (None = not pickable).
    pub pick_radius: Option<f32>,
    /// Material (optional; nodes without one are pure transforms, e.g. groups).
    pub material: Option<MaterialSlot>,
}

impl Node {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            pos: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            pick_radius: None,
            material: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn with_pick_radius(mut self, radius: f32) -> Self {
        self.pick_radius = Some(radius);
        self
    }

    pub fn with_material(mut self, material: MaterialSlot) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}
