use bytemuck::{Pod, Zeroable};

/// Per-instance render data written to SharedArrayBuffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 28 floats = 112 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct RenderInstance {
    /// World-space position.
    pub position: [f32; 3],
    /// World-space orientation quaternion (x, y, z, w).
    pub rotation: [f32; 4],
    /// Per-axis world-space scale.
    pub scale: [f32; 3],
    /// Base color (linear RGB, HDR allowed).
    pub color: [f32; 3],
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub opacity: f32,
    /// Host shader program index.
    pub shader: f32,
    /// Texture index, or -1 for none.
    pub texture: f32,
    /// Geometry index.
    pub geometry: f32,
    /// Shader-specific parameters (time, directions, secondary colors).
    pub uniforms: [f32; 8],
    pub _pad: [f32; 3],
}

impl RenderInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing all instances and metadata.
pub struct RenderBuffer {
    /// Instances ordered by blend mode:
    /// alpha-blended instances first, then additive instances after `blend_split`.
    pub instances: Vec<RenderInstance>,
    /// Index where the blend mode split occurs.
    pub blend_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            blend_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.blend_split = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn set_blend_split(&mut self, split: u32) {
        self.blend_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
