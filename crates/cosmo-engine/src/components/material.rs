/// How a node's surface is blended into the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending (drawn first, depth-written).
    #[default]
    Alpha,
    /// Additive blending for glows, tails and sprites (drawn after alpha).
    Additive,
}

/// Host-defined shader program index. The engine never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShaderId(pub u32);

/// Index into the engine's `GeometryStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GeometryId(pub u32);

/// Index into the engine's `TextureRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Number of free-form shader uniforms carried by every material.
pub const MATERIAL_UNIFORMS: usize = 8;

/// Everything the renderer needs to draw one node.
///
/// `uniforms` is an opaque per-shader parameter block; the game decides the
/// layout and writes animated values (time, directions) into it every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSlot {
    pub shader: ShaderId,
    pub geometry: GeometryId,
    pub texture: Option<TextureId>,
    pub blend: BlendMode,
    /// Base color (linear RGB, may exceed 1.0 for HDR).
    pub color: [f32; 3],
    pub opacity: f32,
    pub uniforms: [f32; MATERIAL_UNIFORMS],
}

impl MaterialSlot {
    pub fn new(shader: ShaderId, geometry: GeometryId) -> Self {
        Self {
            shader,
            geometry,
            texture: None,
            blend: BlendMode::Alpha,
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            uniforms: [0.0; MATERIAL_UNIFORMS],
        }
    }

    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Write consecutive uniforms starting at `offset`. Values past the end are dropped.
    pub fn with_uniforms(mut self, offset: usize, values: &[f32]) -> Self {
        self.set_uniforms(offset, values);
        self
    }

    pub fn set_uniforms(&mut self, offset: usize, values: &[f32]) {
        for (i, v) in values.iter().enumerate() {
            if let Some(slot) = self.uniforms.get_mut(offset + i) {
                *slot = *v;
            }
        }
    }

    pub fn set_uniform(&mut self, index: usize, value: f32) {
        self.set_uniforms(index, &[value]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_past_end_are_dropped() {
        let mat = MaterialSlot::new(ShaderId(1), GeometryId(0))
            .with_uniforms(6, &[1.0, 2.0, 3.0]);
        assert_eq!(mat.uniforms[6], 1.0);
        assert_eq!(mat.uniforms[7], 2.0);
    }

    #[test]
    fn defaults_are_opaque_alpha() {
        let mat = MaterialSlot::new(ShaderId(0), GeometryId(0));
        assert_eq!(mat.blend, BlendMode::Alpha);
        assert_eq!(mat.opacity, 1.0);
        assert!(mat.texture.is_none());
    }
}
