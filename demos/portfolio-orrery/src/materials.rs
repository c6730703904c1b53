//! Shader programs the host provides, and the uniform layout each one reads
//! from `MaterialSlot::uniforms`.
//!
//! Material builders return ready slots; per-frame updates go through the
//! `set_*` helpers so uniform indices live in one place.

use cosmo_engine::{BlendMode, GeometryId, MaterialSlot, ShaderId, TextureId};

use crate::bodies::OverlaySpec;
use crate::color;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shader {
    /// Lit PBR surface. `[roughness, metalness, normal_tex, specular_tex,
    /// emissive_r, emissive_g, emissive_b, emissive_intensity]`;
    /// texture slots hold a texture id or -1.
    Standard = 0,
    /// Unlit, optionally textured.
    Basic = 1,
    /// Unlit inside-out sphere.
    Backdrop = 2,
    /// Animated sun glow. `[time, glow_r, glow_g, glow_b]`.
    SunSurface = 3,
    /// Fresnel corona. `[time, inner rgb, outer rgb]`.
    Corona = 4,
    /// Light-aware atmosphere. `[time, sun_dir xyz, glow rgb]`.
    Atmosphere = 5,
    /// Flowing bands; color is tint A. `[time, tint_b rgb, frequency,
    /// strength, flow_x, flow_y]`.
    SurfaceOverlay = 6,
    /// Tapered comet tail, fades along U.
    CometTail = 7,
    /// Meteor streak; color is the tail. `[head rgb, sharpness]`.
    Meteor = 8,
    /// Point sprites. `[size]`.
    Points = 9,
}

impl Shader {
    pub fn id(self) -> ShaderId {
        ShaderId(self as u32)
    }
}

const NO_TEXTURE: f32 = -1.0;

fn texture_uniform(texture: Option<TextureId>) -> f32 {
    texture.map_or(NO_TEXTURE, |t| t.0 as f32)
}

// ── Standard ─────────────────────────────────────────────────────────

/// Parameters of a lit surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub map: Option<TextureId>,
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub normal_map: Option<TextureId>,
    pub specular_map: Option<TextureId>,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

impl Surface {
    pub fn new(map: Option<TextureId>, roughness: f32, metalness: f32) -> Self {
        Self {
            map,
            color: [1.0, 1.0, 1.0],
            roughness,
            metalness,
            normal_map: None,
            specular_map: None,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
        }
    }
}

pub fn standard(geometry: GeometryId, surface: &Surface) -> MaterialSlot {
    MaterialSlot::new(Shader::Standard.id(), geometry)
        .with_texture(surface.map)
        .with_color(surface.color)
        .with_uniforms(
            0,
            &[
                surface.roughness,
                surface.metalness,
                texture_uniform(surface.normal_map),
                texture_uniform(surface.specular_map),
                surface.emissive[0],
                surface.emissive[1],
                surface.emissive[2],
                surface.emissive_intensity,
            ],
        )
}

/// Planet roughness/metalness: farther planets are rougher, with a few
/// hand-picked exceptions.
pub fn planet_finish(key: &str, distance: f32) -> (f32, f32) {
    match key {
        "earth" => (0.4, 0.1),
        "venus" => (0.3, 0.05),
        "jupiter" | "saturn" => (0.6, 0.02),
        "mars" => (0.8, 0.0),
        _ => {
            let f = (distance / 100.0).min(1.0);
            (0.5 + f * 0.4, 0.1 - f * 0.1)
        }
    }
}

// ── Unlit ────────────────────────────────────────────────────────────

pub fn basic(geometry: GeometryId, texture: Option<TextureId>, color: [f32; 3]) -> MaterialSlot {
    MaterialSlot::new(Shader::Basic.id(), geometry)
        .with_texture(texture)
        .with_color(color)
}

pub fn backdrop(geometry: GeometryId, texture: Option<TextureId>, tint: [f32; 3]) -> MaterialSlot {
    MaterialSlot::new(Shader::Backdrop.id(), geometry)
        .with_texture(texture)
        .with_color(tint)
}

pub fn points(geometry: GeometryId, sprite: Option<TextureId>, size: f32, opacity: f32) -> MaterialSlot {
    MaterialSlot::new(Shader::Points.id(), geometry)
        .with_texture(sprite)
        .with_blend(BlendMode::Additive)
        .with_opacity(opacity)
        .with_uniforms(0, &[size])
}

// ── Sun ──────────────────────────────────────────────────────────────

pub fn sun_surface(geometry: GeometryId, texture: TextureId, glow: u32) -> MaterialSlot {
    let [r, g, b] = color::hex_to_rgb(glow);
    MaterialSlot::new(Shader::SunSurface.id(), geometry)
        .with_texture(Some(texture))
        .with_blend(BlendMode::Additive)
        .with_uniforms(0, &[0.0, r, g, b])
}

pub fn corona(geometry: GeometryId, inner: [f32; 3], outer: [f32; 3]) -> MaterialSlot {
    MaterialSlot::new(Shader::Corona.id(), geometry)
        .with_blend(BlendMode::Additive)
        .with_uniforms(0, &[0.0, inner[0], inner[1], inner[2], outer[0], outer[1], outer[2]])
}

// ── Shells ───────────────────────────────────────────────────────────

pub fn atmosphere(geometry: GeometryId, glow: u32) -> MaterialSlot {
    let [r, g, b] = color::hex_to_rgb(glow);
    MaterialSlot::new(Shader::Atmosphere.id(), geometry)
        .with_blend(BlendMode::Additive)
        .with_uniforms(0, &[0.0, 1.0, 0.0, 0.0, r, g, b])
}

pub fn surface_overlay(geometry: GeometryId, spec: &OverlaySpec) -> MaterialSlot {
    let [r, g, b] = color::hex_to_rgb(spec.tint_b);
    let [fx, fy] = spec.flow;
    let len = (fx * fx + fy * fy).sqrt();
    let (fx, fy) = if len > 0.0 { (fx / len, fy / len) } else { (1.0, 0.0) };
    MaterialSlot::new(Shader::SurfaceOverlay.id(), geometry)
        .with_color(color::hex_to_rgb(spec.tint_a))
        .with_blend(BlendMode::Additive)
        .with_opacity(spec.opacity)
        .with_uniforms(0, &[0.0, r, g, b, spec.frequency, spec.strength, fx, fy])
}

// ── Comets and meteors ───────────────────────────────────────────────

pub fn comet_tail(geometry: GeometryId, color: [f32; 3], opacity: f32) -> MaterialSlot {
    MaterialSlot::new(Shader::CometTail.id(), geometry)
        .with_color(color)
        .with_blend(BlendMode::Additive)
        .with_opacity(opacity)
}

pub fn meteor(geometry: GeometryId) -> MaterialSlot {
    MaterialSlot::new(Shader::Meteor.id(), geometry)
        .with_color([1.0, 0.8, 0.4])
        .with_blend(BlendMode::Additive)
        .with_opacity(0.0)
        .with_uniforms(0, &[1.2, 1.1, 1.0, 2.5])
}

// ── Per-frame uniform writes ─────────────────────────────────────────

/// Slot 0 is `time` for every animated shader.
pub fn set_time(slot: &mut MaterialSlot, time: f32) {
    slot.set_uniform(0, time);
}

pub fn set_sun_direction(slot: &mut MaterialSlot, dir: [f32; 3]) {
    slot.set_uniforms(1, &dir);
}

pub fn set_meteor_look(slot: &mut MaterialSlot, head: [f32; 3], tail: [f32; 3], sharpness: f32, opacity: f32) {
    slot.color = tail;
    slot.opacity = opacity;
    slot.set_uniforms(0, &[head[0], head[1], head[2], sharpness]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_ids_are_stable() {
        assert_eq!(Shader::Standard.id(), ShaderId(0));
        assert_eq!(Shader::Points.id(), ShaderId(9));
    }

    #[test]
    fn standard_packs_texture_slots() {
        let mut surface = Surface::new(Some(TextureId(2)), 0.4, 0.1);
        surface.normal_map = Some(TextureId(5));
        let slot = standard(GeometryId(0), &surface);
        assert_eq!(slot.texture, Some(TextureId(2)));
        assert_eq!(slot.uniforms[2], 5.0);
        assert_eq!(slot.uniforms[3], NO_TEXTURE);
    }

    #[test]
    fn finish_by_distance_and_override() {
        assert_eq!(planet_finish("mars", 60.0), (0.8, 0.0));
        let (r, m) = planet_finish("neptune", 210.0);
        assert!((r - 0.9).abs() < 1e-6 && m.abs() < 1e-6);
        let (r, m) = planet_finish("mercury", 20.0);
        assert!((r - 0.58).abs() < 1e-6 && (m - 0.08).abs() < 1e-6);
    }

    #[test]
    fn overlay_flow_is_normalized() {
        let spec = OverlaySpec {
            tint_a: 0xffffff,
            tint_b: 0x000000,
            frequency: 6.0,
            strength: 0.4,
            flow: [3.0, 4.0],
            opacity: 0.3,
            radius_offset: 0.01,
            speed_multiplier: 1.0,
        };
        let slot = surface_overlay(GeometryId(0), &spec);
        assert!((slot.uniforms[6] - 0.6).abs() < 1e-6);
        assert!((slot.uniforms[7] - 0.8).abs() < 1e-6);
        assert_eq!(slot.blend, BlendMode::Additive);
    }

    #[test]
    fn time_writes_slot_zero() {
        let mut slot = corona(GeometryId(0), [1.0; 3], [0.5; 3]);
        set_time(&mut slot, 3.5);
        assert_eq!(slot.uniforms[0], 3.5);
        assert_eq!(slot.uniforms[1], 1.0);
    }
}
