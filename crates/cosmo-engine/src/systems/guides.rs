//! Lyon-based orbit guide tessellation.
//!
//! Orbit guides are flat rings in the XZ plane. Each ring is stroked twice:
//! a wide translucent ribbon and a thin brighter line on top of it. Both land
//! in one flat triangle-list buffer the host draws with a single pipeline.
//!
//! # Usage
//!
//! ```ignore
//! // While building the scene:
//! ctx.guides.add_ring(28.0, &GuideStyle::default());
//!
//! // From a UI toggle:
//! ctx.guides.set_visible(false);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

/// Per-vertex data for orbit guides.
/// 7 floats = 28 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GuideVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl GuideVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 7;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 28
}

/// RGBA color for guide strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl GuideColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a packed 0xRRGGBB value.
    pub fn from_hex(rgb: u32, a: f32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
            a,
        }
    }
}

/// Widths, colors and tessellation density of one guide ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideStyle {
    pub ribbon_width: f32,
    pub ribbon_color: GuideColor,
    pub line_width: f32,
    pub line_color: GuideColor,
    /// Polyline points around the ring.
    pub segments: u32,
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            ribbon_width: 0.16,
            ribbon_color: GuideColor::from_hex(0x6688cc, 0.05),
            line_width: 0.03,
            line_color: GuideColor::from_hex(0x8899ff, 0.3),
            segments: 256,
        }
    }
}

/// Vertex constructor for lyon stroke tessellation. Lyon works in 2D;
/// its y axis maps onto world Z.
struct GuideVertexCtor {
    color: GuideColor,
}

impl StrokeVertexConstructor<GuideVertex> for GuideVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> GuideVertex {
        GuideVertex {
            x: vertex.position().x,
            y: 0.0,
            z: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Orbit guide geometry.
///
/// Unlike per-frame vector drawing, rings are tessellated once when the scene
/// is built and stay in the buffer; `visible` only controls what the host is
/// told to draw.
pub struct OrbitGuides {
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<GuideVertex, u32>,
    buffer: Vec<f32>,
    rings: usize,
    visible: bool,
}

impl OrbitGuides {
    pub fn new() -> Self {
        Self {
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(8192 * GuideVertex::FLOATS),
            rings: 0,
            visible: true,
        }
    }

    /// Drop every ring.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.rings = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Flip visibility, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Number of rings added.
    pub fn ring_count(&self) -> usize {
        self.rings
    }

    /// Number of vertices the host should draw (0 while hidden).
    pub fn vertex_count(&self) -> usize {
        if self.visible {
            self.total_vertices()
        } else {
            0
        }
    }

    /// Vertices held regardless of visibility.
    pub fn total_vertices(&self) -> usize {
        self.buffer.len() / GuideVertex::FLOATS
    }

    /// Flat float buffer (triangle list).
    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer to the flat float buffer (for SAB copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Tessellate a ring of `radius` around the origin.
    pub fn add_ring(&mut self, radius: f32, style: &GuideStyle) {
        if radius <= 0.0 || style.segments < 3 {
            return;
        }
        let points: Vec<Vec2> = (0..style.segments)
            .map(|i| {
                let theta = i as f32 / style.segments as f32 * std::f32::consts::TAU;
                Vec2::new(theta.cos() * radius, theta.sin() * radius)
            })
            .collect();

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        let path = builder.build();

        self.stroke_path(&path, style.ribbon_width, style.ribbon_color);
        self.stroke_path(&path, style.line_width, style.line_color);
        self.rings += 1;
    }

    fn stroke_path(&mut self, path: &Path, width: f32, color: GuideColor) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.01).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, GuideVertexCtor { color }),
        );

        match result {
            Ok(_) => self.flush_geometry(),
            Err(e) => {
                log::warn!("orbit guide tessellation failed: {:?}", e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.z, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }
}

impl Default for OrbitGuides {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn guide_vertex_is_28_bytes() {
        assert_eq!(size_of::<GuideVertex>(), 28);
        assert_eq!(GuideVertex::STRIDE_BYTES, 28);
    }

    #[test]
    fn from_hex_unpacks_channels() {
        let c = GuideColor::from_hex(0x6688cc, 0.05);
        assert!((c.r - 0x66 as f32 / 255.0).abs() < 1e-6);
        assert!((c.g - 0x88 as f32 / 255.0).abs() < 1e-6);
        assert!((c.b - 0xcc as f32 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 0.05);
    }

    #[test]
    fn ring_lies_flat_near_its_radius() {
        let mut guides = OrbitGuides::new();
        let style = GuideStyle::default();
        guides.add_ring(28.0, &style);

        assert_eq!(guides.ring_count(), 1);
        assert!(guides.vertex_count() > 0);
        assert_eq!(guides.vertex_count() % 3, 0);
        for v in guides.as_slice().chunks(GuideVertex::FLOATS) {
            assert_eq!(v[1], 0.0);
            let r = (v[0] * v[0] + v[2] * v[2]).sqrt();
            assert!((r - 28.0).abs() <= style.ribbon_width);
        }
    }

    #[test]
    fn ring_carries_both_stroke_colors() {
        let mut guides = OrbitGuides::new();
        guides.add_ring(10.0, &GuideStyle::default());
        let alphas: Vec<f32> = guides.as_slice().chunks(GuideVertex::FLOATS).map(|v| v[6]).collect();
        assert!(alphas.iter().any(|&a| (a - 0.05).abs() < 1e-6));
        assert!(alphas.iter().any(|&a| (a - 0.3).abs() < 1e-6));
    }

    #[test]
    fn hidden_guides_report_no_vertices() {
        let mut guides = OrbitGuides::new();
        guides.add_ring(10.0, &GuideStyle::default());
        let total = guides.total_vertices();

        assert!(!guides.toggle());
        assert_eq!(guides.vertex_count(), 0);
        assert_eq!(guides.total_vertices(), total);

        guides.set_visible(true);
        assert_eq!(guides.vertex_count(), total);
    }

    #[test]
    fn degenerate_rings_are_ignored() {
        let mut guides = OrbitGuides::new();
        guides.add_ring(0.0, &GuideStyle::default());
        guides.add_ring(-1.0, &GuideStyle::default());
        assert_eq!(guides.ring_count(), 0);
        assert_eq!(guides.total_vertices(), 0);
    }
}
