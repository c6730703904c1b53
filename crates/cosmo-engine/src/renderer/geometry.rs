//! Static geometry uploaded once by the host.
//!
//! Analytic primitives (spheres, planes) are described by parameters only and
//! built GPU-side. Custom meshes and point clouds carry flat vertex arrays
//! that the host reads through raw pointers.

use serde::Serialize;
use crate::components::material::GeometryId;

/// Floats per mesh vertex: x, y, z, u, v.
pub const MESH_VERTEX_FLOATS: usize = 5;
/// Floats per point-cloud vertex: x, y, z, r, g, b, size.
pub const POINT_VERTEX_FLOATS: usize = 7;

/// Host-facing description of one geometry entry (no vertex payload).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeometryDesc {
    /// Unit-radius UV sphere; node scale sets the radius.
    Sphere { segments: u32 },
    /// Indexed triangle mesh with `MESH_VERTEX_FLOATS` per vertex.
    Mesh { vertices: u32, indices: u32, double_sided: bool },
    /// Point sprites with `POINT_VERTEX_FLOATS` per vertex.
    Points { count: u32, size_attenuation: bool },
}

#[derive(Debug, Clone)]
struct GeometryEntry {
    name: String,
    desc: GeometryDesc,
    vertices: Vec<f32>,
    indices: Vec<u32>,
}

/// A single point in a point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointVertex {
    pub pos: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
}

/// Triangle mesh under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Interleaved x, y, z, u, v.
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / MESH_VERTEX_FLOATS
    }

    pub fn push_vertex(&mut self, pos: [f32; 3], uv: [f32; 2]) -> u32 {
        let index = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&[pos[0], pos[1], pos[2], uv[0], uv[1]]);
        index
    }

    pub fn position(&self, index: usize) -> [f32; 3] {
        let base = index * MESH_VERTEX_FLOATS;
        [self.vertices[base], self.vertices[base + 1], self.vertices[base + 2]]
    }

    pub fn uv(&self, index: usize) -> [f32; 2] {
        let base = index * MESH_VERTEX_FLOATS;
        [self.vertices[base + 3], self.vertices[base + 4]]
    }
}

/// Registry of all geometry the scene references by `GeometryId`.
#[derive(Debug, Default)]
pub struct GeometryStore {
    entries: Vec<GeometryEntry>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: &str, desc: GeometryDesc, vertices: Vec<f32>, indices: Vec<u32>) -> GeometryId {
        let id = GeometryId(self.entries.len() as u32);
        self.entries.push(GeometryEntry { name: name.to_string(), desc, vertices, indices });
        id
    }

    /// Register a unit sphere. Reuses an existing one with the same name.
    pub fn add_sphere(&mut self, name: &str, segments: u32) -> GeometryId {
        if let Some(id) = self.find(name) {
            return id;
        }
        self.push(name, GeometryDesc::Sphere { segments }, Vec::new(), Vec::new())
    }

    pub fn add_mesh(&mut self, name: &str, mesh: MeshData, double_sided: bool) -> GeometryId {
        let desc = GeometryDesc::Mesh {
            vertices: mesh.vertex_count() as u32,
            indices: mesh.indices.len() as u32,
            double_sided,
        };
        self.push(name, desc, mesh.vertices, mesh.indices)
    }

    pub fn add_points(&mut self, name: &str, points: &[PointVertex], size_attenuation: bool) -> GeometryId {
        let mut vertices = Vec::with_capacity(points.len() * POINT_VERTEX_FLOATS);
        for p in points {
            vertices.extend_from_slice(&p.pos);
            vertices.extend_from_slice(&p.color);
            vertices.push(p.size);
        }
        let desc = GeometryDesc::Points { count: points.len() as u32, size_attenuation };
        self.push(name, desc, vertices, Vec::new())
    }

    pub fn find(&self, name: &str) -> Option<GeometryId> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| GeometryId(i as u32))
    }

    pub fn desc(&self, id: GeometryId) -> Option<&GeometryDesc> {
        self.entries.get(id.0 as usize).map(|e| &e.desc)
    }

    pub fn vertices(&self, id: GeometryId) -> &[f32] {
        self.entries.get(id.0 as usize).map_or(&[], |e| e.vertices.as_slice())
    }

    pub fn indices(&self, id: GeometryId) -> &[u32] {
        self.entries.get(id.0 as usize).map_or(&[], |e| e.indices.as_slice())
    }

    /// JSON array of `{ name, type, ... }` descriptors in id order.
    pub fn descriptors_json(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Named<'a> {
            id: u32,
            name: &'a str,
            #[serde(flatten)]
            desc: &'a GeometryDesc,
        }
        let list: Vec<Named> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| Named { id: i as u32, name: &e.name, desc: &e.desc })
            .collect();
        serde_json::to_string(&list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
