// extensions/transform.rs
//
// Transform hierarchy extension: tracks parent-child relationships by EntityId.
// Decoupled from Node/Scene internals.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.attach(child_id, parent_id, LocalTransform::new().with_offset(v));
//   graph.propagate(&mut scene);  // children follow their parent's world transform
//
// Roots keep whatever transform the game wrote into the Scene; only descendants
// are recomputed.

use std::collections::HashMap;
use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Local transform data for nodes in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent.
    pub offset: Vec3,
    /// Rotation relative to parent.
    pub rotation: Quat,
    /// Scale relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
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

    /// Spin about the local Y axis.
    pub fn spin_y(&mut self, radians: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_y(radians)).normalize();
    }
}

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: LocalTransform,
}

/// Transform hierarchy graph: manages parent-child relationships.
///
/// Exists separately from Scene. Games that need hierarchy create this
/// alongside their Scene.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Nodes with no parent (top-level), in registration order.
    roots: Vec<EntityId>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a top-level node.
    pub fn register(&mut self, id: EntityId) {
        self.nodes.entry(id).or_default();
        if !self.roots.contains(&id) && self.get_parent(id).is_none() {
            self.roots.push(id);
        }
    }

    /// Register `child` under `parent` with the given local transform.
    pub fn attach(&mut self, child: EntityId, parent: EntityId, local: LocalTransform) {
        self.register(parent);
        self.nodes.entry(child).or_default().local = local;
        self.set_parent(child, Some(parent));
    }

    /// Set the parent of a node. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
        }

        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        if let Some(p) = parent {
            if let Some(parent_node) = self.nodes.get_mut(&p) {
                if !parent_node.children.contains(&child) {
                    parent_node.children.push(child);
                }
            }
            self.roots.retain(|&r| r != child);
        } else if !self.roots.contains(&child) {
            self.roots.push(child);
        }
    }

    pub fn get_local(&self, id: EntityId) -> Option<&LocalTransform> {
        self.nodes.get(&id).map(|n| &n.local)
    }

    pub fn get_local_mut(&mut self, id: EntityId) -> Option<&mut LocalTransform> {
        self.nodes.get_mut(&id).map(|n| &mut n.local)
    }

    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn get_children(&self, id: EntityId) -> Option<&[EntityId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Walk from every root down, writing `parent_world ∘ local` into each
    /// descendant's scene node.
    pub fn propagate(&self, scene: &mut Scene) {
        for &root in &self.roots {
            let Some(node) = scene.get(root) else { continue };
            let (pos, rot, scale) = (node.pos, node.rotation, node.scale);
            self.propagate_children(root, pos, rot, scale, scene);
        }
    }

    fn propagate_children(
        &self,
        id: EntityId,
        parent_pos: Vec3,
        parent_rot: Quat,
        parent_scale: Vec3,
        scene: &mut Scene,
    ) {
        let Some(node) = self.nodes.get(&id) else { return };
        for &child in &node.children {
            let Some(child_node) = self.nodes.get(&child) else { continue };
            let local = &child_node.local;

            let world_pos = parent_pos + parent_rot * (parent_scale * local.offset);
            let world_rot = (parent_rot * local.rotation).normalize();
            let world_scale = parent_scale * local.scale;

            if let Some(n) = scene.get_mut(child) {
                n.pos = world_pos;
                n.rotation = world_rot;
                n.scale = world_scale;
            }

            self.propagate_children(child, world_pos, world_rot, world_scale, scene);
        }
    }

    /// Number of nodes in the hierarchy.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
    }
}
