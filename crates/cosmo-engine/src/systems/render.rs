use crate::components::material::BlendMode;
use crate::components::node::Node;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of nodes.
/// Groups nodes by blend mode: alpha-blended first, then additive.
/// Sets `blend_split` at the boundary. Stops at `max_instances`.
pub fn build_render_buffer<'a>(
    nodes: impl Iterator<Item = &'a Node>,
    buffer: &mut RenderBuffer,
    max_instances: usize,
) {
    buffer.clear();

    let mut alpha_instances: Vec<RenderInstance> = Vec::new();
    let mut additive_instances: Vec<RenderInstance> = Vec::new();

    for node in nodes {
        if !node.visible {
            continue;
        }

        let material = match &node.material {
            Some(m) => m,
            None => continue,
        };

        if material.opacity <= 0.0 {
            continue;
        }

        let instance = RenderInstance {
            position: node.pos.to_array(),
            rotation: node.rotation.to_array(),
            scale: node.scale.to_array(),
            color: material.color,
            opacity: material.opacity,
            shader: material.shader.0 as f32,
            texture: material.texture.map_or(-1.0, |t| t.0 as f32),
            geometry: material.geometry.0 as f32,
            uniforms: material.uniforms,
            _pad: [0.0; 3],
        };

        match material.blend {
            BlendMode::Alpha => alpha_instances.push(instance),
            BlendMode::Additive => additive_instances.push(instance),
        }
    }

    let total = alpha_instances.len() + additive_instances.len();
    if total > max_instances {
        log::warn!("render buffer overflow: {} instances, capacity {}", total, max_instances);
    }

    alpha_instances.truncate(max_instances);
    let split = alpha_instances.len() as u32;
    let room = max_instances - alpha_instances.len();
    additive_instances.truncate(room);

    for inst in alpha_instances {
        buffer.push(inst);
    }
    buffer.set_blend_split(split);
    for inst in additive_instances {
        buffer.push(inst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::material::{GeometryId, MaterialSlot, ShaderId, TextureId};
    use glam::Vec3;

    fn material(blend: BlendMode) -> MaterialSlot {
        MaterialSlot::new(ShaderId(2), GeometryId(1)).with_blend(blend)
    }

    #[test]
    fn build_buffer_groups_by_blend_mode() {
        let nodes = vec![
            Node::new(EntityId(1)).with_material(material(BlendMode::Additive)),
            Node::new(EntityId(2))
                .with_pos(Vec3::new(1.0, 2.0, 3.0))
                .with_material(material(BlendMode::Alpha).with_texture(Some(TextureId(4)))),
            Node::new(EntityId(3)).with_material(material(BlendMode::Alpha)),
        ];

        let mut buffer = RenderBuffer::new();
        build_render_buffer(nodes.iter(), &mut buffer, 512);

        assert_eq!(buffer.instance_count(), 3);
        assert_eq!(buffer.blend_split, 2);
        assert_eq!(buffer.instances[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(buffer.instances[0].texture, 4.0);
        assert_eq!(buffer.instances[1].texture, -1.0);
    }

    #[test]
    fn hidden_and_bare_nodes_are_skipped() {
        let nodes = vec![
            Node::new(EntityId(1)).with_material(material(BlendMode::Alpha)).with_visible(false),
            Node::new(EntityId(2)),
            Node::new(EntityId(3)).with_material(material(BlendMode::Additive).with_opacity(0.0)),
        ];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(nodes.iter(), &mut buffer, 512);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn capacity_is_respected() {
        let nodes: Vec<Node> = (0..10)
            .map(|i| Node::new(EntityId(i)).with_material(material(BlendMode::Additive)))
            .collect();
        let mut buffer = RenderBuffer::new();
        build_render_buffer(nodes.iter(), &mut buffer, 4);
        assert_eq!(buffer.instance_count(), 4);
    }
}
