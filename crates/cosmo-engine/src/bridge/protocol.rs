/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 28 floats]
/// [Guides: max_guide_vertices × 7 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.
/// Mesh geometry and the camera uniform travel through their own pointers,
/// not through this buffer.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_BLEND_SPLIT: usize = 4;
pub const HEADER_MAX_GUIDE_VERTICES: usize = 5;
pub const HEADER_GUIDE_VERTEX_COUNT: usize = 6;
pub const HEADER_VIEWPORT_WIDTH: usize = 7;
pub const HEADER_VIEWPORT_HEIGHT: usize = 8;
pub const HEADER_MAX_EVENTS: usize = 9;
pub const HEADER_EVENT_COUNT: usize = 10;
pub const HEADER_PROTOCOL_VERSION: usize = 11;
pub const HEADER_SIM_TIME: usize = 12;
pub const HEADER_BLOOM_ENABLED: usize = 13;
pub const HEADER_TEXTURE_EPOCH: usize = 14;
pub const HEADER_RESERVED: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 2.0;

/// Floats per render instance (wire format — never changes).
pub const INSTANCE_FLOATS: usize = 28;

/// Floats per guide vertex: x, y, z, r, g, b, a (wire format — never changes).
pub const GUIDE_VERTEX_FLOATS: usize = 7;

/// Floats per game event: kind, a, b, c (wire format — never changes).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,
    /// Maximum orbit-guide vertices.
    pub max_guide_vertices: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Size of guide data section in floats.
    pub guide_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where guide data begins.
    pub guide_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_guide_vertices: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let guide_data_floats = max_guide_vertices * GUIDE_VERTEX_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let guide_data_offset = instance_data_offset + instance_data_floats;
        let event_data_offset = guide_data_offset + guide_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_instances,
            max_guide_vertices,
            max_events,
            instance_data_floats,
            guide_data_floats,
            event_data_floats,
            instance_data_offset,
            guide_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_guide_vertices, config.max_events)
    }
}
