/// Frame snapshot layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 36 floats]
/// [Mesh instances: max_instances × 32 floats]
/// [Point vertices: max_points × 8 floats]
/// [Lights: max_lights × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header of every snapshot, so the host
/// can compute offsets without a separate handshake.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_SURFACE_WIDTH: usize = 2;
pub const HEADER_SURFACE_HEIGHT: usize = 3;
pub const HEADER_MAX_INSTANCES: usize = 4;
pub const HEADER_INSTANCE_COUNT: usize = 5;
pub const HEADER_MAX_POINTS: usize = 6;
pub const HEADER_POINT_COUNT: usize = 7;
pub const HEADER_MAX_LIGHTS: usize = 8;
pub const HEADER_LIGHT_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_AMBIENT_R: usize = 12;
pub const HEADER_AMBIENT_G: usize = 13;
pub const HEADER_AMBIENT_B: usize = 14;
pub const HEADER_AMBIENT_INTENSITY: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera record: view_proj[16], view[16], eye[4].
pub const CAMERA_FLOATS: usize = 36;

/// Floats per mesh instance (see `MeshInstance`).
pub const INSTANCE_FLOATS: usize = 32;

/// Floats per point vertex: x, y, z, size, r, g, b, a.
pub const POINT_FLOATS: usize = 8;

/// Floats per light: x, y, z, r, g, b, intensity, range.
pub const LIGHT_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed snapshot layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_points: usize,
    pub max_lights: usize,
    pub max_events: usize,

    /// Offset (in floats) where the camera record begins.
    pub camera_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where point data begins.
    pub point_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total snapshot size in floats.
    pub buffer_total_floats: usize,
    /// Total snapshot size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_points: usize, max_lights: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CAMERA_FLOATS;
        let point_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let light_data_offset = point_data_offset + max_points * POINT_FLOATS;
        let event_data_offset = light_data_offset + max_lights * LIGHT_FLOATS;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_instances,
            max_points,
            max_lights,
            max_events,
            camera_offset,
            instance_data_offset,
            point_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_points,
            config.max_lights,
            config.max_events,
        )
    }
}
