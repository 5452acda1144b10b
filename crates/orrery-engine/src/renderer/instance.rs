use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use crate::api::types::GameEvent;
use crate::systems::lighting::PointLight;

/// Per-mesh render record.
/// Must match the host protocol: 32 floats = 128 bytes stride.
///
/// `shape` is 0 sphere, 1 ring, 2 points. For spheres `a` is the radius; for
/// rings `a`/`b` are the inner/outer radii. `texture` is -1 when the surface
/// has no loaded texture.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major world matrix.
    pub model: [f32; 16],
    /// Base color with effective opacity in `a`.
    pub color: [f32; 4],
    /// Emissive RGB and intensity.
    pub emissive: [f32; 4],
    pub shape: f32,
    pub a: f32,
    pub b: f32,
    pub segments: f32,
    pub texture: f32,
    /// Bits 0-1: material kind. Bit 2: transparent. Bit 3: double sided.
    pub flags: f32,
    pub _pad: [f32; 2],
}

impl MeshInstance {
    pub const FLOATS: usize = 32;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const FLAG_TRANSPARENT: u32 = 1 << 2;
    pub const FLAG_DOUBLE_SIDED: u32 = 1 << 3;
}

/// One starfield point in world space.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl PointVertex {
    pub const FLOATS: usize = 8;
}

/// Camera matrices for the host's vertex shaders.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [f32; 16],
    pub view: [f32; 16],
    /// Eye position, w = 1.
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 36;

    pub fn new(view_proj: Mat4, view: Mat4, eye: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array(),
            view: view.to_cols_array(),
            eye: eye.extend(1.0).to_array(),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO)
    }
}

/// All per-frame data the host renderer reads, one `Vec` per section.
/// Pushes beyond a section's capacity are dropped.
pub struct FrameBuffers {
    pub camera: CameraUniform,
    /// Opaque instances first; `[transparent_split..]` need blending.
    pub instances: Vec<MeshInstance>,
    pub transparent_split: u32,
    pub points: Vec<PointVertex>,
    pub lights: Vec<PointLight>,
    pub events: Vec<GameEvent>,
    pub ambient: [f32; 4],
    max_instances: usize,
    max_points: usize,
    max_lights: usize,
    max_events: usize,
}

impl FrameBuffers {
    pub fn with_capacity(max_instances: usize, max_points: usize, max_lights: usize, max_events: usize) -> Self {
        Self {
            camera: CameraUniform::default(),
            instances: Vec::with_capacity(max_instances),
            transparent_split: 0,
            points: Vec::with_capacity(max_points),
            lights: Vec::with_capacity(max_lights),
            events: Vec::with_capacity(max_events),
            ambient: [1.0, 1.0, 1.0, 1.0],
            max_instances,
            max_points,
            max_lights,
            max_events,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.transparent_split = 0;
        self.points.clear();
        self.lights.clear();
        self.events.clear();
    }

    /// Returns `false` if the instance section is full.
    pub fn push_instance(&mut self, instance: MeshInstance) -> bool {
        push_bounded(&mut self.instances, instance, self.max_instances)
    }

    pub fn push_point(&mut self, point: PointVertex) -> bool {
        push_bounded(&mut self.points, point, self.max_points)
    }

    pub fn push_light(&mut self, light: PointLight) -> bool {
        push_bounded(&mut self.lights, light, self.max_lights)
    }

    pub fn push_event(&mut self, event: GameEvent) -> bool {
        push_bounded(&mut self.events, event, self.max_events)
    }

    // ---- Raw pointers for host reads out of linear memory ----

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }
}

fn push_bounded<T>(buf: &mut Vec<T>, item: T, max: usize) -> bool {
    if buf.len() >= max {
        return false;
    }
    buf.push(item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::{CAMERA_FLOATS, INSTANCE_FLOATS, POINT_FLOATS};

    #[test]
    fn record_sizes_match_protocol() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), INSTANCE_FLOATS * 4);
        assert_eq!(std::mem::size_of::<PointVertex>(), POINT_FLOATS * 4);
        assert_eq!(std::mem::size_of::<CameraUniform>(), CAMERA_FLOATS * 4);
    }

    #[test]
    fn pushes_stop_at_capacity() {
        let mut buf = FrameBuffers::with_capacity(2, 0, 1, 1);
        assert!(buf.push_instance(MeshInstance::default()));
        assert!(buf.push_instance(MeshInstance::default()));
        assert!(!buf.push_instance(MeshInstance::default()));
        assert!(!buf.push_point(PointVertex::default()));
        assert_eq!(buf.instances.len(), 2);
        buf.clear();
        assert!(buf.instances.is_empty());
    }

    #[test]
    fn camera_uniform_eye_has_unit_w() {
        let cam = CameraUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec3::new(0.0, 40.0, 120.0));
        assert_eq!(cam.eye, [0.0, 40.0, 120.0, 1.0]);
    }
}
