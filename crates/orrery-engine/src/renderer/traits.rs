//! Backend contract for frame consumers.
//!
//! In the browser the host reads the frame buffers straight out of linear
//! memory. Native or test backends implement `Renderer` and receive the
//! same data through `GameRunner::submit`.

use super::instance::{CameraUniform, MeshInstance, PointVertex};
use crate::systems::lighting::PointLight;

/// Renderer trait for draw backends.
pub trait Renderer {
    /// Backend identifier (e.g. "webgl", "wgpu", "headless").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData);

    /// The render surface changed size. Called before the next `draw`.
    fn resize(&mut self, width: u32, height: u32);
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    pub camera: &'a CameraUniform,
    /// Opaque meshes, then transparent ones from `transparent_split`.
    pub instances: &'a [MeshInstance],
    pub transparent_split: u32,
    pub points: &'a [PointVertex],
    pub lights: &'a [PointLight],
    /// Ambient RGB and intensity.
    pub ambient: [f32; 4],
    pub surface_width: f32,
    pub surface_height: f32,
}

impl FrameData<'_> {
    pub fn opaque(&self) -> &[MeshInstance] {
        &self.instances[..self.split()]
    }

    pub fn transparent(&self) -> &[MeshInstance] {
        &self.instances[self.split()..]
    }

    fn split(&self) -> usize {
        (self.transparent_split as usize).min(self.instances.len())
    }
}
