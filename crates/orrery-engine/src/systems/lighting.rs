/// Point and ambient lights for the 3D scene.
///
/// Lights are persistent: they stay until explicitly removed. Each frame
/// the active lights are copied to the light buffer for the renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::material::Color;

/// An omnidirectional light with linear falloff to zero at `range`.
/// A range of 0 means no falloff.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    pub range: f32,
}

impl PointLight {
    /// - `pos`: World-space position
    /// - `color`: RGB color
    /// - `intensity`: Light strength multiplier
    /// - `range`: Falloff distance in world units (0 = infinite)
    pub fn new(pos: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            range,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.x = pos.x;
        self.y = pos.y;
        self.z = pos.z;
        self
    }

    /// Intensity reaching a world point (before surface shading).
    pub fn intensity_at(&self, point: Vec3) -> f32 {
        if self.range <= 0.0 {
            return self.intensity;
        }
        let d = self.pos().distance(point);
        self.intensity * (1.0 - d / self.range).max(0.0)
    }
}

/// Active point lights plus one ambient term.
///
/// Ambient defaults to white at full intensity, which renders unlit when no
/// point lights are present.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: Color,
    ambient_intensity: f32,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(4)
    }

    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: Color::WHITE,
            ambient_intensity: 1.0,
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn as_slice(&self) -> &[PointLight] {
        &self.lights
    }

    /// Remove lights that don't match a predicate.
    pub fn retain<F: FnMut(&PointLight) -> bool>(&mut self, f: F) {
        self.lights.retain(f);
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Set the ambient color and intensity.
    /// A space scene wants something dim, e.g. white at 0.2.
    pub fn set_ambient(&mut self, color: Color, intensity: f32) {
        self.ambient = color;
        self.ambient_intensity = intensity;
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn ambient_intensity(&self) -> f32 {
        self.ambient_intensity
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
