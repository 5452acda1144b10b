use glam::Vec3;

/// Procedural geometry the host renderer tessellates.
///
/// Segment counts are forwarded as-is; the engine itself only needs the
/// analytic shape (for picking and bounds).
#[derive(Debug, Clone, PartialEq)]
pub enum Mesh {
    /// UV sphere centered on the entity origin.
    Sphere { radius: f32, segments: u32 },
    /// Flat annulus in the local XY plane (rotate about X to lay it flat).
    Ring { inner: f32, outer: f32, segments: u32 },
    /// Point cloud in local space.
    Points { positions: Vec<Vec3>, size: f32 },
}

impl Mesh {
    pub fn sphere(radius: f32, segments: u32) -> Self {
        Mesh::Sphere { radius, segments }
    }

    pub fn ring(inner: f32, outer: f32, segments: u32) -> Self {
        Mesh::Ring { inner, outer, segments }
    }

    pub fn points(positions: Vec<Vec3>, size: f32) -> Self {
        Mesh::Points { positions, size }
    }

    /// Radius of a sphere around the local origin that encloses the shape.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Mesh::Sphere { radius, .. } => *radius,
            Mesh::Ring { outer, .. } => *outer,
            Mesh::Points { positions, .. } => positions
                .iter()
                .map(|p| p.length())
                .fold(0.0, f32::max),
        }
    }

    /// Wire code for the instance `shape` field.
    pub fn shape_code(&self) -> f32 {
        match self {
            Mesh::Sphere { .. } => 0.0,
            Mesh::Ring { .. } => 1.0,
            Mesh::Points { .. } => 2.0,
        }
    }
}
