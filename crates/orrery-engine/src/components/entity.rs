use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::material::Material;
use crate::components::mesh::Mesh;

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity over ECS purity.
///
/// `pos`, `rotation` and `scale` are local to the parent (or the world for
/// roots). `world` is written by `TransformGraph::propagate`.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are not rendered).
    pub active: bool,
    /// Local position.
    pub pos: Vec3,
    /// Local euler rotation in radians, applied X then Y then Z.
    pub rotation: Vec3,
    /// Local scale.
    pub scale: Vec3,
    /// World matrix from the last propagation.
    pub world: Mat4,
    /// Geometry (entities without a mesh are invisible groups).
    pub mesh: Option<Mesh>,
    /// Surface (ignored without a mesh).
    pub material: Option<Material>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            world: Mat4::IDENTITY,
            mesh: None,
            material: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self.world = self.local_matrix();
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self.world = self.local_matrix();
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self.world = self.local_matrix();
        self
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Local rotation as a quaternion (XYZ order).
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local transform matrix (scale, then rotate, then translate).
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.pos)
    }

    /// World-space origin from the last propagation.
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    /// Largest world-space axis scale from the last propagation.
    pub fn world_max_scale(&self) -> f32 {
        let (scale, _, _) = self.world.to_scale_rotation_translation();
        scale.abs().max_element()
    }
}
