use crate::api::types::GameEvent;
use crate::assets::registry::TextureRegistry;
use crate::bridge::protocol::*;
use crate::components::entity::Entity;
use crate::components::material::Material;
use crate::components::mesh::Mesh;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::instance::{CameraUniform, FrameBuffers, MeshInstance, PointVertex};
use crate::renderer::viewport::Viewport;
use crate::systems::lighting::LightState;

/// Build the frame buffers from the scene.
///
/// Meshes are written opaque first, then transparent, with
/// `transparent_split` at the boundary. Point meshes go to the point buffer
/// in world space. Inactive entities and entities without both a mesh and a
/// material are skipped. World matrices must be propagated first.
pub fn build_frame_buffers<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &PerspectiveCamera,
    lights: &LightState,
    textures: &TextureRegistry,
    events: &[GameEvent],
    buffers: &mut FrameBuffers,
) {
    buffers.clear();
    buffers.camera = CameraUniform::new(camera.view_projection(), camera.view_matrix(), camera.position);

    let mut transparent: Vec<MeshInstance> = Vec::new();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let (Some(mesh), Some(material)) = (&entity.mesh, &entity.material) else { continue };

        if let Mesh::Points { positions, size } = mesh {
            let alpha = material.effective_opacity();
            for p in positions {
                let w = entity.world.transform_point3(*p);
                let pushed = buffers.push_point(PointVertex {
                    x: w.x,
                    y: w.y,
                    z: w.z,
                    size: *size,
                    r: material.color.r,
                    g: material.color.g,
                    b: material.color.b,
                    a: alpha,
                });
                if !pushed {
                    log::warn!("render: point buffer full, starfield truncated");
                    break;
                }
            }
            continue;
        }

        let instance = mesh_instance(entity, mesh, material, textures);
        if material.transparent {
            transparent.push(instance);
        } else if !buffers.push_instance(instance) {
            log::warn!("render: instance buffer full, dropping {:?}", entity.id);
        }
    }

    buffers.transparent_split = buffers.instances.len() as u32;
    for instance in transparent {
        if !buffers.push_instance(instance) {
            log::warn!("render: instance buffer full, dropping transparent meshes");
            break;
        }
    }

    for light in lights.iter() {
        buffers.push_light(*light);
    }
    let ambient = lights.ambient();
    buffers.ambient = [ambient.r, ambient.g, ambient.b, lights.ambient_intensity()];

    for event in events {
        buffers.push_event(*event);
    }
}

fn mesh_instance(entity: &Entity, mesh: &Mesh, material: &Material, textures: &TextureRegistry) -> MeshInstance {
    let (a, b, segments) = match *mesh {
        Mesh::Sphere { radius, segments } => (radius, 0.0, segments),
        Mesh::Ring { inner, outer, segments } => (inner, outer, segments),
        Mesh::Points { size, .. } => (size, 0.0, 0),
    };
    let mut flags = material.kind.code();
    if material.transparent {
        flags |= MeshInstance::FLAG_TRANSPARENT;
    }
    if material.double_sided {
        flags |= MeshInstance::FLAG_DOUBLE_SIDED;
    }
    let c = material.color;
    let e = material.emissive;
    MeshInstance {
        model: entity.world.to_cols_array(),
        color: [c.r, c.g, c.b, material.effective_opacity()],
        emissive: [e.r, e.g, e.b, material.emissive_intensity],
        shape: mesh.shape_code(),
        a,
        b,
        segments: segments as f32,
        texture: textures.wire_index(material.texture),
        flags: flags as f32,
        _pad: [0.0; 2],
    }
}

/// Pack the frame into one contiguous snapshot following `ProtocolLayout`.
/// `out` is resized to the layout's total; unused slots are zero.
pub fn pack_snapshot(
    buffers: &FrameBuffers,
    layout: &ProtocolLayout,
    frame: u64,
    viewport: &Viewport,
    out: &mut Vec<f32>,
) {
    out.clear();
    out.resize(layout.buffer_total_floats, 0.0);

    let instances = buffers.instances.len().min(layout.max_instances);
    let points = buffers.points.len().min(layout.max_points);
    let lights = buffers.lights.len().min(layout.max_lights);
    let events = buffers.events.len().min(layout.max_events);

    out[HEADER_FRAME_COUNTER] = frame as f32;
    out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    out[HEADER_SURFACE_WIDTH] = viewport.width();
    out[HEADER_SURFACE_HEIGHT] = viewport.height();
    out[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
    out[HEADER_INSTANCE_COUNT] = instances as f32;
    out[HEADER_MAX_POINTS] = layout.max_points as f32;
    out[HEADER_POINT_COUNT] = points as f32;
    out[HEADER_MAX_LIGHTS] = layout.max_lights as f32;
    out[HEADER_LIGHT_COUNT] = lights as f32;
    out[HEADER_MAX_EVENTS] = layout.max_events as f32;
    out[HEADER_EVENT_COUNT] = events as f32;
    out[HEADER_AMBIENT_R..=HEADER_AMBIENT_INTENSITY].copy_from_slice(&buffers.ambient);

    copy_section(out, layout.camera_offset, std::slice::from_ref(&buffers.camera));
    copy_section(out, layout.instance_data_offset, &buffers.instances[..instances]);
    copy_section(out, layout.point_data_offset, &buffers.points[..points]);
    copy_section(out, layout.light_data_offset, &buffers.lights[..lights]);
    copy_section(out, layout.event_data_offset, &buffers.events[..events]);
}

fn copy_section<T: bytemuck::Pod>(out: &mut [f32], offset: usize, records: &[T]) {
    let floats: &[f32] = bytemuck::cast_slice(records);
    out[offset..offset + floats.len()].copy_from_slice(floats);
}
