//! Cursor ray picking against planets and the single-highlight invariant.

use glam::Vec2;
use orrery_engine::*;

/// Emissive color of the hovered planet.
pub const HIGHLIGHT: Color = Color::from_hex(0x333333);

/// Index into `planets` of the nearest planet under the cursor.
///
/// `cursor` is in normalized device coordinates. Each planet is tested as a
/// sphere of its mesh radius times its largest world scale, using the
/// current local transforms (so a planet moved or pulsed this frame is
/// picked where it will be drawn).
pub fn pick_hovered_planet(
    cursor: Vec2,
    camera: &PerspectiveCamera,
    scene: &Scene,
    graph: &TransformGraph,
    planets: &[EntityId],
) -> Option<usize> {
    let ray = camera.ray_from_ndc(cursor)?;

    let candidates: Vec<(usize, BoundingSphere)> = planets
        .iter()
        .enumerate()
        .filter_map(|(i, &id)| {
            let entity = scene.get(id)?;
            if !entity.active {
                return None;
            }
            let radius = entity.mesh.as_ref()?.bounding_radius();
            let world = graph.world_matrix(id, scene)?;
            let (scale, _, center) = world.to_scale_rotation_translation();
            Some((i, BoundingSphere { center, radius: radius * scale.abs().max_element() }))
        })
        .collect();

    nearest_hit(&ray, candidates.iter().map(|(_, s)| *s)).map(|(k, _)| candidates[k].0)
}

/// Which planet, if any, currently carries the highlight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    current: Option<usize>,
}

impl HoverState {
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Move the highlight to `picked`. The previous planet is cleared before
    /// the new one is lit, so at most one planet is ever highlighted.
    /// Returns whether the hovered planet changed.
    pub fn apply(&mut self, picked: Option<usize>, scene: &mut Scene, planets: &[EntityId]) -> bool {
        let changed = picked != self.current;
        if changed {
            if let Some(prev) = self.current {
                set_emissive(scene, planets, prev, Color::BLACK);
            }
            log::debug!("hover: {:?} -> {:?}", self.current, picked);
        }
        if let Some(i) = picked {
            set_emissive(scene, planets, i, HIGHLIGHT);
        }
        self.current = picked;
        changed
    }
}

fn set_emissive(scene: &mut Scene, planets: &[EntityId], index: usize, color: Color) {
    let Some(&id) = planets.get(index) else { return };
    if let Some(material) = scene.get_mut(id).and_then(|e| e.material.as_mut()) {
        material.emissive = color;
    }
}
