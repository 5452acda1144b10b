// extensions/transform.rs
//
// Transform hierarchy: parent/child links by EntityId, and world-matrix
// propagation into the scene.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.set_parent(moon_id, Some(earth_id));
//   graph.propagate(&mut scene);  // writes Entity::world for every entity

use std::collections::HashMap;
use glam::Mat4;
use crate::api::types::EntityId;
use crate::core::scene::Scene;

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
}

/// Parent/child relationships between scene entities.
///
/// Local transforms live on the entities themselves. Entities the graph has
/// never heard of are roots, so flat scenes need no registration at all.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    ///
    /// Returns `false` (and changes nothing) if the link would create a cycle.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> bool {
        if let Some(p) = parent {
            if p == child || self.is_ancestor(child, p) {
                log::warn!("transform: refusing cycle {:?} -> {:?}", child, p);
                return false;
            }
        }

        let old_parent = self.nodes.get(&child).and_then(|n| n.parent);
        if let Some(old) = old_parent {
            if let Some(old_node) = self.nodes.get_mut(&old) {
                old_node.children.retain(|&c| c != child);
            }
        }

        self.nodes.entry(child).or_default().parent = parent;

        if let Some(p) = parent {
            let parent_node = self.nodes.entry(p).or_default();
            if !parent_node.children.contains(&child) {
                parent_node.children.push(child);
            }
        }
        true
    }

    /// Whether `ancestor` appears on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: EntityId, id: EntityId) -> bool {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Remove an entity from the hierarchy. Its children become roots.
    pub fn remove(&mut self, id: EntityId) {
        let Some(node) = self.nodes.remove(&id) else { return };
        if let Some(parent) = node.parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|&c| c != id);
            }
        }
        for child in node.children {
            if let Some(child_node) = self.nodes.get_mut(&child) {
                child_node.parent = None;
            }
        }
    }

    /// Recompute `Entity::world` for every entity: roots get their local
    /// matrix, children get `parent.world * local`.
    pub fn propagate(&self, scene: &mut Scene) {
        let roots: Vec<EntityId> = scene
            .iter()
            .map(|e| e.id)
            .filter(|&id| self.parent(id).is_none())
            .collect();
        for root in roots {
            self.propagate_recursive(root, Mat4::IDENTITY, scene);
        }
    }

    /// World matrix of `id` computed from current local transforms, without
    /// waiting for the next `propagate`.
    pub fn world_matrix(&self, id: EntityId, scene: &Scene) -> Option<Mat4> {
        let entity = scene.get(id)?;
        let parent = self
            .parent(id)
            .and_then(|p| self.world_matrix(p, scene))
            .unwrap_or(Mat4::IDENTITY);
        Some(parent * entity.local_matrix())
    }

    fn propagate_recursive(&self, id: EntityId, parent_world: Mat4, scene: &mut Scene) {
        let world = match scene.get_mut(id) {
            Some(entity) => {
                entity.world = parent_world * entity.local_matrix();
                entity.world
            }
            // Despawned entity: its subtree has nothing left to anchor to.
            None => return,
        };
        for &child in self.children(id) {
            self.propagate_recursive(child, world, scene);
        }
    }

    /// Number of entities with a recorded link.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
