use glam::{Vec2, Vec3};
use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::TextureRegistry;
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::extensions::transform::TransformGraph;
use crate::extensions::tween::TweenState;
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::controls::OrbitControls;
use crate::renderer::viewport::Viewport;
use crate::systems::lighting::LightState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Render surface size until the host reports the real one.
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Maximum number of mesh instances per frame (default: 64).
    pub max_instances: usize,
    /// Maximum number of point vertices per frame (default: 4096).
    pub max_points: usize,
    /// Maximum number of point lights (default: 4).
    pub max_lights: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Longest frame delta honored, in seconds (default: 0.1).
    pub max_frame_dt: f32,
    /// Seed for procedural content.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            fov_y: 75.0,
            near: 0.1,
            far: 2000.0,
            max_instances: 64,
            max_points: 4096,
            max_lights: 4,
            max_events: 32,
            max_frame_dt: 0.1,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the scene. Runs once.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One frame of game logic. `input` holds the events that arrived since
    /// the previous frame, in order.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub tweens: TweenState,
    pub lights: LightState,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    pub textures: TextureRegistry,
    pub events: Vec<GameEvent>,
    /// Clamped dt of the frame being updated.
    pub dt: f32,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            tweens: TweenState::new(),
            lights: LightState::with_capacity(config.max_lights),
            camera: PerspectiveCamera::new(config.fov_y, viewport.aspect(), config.near, config.far),
            controls: OrbitControls::default(),
            viewport,
            textures: TextureRegistry::new(),
            events: Vec::with_capacity(config.max_events),
            dt: 0.0,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity to the scene, optionally under a parent. Returns its id.
    pub fn spawn(&mut self, entity: Entity, parent: Option<EntityId>) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);
        if parent.is_some() {
            self.graph.set_parent(id, parent);
        }
        id
    }

    /// Remove an entity with its hierarchy links and tweens.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.graph.remove(id);
        self.tweens.remove_entity(id);
        self.scene.despawn(id)
    }

    /// Current world position of an entity, reflecting local changes made
    /// earlier in this frame.
    pub fn world_position(&self, id: EntityId) -> Option<Vec3> {
        self.graph
            .world_matrix(id, &self.scene)
            .map(|m| m.w_axis.truncate())
    }

    /// Resize the render surface and refit the camera. Returns `false` if
    /// the size was rejected.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !self.viewport.resize(width, height) {
            return false;
        }
        self.camera.set_aspect(self.viewport.aspect());
        true
    }

    /// Canvas pixel → normalized device coordinates for the current surface.
    pub fn pixel_to_ndc(&self, px: Vec2) -> Vec2 {
        self.viewport.to_ndc(px)
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
