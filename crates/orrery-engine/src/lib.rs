pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::material::{Color, Material, MaterialKind};
pub use components::mesh::Mesh;
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use core::rng::Rng;
pub use renderer::camera::PerspectiveCamera;
pub use renderer::controls::{OrbitControls, Spherical};
pub use renderer::viewport::Viewport;
pub use renderer::instance::{CameraUniform, FrameBuffers, MeshInstance, PointVertex};
pub use renderer::traits::{FrameData, Renderer};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{AssetError, TextureDescriptor, TextureManifest};
pub use assets::registry::{TextureId, TextureRegistry, TextureState};
pub use bridge::protocol::ProtocolLayout;
pub use systems::lighting::{PointLight, LightState};
pub use systems::picking::{BoundingSphere, Ray, intersect_sphere, nearest_hit};
pub use systems::render::{build_frame_buffers, pack_snapshot};

// Extensions: decoupled optional systems
pub use extensions::{
    Easing, lerp, lerp_vec3, ease, ease_vec3,
    TransformGraph,
    TweenState, Tween, TweenId, TweenTarget, TweenLoop, TweenSubject, TweenChannel,
};
