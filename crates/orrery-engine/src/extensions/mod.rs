// extensions/mod.rs
//
// Optional extension modules for the engine.
// Decoupled from core Entity/Scene: games opt in by using these systems.

pub mod easing;
pub mod transform;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec3, ease, ease_vec3};
pub use transform::TransformGraph;
pub use tween::{TweenState, Tween, TweenId, TweenTarget, TweenLoop, TweenSubject, TweenChannel};
