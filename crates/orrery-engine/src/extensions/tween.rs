// extensions/tween.rs
//
// Tween system: time-based transitions of entity properties and the camera.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(TweenSubject::Entity(id), Tween::scale(1.0, 1.3, 0.2, Easing::QuadOut));
//   tweens.tick(dt, &mut scene, &graph, &mut camera);

use std::collections::HashMap;
use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;
use super::easing::{lerp, lerp_vec3, Easing};
use super::transform::TransformGraph;

/// What a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenSubject {
    Entity(EntityId),
    Camera,
}

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    /// Entity local position.
    Position { from: Vec3, to: Vec3 },
    /// Entity local scale.
    Scale { from: Vec3, to: Vec3 },
    /// Material opacity (entity must have a material).
    Opacity { from: f32, to: f32 },
    /// Camera eye position, optionally re-aimed at an entity's current
    /// world position after every step.
    CameraPosition { from: Vec3, to: Vec3, look_at: Option<EntityId> },
}

/// Independent property slot. At most one tween per (subject, channel)
/// survives `TweenState::replace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenChannel {
    Position,
    Scale,
    Opacity,
    CameraPosition,
}

impl TweenTarget {
    pub fn channel(&self) -> TweenChannel {
        match self {
            TweenTarget::Position { .. } => TweenChannel::Position,
            TweenTarget::Scale { .. } => TweenChannel::Scale,
            TweenTarget::Opacity { .. } => TweenChannel::Opacity,
            TweenTarget::CameraPosition { .. } => TweenChannel::CameraPosition,
        }
    }
}

/// What happens when a leg completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Stop at `to` and remove the tween.
    #[default]
    Once,
    /// Play to `to`, back to `from`, then stop and remove.
    Yoyo,
    /// Restart from `from` forever.
    Loop,
    /// Alternate direction forever.
    PingPong,
}

/// A single tween animation. `duration` is per leg.
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    /// Seconds per leg.
    pub duration: f32,
    /// Time into the current leg.
    pub elapsed: f32,
    pub easing: Easing,
    pub loop_mode: TweenLoop,
    /// Whether currently playing (can be paused).
    pub playing: bool,
    /// Current leg direction (true = from → to).
    forward: bool,
    /// Optional callback ID reported when the tween finishes.
    pub on_complete: Option<u32>,
}

impl Tween {
    pub fn new(target: TweenTarget, duration: f32, easing: Easing) -> Self {
        Self {
            target,
            duration,
            elapsed: 0.0,
            easing,
            loop_mode: TweenLoop::Once,
            playing: true,
            forward: true,
            on_complete: None,
        }
    }

    pub fn position(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Position { from, to }, duration, easing)
    }

    /// Uniform scale tween.
    pub fn scale(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(
            TweenTarget::Scale { from: Vec3::splat(from), to: Vec3::splat(to) },
            duration,
            easing,
        )
    }

    pub fn opacity(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self::new(TweenTarget::Opacity { from, to }, duration, easing)
    }

    pub fn camera_position(
        from: Vec3,
        to: Vec3,
        look_at: Option<EntityId>,
        duration: f32,
        easing: Easing,
    ) -> Self {
        Self::new(TweenTarget::CameraPosition { from, to, look_at }, duration, easing)
    }

    // -- Builder methods --

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn with_on_complete(mut self, event_id: u32) -> Self {
        self.on_complete = Some(event_id);
        self
    }

    pub fn paused(mut self) -> Self {
        self.playing = false;
        self
    }

    /// Whether the current leg runs from → to.
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    /// Interpolation factor between `from` (0) and `to` (1) right now.
    pub fn factor(&self) -> f32 {
        let t = if self.duration > 0.0 { self.elapsed / self.duration } else { 1.0 };
        let k = self.easing.apply(t);
        if self.forward { k } else { 1.0 - k }
    }

    /// Advance time. Leftover time past the end of a leg carries into the
    /// next leg. Returns `true` once the tween has finished for good.
    fn advance(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }
        self.elapsed += dt.max(0.0);
        while self.elapsed >= self.duration {
            match self.loop_mode {
                TweenLoop::Once => {
                    self.elapsed = self.duration;
                    return true;
                }
                TweenLoop::Yoyo if !self.forward => {
                    self.elapsed = self.duration;
                    return true;
                }
                TweenLoop::Yoyo => {
                    self.elapsed -= self.duration;
                    self.forward = false;
                }
                TweenLoop::Loop | TweenLoop::PingPong => {
                    if self.duration <= 0.0 {
                        self.elapsed = 0.0;
                        break;
                    }
                    self.elapsed -= self.duration;
                    if self.loop_mode == TweenLoop::PingPong {
                        self.forward = !self.forward;
                    }
                }
            }
        }
        false
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// Manages all active tweens.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: HashMap<TweenId, (TweenSubject, Tween)>,
    next_id: u32,
    /// Completed tween events to be polled.
    completed_events: Vec<u32>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween. Returns a handle for later control.
    pub fn add(&mut self, subject: TweenSubject, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, (subject, tween));
        id
    }

    /// Cancel any tween on the same (subject, channel), then add this one.
    pub fn replace(&mut self, subject: TweenSubject, tween: Tween) -> TweenId {
        self.cancel(subject, tween.target.channel());
        self.add(subject, tween)
    }

    /// Remove tweens on one (subject, channel). Returns how many were removed.
    pub fn cancel(&mut self, subject: TweenSubject, channel: TweenChannel) -> usize {
        let before = self.tweens.len();
        self.tweens
            .retain(|_, (s, t)| !(*s == subject && t.target.channel() == channel));
        before - self.tweens.len()
    }

    pub fn remove(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    /// Remove all tweens for an entity.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.tweens.retain(|_, (s, _)| *s != TweenSubject::Entity(entity));
    }

    pub fn pause(&mut self, id: TweenId) {
        if let Some((_, tween)) = self.tweens.get_mut(&id) {
            tween.playing = false;
        }
    }

    pub fn resume(&mut self, id: TweenId) {
        if let Some((_, tween)) = self.tweens.get_mut(&id) {
            tween.playing = true;
        }
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(&id).map(|(_, t)| t)
    }

    /// The live tween on a (subject, channel), if any.
    pub fn find(&self, subject: TweenSubject, channel: TweenChannel) -> Option<&Tween> {
        self.tweens
            .values()
            .find(|(s, t)| *s == subject && t.target.channel() == channel)
            .map(|(_, t)| t)
    }

    /// Advance all tweens and apply them.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(
        &mut self,
        dt: f32,
        scene: &mut Scene,
        graph: &TransformGraph,
        camera: &mut PerspectiveCamera,
    ) -> usize {
        let mut completed = Vec::new();

        for (&id, (subject, tween)) in self.tweens.iter_mut() {
            let done = tween.advance(dt);
            let k = tween.factor();

            match (*subject, tween.target) {
                (TweenSubject::Camera, TweenTarget::CameraPosition { from, to, look_at }) => {
                    camera.position = lerp_vec3(from, to, k);
                    if let Some(target) = look_at.and_then(|e| graph.world_matrix(e, scene)) {
                        camera.look_at(target.w_axis.truncate());
                    }
                }
                (TweenSubject::Entity(eid), target) => {
                    if let Some(entity) = scene.get_mut(eid) {
                        match target {
                            TweenTarget::Position { from, to } => entity.pos = lerp_vec3(from, to, k),
                            TweenTarget::Scale { from, to } => entity.scale = lerp_vec3(from, to, k),
                            TweenTarget::Opacity { from, to } => {
                                if let Some(material) = &mut entity.material {
                                    material.opacity = lerp(from, to, k);
                                }
                            }
                            TweenTarget::CameraPosition { .. } => {}
                        }
                    }
                }
                (TweenSubject::Camera, _) => {}
            }

            if done {
                if let Some(event_id) = tween.on_complete {
                    self.completed_events.push(event_id);
                }
                completed.push(id);
            }
        }

        let count = completed.len();
        for id in completed {
            self.tweens.remove(&id);
        }
        count
    }

    /// Drain completed tween events.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
        self.completed_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::components::material::{Color, Material};

    struct World {
        scene: Scene,
        graph: TransformGraph,
        camera: PerspectiveCamera,
        tweens: TweenState,
    }

    impl World {
        fn new() -> Self {
            let mut scene = Scene::new();
            scene.spawn(Entity::new(EntityId(1)).with_material(Material::basic(Color::WHITE)));
            Self {
                scene,
                graph: TransformGraph::new(),
                camera: PerspectiveCamera::new(75.0, 1.0, 0.1, 2000.0),
                tweens: TweenState::new(),
            }
        }

        fn tick(&mut self, dt: f32) -> usize {
            self.tweens.tick(dt, &mut self.scene, &self.graph, &mut self.camera)
        }

        fn entity(&self) -> &Entity {
            self.scene.get(EntityId(1)).unwrap()
        }
    }

    const E: TweenSubject = TweenSubject::Entity(EntityId(1));

    #[test]
    fn once_reaches_target_and_is_removed() {
        let mut w = World::new();
        w.tweens.add(E, Tween::position(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 1.0, Easing::Linear));

        w.tick(0.5);
        assert!((w.entity().pos.x - 50.0).abs() < 0.01);

        assert_eq!(w.tick(0.5), 1);
        assert!((w.entity().pos.x - 100.0).abs() < 0.01);
        assert!(w.tweens.is_empty());
    }

    #[test]
    fn yoyo_goes_out_and_back_once() {
        let mut w = World::new();
        w.tweens.add(E, Tween::scale(1.0, 1.3, 0.2, Easing::QuadOut).with_loop(TweenLoop::Yoyo));

        w.tick(0.2);
        assert!((w.entity().scale.x - 1.3).abs() < 1e-4);
        assert_eq!(w.tweens.len(), 1);

        w.tick(0.1);
        let mid = w.entity().scale.x;
        assert!(mid > 1.0 && mid < 1.3);

        assert_eq!(w.tick(0.1), 1);
        assert!((w.entity().scale.x - 1.0).abs() < 1e-4);
        assert!(w.tweens.is_empty());
    }

    #[test]
    fn loop_restarts_forever() {
        let mut w = World::new();
        w.tweens.add(
            E,
            Tween::position(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 1.0, Easing::Linear)
                .with_loop(TweenLoop::Loop),
        );
        w.tick(1.25);
        assert!((w.entity().pos.x - 25.0).abs() < 0.01);
        assert_eq!(w.tweens.len(), 1);
    }

    #[test]
    fn ping_pong_returns_to_start() {
        let mut w = World::new();
        w.tweens.add(
            E,
            Tween::opacity(1.0, 0.3, 1.0, Easing::SineInOut).with_loop(TweenLoop::PingPong),
        );
        w.tick(1.0);
        let op = w.entity().material.unwrap().opacity;
        assert!((op - 0.3).abs() < 1e-4, "after one leg {}", op);

        w.tick(1.0);
        let op = w.entity().material.unwrap().opacity;
        assert!((op - 1.0).abs() < 1e-4, "after two legs {}", op);
        assert_eq!(w.tweens.len(), 1);
    }

    #[test]
    fn replace_cancels_same_channel_only() {
        let mut w = World::new();
        w.tweens.add(E, Tween::scale(1.0, 2.0, 1.0, Easing::Linear));
        w.tweens.add(E, Tween::opacity(1.0, 0.0, 1.0, Easing::Linear));
        w.tweens.replace(E, Tween::scale(1.0, 1.3, 1.0, Easing::Linear));
        assert_eq!(w.tweens.len(), 2);

        w.tick(1.0);
        assert!((w.entity().scale.x - 1.3).abs() < 1e-4);
    }

    #[test]
    fn camera_tween_reaims_at_moving_entity() {
        let mut w = World::new();
        w.scene.get_mut(EntityId(1)).unwrap().pos = Vec3::new(16.0, 0.0, 0.0);
        let to = Vec3::new(26.0, 5.0, 10.0);
        w.tweens.add(
            TweenSubject::Camera,
            Tween::camera_position(Vec3::new(0.0, 40.0, 120.0), to, Some(EntityId(1)), 1.5, Easing::QuadOut),
        );

        w.tick(0.5);
        // Entity moves between steps; the next step aims at the new spot.
        let moved = Vec3::new(0.0, 0.0, 16.0);
        w.scene.get_mut(EntityId(1)).unwrap().pos = moved;
        w.tick(0.5);
        let expected = (moved - w.camera.position).normalize();
        assert!((w.camera.forward() - expected).length() < 1e-5);

        w.tick(0.5);
        assert!((w.camera.position - to).length() < 1e-4);
        assert!(w.tweens.find(TweenSubject::Camera, TweenChannel::CameraPosition).is_none());
    }

    #[test]
    fn on_complete_is_reported_once() {
        let mut w = World::new();
        w.tweens.add(E, Tween::scale(1.0, 2.0, 0.1, Easing::Linear).with_on_complete(9));
        w.tick(0.2);
        w.tick(0.2);
        assert_eq!(w.tweens.drain_completed().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn zero_duration_once_snaps() {
        let mut w = World::new();
        w.tweens.add(E, Tween::scale(1.0, 3.0, 0.0, Easing::QuadOut));
        assert_eq!(w.tick(0.0), 1);
        assert!((w.entity().scale.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn paused_tween_does_not_advance() {
        let mut w = World::new();
        let id = w.tweens.add(E, Tween::scale(1.0, 2.0, 1.0, Easing::Linear).paused());
        w.tick(0.5);
        assert_eq!(w.tweens.get(id).unwrap().elapsed, 0.0);
        w.tweens.resume(id);
        w.tick(0.5);
        assert!((w.entity().scale.x - 1.5).abs() < 1e-5);
    }

    #[test]
    fn removed_entity_tweens_are_dropped() {
        let mut w = World::new();
        w.tweens.add(E, Tween::scale(1.0, 2.0, 1.0, Easing::Linear));
        w.tweens.add(TweenSubject::Camera, Tween::camera_position(Vec3::ZERO, Vec3::ONE, None, 1.0, Easing::Linear));
        w.tweens.remove_entity(EntityId(1));
        assert_eq!(w.tweens.len(), 1);
    }
}
