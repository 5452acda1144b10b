use std::f32::consts::PI;
use glam::{Vec2, Vec3};
use super::camera::PerspectiveCamera;

/// Keeps the polar angle off the poles so `up` never aligns with the view.
const POLAR_EPS: f32 = 1e-6;

/// Spherical coordinates around a target: `theta` is the azimuth measured
/// from +Z toward +X, `phi` the polar angle from +Y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let s = self.phi.sin() * self.radius;
        Vec3::new(s * self.theta.sin(), self.phi.cos() * self.radius, s * self.theta.cos())
    }
}

/// Mouse-driven orbit around a target point.
///
/// Input handlers only accumulate deltas. `update` applies them to the
/// camera once per frame; with damping on, each frame applies a fraction of
/// the pending delta and decays the remainder, so motion glides to a stop.
///
/// The camera's current position is re-read on every update, so anything
/// else that moves the camera (a tween) is respected.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    /// Fraction of the pending delta applied per frame.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pending: Spherical,
    scale: f32,
    drag_from: Option<Vec2>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            pending: Spherical::default(),
            scale: 1.0,
            drag_from: None,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self { target, ..Default::default() }
    }

    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    // ── Input ────────────────────────────────────────────────────────────

    /// Begin a rotate drag at a pixel position.
    pub fn pointer_down(&mut self, px: Vec2) {
        self.drag_from = Some(px);
    }

    /// Continue a drag. A full surface height of travel is one full turn.
    pub fn pointer_move(&mut self, px: Vec2, surface_height: f32) {
        let Some(from) = self.drag_from else { return };
        if surface_height > 0.0 {
            let d = (px - from) * (2.0 * PI * self.rotate_speed / surface_height);
            self.rotate_left(d.x);
            self.rotate_up(d.y);
        }
        self.drag_from = Some(px);
    }

    pub fn pointer_up(&mut self) {
        self.drag_from = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    /// Wheel zoom. Positive `delta` (scroll down) moves away from the target.
    pub fn wheel(&mut self, delta: f32) {
        let step = 0.95f32.powf(self.zoom_speed);
        if delta > 0.0 {
            self.scale /= step;
        } else if delta < 0.0 {
            self.scale *= step;
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.pending.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.pending.phi -= angle;
    }

    /// Pending (not yet applied) rotation.
    pub fn pending_rotation(&self) -> Spherical {
        self.pending
    }

    // ── Per-frame step ───────────────────────────────────────────────────

    /// Apply pending motion to the camera and aim it at the target.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let mut s = Spherical::from_offset(camera.position - self.target);

        let k = if self.enable_damping { self.damping_factor } else { 1.0 };
        s.theta += self.pending.theta * k;
        s.phi += self.pending.phi * k;
        s.phi = s.phi.clamp(POLAR_EPS, PI - POLAR_EPS);
        s.radius = (s.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + s.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            self.pending.theta *= 1.0 - self.damping_factor;
            self.pending.phi *= 1.0 - self.damping_factor;
        } else {
            self.pending = Spherical::default();
        }
        self.scale = 1.0;
    }
}
