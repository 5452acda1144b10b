//! Circular orbit math driven by a per-frame angle accumulator.
//!
//! Pure functions, no engine state. Every body advances by a fixed step per
//! rendered frame, so orbital speed follows the display refresh rate.
//!
//! The clock is f64: it grows without bound, and an f32 sum stops moving at
//! 32768 (under a week at 60 Hz). Convert to f32 only for the final `Vec3`.

use glam::Vec3;

/// Angle added to the orbital clock every frame.
pub const ANGLE_STEP: f64 = 0.001;
/// Moon orbit radius around its planet.
pub const MOON_DISTANCE: f32 = 3.0;
/// Moon angular speed relative to the clock.
pub const MOON_SPEED: f64 = 5.0;
/// Sun and glow self-rotation per frame.
pub const SUN_SPIN: f32 = 0.002;

/// Shared angle all orbits are derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitalClock {
    pub angle: f64,
}

impl OrbitalClock {
    /// Advance by one frame and return the new angle.
    pub fn advance(&mut self) -> f64 {
        self.angle += ANGLE_STEP;
        self.angle
    }
}

/// Position of planet `index` at orbit radius `distance`. Planet `i` moves
/// `i + 1` times as fast as the clock, in the XZ plane.
pub fn planet_position(index: usize, distance: f32, angle: f64) -> Vec3 {
    let a = angle * (index + 1) as f64;
    let d = distance as f64;
    Vec3::new((d * a.cos()) as f32, 0.0, (d * a.sin()) as f32)
}

/// Moon position relative to its planet.
pub fn moon_offset(angle: f64) -> Vec3 {
    let a = angle * MOON_SPEED;
    Vec3::new(MOON_DISTANCE * a.cos() as f32, 0.0, MOON_DISTANCE * a.sin() as f32)
}

/// Self-rotation per frame of planet `index`.
pub fn spin_rate(index: usize) -> f32 {
    0.001 + index as f32 * 0.0005
}
