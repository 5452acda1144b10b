use glam::Vec2;

/// Render surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Create a viewport. Non-positive dimensions fall back to 1×1.
    pub fn new(width: f32, height: f32) -> Self {
        let mut vp = Self { width: 1.0, height: 1.0 };
        vp.resize(width, height);
        vp
    }

    /// Resize the surface. Returns `false` (and keeps the old size) when
    /// either dimension is not a positive finite number.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            log::warn!("viewport: ignoring resize to {}x{}", width, height);
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Map a pixel position (origin top-left, +y down) to normalized device
    /// coordinates (origin center, +y up, both axes in [-1, 1]).
    pub fn to_ndc(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            px.x / self.width * 2.0 - 1.0,
            -(px.y / self.height) * 2.0 + 1.0,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
