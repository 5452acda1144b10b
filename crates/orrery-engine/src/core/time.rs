/// Per-frame clock.
///
/// The game advances exactly once per host frame; `tick` clamps long gaps
/// (tab in background, debugger pause) so tweens don't jump to their end.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Largest dt a single frame may report, in seconds.
    max_dt: f32,
    /// Clamped dt of the last frame.
    dt: f32,
    /// Sum of clamped dts.
    elapsed: f32,
    /// Frames ticked so far.
    frame: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            dt: 0.0,
            elapsed: 0.0,
            frame: 0,
        }
    }

    /// Record a frame. Returns the clamped dt to use for this frame.
    /// Negative or NaN inputs count as zero.
    pub fn tick(&mut self, frame_dt: f32) -> f32 {
        let dt = if frame_dt.is_nan() { 0.0 } else { frame_dt.clamp(0.0, self.max_dt) };
        self.dt = dt;
        self.elapsed += dt;
        self.frame += 1;
        dt
    }

    /// Clamped delta time of the last frame.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
