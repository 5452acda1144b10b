/// Input event types the engine understands.
/// Generic: no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button press began at canvas pixel (x, y).
    PointerDown { x: f32, y: f32 },
    /// A button press ended at canvas pixel (x, y).
    PointerUp { x: f32, y: f32 },
    /// The cursor moved to canvas pixel (x, y).
    PointerMove { x: f32, y: f32 },
    /// A completed click at canvas pixel (x, y).
    Click { x: f32, y: f32 },
    /// Mouse wheel; positive `delta` scrolls down.
    Wheel { delta: f32 },
    /// The render surface changed size (CSS pixels).
    Resize { width: f32, height: f32 },
    /// A key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// A custom event from the UI layer.
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS pushes events between frames; the game reads them at the start of the
/// next step and the runner drains them afterwards.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events in arrival order without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
