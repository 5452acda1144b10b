pub mod camera;
pub mod controls;
pub mod instance;
pub mod traits;
pub mod viewport;

// Re-export key types for convenient access
pub use traits::{Renderer, FrameData};
