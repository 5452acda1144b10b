use std::fmt;
use serde::{Deserialize, Serialize};

/// Errors at the asset boundary (host-reported loads, manifest JSON).
#[derive(Debug)]
pub enum AssetError {
    /// The host reported a result for a texture id that was never requested.
    UnknownTexture(u32),
    /// The manifest could not be (de)serialized.
    Manifest(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::UnknownTexture(id) => write!(f, "unknown texture id {}", id),
            AssetError::Manifest(msg) => write!(f, "texture manifest: {}", msg),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<serde_json::Error> for AssetError {
    fn from(e: serde_json::Error) -> Self {
        AssetError::Manifest(e.to_string())
    }
}

/// Textures the game wants the host to load.
///
/// ```json
/// {"textures":[{"id":0,"path":"textures/mercury.jpg"}]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureManifest {
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
}

/// A single requested texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Id the host echoes back in `game_texture_loaded`.
    pub id: u32,
    /// Path relative to the page.
    pub path: String,
}

impl TextureManifest {
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, AssetError> {
        Ok(serde_json::to_string(self)?)
    }
}
