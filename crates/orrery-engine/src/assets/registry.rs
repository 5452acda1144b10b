use crate::assets::manifest::{AssetError, TextureDescriptor, TextureManifest};

/// Handle to a requested texture. Also the id on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Load state as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
struct TextureEntry {
    path: String,
    state: TextureState,
}

/// Tracks texture requests and their load results.
///
/// The engine never decodes images: it hands the host a manifest, the host
/// loads each file and reports back. A failed load leaves the surface
/// untextured; nothing else depends on it.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a texture by path. Requesting the same path twice returns the
    /// same id.
    pub fn request(&mut self, path: &str) -> TextureId {
        if let Some(idx) = self.entries.iter().position(|e| e.path == path) {
            return TextureId(idx as u32);
        }
        self.entries.push(TextureEntry {
            path: path.to_owned(),
            state: TextureState::Pending,
        });
        TextureId(self.entries.len() as u32 - 1)
    }

    /// Record the host's load result.
    pub fn mark_loaded(&mut self, id: TextureId, ok: bool) -> Result<(), AssetError> {
        let entry = self
            .entries
            .get_mut(id.0 as usize)
            .ok_or(AssetError::UnknownTexture(id.0))?;
        entry.state = if ok {
            TextureState::Ready
        } else {
            log::warn!("texture {} failed to load, surface stays untextured", entry.path);
            TextureState::Failed
        };
        Ok(())
    }

    pub fn state(&self, id: TextureId) -> Option<TextureState> {
        self.entries.get(id.0 as usize).map(|e| e.state)
    }

    pub fn path(&self, id: TextureId) -> Option<&str> {
        self.entries.get(id.0 as usize).map(|e| e.path.as_str())
    }

    /// Wire value for an optional texture: its id once ready, else -1.
    pub fn wire_index(&self, id: Option<TextureId>) -> f32 {
        match id {
            Some(id) if self.state(id) == Some(TextureState::Ready) => id.0 as f32,
            _ => -1.0,
        }
    }

    /// Everything requested so far, in id order.
    pub fn manifest(&self) -> TextureManifest {
        TextureManifest {
            textures: self
                .entries
                .iter()
                .enumerate()
                .map(|(i, e)| TextureDescriptor { id: i as u32, path: e.path.clone() })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
