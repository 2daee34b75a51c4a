//! Texture registry
//!
//! Textures are owned by the registry and handed out as small `Texture`
//! handles (a stable index plus the pixel size). Entries are never removed,
//! so a handle stays valid for as long as the registry lives.
//!
//! Decoding image files is the platform's job; the registry only asks a
//! `TextureLoader` for the size of each named file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable index into a `TextureRegistry`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Pixel dimensions of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSize {
    pub width: u32,
    pub height: u32,
}

impl TextureSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Handle to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture `{0}` not found")]
    NotFound(String),
    #[error("texture `{path}` has an empty extent ({width}x{height})")]
    EmptyExtent {
        path: String,
        width: u32,
        height: u32,
    },
}

/// Source of texture dimensions for named image files
pub trait TextureLoader {
    fn load(&mut self, path: &str) -> Result<TextureSize, TextureError>;
}

/// Loader that answers from a name -> size table instead of decoding files
#[derive(Debug, Clone, Default)]
pub struct ManifestLoader {
    sizes: BTreeMap<String, TextureSize>,
}

impl ManifestLoader {
    pub fn new(sizes: BTreeMap<String, TextureSize>) -> Self {
        Self { sizes }
    }
}

impl TextureLoader for ManifestLoader {
    fn load(&mut self, path: &str) -> Result<TextureSize, TextureError> {
        self.sizes
            .get(path)
            .copied()
            .ok_or_else(|| TextureError::NotFound(path.to_string()))
    }
}

#[derive(Debug, Clone)]
struct TextureEntry {
    path: String,
    size: TextureSize,
}

/// Owns every texture the game has loaded
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a texture through `loader`, returning a handle to it.
    ///
    /// Loading the same path twice returns the existing handle.
    pub fn load(
        &mut self,
        loader: &mut dyn TextureLoader,
        path: &str,
    ) -> Result<Texture, TextureError> {
        if let Some(index) = self.entries.iter().position(|e| e.path == path) {
            return Ok(self.handle(index));
        }

        let size = loader.load(path)?;
        if size.width == 0 || size.height == 0 {
            return Err(TextureError::EmptyExtent {
                path: path.to_string(),
                width: size.width,
                height: size.height,
            });
        }

        self.entries.push(TextureEntry {
            path: path.to_string(),
            size,
        });
        log::debug!("Loaded texture {} ({}x{})", path, size.width, size.height);
        Ok(self.handle(self.entries.len() - 1))
    }

    /// Look up a handle by id
    pub fn get(&self, id: TextureId) -> Option<Texture> {
        let index = id.0 as usize;
        (index < self.entries.len()).then(|| self.handle(index))
    }

    /// File path a texture was loaded from
    pub fn path(&self, id: TextureId) -> Option<&str> {
        self.entries.get(id.0 as usize).map(|e| e.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn handle(&self, index: usize) -> Texture {
        let size = self.entries[index].size;
        Texture {
            id: TextureId(index as u32),
            width: size.width,
            height: size.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> ManifestLoader {
        let mut sizes = BTreeMap::new();
        sizes.insert("rock.png".to_string(), TextureSize::new(64, 64));
        sizes.insert("lava.jpg".to_string(), TextureSize::new(1024, 80));
        sizes.insert("broken.png".to_string(), TextureSize::new(0, 10));
        ManifestLoader::new(sizes)
    }

    #[test]
    fn test_load_hands_out_stable_ids() {
        let mut loader = loader();
        let mut registry = TextureRegistry::new();

        let rock = registry.load(&mut loader, "rock.png").unwrap();
        let lava = registry.load(&mut loader, "lava.jpg").unwrap();
        assert_eq!(rock.id, TextureId(0));
        assert_eq!(lava.id, TextureId(1));
        assert_eq!((lava.width, lava.height), (1024, 80));

        // Reloading returns the same entry
        let again = registry.load(&mut loader, "rock.png").unwrap();
        assert_eq!(again, rock);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(lava.id), Some(lava));
        assert_eq!(registry.path(rock.id), Some("rock.png"));
        assert_eq!(registry.get(TextureId(7)), None);
    }

    #[test]
    fn test_load_failures() {
        let mut loader = loader();
        let mut registry = TextureRegistry::new();

        assert!(matches!(
            registry.load(&mut loader, "missing.png"),
            Err(TextureError::NotFound(_))
        ));
        assert!(matches!(
            registry.load(&mut loader, "broken.png"),
            Err(TextureError::EmptyExtent { .. })
        ));
        assert!(registry.is_empty());
    }
}
