//! The texture set Koala Jones draws with

use std::collections::BTreeMap;

use crate::consts::ITEM_LEVEL_COUNT;
use crate::textures::{Texture, TextureError, TextureLoader, TextureRegistry, TextureSize};

pub const TITLE: &str = "title.jpg";
pub const BACKGROUND: &str = "background.jpg";
pub const LAVA: &str = "lava.jpg";
pub const GAME_OVER: &str = "end.jpg";
pub const PLAYER: &str = "player/koala_jones.png";
pub const ROCK: &str = "obstacles/rock.png";
pub const FIRE: &str = "obstacles/fireball.png";
pub const DART: &str = "obstacles/poison_dart.png";
pub const SNAKE: &str = "obstacles/snake.png";
/// Orange, pear, apple, banana, chalice, necklace, tri-power, idol
pub const ITEMS: [&str; ITEM_LEVEL_COUNT as usize] = [
    "items/item1.png",
    "items/item2.png",
    "items/item3.png",
    "items/item4.png",
    "items/item5.png",
    "items/item6.png",
    "items/item7.png",
    "items/item8.png",
];

/// Sizes of the shipped artwork, used when no image decoder is available
pub fn default_texture_sizes() -> BTreeMap<String, TextureSize> {
    let mut sizes = BTreeMap::new();
    for name in [TITLE, BACKGROUND, GAME_OVER] {
        sizes.insert(name.to_string(), TextureSize::new(1024, 768));
    }
    sizes.insert(LAVA.to_string(), TextureSize::new(1024, 80));
    sizes.insert(PLAYER.to_string(), TextureSize::new(64, 80));
    sizes.insert(ROCK.to_string(), TextureSize::new(56, 56));
    sizes.insert(FIRE.to_string(), TextureSize::new(40, 64));
    sizes.insert(DART.to_string(), TextureSize::new(64, 16));
    sizes.insert(SNAKE.to_string(), TextureSize::new(40, 96));
    for name in ITEMS {
        sizes.insert(name.to_string(), TextureSize::new(48, 48));
    }
    sizes
}

/// Handles to every texture the game uses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameTextures {
    pub title: Texture,
    pub background: Texture,
    pub lava: Texture,
    pub game_over: Texture,
    pub player: Texture,
    pub rock: Texture,
    pub fire: Texture,
    pub dart: Texture,
    pub snake: Texture,
    pub items: [Texture; ITEM_LEVEL_COUNT as usize],
}

impl GameTextures {
    /// Load the full set into `registry`; the first failure aborts the load
    pub fn load(
        registry: &mut TextureRegistry,
        loader: &mut dyn TextureLoader,
    ) -> Result<Self, TextureError> {
        let mut load = |path: &str| registry.load(&mut *loader, path);

        let title = load(TITLE)?;
        let background = load(BACKGROUND)?;
        let lava = load(LAVA)?;
        let game_over = load(GAME_OVER)?;
        let player = load(PLAYER)?;
        let rock = load(ROCK)?;
        let fire = load(FIRE)?;
        let dart = load(DART)?;
        let snake = load(SNAKE)?;
        let mut items = [player; ITEM_LEVEL_COUNT as usize];
        for (slot, path) in items.iter_mut().zip(ITEMS) {
            *slot = load(path)?;
        }

        Ok(Self {
            title,
            background,
            lava,
            game_over,
            player,
            rock,
            fire,
            dart,
            snake,
            items,
        })
    }

    /// Texture for an item level (1-based, clamped into 1..=8)
    pub fn item(&self, level: u32) -> Texture {
        let index = level.clamp(1, ITEM_LEVEL_COUNT) - 1;
        self.items[index as usize]
    }

    /// Height of the lava strip along the bottom of the screen
    pub fn lava_height(&self) -> f32 {
        self.lava.height as f32
    }
}

#[cfg(test)]
pub(crate) fn test_textures() -> GameTextures {
    let mut registry = TextureRegistry::new();
    let mut loader = crate::textures::ManifestLoader::new(default_texture_sizes());
    GameTextures::load(&mut registry, &mut loader).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textures::ManifestLoader;

    #[test]
    fn test_load_full_set() {
        let mut registry = TextureRegistry::new();
        let mut loader = ManifestLoader::new(default_texture_sizes());
        let textures = GameTextures::load(&mut registry, &mut loader).unwrap();

        assert_eq!(registry.len(), 17);
        assert_eq!(textures.lava_height(), 80.0);
        assert_eq!(registry.path(textures.item(1).id), Some(ITEMS[0]));
        assert_eq!(registry.path(textures.item(8).id), Some(ITEMS[7]));
        assert_eq!(textures.item(9), textures.item(8));
    }

    #[test]
    fn test_missing_texture_fails_load() {
        let mut sizes = default_texture_sizes();
        sizes.remove(SNAKE);
        let mut registry = TextureRegistry::new();
        let mut loader = ManifestLoader::new(sizes);
        let err = GameTextures::load(&mut registry, &mut loader).unwrap_err();
        assert!(matches!(err, TextureError::NotFound(path) if path == SNAKE));
    }
}
