//! Growable sprite collection
//!
//! Storage grows in fixed steps of `GROWTH_STEP` slots and never shrinks,
//! except through `clear`, which drops the storage entirely so the next
//! `add` allocates again.

use super::sprite::Sprite;

/// Slots added each time the list runs out of room
pub const GROWTH_STEP: usize = 6;

/// Ordered collection of sprites held by value
#[derive(Debug, Clone, Default)]
pub struct SpriteList {
    sprites: Vec<Sprite>,
    /// Reported capacity; grows by exactly `GROWTH_STEP`
    capacity: usize,
}

impl SpriteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sprites
    pub fn count(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Allocated slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sprite at `index`.
    ///
    /// # Panics
    /// If `index >= self.count()`.
    pub fn get(&self, index: usize) -> &Sprite {
        self.check_index(index);
        &self.sprites[index]
    }

    /// Mutable sprite at `index`.
    ///
    /// # Panics
    /// If `index >= self.count()`.
    pub fn get_mut(&mut self, index: usize) -> &mut Sprite {
        self.check_index(index);
        &mut self.sprites[index]
    }

    /// Append a sprite, growing by `GROWTH_STEP` slots when full
    pub fn add(&mut self, sprite: Sprite) {
        if self.sprites.len() == self.capacity {
            self.grow();
        }
        self.sprites.push(sprite);
    }

    /// Remove the sprite at `index`, shifting later sprites down one slot.
    ///
    /// Capacity is unchanged.
    ///
    /// # Panics
    /// If `index >= self.count()`.
    pub fn remove_at(&mut self, index: usize) -> Sprite {
        self.check_index(index);
        self.sprites.remove(index)
    }

    /// Drop every sprite and the storage with them; capacity returns to 0
    pub fn clear(&mut self) {
        self.sprites = Vec::new();
        self.capacity = 0;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sprite> {
        self.sprites.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Sprite> {
        self.sprites.iter_mut()
    }

    fn grow(&mut self) {
        self.sprites.reserve_exact(GROWTH_STEP);
        self.capacity += GROWTH_STEP;
        log::trace!("Sprite list grew to {} slots", self.capacity);
    }

    #[inline]
    fn check_index(&self, index: usize) {
        assert!(
            index < self.sprites.len(),
            "sprite index {} out of range (count {})",
            index,
            self.sprites.len()
        );
    }
}

impl<'a> IntoIterator for &'a SpriteList {
    type Item = &'a Sprite;
    type IntoIter = std::slice::Iter<'a, Sprite>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
