//! Sprites: textured, rotatable, scalable quads with coarse box collision
//!
//! A sprite references its texture through a `Texture` handle from the
//! registry and carries the motion fields the game loop drives (start/end
//! point, direction, speed). The sprite itself never moves on its own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::textures::{Texture, TextureId};
use crate::{degrees_to_radians, radians_to_degrees};

/// RGBA colour, components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    /// Lava snakes
    pub const ORANGE_RED: Color = Color::rgb(1.0, 0.271, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Named anchor used as the rotation/scale origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pivot {
    #[default]
    UpperLeft,
    UpperRight,
    Center,
    CenterLeft,
    CenterRight,
    LowerLeft,
    LowerRight,
}

/// Pixel rectangle of the texture a sprite draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextureRegion {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextureRegion {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Everything a batched drawer needs for one sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub texture: TextureId,
    pub position: Vec2,
    pub region: TextureRegion,
    pub color: Color,
    /// Radians
    pub rotation: f32,
    pub origin: Vec2,
    pub scale: f32,
    pub layer: f32,
}

/// A drawable sprite plus the motion intent the game loop applies to it
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    position: Vec2,
    /// Radians
    rotation: f32,
    scale: f32,
    layer: f32,
    color: Color,
    texture: Option<Texture>,
    pivot: Pivot,
    origin: Vec2,
    region: TextureRegion,

    /// Where the sprite started its current run
    pub start_point: Vec2,
    /// Where the sprite is heading
    pub end_point: Vec2,
    /// Unit vector from start to end
    pub direction: Vec2,
    /// Pixels per frame
    pub speed: f32,
    /// Set once a snake has turned around; it never turns twice
    pub has_reversed: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: 1.0,
            layer: 0.0,
            color: Color::WHITE,
            texture: None,
            pivot: Pivot::UpperLeft,
            origin: Vec2::ZERO,
            region: TextureRegion::default(),
            start_point: Vec2::ZERO,
            end_point: Vec2::ZERO,
            direction: Vec2::ZERO,
            speed: 0.0,
            has_reversed: false,
        }
    }
}

impl Sprite {
    /// Create a sprite bound to `texture`, showing the whole texture
    pub fn new(
        texture: Texture,
        position: Vec2,
        rotation_degrees: f32,
        scale: f32,
        color: Color,
        layer: f32,
    ) -> Self {
        let mut sprite = Self::default();
        sprite.initialize(texture, position, rotation_degrees, scale, color, layer);
        sprite
    }

    /// Bind a texture and reset the transform.
    ///
    /// The texture region is reset to the full texture and the origin is
    /// recomputed for the current pivot.
    pub fn initialize(
        &mut self,
        texture: Texture,
        position: Vec2,
        rotation_degrees: f32,
        scale: f32,
        color: Color,
        layer: f32,
    ) {
        self.texture = Some(texture);
        self.position = position;
        self.rotation = degrees_to_radians(rotation_degrees);
        self.scale = scale;
        self.color = color;
        self.layer = layer;
        self.region = TextureRegion::new(0, 0, texture.width as i32, texture.height as i32);
        self.set_pivot(self.pivot);
    }

    pub fn texture(&self) -> Option<Texture> {
        self.texture
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> f32 {
        radians_to_degrees(self.rotation)
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees_to_radians(degrees);
    }

    pub fn rotation_radians(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn layer(&self) -> f32 {
        self.layer
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn texture_region(&self) -> TextureRegion {
        self.region
    }

    /// Set the pivot and recompute the origin from the texture region.
    ///
    /// Without a texture only the pivot is recorded.
    pub fn set_pivot(&mut self, pivot: Pivot) {
        self.pivot = pivot;
        if self.texture.is_none() {
            return;
        }

        let r = self.region;
        let half_w = r.width() as f32 / 2.0;
        let half_h = r.height() as f32 / 2.0;
        self.origin = match pivot {
            Pivot::UpperLeft => Vec2::new(r.left as f32, r.top as f32),
            Pivot::UpperRight => Vec2::new(r.right as f32, r.top as f32),
            Pivot::Center => Vec2::new(half_w, half_h),
            Pivot::CenterLeft => Vec2::new(r.left as f32, half_h),
            Pivot::CenterRight => Vec2::new(r.right as f32, half_h),
            Pivot::LowerLeft => Vec2::new(r.left as f32, r.bottom as f32),
            Pivot::LowerRight => Vec2::new(r.right as f32, r.bottom as f32),
        };
    }

    /// Draw only part of the texture. Bounds are clamped to the texture.
    pub fn set_texture_region(&mut self, left: i32, top: i32, right: i32, bottom: i32) {
        let region = match self.texture {
            Some(tex) => {
                let (w, h) = (tex.width as i32, tex.height as i32);
                TextureRegion::new(
                    left.clamp(0, w),
                    top.clamp(0, h),
                    right.clamp(0, w),
                    bottom.clamp(0, h),
                )
            }
            None => TextureRegion::new(left, top, right, bottom),
        };
        self.region = region;
        self.set_pivot(self.pivot);
    }

    /// Point the sprite from `start` towards `end`.
    pub fn set_path(&mut self, start: Vec2, end: Vec2) {
        self.start_point = start;
        self.end_point = end;
        self.direction = (end - start).normalize_or_zero();
    }

    /// Swap start and end, re-aim, and turn the sprite around.
    pub fn reverse_path(&mut self) {
        std::mem::swap(&mut self.start_point, &mut self.end_point);
        self.direction = (self.end_point - self.start_point).normalize_or_zero();
        self.set_rotation(self.rotation() + 180.0);
    }

    /// Advance one frame along `direction` at `speed`
    pub fn step(&mut self) {
        self.position += self.direction * self.speed;
    }

    /// Is `point` inside the sprite's box?
    ///
    /// The box is centred on `position` and sized from the region's
    /// right/bottom edges scaled by `scale`. Rotation and pivot are ignored,
    /// and the edges are truncated to whole pixels.
    pub fn point_in_bounds(&self, point: Vec2) -> bool {
        let left = (self.position.x - (self.region.right >> 1) as f32 * self.scale) as i32;
        let right = (left as f32 + self.region.right as f32 * self.scale) as i32;
        let top = (self.position.y - (self.region.bottom >> 1) as f32 * self.scale) as i32;
        let bottom = (top as f32 + self.region.bottom as f32 * self.scale) as i32;

        point.x >= left as f32
            && point.x <= right as f32
            && point.y >= top as f32
            && point.y <= bottom as f32
    }

    /// Corners of the unscaled, unrotated texture box centred on `position`
    pub fn corners(&self) -> Option<[Vec2; 4]> {
        let tex = self.texture?;
        let half_w = (tex.width / 2) as f32;
        let half_h = (tex.height / 2) as f32;
        let p = self.position;
        Some([
            Vec2::new(p.x - half_w, p.y - half_h),
            Vec2::new(p.x + half_w, p.y - half_h),
            Vec2::new(p.x - half_w, p.y + half_h),
            Vec2::new(p.x + half_w, p.y + half_h),
        ])
    }

    /// Does any corner of this sprite fall inside `other`'s box?
    ///
    /// Not symmetric: `a.collides_with(b)` tests a's corners against b.
    /// A sprite without a texture never collides.
    pub fn collides_with(&self, other: &Sprite) -> bool {
        self.corners()
            .is_some_and(|corners| corners.iter().any(|&c| other.point_in_bounds(c)))
    }

    /// Draw parameters, if the sprite has a texture
    pub fn draw(&self) -> Option<SpriteDraw> {
        let tex = self.texture?;
        Some(SpriteDraw {
            texture: tex.id,
            position: self.position,
            region: self.region,
            color: self.color,
            rotation: self.rotation,
            origin: self.origin,
            scale: self.scale,
            layer: self.layer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(width: u32, height: u32) -> Texture {
        Texture {
            id: TextureId(0),
            width,
            height,
        }
    }

    fn sprite_at(width: u32, height: u32, pos: Vec2) -> Sprite {
        Sprite::new(texture(width, height), pos, 0.0, 1.0, Color::WHITE, 0.0)
    }

    #[test]
    fn test_initialize_uses_full_texture() {
        let sprite = Sprite::new(
            texture(100, 50),
            Vec2::new(3.0, 4.0),
            90.0,
            2.0,
            Color::RED,
            0.5,
        );
        assert_eq!(sprite.texture_region(), TextureRegion::new(0, 0, 100, 50));
        let quarter_turn = std::f32::consts::FRAC_PI_2;
        assert!((sprite.rotation_radians() - quarter_turn).abs() < 1e-6);
        assert!((sprite.rotation() - 90.0).abs() < 1e-4);
        assert_eq!(sprite.scale(), 2.0);
        assert_eq!(sprite.color(), Color::RED);
        assert_eq!(sprite.layer(), 0.5);
    }

    #[test]
    fn test_reinitialize_recomputes_origin() {
        let mut sprite = sprite_at(100, 50, Vec2::ZERO);
        sprite.set_pivot(Pivot::Center);
        assert_eq!(sprite.origin(), Vec2::new(50.0, 25.0));

        sprite.initialize(texture(40, 40), Vec2::ZERO, 0.0, 1.0, Color::WHITE, 0.0);
        assert_eq!(sprite.pivot(), Pivot::Center);
        assert_eq!(sprite.texture_region(), TextureRegion::new(0, 0, 40, 40));
        assert_eq!(sprite.origin(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_pivot_origins() {
        let mut sprite = sprite_at(100, 50, Vec2::ZERO);

        sprite.set_pivot(Pivot::Center);
        assert_eq!(sprite.origin(), Vec2::new(50.0, 25.0));
        sprite.set_pivot(Pivot::UpperLeft);
        assert_eq!(sprite.origin(), Vec2::new(0.0, 0.0));
        sprite.set_pivot(Pivot::LowerRight);
        assert_eq!(sprite.origin(), Vec2::new(100.0, 50.0));
        sprite.set_pivot(Pivot::UpperRight);
        assert_eq!(sprite.origin(), Vec2::new(100.0, 0.0));
        sprite.set_pivot(Pivot::CenterLeft);
        assert_eq!(sprite.origin(), Vec2::new(0.0, 25.0));
        sprite.set_pivot(Pivot::CenterRight);
        assert_eq!(sprite.origin(), Vec2::new(100.0, 25.0));
        sprite.set_pivot(Pivot::LowerLeft);
        assert_eq!(sprite.origin(), Vec2::new(0.0, 50.0));
    }

    #[test]
    fn test_pivot_without_texture_keeps_origin() {
        let mut sprite = Sprite::default();
        sprite.set_pivot(Pivot::LowerRight);
        assert_eq!(sprite.pivot(), Pivot::LowerRight);
        assert_eq!(sprite.origin(), Vec2::ZERO);
    }

    #[test]
    fn test_texture_region_is_clamped() {
        let mut sprite = sprite_at(64, 64, Vec2::ZERO);
        sprite.set_texture_region(-10, -10, 9999, 9999);
        assert_eq!(sprite.texture_region(), TextureRegion::new(0, 0, 64, 64));

        sprite.set_pivot(Pivot::Center);
        sprite.set_texture_region(0, 0, 32, 16);
        // Origin follows the new region
        assert_eq!(sprite.origin(), Vec2::new(16.0, 8.0));
    }

    #[test]
    fn test_point_in_bounds() {
        let sprite = sprite_at(40, 40, Vec2::new(100.0, 100.0));
        assert!(sprite.point_in_bounds(Vec2::new(100.0, 100.0)));
        assert!(sprite.point_in_bounds(Vec2::new(80.0, 120.0)));
        assert!(!sprite.point_in_bounds(Vec2::new(79.0, 100.0)));
        assert!(!sprite.point_in_bounds(Vec2::new(100.0, 121.0)));
    }

    #[test]
    fn test_point_in_bounds_halves_by_shift_and_scales() {
        // Odd width: 41 >> 1 == 20, so the box runs 80..=121
        let mut sprite = sprite_at(41, 40, Vec2::new(100.0, 100.0));
        assert!(sprite.point_in_bounds(Vec2::new(121.0, 100.0)));
        assert!(!sprite.point_in_bounds(Vec2::new(79.5, 100.0)));

        sprite.set_scale(2.0);
        // 100 - 20 * 2 = 60, 60 + 41 * 2 = 142
        assert!(sprite.point_in_bounds(Vec2::new(60.0, 100.0)));
        assert!(sprite.point_in_bounds(Vec2::new(142.0, 100.0)));
        assert!(!sprite.point_in_bounds(Vec2::new(143.0, 100.0)));
    }

    #[test]
    fn test_collides_with_corner_inside() {
        let player = sprite_at(40, 40, Vec2::new(100.0, 100.0));

        // Upper-left corner at (105, 105)
        let near = sprite_at(20, 20, Vec2::new(115.0, 115.0));
        assert!(near.collides_with(&player));

        // Nearest corner at (130, 130)
        let far = sprite_at(20, 20, Vec2::new(140.0, 140.0));
        assert!(!far.collides_with(&player));
    }

    #[test]
    fn test_collides_with_is_asymmetric() {
        // A huge sprite whose corners all sit outside a small one
        let big = sprite_at(200, 200, Vec2::new(100.0, 100.0));
        let small = sprite_at(10, 10, Vec2::new(100.0, 100.0));
        assert!(!big.collides_with(&small));
        assert!(small.collides_with(&big));
    }

    #[test]
    fn test_collides_with_ignores_own_scale() {
        let player = sprite_at(40, 40, Vec2::new(100.0, 100.0));
        let mut obstacle = sprite_at(20, 20, Vec2::new(140.0, 140.0));
        obstacle.set_scale(4.0);
        assert!(!obstacle.collides_with(&player));
    }

    #[test]
    fn test_textureless_sprite_never_collides() {
        let player = sprite_at(40, 40, Vec2::ZERO);
        assert!(!Sprite::default().collides_with(&player));
        assert!(Sprite::default().draw().is_none());
    }

    #[test]
    fn test_path_and_reverse() {
        let mut sprite = sprite_at(10, 10, Vec2::new(0.0, 0.0));
        sprite.set_path(Vec2::new(0.0, 0.0), Vec2::new(0.0, 100.0));
        assert_eq!(sprite.direction, Vec2::new(0.0, 1.0));

        sprite.speed = 3.0;
        sprite.step();
        assert_eq!(sprite.position(), Vec2::new(0.0, 3.0));

        sprite.reverse_path();
        assert_eq!(sprite.start_point, Vec2::new(0.0, 100.0));
        assert_eq!(sprite.end_point, Vec2::new(0.0, 0.0));
        assert_eq!(sprite.direction, Vec2::new(0.0, -1.0));
        assert!((sprite.rotation() - 180.0).abs() < 1e-3);
    }
}
