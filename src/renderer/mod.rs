//! Rendering seam
//!
//! The game draws through `Renderer`: full-screen texture blits, a scoped
//! batch of sprites, and a text overlay. A GPU backend implements the trait
//! on the platform side; `CommandRecorder` implements it headless.

pub mod recorder;

pub use recorder::{CommandRecorder, DrawCommand};

use crate::sim::{Color, SpriteDraw};
use crate::textures::TextureId;

/// Drawing operations the game needs from a backend
pub trait Renderer {
    /// Start a new frame (clear the back buffer)
    fn begin_frame(&mut self) {}

    /// Finish the frame (present)
    fn end_frame(&mut self) {}

    /// Copy a whole texture to the back buffer with its top-left at (x, y)
    fn draw_texture(&mut self, texture: TextureId, x: i32, y: i32);

    /// Open a sprite batch sorted back to front
    fn begin_batch(&mut self);

    /// Queue one sprite; only valid between `begin_batch` and `end_batch`
    fn draw_sprite(&mut self, sprite: &SpriteDraw);

    /// Flush the batch
    fn end_batch(&mut self);

    /// Print text with its top-left at (x, y)
    fn print(&mut self, x: f32, y: f32, text: &str, color: Color);
}

/// Run `draw` inside a begin/end batch pair
pub fn with_batch<R: Renderer + ?Sized>(renderer: &mut R, draw: impl FnOnce(&mut R)) {
    renderer.begin_batch();
    draw(renderer);
    renderer.end_batch();
}
