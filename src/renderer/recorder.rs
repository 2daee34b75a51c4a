//! Headless renderer that records what would have been drawn

use serde::Serialize;

use super::Renderer;
use crate::sim::{Color, SpriteDraw};
use crate::textures::TextureId;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Texture {
        texture: TextureId,
        x: i32,
        y: i32,
    },
    BeginBatch,
    Sprite(SpriteDraw),
    EndBatch,
    Text {
        x: f32,
        y: f32,
        text: String,
        color: Color,
    },
}

/// Per-frame totals, handy for logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub textures: usize,
    pub sprites: usize,
    pub texts: usize,
}

/// Records the commands of the current frame
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    in_batch: bool,
    frames: u64,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the current frame began
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Frames begun so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Lines of text printed this frame
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Sprites drawn this frame, in draw order
    pub fn sprites(&self) -> impl Iterator<Item = &SpriteDraw> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(s) => Some(s),
            _ => None,
        })
    }

    pub fn stats(&self) -> FrameStats {
        let mut stats = FrameStats::default();
        for command in &self.commands {
            match command {
                DrawCommand::Texture { .. } => stats.textures += 1,
                DrawCommand::Sprite(_) => stats.sprites += 1,
                DrawCommand::Text { .. } => stats.texts += 1,
                DrawCommand::BeginBatch | DrawCommand::EndBatch => {}
            }
        }
        stats
    }
}

impl Renderer for CommandRecorder {
    fn begin_frame(&mut self) {
        self.commands.clear();
        self.in_batch = false;
        self.frames += 1;
    }

    fn draw_texture(&mut self, texture: TextureId, x: i32, y: i32) {
        self.commands.push(DrawCommand::Texture { texture, x, y });
    }

    fn begin_batch(&mut self) {
        debug_assert!(!self.in_batch, "sprite batch already open");
        self.in_batch = true;
        self.commands.push(DrawCommand::BeginBatch);
    }

    fn draw_sprite(&mut self, sprite: &SpriteDraw) {
        debug_assert!(self.in_batch, "draw_sprite outside a batch");
        self.commands.push(DrawCommand::Sprite(*sprite));
    }

    fn end_batch(&mut self) {
        debug_assert!(self.in_batch, "end_batch without begin_batch");
        self.in_batch = false;
        self.commands.push(DrawCommand::EndBatch);
    }

    fn print(&mut self, x: f32, y: f32, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::with_batch;

    #[test]
    fn test_records_in_order() {
        let mut recorder = CommandRecorder::new();
        recorder.draw_texture(TextureId(1), 0, 0);
        with_batch(&mut recorder, |_| {});
        recorder.print(0.0, 700.0, "Score: 0", Color::BLACK);

        assert_eq!(
            recorder.commands()[..3],
            [
                DrawCommand::Texture {
                    texture: TextureId(1),
                    x: 0,
                    y: 0
                },
                DrawCommand::BeginBatch,
                DrawCommand::EndBatch,
            ]
        );
        assert_eq!(recorder.texts().collect::<Vec<_>>(), vec!["Score: 0"]);
        assert_eq!(
            recorder.stats(),
            FrameStats {
                textures: 1,
                sprites: 0,
                texts: 1
            }
        );

        recorder.begin_frame();
        assert!(recorder.commands().is_empty());
        assert_eq!(recorder.frames(), 1);
    }
}
