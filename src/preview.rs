//! Text renderer for streamed terrain
//!
//! Renders loaded cells around a position into a character grid without any
//! graphics dependencies.

use glam::{IVec2, Vec2};

use crate::world::StreamingManager;

/// Glyph for cells whose chunk is not loaded
pub const UNLOADED: char = ' ';
/// Glyph marking the observer
pub const OBSERVER: char = '@';

/// CPU-side renderer producing one character per sampled cell
pub struct AsciiPreview {
    /// Width of the viewport in characters
    pub width: usize,
    /// Height of the viewport in characters
    pub height: usize,
    /// World cells per character along each axis
    pub stride: i32,
}

impl AsciiPreview {
    pub fn new(width: usize, height: usize, stride: i32) -> Self {
        Self {
            width,
            height,
            stride: stride.max(1),
        }
    }

    /// Render the loaded terrain centered on `observer` (world units)
    pub fn render(&self, streaming: &StreamingManager, observer: Vec2) -> String {
        let block_size = streaming.settings().block_size;
        let center = (observer / block_size).floor().as_ivec2();

        let half = IVec2::new(self.width as i32 / 2, self.height as i32 / 2);
        let mut out = String::with_capacity((self.width + 1) * self.height);

        // World Y increases upward, so the top row is the highest Y
        for row in 0..self.height as i32 {
            let screen_y = half.y - row;
            for column in 0..self.width as i32 {
                let screen_x = column - half.x;
                let glyph = if screen_x == 0 && screen_y == 0 {
                    OBSERVER
                } else {
                    let offset =
                        IVec2::new(screen_x, screen_y).saturating_mul(IVec2::splat(self.stride));
                    let cell = center.saturating_add(offset);
                    streaming.cell_at(cell).map_or(UNLOADED, |c| c.glyph())
                };
                out.push(glyph);
            }
            out.push('\n');
        }

        out
    }
}
