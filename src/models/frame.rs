//! Flat frame-sheet animation.

use std::sync::Arc;

use crate::atlas::TextureRegion;

/// A sequence of atlas regions played at a fixed rate.
#[derive(Debug)]
pub struct FrameAnimation<T> {
    /// Seconds each frame is shown
    pub frame_seconds: f32,
    pub looping: bool,
    pub texture: Arc<T>,
    /// One region per frame, in playback order
    pub frames: Vec<TextureRegion>,
}

impl<T> FrameAnimation<T> {
    /// Total playback time of one pass.
    pub fn duration(&self) -> f32 {
        self.frame_seconds * self.frames.len() as f32
    }

    /// Frame shown at `time` seconds after start.
    ///
    /// Looping animations wrap; others hold the last frame.
    pub fn frame_at(&self, time: f32) -> Option<&TextureRegion> {
        if self.frames.is_empty() || self.frame_seconds <= 0.0 {
            return self.frames.first();
        }
        let index = (time.max(0.0) / self.frame_seconds) as usize;
        let index = if self.looping {
            index % self.frames.len()
        } else {
            index.min(self.frames.len() - 1)
        };
        self.frames.get(index)
    }
}
