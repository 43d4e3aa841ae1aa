//! Frame-sheet animation loader
//!
//! ```xml
//! <SpriteAnimation>
//!   <FrameSeconds>0.1</FrameSeconds>
//!   <Loop>true</Loop>
//!   <Frame>run_01</Frame>
//!   <Frame>run_02</Frame>
//! </SpriteAnimation>
//! ```

use std::sync::Arc;

use crate::atlas::{self, TextureDictionary};
use crate::document::{parse_document, root_element, ElementExt};
use crate::error::LoadError;
use crate::models::FrameAnimation;

/// Parse a frame-sheet animation, resolving every frame in `dictionary`.
pub fn parse_frame_animation<T>(
    source: &str,
    texture: Arc<T>,
    dictionary: &TextureDictionary,
) -> Result<FrameAnimation<T>, LoadError> {
    let document = parse_document(source)?;
    let root = root_element(&document, "SpriteAnimation")?;

    let frame_seconds: f32 = root.parse_child("FrameSeconds", "number")?;
    let looping = root.child_flag("Loop")?;
    let frames = atlas::resolve_all(
        dictionary,
        root.children_named("Frame").map(|n| n.text_value()),
    )?;

    tracing::trace!(frames = frames.len(), frame_seconds, looping, "parsed frame animation");

    Ok(FrameAnimation {
        frame_seconds,
        looping,
        texture,
        frames,
    })
}
