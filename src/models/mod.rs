//! Data models for loaded assets (fonts, animations, scenes)

mod font;
mod frame;
mod scene;
mod skeletal;

// Re-export all public types
pub use font::{measure_string, word_wrap_string, CharacterData, Font};
pub use frame::FrameAnimation;
pub use scene::{
    CircleItem, PathItem, PropertyMap, RectangleItem, SceneDocument, SceneItem, SceneItemKind,
    SceneLayer, TextureItem,
};
pub use skeletal::{Bone, Keyframe, SkeletalAnimation};
