//! Host-provided factories for assets decoded outside this crate
//!
//! Pixel data, audio, and the binary skeleton format are decoded by the
//! host. The registry only caches what these factories return.

use std::io::Read;
use std::path::Path;

use crate::atlas::TextureDictionary;
use crate::error::BackendError;

/// Factories for externally decoded assets.
///
/// Paths passed in are already resolved against the registry root.
pub trait AssetBackend {
    type Texture;
    type Song;
    type SoundEffect;
    type SkeletonData;
    type SkeletonAnimation;

    fn texture_from_file(&self, path: &Path) -> Result<Self::Texture, BackendError>;

    fn texture_dictionary_from_file(&self, path: &Path) -> Result<TextureDictionary, BackendError>;

    fn song_from_file(&self, path: &Path) -> Result<Self::Song, BackendError>;

    fn sound_effect_from_file(&self, path: &Path) -> Result<Self::SoundEffect, BackendError>;

    /// Read skeleton data whose attachments resolve against `dictionary`.
    fn read_skeleton_data(
        &self,
        reader: &mut dyn Read,
        dictionary: &TextureDictionary,
    ) -> Result<Self::SkeletonData, BackendError>;

    /// Read one animation for an already loaded skeleton.
    fn read_animation(
        &self,
        reader: &mut dyn Read,
        skeleton: &Self::SkeletonData,
    ) -> Result<Self::SkeletonAnimation, BackendError>;
}

/// Backend for hosts that only load fonts and scenes.
///
/// Every factory fails with [`Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBackend;

/// Returned by [`NoBackend`] factories.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("no backend configured for {0}")]
pub struct Unsupported(pub &'static str);

impl AssetBackend for NoBackend {
    type Texture = ();
    type Song = ();
    type SoundEffect = ();
    type SkeletonData = ();
    type SkeletonAnimation = ();

    fn texture_from_file(&self, _path: &Path) -> Result<(), BackendError> {
        Err(Unsupported("textures").into())
    }

    fn texture_dictionary_from_file(&self, _path: &Path) -> Result<TextureDictionary, BackendError> {
        Err(Unsupported("texture dictionaries").into())
    }

    fn song_from_file(&self, _path: &Path) -> Result<(), BackendError> {
        Err(Unsupported("songs").into())
    }

    fn sound_effect_from_file(&self, _path: &Path) -> Result<(), BackendError> {
        Err(Unsupported("sound effects").into())
    }

    fn read_skeleton_data(
        &self,
        _reader: &mut dyn Read,
        _dictionary: &TextureDictionary,
    ) -> Result<(), BackendError> {
        Err(Unsupported("skeleton data").into())
    }

    fn read_animation(&self, _reader: &mut dyn Read, _skeleton: &()) -> Result<(), BackendError> {
        Err(Unsupported("skeleton animations").into())
    }
}
