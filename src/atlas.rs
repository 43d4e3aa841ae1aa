//! Texture atlas dictionaries and region resolution
//!
//! A texture dictionary maps region names to rectangles inside a packed
//! texture atlas. Animations reference frames and bone images by name; the
//! names are resolved here once at load time so playback only deals with
//! region handles.

use std::collections::HashMap;
use thiserror::Error;

/// A named region was not present in the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("texture region '{0}' not found in dictionary")]
pub struct RegionNotFound(pub String);

/// A rectangular sub-area of a texture atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TextureRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Named regions of one atlas texture.
///
/// Dictionaries are produced by the host's
/// [`AssetBackend`](crate::backend::AssetBackend) and cached by the registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureDictionary {
    regions: HashMap<String, TextureRegion>,
}

impl TextureDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self {
            regions: HashMap::new(),
        }
    }

    /// Add a region, replacing any previous region with the same name.
    pub fn insert(&mut self, name: impl Into<String>, region: TextureRegion) {
        self.regions.insert(name.into(), region);
    }

    /// Get a region by name.
    pub fn region(&self, name: &str) -> Option<&TextureRegion> {
        self.regions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.regions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, TextureRegion)> for TextureDictionary {
    fn from_iter<I: IntoIterator<Item = (S, TextureRegion)>>(iter: I) -> Self {
        Self {
            regions: iter.into_iter().map(|(name, region)| (name.into(), region)).collect(),
        }
    }
}

/// Resolve a region name against a dictionary.
///
/// Pure lookup; the dictionary itself is the cache.
pub fn resolve(dictionary: &TextureDictionary, name: &str) -> Result<TextureRegion, RegionNotFound> {
    dictionary
        .region(name)
        .copied()
        .ok_or_else(|| RegionNotFound(name.to_string()))
}

/// Resolve an ordered list of names, failing on the first missing one.
pub fn resolve_all<'a, I>(dictionary: &TextureDictionary, names: I) -> Result<Vec<TextureRegion>, RegionNotFound>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().map(|name| resolve(dictionary, name)).collect()
}
