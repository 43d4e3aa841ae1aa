//! Error types for asset loading
//!
//! Loads fail in one of four ways: the backing file cannot be read, the
//! document is malformed, the document is well-formed but semantically
//! invalid, or a named texture region does not resolve. Every failure is
//! fatal to the single request and is reported together with the asset kind
//! and the requested file name.

use std::fmt;
use thiserror::Error;

use crate::atlas::RegionNotFound;

/// Boxed error produced by an [`AssetBackend`](crate::backend::AssetBackend) factory.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The document could not be read as the expected structure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Document bytes are not UTF-8
    #[error("document is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),
    /// XML syntax error
    #[error("malformed document: {0}")]
    Xml(#[from] roxmltree::Error),
    /// Root element has a different tag than the format requires
    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: &'static str, found: String },
    /// A required child element is absent
    #[error("<{parent}> is missing required element <{name}>")]
    MissingElement { parent: String, name: String },
    /// A required attribute is absent
    #[error("<{element}> is missing required attribute '{name}'")]
    MissingAttribute { element: String, name: String },
    /// A value could not be converted to the expected type
    #[error("<{element}>: invalid {expected} '{value}'")]
    InvalidValue {
        element: String,
        value: String,
        expected: &'static str,
    },
}

/// The document is well-formed but describes an invalid asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// Keyframes must all share the skeleton topology of the first one
    #[error("keyframe {keyframe} has {found} bones, expected {expected}")]
    BoneCountMismatch {
        keyframe: usize,
        expected: usize,
        found: usize,
    },
    /// ParentIndex points past the keyframe's bone list
    #[error("keyframe {keyframe}, bone {bone}: parent index {index} out of range (bone count {len})")]
    ParentIndexOutOfRange {
        keyframe: usize,
        bone: usize,
        index: i64,
        len: usize,
    },
    /// TextureIndex points past the animation's region list
    #[error("keyframe {keyframe}, bone {bone}: texture index {index} out of range (region count {len})")]
    TextureIndexOutOfRange {
        keyframe: usize,
        bone: usize,
        index: i64,
        len: usize,
    },
    /// Following parent links from a bone leads back to itself
    #[error("keyframe {keyframe}: bone {bone} is part of a parent cycle")]
    CyclicParent { keyframe: usize, bone: usize },
    /// Frame times are derived from 1 / frame rate
    #[error("frame rate must be positive, got {0}")]
    InvalidFrameRate(i32),
    /// Scene items are a closed set of kinds
    #[error("unrecognized item type '{0}'")]
    UnknownItemType(String),
}

/// Why a single load request failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// Backing file missing or unreadable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Document malformed or missing a required section
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Document well-formed but semantically invalid
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// A texture region reference did not resolve
    #[error(transparent)]
    Reference(#[from] RegionNotFound),
    /// An external factory (texture, audio, skeleton reader) failed
    #[error("backend error: {0}")]
    Backend(BackendError),
}

/// Asset kinds handled by the registry, one cache pool each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    TextureDictionary,
    Song,
    SoundEffect,
    Font,
    SkeletalAnimation,
    FrameAnimation,
    Scene,
    SkeletonData,
    SkeletonAnimation,
}

impl AssetKind {
    /// All kinds, in pool order.
    pub const ALL: [AssetKind; 10] = [
        AssetKind::Texture,
        AssetKind::TextureDictionary,
        AssetKind::Song,
        AssetKind::SoundEffect,
        AssetKind::Font,
        AssetKind::SkeletalAnimation,
        AssetKind::FrameAnimation,
        AssetKind::Scene,
        AssetKind::SkeletonData,
        AssetKind::SkeletonAnimation,
    ];

    /// Human-readable name used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Texture => "texture",
            AssetKind::TextureDictionary => "texture dictionary",
            AssetKind::Song => "song",
            AssetKind::SoundEffect => "sound effect",
            AssetKind::Font => "font",
            AssetKind::SkeletalAnimation => "skeletal animation",
            AssetKind::FrameAnimation => "frame animation",
            AssetKind::Scene => "scene",
            AssetKind::SkeletonData => "skeleton data",
            AssetKind::SkeletonAnimation => "skeleton animation",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed registry request: what was asked for and why it failed.
#[derive(Debug, Error)]
#[error("failed to load {kind} '{file_name}': {source}")]
pub struct AssetError {
    pub kind: AssetKind,
    pub file_name: String,
    #[source]
    pub source: LoadError,
}

impl AssetError {
    pub fn new(kind: AssetKind, file_name: impl Into<String>, source: LoadError) -> Self {
        Self {
            kind,
            file_name: file_name.into(),
            source,
        }
    }

    /// True when the backing file could not be read.
    pub fn is_io(&self) -> bool {
        matches!(self.source, LoadError::Io(_))
    }

    /// True when the document was malformed.
    pub fn is_parse(&self) -> bool {
        matches!(self.source, LoadError::Parse(_))
    }

    /// True when the document was semantically invalid.
    pub fn is_schema(&self) -> bool {
        matches!(self.source, LoadError::Schema(_))
    }

    /// True when a texture region reference did not resolve.
    pub fn is_reference(&self) -> bool {
        matches!(self.source, LoadError::Reference(_))
    }
}
