//! Assetry - Asset registry and XML document loaders for 2D games
//!
//! This library provides functionality to:
//! - Cache loaded assets by file name, handing out shared handles
//! - Parse bitmap font metrics, bone/keyframe animations, frame-sheet
//!   animations and level scenes from XML
//! - Resolve named regions of a texture atlas
//! - Measure and word-wrap text with a loaded font
//!
//! Pixel data, audio and binary skeleton formats are decoded by an
//! [`AssetBackend`] supplied by the host.

pub mod atlas;
pub mod backend;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod loaders;
pub mod models;
pub mod path;
pub mod registry;

pub use atlas::{resolve, RegionNotFound, TextureDictionary, TextureRegion};
pub use backend::{AssetBackend, NoBackend};
pub use color::Color;
pub use error::{AssetError, AssetKind, LoadError, ParseError, SchemaError};
pub use models::{Font, FrameAnimation, SceneDocument, SkeletalAnimation};
pub use registry::AssetRegistry;
