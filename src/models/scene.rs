//! Level/layer/item scene documents.
//!
//! Items are a closed set of four shapes. Consumers match on
//! [`SceneItemKind`] exhaustively.

use glam::Vec2;
use std::collections::BTreeMap;

use crate::color::Color;
use crate::path;

/// String-typed custom properties attached to a level, layer, or item.
pub type PropertyMap = BTreeMap<String, String>;

/// A textured sprite placed in a layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextureItem {
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub origin: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
    /// Texture path with `/` separators
    pub texture_path: String,
    pub tint: Color,
}

impl TextureItem {
    /// Resolve the texture path relative to the directory of `scene_file`.
    pub fn resolve_path(&self, scene_file: &str) -> String {
        path::combine_paths(path::directory_of(scene_file), &self.texture_path)
    }
}

/// A polygon or polyline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    pub is_polygon: bool,
    pub line_color: Color,
    pub line_width: f32,
    pub local_points: Vec<Vec2>,
    pub world_points: Vec<Vec2>,
}

/// A filled axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RectangleItem {
    pub fill_color: Color,
    pub width: f32,
    pub height: f32,
}

/// A filled circle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircleItem {
    pub fill_color: Color,
    pub radius: f32,
}

/// Shape-specific part of a scene item.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneItemKind {
    Texture(TextureItem),
    Path(PathItem),
    Rectangle(RectangleItem),
    Circle(CircleItem),
}

impl SceneItemKind {
    /// Discriminator tag used in scene documents.
    pub fn type_name(&self) -> &'static str {
        match self {
            SceneItemKind::Texture(_) => "TextureItem",
            SceneItemKind::Path(_) => "PathItem",
            SceneItemKind::Rectangle(_) => "RectangleItem",
            SceneItemKind::Circle(_) => "CircleItem",
        }
    }
}

/// One placed item in a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub name: String,
    pub visible: bool,
    pub position: Vec2,
    pub properties: PropertyMap,
    pub kind: SceneItemKind,
}

impl SceneItem {
    pub fn as_texture(&self) -> Option<&TextureItem> {
        match &self.kind {
            SceneItemKind::Texture(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathItem> {
        match &self.kind {
            SceneItemKind::Path(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_rectangle(&self) -> Option<&RectangleItem> {
        match &self.kind {
            SceneItemKind::Rectangle(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&CircleItem> {
        match &self.kind {
            SceneItemKind::Circle(item) => Some(item),
            _ => None,
        }
    }
}

/// A named layer of items scrolling at its own speed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneLayer {
    pub name: String,
    pub visible: bool,
    pub scroll_speed: Vec2,
    pub properties: PropertyMap,
    pub items: Vec<SceneItem>,
}

impl SceneLayer {
    /// First item with the given name.
    pub fn item(&self, name: &str) -> Option<&SceneItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

/// A parsed level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneDocument {
    pub properties: PropertyMap,
    pub layers: Vec<SceneLayer>,
}

impl SceneDocument {
    /// First layer with the given name.
    pub fn layer(&self, name: &str) -> Option<&SceneLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// All items across layers, in layer then item order.
    pub fn items(&self) -> impl Iterator<Item = &SceneItem> {
        self.layers.iter().flat_map(|layer| layer.items.iter())
    }

    /// Distinct texture paths referenced by texture items, sorted.
    pub fn texture_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .items()
            .filter_map(SceneItem::as_texture)
            .map(|item| item.texture_path.as_str())
            .collect();
        paths.sort_unstable();
        paths.dedup();
        paths
    }
}
