//! Level/layer/item scene loader
//!
//! Items carry an `xsi:type` discriminator selecting one of four field sets.
//! Unknown discriminators fail the load.
//!
//! ```xml
//! <Level xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
//!   <CustomProperties>
//!     <Property Name="music" Type="string"><string>forest.ogg</string></Property>
//!   </CustomProperties>
//!   <Layers>
//!     <Layer Name="ground" Visible="true">
//!       <ScrollSpeed><X>1</X><Y>1</Y></ScrollSpeed>
//!       <Items>
//!         <Item xsi:type="CircleItem" Name="coin" Visible="true">
//!           <Position><X>10</X><Y>20</Y></Position>
//!           <FillColor><R>255</R><G>215</G><B>0</B><A>255</A></FillColor>
//!           <Radius>4</Radius>
//!         </Item>
//!       </Items>
//!     </Layer>
//!   </Layers>
//! </Level>
//! ```

use glam::Vec2;
use roxmltree::Node;

use crate::document::{parse_document, root_element, ElementExt};
use crate::error::{LoadError, ParseError, SchemaError};
use crate::models::{
    CircleItem, PathItem, PropertyMap, RectangleItem, SceneDocument, SceneItem, SceneItemKind,
    SceneLayer, TextureItem,
};
use crate::path::normalize_separators;

/// Namespace of the `xsi:type` discriminator attribute.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Parse a scene document.
pub fn parse_scene(source: &str) -> Result<SceneDocument, LoadError> {
    let document = parse_document(source)?;
    let root = root_element(&document, "Level")?;

    let properties = parse_properties(root);

    let layers = match root.child("Layers") {
        Some(layers) => layers
            .children_named("Layer")
            .map(parse_layer)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    tracing::trace!(
        layers = layers.len(),
        items = layers.iter().map(|l| l.items.len()).sum::<usize>(),
        "parsed scene"
    );

    Ok(SceneDocument { properties, layers })
}

/// Collect the string-typed entries of an element's `<CustomProperties>`.
///
/// Properties of any other declared type are dropped.
fn parse_properties(node: Node<'_, '_>) -> PropertyMap {
    let Some(properties) = node.child("CustomProperties") else {
        return PropertyMap::new();
    };

    properties
        .children_named("Property")
        .filter(|p| p.attribute("Type") == Some("string"))
        .map(|p| {
            let value = p.child("string").map(|s| s.raw_text()).unwrap_or_default();
            (p.attr_or_empty("Name").to_string(), value)
        })
        .collect()
}

fn parse_layer(node: Node<'_, '_>) -> Result<SceneLayer, LoadError> {
    let items = match node.child("Items") {
        Some(items) => items
            .children_named("Item")
            .map(parse_item)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(SceneLayer {
        name: node.attr_or_empty("Name").to_string(),
        visible: node.attr_flag("Visible")?,
        scroll_speed: node.vector2("ScrollSpeed")?,
        properties: parse_properties(node),
        items,
    })
}

/// The item's discriminator, namespaced or bare.
fn item_type<'a>(node: Node<'a, '_>) -> &'a str {
    node.attribute((XSI_NAMESPACE, "type"))
        .or_else(|| node.attribute("type"))
        .unwrap_or("")
}

fn parse_item(node: Node<'_, '_>) -> Result<SceneItem, LoadError> {
    let kind = match item_type(node) {
        "TextureItem" => SceneItemKind::Texture(parse_texture_item(node)?),
        "PathItem" => SceneItemKind::Path(parse_path_item(node)?),
        "RectangleItem" => SceneItemKind::Rectangle(RectangleItem {
            fill_color: node.color("FillColor")?,
            width: node.parse_child("Width", "number")?,
            height: node.parse_child("Height", "number")?,
        }),
        "CircleItem" => SceneItemKind::Circle(CircleItem {
            fill_color: node.color("FillColor")?,
            radius: node.parse_child("Radius", "number")?,
        }),
        other => return Err(SchemaError::UnknownItemType(other.to_string()).into()),
    };

    Ok(SceneItem {
        name: node.attr_or_empty("Name").to_string(),
        visible: node.attr_flag("Visible")?,
        position: node.vector2("Position")?,
        properties: parse_properties(node),
        kind,
    })
}

fn parse_texture_item(node: Node<'_, '_>) -> Result<TextureItem, ParseError> {
    Ok(TextureItem {
        flip_horizontal: node.child_flag("FlipHorizontally")?,
        flip_vertical: node.child_flag("FlipVertically")?,
        origin: node.vector2("Origin")?,
        rotation: node.parse_child("Rotation", "number")?,
        scale: node.vector2("Scale")?,
        texture_path: normalize_separators(&node.require_child("texture_filename")?.raw_text()),
        tint: node.color("TintColor")?,
    })
}

fn parse_path_item(node: Node<'_, '_>) -> Result<PathItem, ParseError> {
    Ok(PathItem {
        is_polygon: node.child_flag("IsPolygon")?,
        line_color: node.color("LineColor")?,
        line_width: node.parse_child("LineWidth", "number")?,
        local_points: parse_points(node, "LocalPoints")?,
        world_points: parse_points(node, "WorldPoints")?,
    })
}

fn parse_points(node: Node<'_, '_>, name: &str) -> Result<Vec<Vec2>, ParseError> {
    let Some(points) = node.child(name) else {
        return Ok(Vec::new());
    };

    points
        .children_named("Vector2")
        .map(|p| -> Result<Vec2, ParseError> {
            Ok(Vec2::new(p.parse_child("X", "number")?, p.parse_child("Y", "number")?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(layer_items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<Level Name="Forest" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <Layers>
    <Layer Name="ground" Visible="true">
      <Items>{layer_items}</Items>
      <ScrollSpeed><X>0.5</X><Y>1</Y></ScrollSpeed>
      <CustomProperties>
        <Property Name="parallax" Type="string"><string>far</string></Property>
      </CustomProperties>
    </Layer>
  </Layers>
  <CustomProperties>
    <Property Name="trigger" Type="string" Description=""><string>boss</string></Property>
    <Property Name="spawn" Type="Vector2"><Vector2><X>1</X><Y>2</Y></Vector2></Property>
    <Property Name="hard" Type="bool"><boolean>true</boolean></Property>
  </CustomProperties>
</Level>"#
        )
    }

    const TEXTURE_ITEM: &str = r#"
        <Item xsi:type="TextureItem" Name="rock" Visible="true">
          <Position><X>10</X><Y>20</Y></Position>
          <CustomProperties>
            <Property Name="solid" Type="string"><string>yes</string></Property>
          </CustomProperties>
          <FlipHorizontally>true</FlipHorizontally>
          <FlipVertically>false</FlipVertically>
          <Origin><X>8</X><Y>8</Y></Origin>
          <Rotation>1.5</Rotation>
          <Scale><X>2</X><Y>2</Y></Scale>
          <texture_filename>dir\sub\file.png</texture_filename>
          <TintColor><R>255</R><G>0</G><B>128</B><A>255</A></TintColor>
        </Item>"#;

    const PATH_ITEM: &str = r#"
        <Item xsi:type="PathItem" Name="floor" Visible="false">
          <Position><X>0</X><Y>0</Y></Position>
          <LocalPoints><Vector2><X>0</X><Y>0</Y></Vector2><Vector2><X>5</X><Y>0</Y></Vector2></LocalPoints>
          <WorldPoints><Vector2><X>100</X><Y>50</Y></Vector2><Vector2><X>105</X><Y>50</Y></Vector2></WorldPoints>
          <IsPolygon>false</IsPolygon>
          <LineWidth>3</LineWidth>
          <LineColor><R>0</R><G>255</G><B>0</B><A>128</A></LineColor>
        </Item>"#;

    const RECT_AND_CIRCLE: &str = r#"
        <Item xsi:type="RectangleItem" Name="wall" Visible="true">
          <Position><X>1</X><Y>2</Y></Position>
          <Width>30</Width><Height>40</Height>
          <FillColor><R>0</R><G>0</G><B>255</B><A>255</A></FillColor>
        </Item>
        <Item xsi:type="CircleItem" Name="coin" Visible="true">
          <Position><X>3</X><Y>4</Y></Position>
          <Radius>6</Radius>
          <FillColor><R>255</R><G>255</G><B>0</B><A>0</A></FillColor>
        </Item>"#;

    #[test]
    fn test_document_properties_keep_strings_only() {
        let doc = parse_scene(&level("")).unwrap();
        assert_eq!(doc.properties.get("trigger").map(String::as_str), Some("boss"));
        assert!(!doc.properties.contains_key("spawn"));
        assert!(!doc.properties.contains_key("hard"));
        assert_eq!(doc.properties.len(), 1);
    }

    #[test]
    fn test_string_property_keeps_whitespace() {
        let xml = r#"<Level>
  <CustomProperties>
    <Property Name="greeting" Type="string"><string>  padded value </string></Property>
  </CustomProperties>
</Level>"#;
        let doc = parse_scene(xml).unwrap();
        assert_eq!(doc.properties.get("greeting").map(String::as_str), Some("  padded value "));
    }

    #[test]
    fn test_texture_path_taken_as_written() {
        let item = TEXTURE_ITEM.replace(r"dir\sub\file.png", r" my dir\file.png");
        let doc = parse_scene(&level(&item)).unwrap();
        let texture = doc.layers[0].items[0].as_texture().unwrap();
        assert_eq!(texture.texture_path, " my dir/file.png");
    }

    #[test]
    fn test_layer_fields() {
        let doc = parse_scene(&level("")).unwrap();
        let layer = &doc.layers[0];
        assert_eq!(layer.name, "ground");
        assert!(layer.visible);
        assert_eq!(layer.scroll_speed, Vec2::new(0.5, 1.0));
        assert_eq!(layer.properties.get("parallax").map(String::as_str), Some("far"));
        assert!(layer.items.is_empty());
    }

    #[test]
    fn test_texture_item() {
        let doc = parse_scene(&level(TEXTURE_ITEM)).unwrap();
        let item = &doc.layers[0].items[0];
        assert_eq!(item.name, "rock");
        assert!(item.visible);
        assert_eq!(item.position, Vec2::new(10.0, 20.0));
        assert_eq!(item.properties.get("solid").map(String::as_str), Some("yes"));

        let texture = item.as_texture().unwrap();
        assert!(texture.flip_horizontal);
        assert!(!texture.flip_vertical);
        assert_eq!(texture.origin, Vec2::new(8.0, 8.0));
        assert_eq!(texture.rotation, 1.5);
        assert_eq!(texture.scale, Vec2::new(2.0, 2.0));
        assert_eq!(texture.texture_path, "dir/sub/file.png");
        assert_eq!(texture.tint.r, 1.0);
        assert_eq!(texture.tint.g, 0.0);
        assert!((texture.tint.b - 0.502).abs() < 0.001);
        assert_eq!(texture.tint.a, 1.0);
    }

    #[test]
    fn test_path_item() {
        let doc = parse_scene(&level(PATH_ITEM)).unwrap();
        let item = &doc.layers[0].items[0];
        assert!(!item.visible);
        let path = item.as_path().unwrap();
        assert!(!path.is_polygon);
        assert_eq!(path.line_width, 3.0);
        assert_eq!(path.line_color.g, 1.0);
        assert_eq!(path.local_points, vec![Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)]);
        assert_eq!(path.world_points, vec![Vec2::new(100.0, 50.0), Vec2::new(105.0, 50.0)]);
    }

    #[test]
    fn test_rectangle_and_circle_items_in_order() {
        let doc = parse_scene(&level(RECT_AND_CIRCLE)).unwrap();
        let items = &doc.layers[0].items;
        assert_eq!(items.len(), 2);

        match &items[0].kind {
            SceneItemKind::Rectangle(rect) => {
                assert_eq!((rect.width, rect.height), (30.0, 40.0));
                assert_eq!(rect.fill_color.b, 1.0);
            }
            other => panic!("expected rectangle, got {}", other.type_name()),
        }
        match &items[1].kind {
            SceneItemKind::Circle(circle) => {
                assert_eq!(circle.radius, 6.0);
                assert_eq!(circle.fill_color.a, 0.0);
            }
            other => panic!("expected circle, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_unknown_item_type_fails() {
        let blob = r#"<Item xsi:type="BlobItem" Name="x" Visible="true">
            <Position><X>0</X><Y>0</Y></Position></Item>"#;
        let err = parse_scene(&level(blob)).unwrap_err();
        assert!(matches!(err, LoadError::Schema(SchemaError::UnknownItemType(ref t)) if t == "BlobItem"));
    }

    #[test]
    fn test_missing_item_type_fails() {
        let bare = r#"<Item Name="x"><Position><X>0</X><Y>0</Y></Position></Item>"#;
        let err = parse_scene(&level(bare)).unwrap_err();
        assert!(matches!(err, LoadError::Schema(SchemaError::UnknownItemType(ref t)) if t.is_empty()));
    }

    #[test]
    fn test_empty_level() {
        let doc = parse_scene("<Level/>").unwrap();
        assert!(doc.layers.is_empty());
        assert!(doc.properties.is_empty());
    }

    #[test]
    fn test_missing_scroll_speed() {
        let xml = r#"<Level><Layers><Layer Name="a" Visible="true"/></Layers></Level>"#;
        let err = parse_scene(xml).unwrap_err();
        assert!(matches!(err, LoadError::Parse(ParseError::MissingElement { ref name, .. }) if name == "ScrollSpeed"));
    }

    #[test]
    fn test_wrong_root() {
        assert!(matches!(
            parse_scene("<Animation/>"),
            Err(LoadError::Parse(ParseError::UnexpectedRoot { expected: "Level", .. }))
        ));
    }
}
