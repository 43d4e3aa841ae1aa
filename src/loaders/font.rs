//! Bitmap font metrics loader (BMFont XML)
//!
//! ```xml
//! <font>
//!   <info face="Arial" size="32"/>
//!   <common lineHeight="36"/>
//!   <chars>
//!     <char id="65" x="0" y="0" width="20" height="24" xoffset="1" yoffset="4" xadvance="21"/>
//!   </chars>
//! </font>
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use roxmltree::Node;

use crate::document::{parse_document, root_element, ElementExt};
use crate::error::{LoadError, ParseError};
use crate::models::{CharacterData, Font};

/// Parse a font metrics document.
pub fn parse_font(source: &str) -> Result<Font, LoadError> {
    let document = parse_document(source)?;
    let root = root_element(&document, "font")?;

    let line_height: i32 = root
        .require_child("common")?
        .require_attr("lineHeight", "integer")?;

    let size = match root.child("info") {
        Some(info) => info.parse_attr::<i32>("size", "integer")?.unwrap_or(0).abs(),
        None => 0,
    };

    let mut characters = BTreeMap::new();
    for node in root.require_child("chars")?.children_named("char") {
        let code: u16 = node.require_attr("id", "character code")?;
        characters.insert(code, parse_character(node)?);
    }

    tracing::trace!(glyphs = characters.len(), line_height, "parsed font");

    Ok(Font {
        characters,
        size,
        line_height,
    })
}

fn parse_character(node: Node<'_, '_>) -> Result<CharacterData, ParseError> {
    Ok(CharacterData {
        x: metric(node, "x")?,
        y: metric(node, "y")?,
        width: metric(node, "width")?,
        height: metric(node, "height")?,
        offset_x: metric(node, "xoffset")?,
        offset_y: metric(node, "yoffset")?,
        advance_x: metric(node, "xadvance")?,
    })
}

/// Glyph metrics default to 0 when absent, like BMFont readers do.
fn metric<T: FromStr + Default>(node: Node<'_, '_>, name: &str) -> Result<T, ParseError> {
    Ok(node.parse_attr(name, "16-bit integer")?.unwrap_or_default())
}
