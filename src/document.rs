//! XML document access for asset formats
//!
//! Every asset format is a tree of named elements with attributes. These
//! helpers wrap `roxmltree` nodes with the lookups the loaders need and turn
//! absent or malformed values into [`ParseError`]s that name the element.

use glam::Vec2;
use roxmltree::{Document, Node};
use std::str::FromStr;

use crate::color::Color;
use crate::error::ParseError;

/// Parse `source` into an element tree.
pub fn parse_document(source: &str) -> Result<Document<'_>, ParseError> {
    Ok(Document::parse(source)?)
}

/// Return the root element if it carries the expected tag.
pub fn root_element<'a, 'input>(
    document: &'a Document<'input>,
    expected: &'static str,
) -> Result<Node<'a, 'input>, ParseError> {
    let root = document.root_element();
    if root.has_tag_name(expected) {
        Ok(root)
    } else {
        Err(ParseError::UnexpectedRoot {
            expected,
            found: root.tag_name().name().to_string(),
        })
    }
}

/// Strict boolean token parser.
///
/// Accepts `true`, `false`, `1` and `0`, ASCII case-insensitive.
pub fn parse_bool(element: &str, token: &str) -> Result<bool, ParseError> {
    let trimmed = token.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        Ok(false)
    } else {
        Err(ParseError::InvalidValue {
            element: element.to_string(),
            value: token.to_string(),
            expected: "boolean",
        })
    }
}

fn parse_value<T: FromStr>(element: &str, value: &str, expected: &'static str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidValue {
        element: element.to_string(),
        value: value.to_string(),
        expected,
    })
}

/// Lookups over an element node.
pub trait ElementExt<'a, 'input: 'a> {
    /// Tag name of this element.
    fn name(&self) -> &'a str;

    /// First child element with the given tag.
    fn child(&self, name: &str) -> Option<Node<'a, 'input>>;

    /// All child elements with the given tag, in document order.
    fn children_named(&self, name: &'static str) -> impl Iterator<Item = Node<'a, 'input>>;

    /// First child element with the given tag, or a missing-element error.
    fn require_child(&self, name: &str) -> Result<Node<'a, 'input>, ParseError>;

    /// Trimmed text content of this element, empty when it has none.
    fn text_value(&self) -> &'a str;

    /// All text content of this element as written, whitespace included.
    fn raw_text(&self) -> String;

    /// Text of a required child parsed as `T`.
    fn parse_child<T: FromStr>(&self, name: &str, expected: &'static str) -> Result<T, ParseError>;

    /// Optional child flag; absent means `false`, unrecognized tokens fail.
    fn child_flag(&self, name: &str) -> Result<bool, ParseError>;

    /// Optional attribute parsed as `T`.
    fn parse_attr<T: FromStr>(&self, name: &str, expected: &'static str) -> Result<Option<T>, ParseError>;

    /// Required attribute parsed as `T`.
    fn require_attr<T: FromStr>(&self, name: &str, expected: &'static str) -> Result<T, ParseError>;

    /// Optional attribute flag; absent means `false`.
    fn attr_flag(&self, name: &str) -> Result<bool, ParseError>;

    /// Attribute text, empty when absent.
    fn attr_or_empty(&self, name: &str) -> &'a str;

    /// `<name><X/><Y/></name>` as a vector.
    fn vector2(&self, name: &str) -> Result<Vec2, ParseError>;

    /// `<name><R/><G/><B/><A/></name>` with 0-255 channels, normalized.
    fn color(&self, name: &str) -> Result<Color, ParseError>;
}

impl<'a, 'input: 'a> ElementExt<'a, 'input> for Node<'a, 'input> {
    fn name(&self) -> &'a str {
        self.tag_name().name()
    }

    fn child(&self, name: &str) -> Option<Node<'a, 'input>> {
        self.children().find(|n| n.is_element() && n.has_tag_name(name))
    }

    fn children_named(&self, name: &'static str) -> impl Iterator<Item = Node<'a, 'input>> {
        self.children().filter(move |n| n.is_element() && n.has_tag_name(name))
    }

    fn require_child(&self, name: &str) -> Result<Node<'a, 'input>, ParseError> {
        self.child(name).ok_or_else(|| ParseError::MissingElement {
            parent: ElementExt::name(self).to_string(),
            name: name.to_string(),
        })
    }

    fn text_value(&self) -> &'a str {
        self.text().map(str::trim).unwrap_or("")
    }

    fn raw_text(&self) -> String {
        self.children()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect()
    }

    fn parse_child<T: FromStr>(&self, name: &str, expected: &'static str) -> Result<T, ParseError> {
        let child = self.require_child(name)?;
        parse_value(name, child.text_value(), expected)
    }

    fn child_flag(&self, name: &str) -> Result<bool, ParseError> {
        match self.child(name) {
            Some(child) => parse_bool(name, child.text_value()),
            None => Ok(false),
        }
    }

    fn parse_attr<T: FromStr>(&self, name: &str, expected: &'static str) -> Result<Option<T>, ParseError> {
        self.attribute(name)
            .map(|value| parse_value(ElementExt::name(self), value, expected))
            .transpose()
    }

    fn require_attr<T: FromStr>(&self, name: &str, expected: &'static str) -> Result<T, ParseError> {
        self.parse_attr(name, expected)?
            .ok_or_else(|| ParseError::MissingAttribute {
                element: ElementExt::name(self).to_string(),
                name: name.to_string(),
            })
    }

    fn attr_flag(&self, name: &str) -> Result<bool, ParseError> {
        match self.attribute(name) {
            Some(value) => parse_bool(ElementExt::name(self), value),
            None => Ok(false),
        }
    }

    fn attr_or_empty(&self, name: &str) -> &'a str {
        self.attribute(name).unwrap_or("")
    }

    fn vector2(&self, name: &str) -> Result<Vec2, ParseError> {
        let node = self.require_child(name)?;
        Ok(Vec2::new(
            node.parse_child("X", "number")?,
            node.parse_child("Y", "number")?,
        ))
    }

    fn color(&self, name: &str) -> Result<Color, ParseError> {
        let node = self.require_child(name)?;
        Ok(Color::from_channels(
            node.parse_child("R", "color channel")?,
            node.parse_child("G", "color channel")?,
            node.parse_child("B", "color channel")?,
            node.parse_child("A", "color channel")?,
        ))
    }
}
