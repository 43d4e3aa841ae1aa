//! Bitmap font glyph metrics and text layout.

use glam::Vec2;
use std::collections::BTreeMap;

/// Placement of one glyph in the font atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterData {
    /// Atlas position
    pub x: i16,
    pub y: i16,
    /// Glyph size in the atlas
    pub width: u16,
    pub height: u16,
    /// Offset from the pen position when drawing
    pub offset_x: i16,
    pub offset_y: i16,
    /// Horizontal pen advance after drawing
    pub advance_x: i16,
}

/// A loaded bitmap font.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    /// Glyphs keyed by 16-bit character code
    pub characters: BTreeMap<u16, CharacterData>,
    /// Nominal point size, 0 when the document does not declare one
    pub size: i32,
    pub line_height: i32,
}

impl Font {
    /// Glyph for a character, if the font has one.
    pub fn glyph(&self, c: char) -> Option<&CharacterData> {
        u16::try_from(u32::from(c))
            .ok()
            .and_then(|code| self.characters.get(&code))
    }

    /// Horizontal advance of a character; characters without a glyph advance 0.
    pub fn advance(&self, c: char) -> f32 {
        self.glyph(c).map_or(0.0, |g| f32::from(g.advance_x))
    }

    /// Bounding box needed to draw `text` as-is (no wrapping).
    ///
    /// Width is the widest line; height is one line height per line.
    /// Empty text measures zero.
    pub fn measure_string(&self, text: &str) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }

        let line_height = self.line_height as f32;
        let mut max_width = 0.0f32;
        let mut line_width = 0.0f32;
        let mut height = line_height;

        for c in text.chars() {
            if c == '\n' {
                max_width = max_width.max(line_width);
                line_width = 0.0;
                height += line_height;
            } else {
                line_width += self.advance(c);
            }
        }

        Vec2::new(max_width.max(line_width), height)
    }

    /// Greedy word wrap to `max_width`.
    ///
    /// Words are separated by whitespace and rejoined with single spaces. A
    /// line break is inserted before any word that would push the line past
    /// `max_width`. A word wider than `max_width` on its own stays whole on its
    /// own line. Newlines in the input are kept as hard breaks.
    pub fn word_wrap_string(&self, text: &str, max_width: f32) -> String {
        let space = self.advance(' ');
        let mut lines: Vec<String> = Vec::new();

        for paragraph in text.split('\n') {
            let mut line = String::new();
            let mut line_width = 0.0f32;

            for word in paragraph.split_whitespace() {
                let word_width: f32 = word.chars().map(|c| self.advance(c)).sum();

                if line.is_empty() {
                    line.push_str(word);
                    line_width = word_width;
                } else if line_width + space + word_width <= max_width {
                    line.push(' ');
                    line.push_str(word);
                    line_width += space + word_width;
                } else {
                    lines.push(std::mem::take(&mut line));
                    line.push_str(word);
                    line_width = word_width;
                }
            }

            lines.push(line);
        }

        lines.join("\n")
    }
}

/// Free-function form of [`Font::measure_string`].
pub fn measure_string(font: &Font, text: &str) -> Vec2 {
    font.measure_string(text)
}

/// Free-function form of [`Font::word_wrap_string`].
pub fn word_wrap_string(font: &Font, text: &str, max_width: f32) -> String {
    font.word_wrap_string(text, max_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Font where every printable ASCII character advances by `advance`.
    fn monospace(advance: i16, line_height: i32) -> Font {
        let characters = (0x20u16..0x7f)
            .map(|code| {
                (
                    code,
                    CharacterData {
                        width: advance as u16,
                        height: line_height as u16,
                        advance_x: advance,
                        ..Default::default()
                    },
                )
            })
            .collect();
        Font {
            characters,
            size: 12,
            line_height,
        }
    }

    #[test]
    fn test_measure_single_line() {
        let font = monospace(10, 16);
        assert_eq!(font.measure_string("abc"), Vec2::new(30.0, 16.0));
    }

    #[test]
    fn test_measure_two_lines() {
        let font = monospace(10, 16);
        assert_eq!(font.measure_string("ab\ncd"), Vec2::new(20.0, 32.0));
    }

    #[test]
    fn test_measure_widest_line_wins() {
        let font = monospace(10, 16);
        assert_eq!(font.measure_string("a\nabcd\nab"), Vec2::new(40.0, 48.0));
    }

    #[test]
    fn test_measure_trailing_newline_adds_line() {
        let font = monospace(10, 16);
        assert_eq!(font.measure_string("ab\n"), Vec2::new(20.0, 32.0));
        assert_eq!(font.measure_string(""), Vec2::ZERO);
    }

    #[test]
    fn test_measure_skips_unknown_glyphs() {
        let font = monospace(10, 16);
        assert_eq!(font.measure_string("a\u{1F600}b"), Vec2::new(20.0, 16.0));
    }

    #[test]
    fn test_wrap_fills_line_up_to_width() {
        // "aa bb cc" is 8 glyphs * 4 = 32 <= 35; " dd" would make it 44
        let font = monospace(4, 16);
        assert_eq!(font.word_wrap_string("aa bb cc dd", 35.0), "aa bb cc\ndd");
    }

    #[test]
    fn test_wrap_advance_ten() {
        let font = monospace(10, 16);
        assert_eq!(font.word_wrap_string("aa bb cc dd", 35.0), "aa\nbb\ncc\ndd");
        assert_eq!(font.word_wrap_string("aa bb cc dd", 50.0), "aa bb\ncc dd");
    }

    #[test]
    fn test_wrap_long_word_on_its_own_line() {
        let font = monospace(10, 16);
        assert_eq!(
            font.word_wrap_string("a enormous b", 35.0),
            "a\nenormous\nb"
        );
    }

    #[test]
    fn test_wrap_preserves_hard_breaks() {
        let font = monospace(10, 16);
        assert_eq!(font.word_wrap_string("aa\nbb cc", 100.0), "aa\nbb cc");
        assert_eq!(font.word_wrap_string("aa\n\nbb", 100.0), "aa\n\nbb");
    }

    #[test]
    fn test_wrapped_text_fits() {
        let font = monospace(7, 16);
        let text = "the quick brown fox jumps over the lazy dog";
        let wrapped = font.word_wrap_string(text, 80.0);
        for line in wrapped.lines() {
            assert!(font.measure_string(line).x <= 80.0, "line too wide: {line:?}");
        }
    }

    #[test]
    fn test_glyph_lookup_outside_u16() {
        let font = monospace(10, 16);
        assert!(font.glyph('A').is_some());
        assert!(font.glyph('\u{10000}').is_none());
    }
}
