//! Attribute model for rich text formatting.
//!
//! This module defines the per-character and per-paragraph attribute types
//! that the formatting engine reads and writes through the
//! [`AttributedBuffer`](crate::buffer::AttributedBuffer) contract:
//!
//! - [`FontSpec`]: font family, size, and independent style flags
//! - [`CharAttributes`]: the full per-character attribute set
//! - [`ParagraphFormat`]: alignment, bullet flag, bullet indent
//! - [`Color`]: RGBA color with named constants

// ============================================================================
// Color
// ============================================================================

/// An RGBA color with components in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components (0.0-1.0 range).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Create a color from 8-bit RGBA components (0-255 range).
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Fully transparent color.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::from_rgb(1.0, 0.0, 0.0);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::from_rgb(1.0, 1.0, 0.0);
}

// ============================================================================
// Font
// ============================================================================

/// The font family used when none is specified.
pub const DEFAULT_FONT_FAMILY: &str = "Lucida Console";

/// The font size used when none is specified.
pub const DEFAULT_FONT_SIZE: f32 = 10.0;

/// An independent character style flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFlag {
    /// Bold weight.
    Bold,
    /// Italic slant.
    Italic,
    /// Underline decoration.
    Underline,
}

/// A concrete font: family name, point size, and style flags.
///
/// Style flags are independent booleans; toggling one never touches the
/// others, the family, or the size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font family name.
    pub family: String,
    /// Font size in points. Always positive.
    pub size: f32,
    /// Whether the text is bold.
    pub bold: bool,
    /// Whether the text is italic.
    pub italic: bool,
    /// Whether the text is underlined.
    pub underline: bool,
}

impl FontSpec {
    /// Create a new font with no style flags set.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    /// Builder method to set bold.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Builder method to set italic.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Builder method to set underline.
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Read a single style flag.
    pub fn style_flag(&self, flag: StyleFlag) -> bool {
        match flag {
            StyleFlag::Bold => self.bold,
            StyleFlag::Italic => self.italic,
            StyleFlag::Underline => self.underline,
        }
    }

    /// Flip a single style flag, leaving everything else untouched.
    pub fn toggle_style_flag(&mut self, flag: StyleFlag) {
        match flag {
            StyleFlag::Bold => self.bold = !self.bold,
            StyleFlag::Italic => self.italic = !self.italic,
            StyleFlag::Underline => self.underline = !self.underline,
        }
    }

    /// Check whether two fonts agree on everything except the family name.
    pub fn same_except_family(&self, other: &Self) -> bool {
        self.size == other.size
            && self.bold == other.bold
            && self.italic == other.italic
            && self.underline == other.underline
    }

    /// Check whether two fonts agree on everything except the size.
    pub fn same_except_size(&self, other: &Self) -> bool {
        self.family == other.family
            && self.bold == other.bold
            && self.italic == other.italic
            && self.underline == other.underline
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE)
    }
}

// ============================================================================
// Character Attributes
// ============================================================================

/// The full per-character attribute set.
///
/// Attribute channels (font, text color, background color, baseline offset)
/// are read and written independently through the buffer contract, so an
/// operation that targets one channel never rewrites another.
#[derive(Debug, Clone, PartialEq)]
pub struct CharAttributes {
    /// The character's font.
    pub font: FontSpec,
    /// Foreground (text) color.
    pub text_color: Color,
    /// Background (highlight) color.
    pub background_color: Color,
    /// Vertical baseline displacement: 0 normal, positive superscript,
    /// negative subscript.
    pub baseline_offset: i32,
}

impl CharAttributes {
    /// Create default attributes: default font, black text, transparent
    /// background, normal baseline.
    pub fn new() -> Self {
        Self {
            font: FontSpec::default(),
            text_color: Color::BLACK,
            background_color: Color::TRANSPARENT,
            baseline_offset: 0,
        }
    }

    /// Builder method to set the font.
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    /// Builder method to set the text color.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Builder method to set the background color.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Builder method to set the baseline offset.
    pub fn with_baseline_offset(mut self, offset: i32) -> Self {
        self.baseline_offset = offset;
        self
    }
}

impl Default for CharAttributes {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Paragraph Format
// ============================================================================

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Align to the left edge (default).
    #[default]
    Left,
    /// Center between the edges.
    Center,
    /// Align to the right edge.
    Right,
}

/// Paragraph-level formatting attributes.
///
/// Paragraphs are delimited by newline characters and addressed by line
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParagraphFormat {
    /// Horizontal text alignment.
    pub alignment: Alignment,
    /// Whether the paragraph carries a bullet marker.
    pub bullet: bool,
    /// Indent of the bullet marker, in device units.
    pub bullet_indent: i32,
}

impl ParagraphFormat {
    /// Create a new default paragraph format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Builder method to set the bullet flag.
    pub fn with_bullet(mut self, bullet: bool) -> Self {
        self.bullet = bullet;
        self
    }

    /// Builder method to set the bullet indent.
    pub fn with_bullet_indent(mut self, indent: i32) -> Self {
        self.bullet_indent = indent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_constructors() {
        assert_eq!(Color::from_rgb8(255, 0, 0), Color::RED);
        assert_eq!(Color::from_rgba8(0, 0, 0, 255), Color::BLACK);
        assert_eq!(Color::TRANSPARENT.a, 0.0);
    }

    #[test]
    fn test_font_spec_builders() {
        let font = FontSpec::new("Arial", 12.0).with_bold(true).with_italic(true);
        assert_eq!(font.family, "Arial");
        assert_eq!(font.size, 12.0);
        assert!(font.bold);
        assert!(font.italic);
        assert!(!font.underline);
    }

    #[test]
    fn test_style_flag_toggle_is_independent() {
        let mut font = FontSpec::new("Arial", 12.0).with_underline(true);
        font.toggle_style_flag(StyleFlag::Bold);
        assert!(font.bold);
        assert!(font.underline);
        assert_eq!(font.size, 12.0);

        font.toggle_style_flag(StyleFlag::Bold);
        assert!(!font.bold);
        assert!(font.underline);
    }

    #[test]
    fn test_same_except_family() {
        let a = FontSpec::new("Arial", 12.0).with_bold(true);
        let b = FontSpec::new("Georgia", 12.0).with_bold(true);
        assert!(a.same_except_family(&b));

        let c = FontSpec::new("Georgia", 14.0).with_bold(true);
        assert!(!a.same_except_family(&c));
    }

    #[test]
    fn test_default_attributes() {
        let attrs = CharAttributes::default();
        assert_eq!(attrs.font.family, DEFAULT_FONT_FAMILY);
        assert_eq!(attrs.font.size, DEFAULT_FONT_SIZE);
        assert_eq!(attrs.text_color, Color::BLACK);
        assert_eq!(attrs.background_color, Color::TRANSPARENT);
        assert_eq!(attrs.baseline_offset, 0);
    }

    #[test]
    fn test_paragraph_format_builders() {
        let fmt = ParagraphFormat::new()
            .with_alignment(Alignment::Center)
            .with_bullet(true)
            .with_bullet_indent(8);
        assert_eq!(fmt.alignment, Alignment::Center);
        assert!(fmt.bullet);
        assert_eq!(fmt.bullet_indent, 8);
    }
}
