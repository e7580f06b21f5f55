//! Palette system for the editor
//!
//! The colorizer stores a [`PaletteIndex`] per glyph; the renderer resolves
//! it through a [`Palette`]. Palettes are YAML files, either embedded at
//! compile time or loaded from the user's config directory.
//!
//! Palette loading priority:
//! 1. User config: `~/.config/token-core/palettes/{id}.yaml`
//! 2. Embedded: Built-in palettes compiled into the library

use std::collections::HashMap;
use std::ops::Index;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

// Embed palette YAML files at compile time
pub const DARK_YAML: &str = include_str!("../palettes/dark.yaml");
pub const LIGHT_YAML: &str = include_str!("../palettes/light.yaml");
pub const RETRO_BLUE_YAML: &str = include_str!("../palettes/retro-blue.yaml");

/// A built-in palette entry
pub struct BuiltinPalette {
    /// Stable identifier for config (e.g. "dark", "retro-blue")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in palettes
pub const BUILTIN_PALETTES: &[BuiltinPalette] = &[
    BuiltinPalette {
        id: "dark",
        yaml: DARK_YAML,
    },
    BuiltinPalette {
        id: "light",
        yaml: LIGHT_YAML,
    },
    BuiltinPalette {
        id: "retro-blue",
        yaml: RETRO_BLUE_YAML,
    },
];

/// Errors raised while parsing a palette
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("failed to parse palette: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid color {value:?} for {role:?}: {reason}")]
    InvalidColor {
        role: PaletteIndex,
        value: String,
        reason: String,
    },
    #[error("unknown built-in palette: {0}")]
    UnknownBuiltin(String),
    #[error("failed to read palette file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for framebuffer renderers
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Channel-wise arithmetic mean of two colors, alpha included
    pub const fn average(&self, other: Color) -> Self {
        Self {
            r: ((self.r as u16 + other.r as u16) / 2) as u8,
            g: ((self.g as u16 + other.g as u16) / 2) as u8,
            b: ((self.b as u16 + other.b as u16) / 2) as u8,
            a: ((self.a as u16 + other.a as u16) / 2) as u8,
        }
    }

    /// Parse hex color string (#RRGGBB or #RRGGBBAA)
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|e| e.to_string())
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Color role assigned to a glyph by the colorizer, or used by the renderer
/// for editor chrome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteIndex {
    #[default]
    Default,
    Keyword,
    Number,
    String,
    CharLiteral,
    Punctuation,
    Preprocessor,
    Identifier,
    KnownIdentifier,
    PreprocIdentifier,
    Comment,
    MultiLineComment,
    Background,
    Cursor,
    Selection,
    ErrorMarker,
    Breakpoint,
    LineNumber,
    CurrentLineFill,
    CurrentLineFillInactive,
    CurrentLineEdge,
}

impl PaletteIndex {
    /// Number of palette entries
    pub const COUNT: usize = 21;

    /// All roles in palette order
    pub const ALL: [PaletteIndex; Self::COUNT] = [
        PaletteIndex::Default,
        PaletteIndex::Keyword,
        PaletteIndex::Number,
        PaletteIndex::String,
        PaletteIndex::CharLiteral,
        PaletteIndex::Punctuation,
        PaletteIndex::Preprocessor,
        PaletteIndex::Identifier,
        PaletteIndex::KnownIdentifier,
        PaletteIndex::PreprocIdentifier,
        PaletteIndex::Comment,
        PaletteIndex::MultiLineComment,
        PaletteIndex::Background,
        PaletteIndex::Cursor,
        PaletteIndex::Selection,
        PaletteIndex::ErrorMarker,
        PaletteIndex::Breakpoint,
        PaletteIndex::LineNumber,
        PaletteIndex::CurrentLineFill,
        PaletteIndex::CurrentLineFillInactive,
        PaletteIndex::CurrentLineEdge,
    ];
}

/// Raw palette data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub colors: HashMap<PaletteIndex, String>,
}

/// Fixed-size color table indexed by [`PaletteIndex`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub name: String,
    colors: [Color; PaletteIndex::COUNT],
}

impl Palette {
    /// Palette with every role set to `color`
    pub fn uniform(name: &str, color: Color) -> Self {
        Self {
            name: name.to_string(),
            colors: [color; PaletteIndex::COUNT],
        }
    }

    /// Parse a palette; roles missing from the YAML keep the dark palette's color
    pub fn from_yaml(yaml: &str) -> Result<Self, PaletteError> {
        Self::from_yaml_over(yaml, &Palette::dark())
    }

    fn from_yaml_over(yaml: &str, base: &Palette) -> Result<Self, PaletteError> {
        let data: PaletteData = serde_yaml::from_str(yaml)?;
        let mut palette = base.clone();
        palette.name = data.name;
        for (role, value) in data.colors {
            let color = Color::from_hex(&value).map_err(|reason| PaletteError::InvalidColor {
                role,
                value: value.clone(),
                reason,
            })?;
            palette.set(role, color);
        }
        Ok(palette)
    }

    /// Load a built-in palette by id
    pub fn from_builtin(id: &str) -> Result<Self, PaletteError> {
        if id == "dark" {
            return Ok(Self::dark());
        }
        let builtin = BUILTIN_PALETTES
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PaletteError::UnknownBuiltin(id.to_string()))?;
        Self::from_yaml(builtin.yaml)
    }

    /// The default dark palette
    pub fn dark() -> Self {
        let fallback = Palette::uniform("Fallback", Color::rgb(0x7f, 0x7f, 0x7f));
        Self::from_yaml_over(DARK_YAML, &fallback).unwrap_or_else(|e| {
            tracing::error!("Embedded dark palette is invalid: {}", e);
            fallback
        })
    }

    pub fn light() -> Self {
        Self::from_builtin("light").unwrap_or_else(|e| {
            tracing::error!("Embedded light palette is invalid: {}", e);
            Self::dark()
        })
    }

    pub fn retro_blue() -> Self {
        Self::from_builtin("retro-blue").unwrap_or_else(|e| {
            tracing::error!("Embedded retro-blue palette is invalid: {}", e);
            Self::dark()
        })
    }

    /// Load a palette from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path).map_err(|source| PaletteError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn get(&self, role: PaletteIndex) -> Color {
        self.colors[role as usize]
    }

    pub fn set(&mut self, role: PaletteIndex, color: Color) {
        self.colors[role as usize] = color;
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

impl Index<PaletteIndex> for Palette {
    type Output = Color;

    fn index(&self, role: PaletteIndex) -> &Color {
        &self.colors[role as usize]
    }
}

/// Load palette by id with priority: user → builtin
///
/// Searches in order:
/// 1. `~/.config/token-core/palettes/{id}.yaml`
/// 2. Embedded builtin palettes
pub fn load_palette(id: &str) -> Result<Palette, PaletteError> {
    if let Some(user_dir) = crate::config_paths::palettes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user palette from {}", user_path.display());
            return Palette::from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin palette: {}", id);
    Palette::from_builtin(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_palettes_parse() {
        for builtin in BUILTIN_PALETTES {
            let palette = Palette::from_yaml(builtin.yaml);
            assert!(palette.is_ok(), "palette {} failed: {:?}", builtin.id, palette);
        }
    }

    #[test]
    fn test_builtin_palettes_define_every_role() {
        for builtin in BUILTIN_PALETTES {
            let data: PaletteData = serde_yaml::from_str(builtin.yaml).unwrap();
            for role in PaletteIndex::ALL {
                assert!(
                    data.colors.contains_key(&role),
                    "palette {} is missing {:?}",
                    builtin.id,
                    role
                );
            }
        }
    }

    #[test]
    fn test_dark_palette_values() {
        let palette = Palette::dark();
        assert_eq!(palette.name, "Dark");
        assert_eq!(palette[PaletteIndex::Keyword], Color::rgb(0x56, 0x9c, 0xd6));
        assert_eq!(
            palette[PaletteIndex::Selection],
            Color::rgba(0x20, 0x60, 0xa0, 0x80)
        );
    }

    #[test]
    fn test_partial_palette_inherits_dark() {
        let yaml = r##"
version: 1
name: "Mine"
colors:
  keyword: "#ff0000"
"##;
        let palette = Palette::from_yaml(yaml).unwrap();
        assert_eq!(palette.name, "Mine");
        assert_eq!(palette[PaletteIndex::Keyword], Color::rgb(255, 0, 0));
        assert_eq!(
            palette[PaletteIndex::Number],
            Palette::dark()[PaletteIndex::Number]
        );
    }

    #[test]
    fn test_invalid_color_reports_role() {
        let yaml = "version: 1\nname: Bad\ncolors:\n  comment: \"#zz\"\n";
        match Palette::from_yaml(yaml) {
            Err(PaletteError::InvalidColor { role, .. }) => {
                assert_eq!(role, PaletteIndex::Comment)
            }
            other => panic!("expected InvalidColor, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(matches!(
            Palette::from_builtin("nope"),
            Err(PaletteError::UnknownBuiltin(_))
        ));
    }

    #[test]
    fn test_color_average() {
        let a = Color::rgba(0, 100, 200, 255);
        let b = Color::rgba(100, 100, 0, 1);
        assert_eq!(a.average(b), Color::rgba(50, 100, 100, 128));
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#102030").unwrap(), Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(
            Color::from_hex("10203040").unwrap(),
            Color::rgba(0x10, 0x20, 0x30, 0x40)
        );
        assert!(Color::from_hex("#123").is_err());
    }

    #[test]
    fn test_argb_u32() {
        assert_eq!(Color::rgba(1, 2, 3, 4).to_argb_u32(), 0x04010203);
    }
}
