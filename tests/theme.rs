//! Palette tests - built-in palettes, YAML loading, color blending

use token_core::theme::{load_palette, Color, Palette, PaletteError, PaletteIndex, BUILTIN_PALETTES};

#[test]
fn test_color_from_hex_6() {
    let color = Color::from_hex("#1E1E1E").unwrap();
    assert_eq!(color.r, 0x1E);
    assert_eq!(color.g, 0x1E);
    assert_eq!(color.b, 0x1E);
    assert_eq!(color.a, 255);
}

#[test]
fn test_color_from_hex_8() {
    let color = Color::from_hex("#1E1E1E80").unwrap();
    assert_eq!(color.a, 0x80);
}

#[test]
fn test_color_to_argb_u32() {
    let color = Color::rgb(0x1E, 0x1E, 0x1E);
    assert_eq!(color.to_argb_u32(), 0xFF1E1E1E);
}

#[test]
fn test_color_average_rounds_down() {
    let a = Color::rgb(255, 0, 10);
    let b = Color::rgb(0, 0, 15);
    assert_eq!(a.average(b), Color::rgb(127, 0, 12));
}

#[test]
fn test_builtin_palette_ids_load() {
    for builtin in BUILTIN_PALETTES {
        let palette = Palette::from_builtin(builtin.id).unwrap();
        assert!(!palette.name.is_empty());
    }
}

#[test]
fn test_light_and_dark_differ() {
    let dark = Palette::dark();
    let light = Palette::light();
    assert_ne!(
        dark.get(PaletteIndex::Background),
        light.get(PaletteIndex::Background)
    );
}

#[test]
fn test_palette_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mine.yaml");
    std::fs::write(
        &path,
        "version: 1\nname: Mine\ncolors:\n  string: \"#00ff00\"\n",
    )
    .unwrap();

    let palette = Palette::from_file(&path).unwrap();
    assert_eq!(palette.name, "Mine");
    assert_eq!(palette[PaletteIndex::String], Color::rgb(0, 255, 0));
}

#[test]
fn test_palette_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Palette::from_file(&dir.path().join("none.yaml")),
        Err(PaletteError::Io { .. })
    ));
}

#[test]
fn test_load_palette_unknown_id() {
    assert!(load_palette("definitely-not-a-palette").is_err());
}

#[test]
fn test_set_overrides_single_role() {
    let mut palette = Palette::uniform("Flat", Color::rgb(1, 2, 3));
    palette.set(PaletteIndex::Cursor, Color::rgb(9, 9, 9));
    assert_eq!(palette.get(PaletteIndex::Cursor), Color::rgb(9, 9, 9));
    assert_eq!(palette.get(PaletteIndex::Keyword), Color::rgb(1, 2, 3));
}
