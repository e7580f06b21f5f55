//! Font metrics supplied by the renderer for screen/coordinate conversion.

/// Measures rendered text
pub trait FontMetrics {
    /// Pixel width of `text` drawn starting at horizontal offset `start_x`
    fn text_width(&self, text: &str, start_x: f32) -> f32;

    /// Height of one line in pixels
    fn line_height(&self) -> f32;
}

/// Fixed advance per codepoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: f32,
    pub line_height: f32,
}

impl MonospaceMetrics {
    pub const fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl FontMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, _start_x: f32) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_counts_codepoints() {
        let metrics = MonospaceMetrics::new(10.0, 20.0);
        assert_eq!(metrics.text_width("aé€", 0.0), 30.0);
        assert_eq!(metrics.line_height(), 20.0);
    }
}
