//! Static font-metric table used by the layout pass.
//!
//! Character widths are in em units (relative to font size). Static tables
//! are an intentional approximation: the glyph backend draws whatever the
//! configured font actually shapes, but line breaking only needs to be
//! consistent between the HTML preview and the raster, not typesetter-exact.
//! The table covers ASCII 0x20..=0x7E; anything else falls back to an
//! average width. Index = (char as usize) - 32.

/// Em-unit character widths for the preview face (an Inter-class humanist
/// sans-serif, the same metrics class as the browser preview's font).
pub struct FontMetrics {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    average_char_width: f32,
    space_width: f32,
}

static PREVIEW_FACE: FontMetrics = FontMetrics {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
    space_width: 0.25,
};

/// The metric table for the single preview face.
pub fn preview_face() -> &'static FontMetrics {
    &PREVIEW_FACE
}

impl FontMetrics {
    /// Measures the rendered width of a string in em units.
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Measured width in pixels at the given font pixel size.
    pub fn measure_px(&self, s: &str, px_size: f32) -> f32 {
        self.measure_em(s) * px_size
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_em`.
    ///
    /// Always returns at least one line so an empty string still occupies an
    /// empty visual slot. A single word wider than the line gets a line of
    /// its own rather than being split.
    pub fn wrap(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return vec![String::new()];
        }

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in words {
            let word_w = self.measure_em(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + self.space_width + word_w > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_w;
            }
        }
        lines.push(current);
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_em_empty_returns_zero() {
        assert_eq!(preview_face().measure_em(""), 0.0);
    }

    #[test]
    fn test_measure_em_ascii_characters() {
        // "Rust" = R(0.61) + u(0.56) + s(0.44) + t(0.39) = 2.00
        let width = preview_face().measure_em("Rust");
        assert!(
            (width - 2.00).abs() < 1e-3,
            "Rust width should be ~2.00em, got {width}"
        );
    }

    #[test]
    fn test_measure_em_non_ascii_falls_back() {
        let metrics = preview_face();
        let width = metrics.measure_em("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_measure_px_scales_with_size() {
        let metrics = preview_face();
        let em = metrics.measure_em("Rust");
        assert!((metrics.measure_px("Rust", 16.0) - em * 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_empty_string_is_one_empty_slot() {
        assert_eq!(preview_face().wrap("", 10.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_short_text_stays_on_one_line() {
        assert_eq!(preview_face().wrap("Go and Rust", 20.0), vec!["Go and Rust"]);
    }

    #[test]
    fn test_wrap_long_text_breaks_between_words() {
        let lines = preview_face().wrap("one two three four five six seven", 5.0);
        assert!(lines.len() >= 2, "expected a wrap, got {lines:?}");
        // No word is lost or split.
        assert_eq!(lines.join(" "), "one two three four five six seven");
    }

    #[test]
    fn test_wrap_oversized_word_gets_own_line() {
        let lines = preview_face().wrap("tiny incomprehensibilities tiny", 4.0);
        assert!(lines.contains(&"incomprehensibilities".to_string()));
    }
}
