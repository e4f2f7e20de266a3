//! Glyph widths for the base-14 Helvetica fonts.
//!
//! The report uses the non-embedded standard fonts, so text measurement relies
//! on the published AFM advance widths (units of 1/1000 em) for printable ASCII.
//! Characters outside that range are measured with the width of a digit.

/// Standard fonts the report writer references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript base font name.
    #[must_use]
    pub fn base_name(self) -> &'static [u8] {
        match self {
            Self::Helvetica => b"Helvetica",
            Self::HelveticaBold => b"Helvetica-Bold",
        }
    }

    /// Resource name used inside page content streams.
    #[must_use]
    pub fn resource_name(self) -> &'static [u8] {
        match self {
            Self::Helvetica => b"F1",
            Self::HelveticaBold => b"F2",
        }
    }

    /// Width of `text` set at `size` points.
    #[must_use]
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let table = match self {
            Self::Helvetica => &HELVETICA,
            Self::HelveticaBold => &HELVETICA_BOLD,
        };
        let units: u32 = text
            .chars()
            .map(|c| {
                let code = c as u32;
                if (0x20..=0x7E).contains(&code) {
                    u32::from(table[(code - 0x20) as usize])
                } else {
                    DEFAULT_WIDTH
                }
            })
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let units = units as f32;
        units * size / 1000.0
    }
}

const DEFAULT_WIDTH: u32 = 556;

// Advance widths for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,      // 'p'..'~'
];

/// Greedy word wrap of `text` into lines no wider than `max_width`.
/// A single word wider than the line is kept whole.
#[must_use]
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if font.text_width(&candidate, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // Digits are 556 units in both weights
        assert!((Font::Helvetica.text_width("00", 10.0) - 11.12).abs() < 1e-4);
        assert!((Font::HelveticaBold.text_width("0", 10.0) - 5.56).abs() < 1e-4);
        assert!(Font::HelveticaBold.text_width("Mean_pident", 10.0) > Font::Helvetica.text_width("Mean_pident", 10.0));
        assert!(Font::Helvetica.text_width("", 12.0).abs() < f32::EPSILON);
        // Non-ASCII falls back to the digit width
        assert!((Font::Helvetica.text_width("é", 10.0) - 5.56).abs() < 1e-4);
    }

    #[test]
    fn test_table_lookup() {
        assert_eq!(HELVETICA[(u32::from('A') - 0x20) as usize], 667);
        assert_eq!(HELVETICA[(u32::from('i') - 0x20) as usize], 222);
        assert_eq!(HELVETICA_BOLD[(u32::from('m') - 0x20) as usize], 889);
        assert_eq!(HELVETICA[(u32::from('~') - 0x20) as usize], 584);
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("alpha beta gamma delta", Font::Helvetica, 10.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(Font::Helvetica.text_width(line, 10.0) <= 60.0 || !line.contains(' '));
        }
        assert_eq!(lines.join(" "), "alpha beta gamma delta");

        assert_eq!(wrap_text("short", Font::Helvetica, 10.0, 500.0), vec!["short"]);
        assert_eq!(wrap_text("", Font::Helvetica, 10.0, 500.0), vec![""]);
    }
}
