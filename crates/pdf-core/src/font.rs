//! Standard Type1 fonts (Helvetica family) with WinAnsi encoding
//!
//! The standard 14 fonts need no embedding, so the writer only has to know
//! their advance widths to measure and align text. Widths are taken from
//! the Adobe core font metrics (units per 1000 em).

use lopdf::{Dictionary, Object};

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// The four Helvetica variants of the standard font set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

/// Width used for characters that cannot be encoded (rendered as `?`)
const REPLACEMENT: char = '?';

/// Helvetica widths for codes 32..=126
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold widths for codes 32..=126
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Helvetica widths for codes 160..=255 (Latin-1 supplement)
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // A0..AF
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // B0..BF
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // C0..CF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // D0..DF
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // E0..EF
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // F0..FF
];

/// Helvetica-Bold widths for codes 160..=255 (Latin-1 supplement)
const HELVETICA_BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // A0..AF
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // B0..BF
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // C0..CF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // D0..DF
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // E0..EF
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // F0..FF
];

/// Map a Unicode character to its WinAnsiEncoding byte
///
/// Returns `None` for characters the encoding cannot represent.
pub fn win_ansi_code(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '‰' => Some(0x89),
            '‹' => Some(0x8B),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '™' => Some(0x99),
            '›' => Some(0x9B),
            _ => None,
        },
    }
}

/// Width (per 1000 em) of a WinAnsi code in the given width tables
fn code_width(code: u8, ascii: &[u16; 95], latin1: &[u16; 96], bold: bool) -> u16 {
    match code {
        0x20..=0x7E => ascii[(code - 0x20) as usize],
        0xA0..=0xFF => latin1[(code - 0xA0) as usize],
        0x85 | 0x89 | 0x97 | 0x99 => 1000,
        0x80 | 0x96 => 556,
        0x95 => 350,
        0x82 | 0x91 | 0x92 => {
            if bold {
                278
            } else {
                222
            }
        }
        0x84 | 0x93 | 0x94 => {
            if bold {
                500
            } else {
                333
            }
        }
        0x8B | 0x9B => 333,
        _ => 556,
    }
}

impl StandardFont {
    /// Select the variant for a weight and style
    pub fn from_variant(weight: FontWeight, style: FontStyle) -> Self {
        match (weight, style) {
            (FontWeight::Regular, FontStyle::Normal) => StandardFont::Helvetica,
            (FontWeight::Bold, FontStyle::Normal) => StandardFont::HelveticaBold,
            (FontWeight::Regular, FontStyle::Italic) => StandardFont::HelveticaOblique,
            (FontWeight::Bold, FontStyle::Italic) => StandardFont::HelveticaBoldOblique,
        }
    }

    /// PostScript name used as /BaseFont
    pub fn base_font_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    /// Resource name used inside content streams
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::HelveticaOblique => "F3",
            StandardFont::HelveticaBoldOblique => "F4",
        }
    }

    fn is_bold(&self) -> bool {
        matches!(
            self,
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique
        )
    }

    /// Advance width of a character in font units (1000 per em)
    pub fn char_width(&self, c: char) -> u16 {
        let code = win_ansi_code(c)
            .or_else(|| win_ansi_code(REPLACEMENT))
            .unwrap_or(b'?');
        if self.is_bold() {
            code_width(code, &HELVETICA_BOLD_ASCII, &HELVETICA_BOLD_LATIN1, true)
        } else {
            code_width(code, &HELVETICA_ASCII, &HELVETICA_LATIN1, false)
        }
    }

    /// Calculate text width in font units
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars().map(|c| self.char_width(c) as u32).sum()
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        (self.text_width(text) as f32 / 1000.0) * font_size
    }

    /// Encode text as a hex string for the Tj operator
    ///
    /// Characters outside WinAnsi are written as `?`.
    pub fn encode_text_hex(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() * 2 + 2);
        result.push('<');
        for c in text.chars() {
            let code = win_ansi_code(c).unwrap_or(b'?');
            result.push_str(&format!("{code:02X}"));
        }
        result.push('>');
        result
    }

    /// Font dictionary for the PDF resources
    pub fn to_pdf_dictionary(&self) -> Dictionary {
        Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            (
                "BaseFont",
                Object::Name(self.base_font_name().as_bytes().to_vec()),
            ),
            ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_selection() {
        assert_eq!(
            StandardFont::from_variant(FontWeight::Regular, FontStyle::Normal),
            StandardFont::Helvetica
        );
        assert_eq!(
            StandardFont::from_variant(FontWeight::Bold, FontStyle::Normal),
            StandardFont::HelveticaBold
        );
        assert_eq!(
            StandardFont::from_variant(FontWeight::Bold, FontStyle::Italic),
            StandardFont::HelveticaBoldOblique
        );
    }

    #[test]
    fn test_ascii_widths() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.char_width(' '), 278);
        assert_eq!(font.char_width('A'), 667);
        assert_eq!(font.char_width('i'), 222);
        assert_eq!(font.char_width('W'), 944);
        assert_eq!(font.char_width('~'), 584);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = StandardFont::Helvetica.text_width("Kjøpskontrakt");
        let bold = StandardFont::HelveticaBold.text_width("Kjøpskontrakt");
        assert!(bold > regular);
    }

    #[test]
    fn test_norwegian_letters_have_widths() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.char_width('æ'), 889);
        assert_eq!(font.char_width('ø'), 611);
        assert_eq!(font.char_width('å'), 556);
        assert_eq!(font.char_width('Ø'), 778);
    }

    #[test]
    fn test_unsupported_char_measured_as_question_mark() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.char_width('✓'), font.char_width('?'));
    }

    #[test]
    fn test_text_width_points() {
        let font = StandardFont::Helvetica;
        // "AA" = 2 * 667 units
        let width = font.text_width_points("AA", 10.0);
        assert!((width - 13.34).abs() < 0.001);
    }

    #[test]
    fn test_text_width_empty() {
        assert_eq!(StandardFont::Helvetica.text_width(""), 0);
    }

    #[test]
    fn test_encode_text_hex() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.encode_text_hex("AB"), "<4142>");
        assert_eq!(font.encode_text_hex(""), "<>");
        assert_eq!(font.encode_text_hex("ø"), "<F8>");
        assert_eq!(font.encode_text_hex("€"), "<80>");
        assert_eq!(font.encode_text_hex("✓"), "<3F>");
    }

    #[test]
    fn test_to_pdf_dictionary() {
        let dict = StandardFont::HelveticaBold.to_pdf_dictionary();
        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Type1");
        assert_eq!(
            dict.get(b"BaseFont").unwrap().as_name().unwrap(),
            b"Helvetica-Bold"
        );
        assert_eq!(
            dict.get(b"Encoding").unwrap().as_name().unwrap(),
            b"WinAnsiEncoding"
        );
    }

    #[test]
    fn test_resource_names_are_distinct() {
        let names = [
            StandardFont::Helvetica.resource_name(),
            StandardFont::HelveticaBold.resource_name(),
            StandardFont::HelveticaOblique.resource_name(),
            StandardFont::HelveticaBoldOblique.resource_name(),
        ];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
