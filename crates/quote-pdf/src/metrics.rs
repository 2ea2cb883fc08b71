//! Glyph advances of the built-in Helvetica faces
//!
//! Widths are in 1/1000 em, taken from the Adobe AFM files for Helvetica and
//! Helvetica-Bold. Only WinAnsi code points up to U+00FF are covered; the
//! renderer rejects anything beyond that before measuring.

use printpdf::BuiltinFont;

/// Helvetica, ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Helvetica-Bold, ASCII 32..=126
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Helvetica, U+00A0..=U+00BF (no-break space through inverted question mark)
const HELVETICA_LATIN1_SYMBOLS: [u16; 32] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
];

/// Used for anything the tables do not cover
const FALLBACK_WIDTH: u16 = 556;

fn is_bold(font: BuiltinFont) -> bool {
    matches!(
        font,
        BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique
    )
}

/// Unaccented letter sharing the advance of an accented Latin-1 letter
fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ñ' => 'n',
        'ò'..='ö' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}

/// Advance width of `ch` in 1/1000 em
pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
    let bold = is_bold(font);
    let code = u32::from(ch);

    if (32..=126).contains(&code) {
        let index = (code - 32) as usize;
        return if bold {
            HELVETICA_BOLD_WIDTHS[index]
        } else {
            HELVETICA_WIDTHS[index]
        };
    }
    if let Some(base) = base_letter(ch) {
        return char_width(font, base);
    }

    match (ch, bold) {
        // Dotless i with an accent is wider than a plain regular-weight i
        ('ì'..='ï', _) => 278,
        ('¦', true) => 280,
        ('µ', true) => 611,
        ('¶', true) => 556,
        ('\u{A0}'..='¿', _) => HELVETICA_LATIN1_SYMBOLS[(code - 0xA0) as usize],
        ('Æ', _) => 1000,
        ('æ', _) => 889,
        ('Ð', _) => 722,
        ('Ø', _) => 778,
        ('Þ', _) => 667,
        ('×' | '÷', _) => 584,
        ('ß' | 'ø', _) => 611,
        ('ð' | 'þ', true) => 611,
        ('ð' | 'þ', false) => 556,
        _ => FALLBACK_WIDTH,
    }
}

/// Rendered width of `text` in points
pub fn text_width_pt(text: &str, font: BuiltinFont, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|ch| u32::from(char_width(font, ch))).sum();
    units as f32 * size_pt / 1000.0
}
