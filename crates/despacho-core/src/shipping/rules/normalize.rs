//! Case and diacritic insensitive text folding.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold text for comparison: decompose, drop combining marks, lowercase, trim.
///
/// `"  Teléfono "` becomes `"telefono"`.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    trim_text(&folded).to_string()
}

/// Trim whitespace and byte order marks from both ends.
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
