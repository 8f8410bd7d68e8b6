//! Case- and accent-insensitive text normalization for search.
//!
//! Text is lowercased, decomposed to NFD, and stripped of diacritics, so
//! `"Energía"` and `"ENERGIA"` both normalize to `"energia"`. Diacritics are
//! the combining marks plus the spacing accents that have no decomposition
//! (`´`, `` ` ``, `^`, `¨` and similar), matching the Unicode `Diacritic`
//! property for the scripts the catalog contains.
//!
//! ```rust
//! use research_catalog_core::normalize::normalize;
//!
//! assert_eq!(normalize("Ímpar"), "impar");
//! ```

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase `value` and remove diacritical marks.
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c) && !is_spacing_diacritic(*c))
        .collect()
}

/// Standalone accent characters: ASCII `^` and `` ` ``, Latin-1 spacing
/// accents, spacing modifier letters, Greek spacing accents, kana voicing
/// marks and their fullwidth forms.
fn is_spacing_diacritic(c: char) -> bool {
    matches!(
        c,
        '\u{005E}'
            | '\u{0060}'
            | '\u{00A8}'
            | '\u{00AF}'
            | '\u{00B4}'
            | '\u{00B7}'
            | '\u{00B8}'
            | '\u{02B0}'..='\u{02FF}'
            | '\u{0374}'..='\u{0375}'
            | '\u{037A}'
            | '\u{0384}'..='\u{0385}'
            | '\u{1FBD}'
            | '\u{1FBF}'..='\u{1FC1}'
            | '\u{1FCD}'..='\u{1FCF}'
            | '\u{1FDD}'..='\u{1FDF}'
            | '\u{1FED}'..='\u{1FEF}'
            | '\u{1FFD}'..='\u{1FFE}'
            | '\u{309B}'..='\u{309C}'
            | '\u{FF3E}'
            | '\u{FF40}'
            | '\u{FFE3}'
    )
}

/// [`normalize`] for an optional field; absent values become `""`.
pub fn normalize_opt(value: Option<&str>) -> String {
    value.map(normalize).unwrap_or_default()
}
