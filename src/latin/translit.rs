//! ASCII transliteration of Latin text.
//!
//! Players type on keyboards without macrons, so every surface form is also
//! registered and compared in its stripped form (`gladiī` → `gladii`).

/// Combining macron (U+0304).
const COMBINING_MACRON: char = '\u{0304}';
/// Combining breve (U+0306).
const COMBINING_BREVE: char = '\u{0306}';
/// Combining diaeresis (U+0308).
const COMBINING_DIAERESIS: char = '\u{0308}';

/// Map a single character to its unmarked form.
#[must_use]
pub const fn strip_mark(c: char) -> char {
    match c {
        'ā' | 'ă' | 'ä' => 'a',
        'ē' | 'ĕ' | 'ë' => 'e',
        'ī' | 'ĭ' | 'ï' => 'i',
        'ō' | 'ŏ' | 'ö' => 'o',
        'ū' | 'ŭ' | 'ü' => 'u',
        'ȳ' | 'ÿ' => 'y',
        'Ā' | 'Ă' | 'Ä' => 'A',
        'Ē' | 'Ĕ' | 'Ë' => 'E',
        'Ī' | 'Ĭ' | 'Ï' => 'I',
        'Ō' | 'Ŏ' | 'Ö' => 'O',
        'Ū' | 'Ŭ' | 'Ü' => 'U',
        'Ȳ' => 'Y',
        other => other,
    }
}

/// Strip macrons, breves and diaereses from `text`.
#[must_use]
pub fn transliterate(text: &str) -> String {
    text.chars()
        .filter(|&c| !matches!(c, COMBINING_MACRON | COMBINING_BREVE | COMBINING_DIAERESIS))
        .map(strip_mark)
        .collect()
}

/// Case-folded, transliterated form used for comparisons.
#[must_use]
pub fn fold(text: &str) -> String {
    transliterate(text.trim()).to_lowercase()
}

/// Whether the text carries any marks that transliteration would remove.
#[must_use]
pub fn has_marks(text: &str) -> bool {
    text.chars().any(|c| strip_mark(c) != c || matches!(c, COMBINING_MACRON | COMBINING_BREVE))
}

/// Drop the last `count` characters (not bytes) from `word`.
#[must_use]
pub fn drop_chars(word: &str, count: usize) -> &str {
    if count == 0 {
        return word;
    }
    match word.char_indices().rev().nth(count - 1) {
        Some((index, _)) => &word[..index],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliterate_precomposed() {
        assert_eq!(transliterate("gladiī"), "gladii");
        assert_eq!(transliterate("Iūlia"), "Iulia");
        assert_eq!(transliterate("pōne"), "pone");
        assert_eq!(transliterate("lūmen"), "lumen");
    }

    #[test]
    fn test_transliterate_combining() {
        assert_eq!(transliterate("ga\u{0304}"), "ga");
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("  Gladiī "), "gladii");
    }

    #[test]
    fn test_has_marks() {
        assert!(has_marks("rēs"));
        assert!(!has_marks("res"));
    }

    #[test]
    fn test_drop_chars_counts_characters() {
        assert_eq!(drop_chars("gladiī", 1), "gladi");
        assert_eq!(drop_chars("ūs", 2), "");
        assert_eq!(drop_chars("a", 5), "");
        assert_eq!(drop_chars("abc", 0), "abc");
        assert_eq!(drop_chars("Iūlius", 2), "Iūli");
    }
}
