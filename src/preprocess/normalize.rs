//! Script-Aware Text Normalization
//!
//! Detects the dominant script of a query or product field and applies the
//! matching folding rules: tashkeel stripping and letter-variant folding for
//! Arabic, punctuation stripping and whitespace collapsing for Latin text.
//! Empty input yields empty output; nothing here can fail.

use unicode_normalization::UnicodeNormalization;

/// Dominant script of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Arabic,
    Latin,
}

/// Share of Arabic-range characters above which text is treated as
/// Arabic-dominant.
const ARABIC_DOMINANCE_RATIO: f32 = 0.3;

fn is_arabic_char(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' | '\u{08A0}'..='\u{08FF}'
    )
}

/// Classify text as Arabic-dominant or Latin/other.
pub fn detect_script(text: &str) -> Script {
    let total = text.chars().count();
    if total == 0 {
        return Script::Latin;
    }
    let arabic = text.chars().filter(|c| is_arabic_char(*c)).count();
    if arabic as f32 / total as f32 > ARABIC_DOMINANCE_RATIO {
        Script::Arabic
    } else {
        Script::Latin
    }
}

/// Strip tashkeel and fold Arabic letter variants to a canonical form.
///
/// Alef variants fold to bare alef, teh marbuta to heh, alef maqsura to yeh,
/// and hamza carriers to their base letters.
pub fn normalize_arabic(text: &str) -> String {
    let folded: String = text
        .nfc()
        .filter_map(|c| match c {
            // Combining diacritic marks and the superscript alef
            '\u{064B}'..='\u{065F}' | '\u{0670}' => None,
            'أ' | 'إ' | 'آ' => Some('ا'),
            'ة' => Some('ه'),
            'ى' => Some('ي'),
            'ؤ' => Some('و'),
            'ئ' => Some('ي'),
            _ => Some(c),
        })
        .collect();

    folded.trim().to_lowercase()
}

/// Lowercase, keep word characters, spaces and hyphens, collapse whitespace.
pub fn normalize_latin(text: &str) -> String {
    let lowered: String = text.nfc().collect::<String>().to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize text according to its dominant script.
pub fn normalize(text: &str) -> String {
    match detect_script(text) {
        Script::Arabic => normalize_arabic(text),
        Script::Latin => normalize_latin(text),
    }
}

/// Split normalized text on whitespace, dropping zero-length tokens.
/// Order and duplicates are preserved; term frequency depends on both.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_script_arabic() {
        assert_eq!(detect_script("هودي أسود"), Script::Arabic);
        assert_eq!(detect_script("hoodie"), Script::Latin);
        assert_eq!(detect_script(""), Script::Latin);
    }

    #[test]
    fn test_detect_script_mixed() {
        // Two Arabic characters out of many Latin ones stay below the ratio
        assert_eq!(detect_script("long english sentence مع"), Script::Latin);
        // Majority Arabic with one Latin word
        assert_eq!(detect_script("هودي قطن hoodie"), Script::Arabic);
    }

    #[test]
    fn test_normalize_arabic_folds_variants() {
        assert_eq!(normalize_arabic("أسود"), "اسود");
        assert_eq!(normalize_arabic("إمارات"), "امارات");
        assert_eq!(normalize_arabic("آلة"), "اله");
        assert_eq!(normalize_arabic("هودى"), "هودي");
        assert_eq!(normalize_arabic("لؤلؤ"), "لولو");
        assert_eq!(normalize_arabic("دافئ"), "دافي");
    }

    #[test]
    fn test_normalize_arabic_strips_tashkeel() {
        assert_eq!(normalize_arabic("مُحَمَّد"), "محمد");
    }

    #[test]
    fn test_normalize_arabic_idempotent() {
        let once = normalize_arabic("هودى أسود مُجَدَّد");
        assert_eq!(normalize_arabic(&once), once);
    }

    #[test]
    fn test_normalize_latin() {
        assert_eq!(normalize_latin("  Red   Hoodie!! "), "red hoodie");
        assert_eq!(normalize_latin("T-Shirt (XL)"), "t-shirt xl");
        assert_eq!(normalize_latin(""), "");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_tokenize_preserves_order_and_duplicates() {
        let tokens = tokenize("red hoodie red");
        assert_eq!(tokens, vec!["red", "hoodie", "red"]);
        assert!(tokenize("").is_empty());
    }
}
