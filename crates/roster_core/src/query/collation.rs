//! Base-sensitivity string collation.
//!
//! Strings get the same key when they differ only in letter case, in
//! combining diacritics (`"Émile"` sorts with `"emile"`), or in a stroked or
//! ligature letter that has no canonical decomposition (`"Øystein"` sorts
//! with `"oystein"`, `"Łukasz"` with `"lukasz"`).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds `value` to its base-sensitivity comparison key.
pub fn collation_key(value: &str) -> String {
    let mut key = String::with_capacity(value.len());
    for c in value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
    {
        match base_letters(c) {
            Some(base) => key.push_str(base),
            None => key.push(c),
        }
    }
    key
}

/// Case-insensitive substring test; an empty needle matches everything.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// Lower-case Latin letters that NFD leaves intact but root collation orders
// at primary strength with a plain base letter.
fn base_letters(c: char) -> Option<&'static str> {
    match c {
        'ø' => Some("o"),
        'ł' => Some("l"),
        'đ' | 'ð' => Some("d"),
        'ħ' => Some("h"),
        'ŧ' => Some("t"),
        'ı' => Some("i"),
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        'ß' => Some("ss"),
        'þ' => Some("th"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{collation_key, contains_folded};

    #[test]
    fn key_drops_case_and_accents() {
        assert_eq!(collation_key("Émile"), "emile");
        assert_eq!(collation_key("ZOË"), "zoe");
        assert_eq!(collation_key("İpek"), "ipek");
    }

    #[test]
    fn key_folds_letters_without_decomposition() {
        assert_eq!(collation_key("Øystein"), "oystein");
        assert_eq!(collation_key("Łukasz"), "lukasz");
        assert_eq!(collation_key("Đorđe"), "dorde");
        assert_eq!(collation_key("Ægir"), "aegir");
        assert_eq!(collation_key("Straße"), "strasse");
    }

    #[test]
    fn key_treats_case_variants_as_equal() {
        assert_eq!(collation_key("smith"), collation_key("SMITH"));
        assert!(collation_key("adams") < collation_key("Brown"));
    }

    #[test]
    fn contains_folded_matches_substrings_in_any_case() {
        assert!(contains_folded("Jane.Smith@Example.com", "SMITH"));
        assert!(contains_folded("anything", ""));
        assert!(!contains_folded("Doe", "smith"));
    }
}
