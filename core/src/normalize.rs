use convert_case::{Case, Casing};
use itertools::Itertools;
use serde::Deserialize;

/// Casing applied to every key written into the token tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCase {
    /// First word lower-cased, later words get an upper-case initial.
    #[default]
    Camel,
    Pascal,
    Snake,
    Kebab,
    Flat,
}

/// Turns a human-readable name into a camelCase key.
///
/// Every character outside `[A-Za-z0-9]` separates words. The first piece
/// of the split is lower-cased, each following word has its first character
/// upper-cased and keeps the rest as written. A leading separator makes the
/// first piece empty, so `_Base` becomes `Base`. Names without any
/// alphanumeric content normalize to the empty string.
pub fn normalize(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    for (index, word) in words(raw).enumerate() {
        if index == 0 {
            key.push_str(&word.to_ascii_lowercase());
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            key.push(first.to_ascii_uppercase());
            key.push_str(chars.as_str());
        }
    }
    key
}

/// Normalizes `raw` with an explicit casing, optionally folding non-ASCII
/// letters to ASCII first.
pub fn normalize_with(raw: &str, case: KeyCase, transliterate: bool) -> String {
    let folded;
    let raw = if transliterate {
        folded = deunicode::deunicode(raw);
        folded.as_str()
    } else {
        raw
    };
    let target = match case {
        KeyCase::Camel => return normalize(raw),
        KeyCase::Pascal => Case::Pascal,
        KeyCase::Snake => Case::Snake,
        KeyCase::Kebab => Case::Kebab,
        KeyCase::Flat => Case::Flat,
    };
    let key = words(raw).filter(|word| !word.is_empty()).join(" ").to_case(target);
    key
}

fn words(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| !c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn camel_cases_words() {
        assert_eq!(normalize("Primary Color-500"), "primaryColor500");
        assert_eq!(normalize("Reference Colors"), "referenceColors");
        assert_eq!(normalize("neutral"), "neutral");
        assert_eq!(normalize("50"), "50");
        assert_eq!(normalize("Brand XL"), "brandXL");
        assert_eq!(normalize("test-1"), "test1");
    }

    #[test]
    fn first_word_is_fully_lowercased() {
        assert_eq!(normalize("HEADING large"), "headingLarge");
        assert_eq!(normalize("surface onDark"), "surfaceOnDark");
    }

    #[test]
    fn empty_and_symbol_only_names() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" / -- ! "), "");
    }

    #[test]
    fn leading_separators_keep_the_first_word_capitalized() {
        assert_eq!(normalize("_Base"), "Base");
        assert_eq!(normalize(".hidden token"), "HiddenToken");
        assert_eq!(normalize("  Brand"), "Brand");
        assert_eq!(normalize("Brand  Large"), "brandLarge");
        assert_eq!(normalize_with("_Base", KeyCase::Kebab, false), "base");
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        assert_eq!(normalize("Café crème"), "cafCrMe");
        assert_eq!(normalize_with("Café crème", KeyCase::Camel, true), "cafeCreme");
    }

    #[test]
    fn alternative_casings() {
        assert_eq!(normalize_with("Primary Color", KeyCase::Snake, false), "primary_color");
        assert_eq!(normalize_with("Primary Color", KeyCase::Kebab, false), "primary-color");
        assert_eq!(normalize_with("primary color", KeyCase::Pascal, false), "PrimaryColor");
        assert_eq!(normalize_with("Primary Color", KeyCase::Flat, false), "primarycolor");
        assert_eq!(normalize_with("", KeyCase::Snake, false), "");
    }

    proptest! {
        #[test]
        fn keys_are_ascii_alphanumeric(raw in "\\PC*") {
            let key = normalize(&raw);
            prop_assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        }

        #[test]
        fn separator_choice_does_not_matter(words in proptest::collection::vec("[a-zA-Z0-9]{1,8}", 1..5)) {
            prop_assert_eq!(normalize(&words.join(" ")), normalize(&words.join("-/_")));
        }
    }
}
