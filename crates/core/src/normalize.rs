//! Text normalization shared by the catalog and request text.
//!
//! Catalog phrases and user input go through the same function, so matching is case- and
//! punctuation-insensitive. There is no stemming and no fuzzy matching.

/// Lower-case `text`, turn punctuation into spaces and collapse runs of whitespace.
///
/// The result never has leading or trailing whitespace.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    out
}

/// Returns true if the normalized `phrase` occurs in the normalized `text`.
///
/// Both arguments must already be normalized. Multi-word phrases match only as contiguous
/// runs because normalization leaves exactly one space between words.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    !phrase.is_empty() && text.contains(phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize("  Severe   HEADACHE\tand\nNausea "), "severe headache and nausea");
    }

    #[test]
    fn punctuation_becomes_word_break() {
        assert_eq!(normalize("chest-pain, (difficulty) breathing!"), "chest pain difficulty breathing");
        assert_eq!(normalize("can't sleep"), "can t sleep");
    }

    #[test]
    fn empty_and_punctuation_only_inputs_normalize_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  ...!!  "), "");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(normalize("Fever for 3 DAYS"), "fever for 3 days");
    }

    #[test]
    fn phrase_matching_requires_contiguous_words() {
        let text = normalize("I have pain in my chest");
        assert!(!contains_phrase(&text, "chest pain"));
        assert!(contains_phrase(&normalize("Chest... PAIN since noon"), "chest pain"));
    }

    #[test]
    fn empty_phrase_never_matches() {
        assert!(!contains_phrase("anything", ""));
    }
}
