//! Query text normalization — tokenize, lowercase, light lemmatization.
//!
//! The classifier consumes this output; the slot extractors deliberately do
//! not (they need the raw query with its original casing). Normalization must
//! stay deterministic: the same input always yields the same string.

/// Normalize free text into a space-joined sequence of lowercased lemmas.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(|word| lemmatize(&word.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip common English inflection suffixes.
///
/// Deliberately conservative: only plural forms, and only on tokens long
/// enough that stripping cannot destroy the stem ("is", "this" stay intact).
fn lemmatize(token: &str) -> String {
    if token.len() > 4 && token.ends_with("ies") {
        let stem = &token[..token.len() - 3];
        return format!("{stem}y");
    }
    if token.len() > 4 && token.ends_with('s') && !token.ends_with("ss") && !token.ends_with("us") {
        return token[..token.len() - 1].to_string();
    }
    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_joins() {
        assert_eq!(normalize("I have a Fever"), "i have a fever");
    }

    #[test]
    fn strips_punctuation_edges() {
        assert_eq!(normalize("headache, fever!"), "headache fever");
    }

    #[test]
    fn plural_nouns_reduce_to_stem() {
        assert_eq!(normalize("hospitals"), "hospital");
        assert_eq!(normalize("warnings"), "warning");
        assert_eq!(normalize("allergies"), "allergy");
    }

    #[test]
    fn short_words_survive_untouched() {
        assert_eq!(normalize("is this his"), "is this his");
    }

    #[test]
    fn deterministic() {
        let a = normalize("Aches And Pains, again");
        let b = normalize("Aches And Pains, again");
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
