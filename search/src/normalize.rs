//! Query tokenizing and the text folding shared by queries and records.

use serde::Serialize;
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// One normalized unit of a free-text query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Folds text for accent- and case-insensitive comparison.
///
/// Lower-cases, decomposes canonically, drops combining marks and spells `ß`
/// as `ss`. Both sides of a comparison must go through this function.
pub fn fold(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut folded = String::with_capacity(lowered.len());
    for c in lowered.nfd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'ß' => folded.push_str("ss"),
            c => folded.push(c),
        }
    }
    folded
}

/// Splits a query on whitespace and folds every token.
///
/// Empty tokens are dropped; duplicates are kept.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(fold)
        .filter(|token| !token.is_empty())
        .map(Token)
        .collect()
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns true if `word` occurs in `haystack` as a whole word.
///
/// An edge of `word` that is a word character must not touch another word
/// character in `haystack`; edges that are punctuation match anywhere. Both
/// arguments are expected to be folded already.
pub fn contains_word(haystack: &str, word: &str) -> bool {
    let (Some(first), Some(last)) = (word.chars().next(), word.chars().next_back()) else {
        return true;
    };
    let bound_start = is_word_char(first);
    let bound_end = is_word_char(last);

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(word) {
        let start = from + offset;
        let end = start + word.len();

        let start_ok = !bound_start
            || haystack[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !is_word_char(c));
        let end_ok = !bound_end || haystack[end..].chars().next().is_none_or(|c| !is_word_char(c));
        if start_ok && end_ok {
            return true;
        }

        // Overlapping occurrences can still be bounded.
        from = start + first.len_utf8();
    }
    false
}

/// Every token must be a whole word of `code` or of `keywords`.
pub(crate) fn text_matches(tokens: &[Token], code: &str, keywords: &str) -> bool {
    tokens
        .iter()
        .all(|token| contains_word(code, token.as_str()) || contains_word(keywords, token.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod fold {
        use super::*;

        #[test]
        fn test_lowercases() {
            assert_eq!(fold("RESET Tür"), "reset tur");
        }

        #[test]
        fn test_strips_umlauts_and_accents() {
            assert_eq!(fold("Türöffner"), "turoffner");
            assert_eq!(fold("café"), "cafe");
        }

        #[test]
        fn test_sharp_s_folds_to_double_s() {
            assert_eq!(fold("schließen"), "schliessen");
            assert_eq!(fold("SCHLIEẞEN"), "schliessen");
            assert_eq!(fold("schliessen"), "schliessen");
        }

        #[test]
        fn test_precomposed_and_decomposed_agree() {
            assert_eq!(fold("T\u{fc}r"), fold("Tu\u{308}r"));
        }
    }

    mod tokenize {
        use super::*;

        fn strs(tokens: &[Token]) -> Vec<&str> {
            tokens.iter().map(Token::as_str).collect()
        }

        #[test]
        fn test_splits_on_whitespace_runs() {
            let tokens = tokenize("  reset \t Tür\n\nzu ");
            assert_eq!(strs(&tokens), ["reset", "tur", "zu"]);
        }

        #[test]
        fn test_blank_query_has_no_tokens() {
            assert!(tokenize("").is_empty());
            assert!(tokenize("   \t").is_empty());
        }

        #[test]
        fn test_keeps_duplicates() {
            assert_eq!(strs(&tokenize("e1 E1")), ["e1", "e1"]);
        }
    }

    mod contains_word {
        use super::*;

        #[test]
        fn test_whole_word_only() {
            assert!(contains_word("e 15", "15"));
            assert!(!contains_word("e115", "15"));
            assert!(!contains_word("115", "15"));
            assert!(!contains_word("resetdoor", "reset"));
        }

        #[test]
        fn test_punctuation_is_a_boundary() {
            assert!(contains_word("reset,door", "reset"));
            assert!(contains_word("(e01)", "e01"));
            assert!(contains_word("door-reset", "reset"));
        }

        #[test]
        fn test_underscore_is_a_word_character() {
            assert!(!contains_word("reset_door", "reset"));
        }

        #[test]
        fn test_token_with_inner_punctuation() {
            assert!(contains_word("code e-01 active", "e-01"));
            assert!(!contains_word("xe-01", "e-01"));
        }

        #[test]
        fn test_overlapping_occurrence_is_found() {
            assert!(contains_word("xa-a-a", "a-a"));
        }

        #[test]
        fn test_non_ascii_letters_are_word_characters() {
            assert!(!contains_word("fuβ", "fu"));
            assert!(contains_word("fu β", "fu"));
        }
    }

    mod text_matches {
        use super::*;

        #[test]
        fn test_and_across_tokens_or_across_fields() {
            let tokens = tokenize("reset door");
            assert!(text_matches(&tokens, "reset", "door"));
            assert!(text_matches(&tokens, "", "door reset"));
            assert!(!text_matches(&tokens, "reset", "gate"));
        }

        #[test]
        fn test_empty_tokens_match_everything() {
            assert!(text_matches(&[], "", ""));
        }

        #[test]
        fn test_empty_fields_never_match_a_token() {
            assert!(!text_matches(&tokenize("e01"), "", ""));
        }
    }
}
