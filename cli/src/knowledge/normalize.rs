//! # Text Normalization
//!
//! File: cli/src/knowledge/normalize.rs
//!
//! Normalization applied to stored questions and to user queries before they
//! are embedded, so both sides of a comparison look alike.

/// Punctuation that survives normalization. Everything else that is not
/// alphanumeric or whitespace becomes a space.
pub const SAFE_PUNCTUATION: &[char] = &['?', '!', '.', ',', '\'', '-'];

/// Lower-cases `text`, replaces unsafe punctuation with spaces and collapses
/// whitespace runs into single spaces.
///
/// ```
/// use moodchat::knowledge::normalize_text;
///
/// assert_eq!(normalize_text("  How ARE   you?? "), "how are you??");
/// assert_eq!(normalize_text("C++ / Rust"), "c rust");
/// ```
pub fn normalize_text(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || SAFE_PUNCTUATION.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize_text("Hello\t  World \n"), "hello world");
    }

    #[test]
    fn keeps_safe_punctuation() {
        assert_eq!(normalize_text("What's up, doc?!"), "what's up, doc?!");
        assert_eq!(normalize_text("well-known."), "well-known.");
    }

    #[test]
    fn replaces_other_punctuation_with_space() {
        assert_eq!(normalize_text("a|b#c(d)"), "a b c d");
        assert_eq!(normalize_text("\"quoted\""), "quoted");
    }

    #[test]
    fn empty_and_symbol_only_input_normalizes_to_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("  @#$  "), "");
    }
}
