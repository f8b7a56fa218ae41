//! ORP (Optimal Recognition Point) focus calculation
//!
//! Words are horizontally shifted so that the focus letter remains at a fixed
//! column. The focus index is chosen on the alphanumeric ("clean") form of the
//! word and mapped back onto the original text, so punctuation never counts
//! toward the index but is preserved in the prefix or suffix:
//! - clean length 0 or 1 → the whole word is the focus
//! - 2 → second letter
//! - 3-4 → 2nd letter
//! - 5-8 → 3rd letter
//! - 9-12 → 4th letter
//! - 13+ → length / 4
//!
//! An extra cognitive offset (from the analyzer) shifts the focus right for
//! long words and is clamped to the clean word.

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusSplit {
    pub prefix: String,
    pub focus: String,
    pub suffix: String,
}

impl FocusSplit {
    /// Number of graphemes before the focus letter.
    pub fn anchor_index(&self) -> usize {
        self.prefix.graphemes(true).count()
    }
}

fn is_alphanumeric_grapheme(grapheme: &str) -> bool {
    grapheme.chars().next().map_or(false, char::is_alphanumeric)
}

fn base_focus_index(clean_length: usize) -> usize {
    match clean_length {
        0..=4 => 1,
        5..=8 => 2,
        9..=12 => 3,
        _ => clean_length / 4,
    }
}

/// Splits `word` into prefix / focus / suffix.
pub fn compute_focus(word: &str, orp_offset: i32) -> FocusSplit {
    let graphemes: Vec<&str> = word.graphemes(true).collect();
    let clean_length = graphemes
        .iter()
        .filter(|g| is_alphanumeric_grapheme(g))
        .count();

    if clean_length <= 1 {
        return FocusSplit {
            prefix: String::new(),
            focus: word.to_string(),
            suffix: String::new(),
        };
    }

    let clean_index = if clean_length == 2 {
        1
    } else {
        let shifted = base_focus_index(clean_length) as i64 + orp_offset as i64;
        shifted.clamp(0, clean_length as i64 - 1) as usize
    };

    // Walk the original graphemes, counting only alphanumeric ones.
    let position = graphemes
        .iter()
        .enumerate()
        .filter(|(_, g)| is_alphanumeric_grapheme(g))
        .nth(clean_index)
        .map(|(i, _)| i)
        .unwrap_or(0);

    FocusSplit {
        prefix: graphemes[..position].concat(),
        focus: graphemes[position].to_string(),
        suffix: graphemes[position + 1..].concat(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(word: &str, offset: i32) -> (String, String, String) {
        let s = compute_focus(word, offset);
        (s.prefix, s.focus, s.suffix)
    }

    #[test]
    fn test_compute_focus_single_char() {
        assert_eq!(split("I", 0), ("".into(), "I".into(), "".into()));
    }

    #[test]
    fn test_compute_focus_empty_string() {
        assert_eq!(split("", 0), ("".into(), "".into(), "".into()));
    }

    #[test]
    fn test_compute_focus_punctuation_only_is_whole_focus() {
        assert_eq!(split("—", 0), ("".into(), "—".into(), "".into()));
        assert_eq!(split("a.", 2), ("".into(), "a.".into(), "".into()));
    }

    #[test]
    fn test_compute_focus_two_chars() {
        assert_eq!(split("am", 0), ("a".into(), "m".into(), "".into()));
        // Offset has no effect on two-letter words
        assert_eq!(split("am", 2), ("a".into(), "m".into(), "".into()));
    }

    #[test]
    fn test_compute_focus_short_words() {
        assert_eq!(split("the", 0), ("t".into(), "h".into(), "e".into()));
        assert_eq!(split("word", 0), ("w".into(), "o".into(), "rd".into()));
    }

    #[test]
    fn test_compute_focus_medium_words() {
        assert_eq!(split("hello", 0), ("he".into(), "l".into(), "lo".into()));
        assert_eq!(split("sentence", 0), ("se".into(), "n".into(), "tence".into()));
    }

    #[test]
    fn test_compute_focus_long_words() {
        assert_eq!(split("government", 0).1, "e");
        assert_eq!(compute_focus("government", 0).anchor_index(), 3);
    }

    #[test]
    fn test_compute_focus_very_long_word_uses_quarter() {
        // 28 letters → index 7
        let s = compute_focus("Antidisestablishmentarianism", 0);
        assert_eq!(s.anchor_index(), 7);
    }

    #[test]
    fn test_compute_focus_skips_leading_punctuation() {
        assert_eq!(split("\"hello,\"", 0), ("\"he".into(), "l".into(), "lo,\"".into()));
    }

    #[test]
    fn test_compute_focus_offset_shifts_right() {
        assert_eq!(compute_focus("government", 1).anchor_index(), 4);
        assert_eq!(compute_focus("government", 2).anchor_index(), 5);
    }

    #[test]
    fn test_compute_focus_offset_is_clamped() {
        assert_eq!(split("cat", 10), ("ca".into(), "t".into(), "".into()));
        assert_eq!(split("cat", -10), ("".into(), "c".into(), "at".into()));
    }

    #[test]
    fn test_compute_focus_reassembles_word() {
        for word in ["don't", "e-mail", "(parenthetical)", "naïve", "x86_64"] {
            let s = compute_focus(word, 1);
            assert_eq!(format!("{}{}{}", s.prefix, s.focus, s.suffix), word);
        }
    }
}
