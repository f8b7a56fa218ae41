use crate::engine::config::{ReaderConfig, TimingConfig};
use crate::reading::analyzer::AnalysisResult;
use crate::reading::lexicon;
use crate::reading::token::{Collocation, Token};

/// Multiplier bounds applied to every display duration.
pub const MIN_MULTIPLIER: f64 = 0.5;
pub const MAX_MULTIPLIER: f64 = 3.5;

const CLOSING_MARKS: &[char] = &['"', '\'', ')', ']', '}', '”', '’', '»'];
const CLAUSE_MARKS: &[char] = &[',', ';', ':', '—', '–', '-'];

fn is_sentence_terminator(c: char) -> bool {
    c == '.' || c == '?' || c == '!'
}

fn is_clause_punctuation(c: char) -> bool {
    c == ',' || c == ';' || c == ':'
}

/// Strips closing quotes and brackets so `"done."` and `(done.)` end like `done.`.
fn trim_closers(word: &str) -> &str {
    word.trim_end_matches(CLOSING_MARKS)
}

/// Collects trailing punctuation characters (e.g. `['?', '!']` for `word?!`).
fn trailing_punctuation(word: &str) -> Vec<char> {
    let mut punctuation_chars: Vec<char> = trim_closers(word)
        .chars()
        .rev()
        .take_while(|&c| is_sentence_terminator(c) || is_clause_punctuation(c))
        .collect();

    // Reverse to maintain original order
    punctuation_chars.reverse();
    punctuation_chars
}

/// True when the word closes a sentence (ends in a run of `.`, `!` or `?`).
pub fn ends_sentence(word: &str) -> bool {
    trim_closers(word)
        .chars()
        .last()
        .map_or(false, is_sentence_terminator)
}

/// True when the word carries a clause-boundary mark anywhere in it.
pub fn has_clause_boundary(word: &str) -> bool {
    word.contains(CLAUSE_MARKS)
}

/// Keeps alphanumerics, apostrophes and hyphens, preserving case.
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '’' || *c == '-')
        .collect()
}

/// Lowercased `clean_word`, the key used for every dictionary and memory lookup.
pub fn normalize_word(word: &str) -> String {
    clean_word(word).to_lowercase()
}

/// Lowercase, alphanumerics only; the form collocation phrases are matched on.
fn phrase_key(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_abbreviation(word: &str) -> bool {
    const ABBREVIATIONS: &[&str] = &[
        "Dr.", "Mr.", "Mrs.", "Ms.", "St.", "Jr.", "e.g.", "i.e.", "vs.", "etc.", "cm.",
    ];
    ABBREVIATIONS.contains(&word)
}

fn is_decimal_number(word: &str) -> bool {
    let parts: Vec<&str> = word.split('.').collect();
    if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        let has_digit_before = parts[0].chars().all(|c| c.is_ascii_digit());
        let has_digit_after = parts[1].chars().all(|c| c.is_ascii_digit());
        has_digit_before && has_digit_after
    } else {
        false
    }
}

pub fn wpm_to_milliseconds(wpm: u32) -> u64 {
    (60_000.0 / wpm.max(1) as f64).round() as u64
}

/// `60000 / wpm × multiplier`, with the multiplier clamped into its legal range.
pub fn display_duration_ms(wpm: u32, multiplier: f64) -> u64 {
    let base_delay = 60_000.0 / wpm.max(1) as f64;
    (base_delay * multiplier.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)).round() as u64
}

/// Detects if current word starts a new sentence based on the previous word.
///
/// Period/question/exclamation followed by an uppercase letter. The first word
/// always starts a sentence. Abbreviations (Dr., Mr., ...) and decimal numbers
/// (3.14) do not end sentences.
pub fn detect_sentence_boundary(prev_word: Option<&str>, current_word: &str) -> bool {
    let prev = match prev_word {
        Some(prev) => prev,
        None => return true,
    };

    if !ends_sentence(prev) {
        return false;
    }

    let prev = trim_closers(prev);
    if is_abbreviation(prev) || is_decimal_number(prev) {
        return false;
    }

    current_word
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

/// Splits text into paragraphs on blank lines, each paragraph into its words.
fn split_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.extend(line.split_whitespace());
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

fn detect_collocation(words: &[&str], keys: &[String], start: usize) -> Option<Collocation> {
    lexicon::find_collocation(&keys[start..]).map(|phrase| Collocation {
        words: words[start..start + phrase.len()]
            .iter()
            .map(|w| w.to_string())
            .collect(),
    })
}

/// Tokenizes raw text into positional tokens.
///
/// Paragraphs are separated by blank lines; words by any whitespace run.
/// Collocations never span a paragraph break.
pub fn tokenize_text(text: &str) -> Vec<Token> {
    let paragraphs = split_paragraphs(text);
    let total: usize = paragraphs.iter().map(Vec::len).sum();
    let mut tokens: Vec<Token> = Vec::with_capacity(total);

    for (paragraph_index, words) in paragraphs.iter().enumerate() {
        let keys: Vec<String> = words.iter().map(|w| phrase_key(w)).collect();

        for (position, word) in words.iter().enumerate() {
            let prev_word = if position == 0 {
                None
            } else {
                tokens.last().map(|t| t.text.as_str())
            };
            let is_sentence_start = detect_sentence_boundary(prev_word, word);
            let global_index = tokens.len();

            tokens.push(Token {
                text: word.to_string(),
                global_index,
                paragraph_index,
                position_in_paragraph: position,
                is_last_in_paragraph: position + 1 == words.len(),
                is_last_overall: global_index + 1 == total,
                is_sentence_start,
                collocation: detect_collocation(words, &keys, position),
            });
        }
    }

    tokens
}

fn get_punctuation_multiplier(punctuation: char, config: &TimingConfig) -> f64 {
    match punctuation {
        '.' => config.period_multiplier,
        '?' => config.question_multiplier,
        '!' => config.exclamation_multiplier,
        ',' | ';' | ':' => config.comma_multiplier,
        _ => 1.0,
    }
}

fn get_max_punctuation_multiplier(punctuation_list: &[char], config: &TimingConfig) -> f64 {
    punctuation_list
        .iter()
        .map(|&p| get_punctuation_multiplier(p, config))
        .fold(1.0, f64::max)
}

fn get_word_length_penalty(word: &str, config: &TimingConfig) -> f64 {
    if clean_word(word).chars().count() > config.long_word_threshold {
        config.long_word_penalty
    } else {
        1.0
    }
}

/// Fixed punctuation/length multiplier used when adaptive mode is off.
///
/// Stacked punctuation applies the maximum multiplier only. A sentence that
/// closes a paragraph gets the paragraph multiplier instead.
pub fn fixed_multiplier(token: &Token, config: &ReaderConfig) -> f64 {
    let timing = &config.timing;
    let mut multiplier = 1.0;

    if config.pause_at_punctuation {
        multiplier = if token.is_last_in_paragraph && ends_sentence(&token.text) {
            timing.paragraph_multiplier
        } else {
            get_max_punctuation_multiplier(&trailing_punctuation(&token.text), timing)
        };
    }

    if config.extra_time_for_long_words {
        multiplier *= get_word_length_penalty(&token.text, timing);
    }

    multiplier
}

/// Selects where a word's display multiplier comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationStrategy {
    /// The analyzer's memory-, mode- and fatigue-sensitive multiplier.
    Adaptive,
    /// Punctuation and length only.
    Fixed,
}

impl DurationStrategy {
    pub fn for_config(config: &ReaderConfig) -> Self {
        if config.adaptive_mode {
            DurationStrategy::Adaptive
        } else {
            DurationStrategy::Fixed
        }
    }

    pub fn multiplier(self, token: &Token, analysis: &AnalysisResult, config: &ReaderConfig) -> f64 {
        match self {
            DurationStrategy::Adaptive => analysis.multiplier,
            DurationStrategy::Fixed => fixed_multiplier(token, config),
        }
    }

    pub fn duration_ms(self, token: &Token, analysis: &AnalysisResult, config: &ReaderConfig) -> u64 {
        display_duration_ms(config.wpm, self.multiplier(token, analysis, config))
    }
}
