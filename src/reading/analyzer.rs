//! Rule-based linguistic scoring.
//!
//! Every word is run through a fixed pipeline of multiplicative factors
//! (punctuation, length, frequency, semantic role, token type, concept
//! novelty, reading mode, fatigue). The analyzer owns the session memory that
//! makes the novelty step adaptive: first occurrences of content words are
//! slowed down and recent repeats are sped up.

use crate::engine::config::ReadingMode;
use crate::reading::lexicon;
use crate::reading::timing::{
    clean_word, ends_sentence, has_clause_boundary, normalize_word, MAX_MULTIPLIER, MIN_MULTIPLIER,
};
use crate::reading::token::Token;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Capacity of the recent-word window.
pub const RECENT_WINDOW: usize = 25;

/// Normalized words longer than this are tracked as concepts.
pub const CONTENT_WORD_MIN_EXCLUSIVE: usize = 4;

const SYMBOL_CHARS: &[char] = &['@', '#', '$', '%', '&', '*', '+', '=', '<', '>'];

/// Tag recorded for every pipeline step that fired on a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    ParagraphEnd,
    SentenceEnd,
    ClauseBoundary,
    ShortWord,
    LongWord,
    VeryLongWord,
    HighFrequency,
    Transition,
    Subordinator,
    Numeric,
    MixedCase,
    Acronym,
    Symbol,
    Hyphenated,
    FirstOccurrence,
    RecentRepeat,
    FatigueAdjusted,
}

impl Factor {
    /// Multiplicative weight applied when the factor fires.
    pub fn weight(self) -> f64 {
        match self {
            Factor::ParagraphEnd => 2.5,
            Factor::SentenceEnd => 2.0,
            Factor::ClauseBoundary => 1.4,
            Factor::ShortWord => 0.8,
            Factor::LongWord => 1.2,
            Factor::VeryLongWord => 1.4,
            Factor::HighFrequency => 0.85,
            Factor::Transition => 1.2,
            Factor::Subordinator => 1.1,
            Factor::Numeric => 1.3,
            Factor::MixedCase => 1.2,
            Factor::Acronym => 1.2,
            Factor::Symbol => 1.2,
            Factor::Hyphenated => 1.1,
            Factor::FirstOccurrence => 1.15,
            Factor::RecentRepeat => 0.9,
            // Fatigue scaling is continuous; the tag only marks it as significant.
            Factor::FatigueAdjusted => 1.0,
        }
    }

    /// Factors that feed the mode's complexity boost.
    pub fn is_complexity(self) -> bool {
        matches!(
            self,
            Factor::LongWord
                | Factor::VeryLongWord
                | Factor::FirstOccurrence
                | Factor::Numeric
                | Factor::MixedCase
        )
    }

    pub fn tag(self) -> &'static str {
        match self {
            Factor::ParagraphEnd => "paragraph-end",
            Factor::SentenceEnd => "sentence-end",
            Factor::ClauseBoundary => "clause-boundary",
            Factor::ShortWord => "short-word",
            Factor::LongWord => "long-word",
            Factor::VeryLongWord => "very-long-word",
            Factor::HighFrequency => "high-frequency",
            Factor::Transition => "transition",
            Factor::Subordinator => "subordinator",
            Factor::Numeric => "numeric",
            Factor::MixedCase => "mixed-case",
            Factor::Acronym => "acronym",
            Factor::Symbol => "symbol",
            Factor::Hyphenated => "hyphenated",
            Factor::FirstOccurrence => "first-occurrence",
            Factor::RecentRepeat => "recent-repeat",
            Factor::FatigueAdjusted => "fatigue-adjusted",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Score for one visit of one token.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub source_text: String,
    pub display_text: String,
    /// Always within `[0.5, 3.5]`.
    pub multiplier: f64,
    /// Fired factors in pipeline order.
    pub factors: Vec<Factor>,
    /// Extra ORP shift for long words.
    pub orp_offset: i32,
}

impl AnalysisResult {
    pub fn has(&self, factor: Factor) -> bool {
        self.factors.contains(&factor)
    }
}

/// Concept and recency tables for one loaded document.
#[derive(Debug, Clone, Default)]
pub struct SessionMemory {
    concept_counts: HashMap<String, u32>,
    recent_window: VecDeque<String>,
}

impl SessionMemory {
    pub fn concept_count(&self, normalized: &str) -> u32 {
        self.concept_counts.get(normalized).copied().unwrap_or(0)
    }

    pub fn concept_total(&self) -> usize {
        self.concept_counts.len()
    }

    pub fn recent_words(&self) -> impl Iterator<Item = &str> {
        self.recent_window.iter().map(String::as_str)
    }

    pub fn recent_len(&self) -> usize {
        self.recent_window.len()
    }

    fn is_recent(&self, normalized: &str) -> bool {
        self.recent_window.iter().any(|w| w == normalized)
    }

    fn remember_recent(&mut self, normalized: String) {
        if self.recent_window.len() == RECENT_WINDOW {
            self.recent_window.pop_front();
        }
        self.recent_window.push_back(normalized);
    }

    pub fn clear(&mut self) {
        self.concept_counts.clear();
        self.recent_window.clear();
    }
}

/// Upper/lower case interleaved beyond a leading capital (`iPhone`, `McDonald`).
fn is_mixed_case(clean: &str) -> bool {
    let has_lower = clean.chars().any(char::is_lowercase);
    let inner_upper = clean
        .chars()
        .filter(|c| c.is_alphabetic())
        .skip(1)
        .any(char::is_uppercase);
    has_lower && inner_upper
}

fn is_acronym(clean: &str) -> bool {
    clean.chars().count() >= 2
        && clean.chars().any(char::is_alphabetic)
        && clean
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

/// Stateful scorer; one per playback engine.
#[derive(Debug, Clone, Default)]
pub struct LinguisticAnalyzer {
    memory: SessionMemory,
    mode: ReadingMode,
}

impl LinguisticAnalyzer {
    pub fn new(mode: ReadingMode) -> Self {
        Self {
            memory: SessionMemory::default(),
            mode,
        }
    }

    pub fn mode(&self) -> ReadingMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ReadingMode) {
        self.mode = mode;
    }

    pub fn memory(&self) -> &SessionMemory {
        &self.memory
    }

    /// Forgets every concept and recent word; the mode is kept.
    pub fn reset(&mut self) {
        self.memory.clear();
    }

    /// Scores `token` against a scratch copy of the memory, leaving the
    /// session untouched.
    pub fn preview(&self, token: &Token, fatigue_level: f64) -> AnalysisResult {
        self.clone().analyze(token, fatigue_level)
    }

    /// Scores `token` and updates session memory.
    pub fn analyze(&mut self, token: &Token, fatigue_level: f64) -> AnalysisResult {
        let text = token.text.as_str();
        let clean = clean_word(text);
        let normalized = normalize_word(text);
        let mut factors = Vec::new();
        let mut orp_offset = 0;

        // Punctuation
        if ends_sentence(text) {
            factors.push(if token.is_last_in_paragraph {
                Factor::ParagraphEnd
            } else {
                Factor::SentenceEnd
            });
        } else if has_clause_boundary(text) {
            factors.push(Factor::ClauseBoundary);
        }

        // Length
        match clean.chars().count() {
            0..=3 => factors.push(Factor::ShortWord),
            4..=7 => {}
            8..=11 => {
                factors.push(Factor::LongWord);
                orp_offset = 1;
            }
            _ => {
                factors.push(Factor::VeryLongWord);
                orp_offset = 2;
            }
        }

        // Frequency
        let high_frequency = lexicon::is_high_frequency(&normalized);
        if high_frequency {
            factors.push(Factor::HighFrequency);
        }

        // Semantic role
        if lexicon::is_transition(&normalized) {
            factors.push(Factor::Transition);
        }
        if lexicon::is_subordinator(&normalized) {
            factors.push(Factor::Subordinator);
        }

        // Token type
        if text.chars().any(char::is_numeric) {
            factors.push(Factor::Numeric);
        }
        if is_mixed_case(&clean) {
            factors.push(Factor::MixedCase);
        }
        if is_acronym(&clean) {
            factors.push(Factor::Acronym);
        }
        if text.contains(SYMBOL_CHARS) {
            factors.push(Factor::Symbol);
        }
        if text.contains('-') && text.chars().count() > 3 {
            factors.push(Factor::Hyphenated);
        }

        // Concept novelty
        if normalized.chars().count() > CONTENT_WORD_MIN_EXCLUSIVE {
            if !high_frequency && !self.memory.concept_counts.contains_key(&normalized) {
                factors.push(Factor::FirstOccurrence);
                self.memory.concept_counts.insert(normalized.clone(), 1);
            } else if self.memory.is_recent(&normalized) {
                factors.push(Factor::RecentRepeat);
                if let Some(count) = self.memory.concept_counts.get_mut(&normalized) {
                    *count += 1;
                }
            }
            self.memory.remember_recent(normalized);
        }

        let mut multiplier: f64 = factors.iter().map(|f| f.weight()).product();

        // Mode
        multiplier *= self.mode.base_multiplier();
        let complexity = factors.iter().filter(|f| f.is_complexity()).count();
        if complexity > 0 {
            multiplier *= 1.0 + (self.mode.complexity_weight() - 1.0) * 0.1 * complexity as f64;
        }

        // Fatigue
        if fatigue_level > 0.0 {
            multiplier *= 1.0 + fatigue_level * 0.3;
            if fatigue_level > 0.3 {
                factors.push(Factor::FatigueAdjusted);
            }
        }

        AnalysisResult {
            source_text: token.text.clone(),
            display_text: token.text.clone(),
            multiplier: multiplier.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER),
            factors,
            orp_offset,
        }
    }
}
