// Configuration for the cadence engine and its reading modes

use crate::engine::error::EngineError;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Minimum and maximum allowed WPM
pub const WPM_RANGE: RangeInclusive<u32> = 50..=1500;

pub fn clamp_wpm(wpm: u32) -> u32 {
    wpm.clamp(*WPM_RANGE.start(), *WPM_RANGE.end())
}

/// Named preset scaling both baseline speed and sensitivity to complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingMode {
    Scan,
    #[default]
    Normal,
    Study,
    Proofread,
}

impl ReadingMode {
    pub const ALL: [ReadingMode; 4] = [
        ReadingMode::Scan,
        ReadingMode::Normal,
        ReadingMode::Study,
        ReadingMode::Proofread,
    ];

    pub fn base_multiplier(self) -> f64 {
        match self {
            ReadingMode::Scan => 0.7,
            ReadingMode::Normal => 1.0,
            ReadingMode::Study => 1.4,
            ReadingMode::Proofread => 1.8,
        }
    }

    pub fn complexity_weight(self) -> f64 {
        match self {
            ReadingMode::Scan => 0.3,
            ReadingMode::Normal => 1.0,
            ReadingMode::Study => 1.5,
            ReadingMode::Proofread => 1.8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReadingMode::Scan => "scan",
            ReadingMode::Normal => "normal",
            ReadingMode::Study => "study",
            ReadingMode::Proofread => "proofread",
        }
    }
}

impl fmt::Display for ReadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReadingMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ReadingMode::ALL
            .into_iter()
            .find(|mode| mode.name() == wanted)
            .ok_or_else(|| EngineError::UnknownMode(s.to_string()))
    }
}

/// Multipliers for the fixed (non-adaptive) duration strategy
#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    /// Punctuation multipliers, max stacking rule
    pub period_multiplier: f64, // default 3.0x
    pub comma_multiplier: f64,       // default 1.5x, also `;` and `:`
    pub question_multiplier: f64,    // default 3.0x
    pub exclamation_multiplier: f64, // default 3.0x
    pub paragraph_multiplier: f64,   // default 3.5x

    /// Word length threshold for penalty (default 8 chars)
    pub long_word_threshold: usize,

    /// Word length penalty multiplier for words > threshold (default 1.2x)
    pub long_word_penalty: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            period_multiplier: 3.0,
            comma_multiplier: 1.5,
            question_multiplier: 3.0,
            exclamation_multiplier: 3.0,
            paragraph_multiplier: 3.5,
            long_word_threshold: 8,
            long_word_penalty: 1.2,
        }
    }
}

/// Reader configuration handed to the playback engine
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderConfig {
    /// Words per minute reading speed (default 300)
    pub wpm: u32,
    pub pause_at_punctuation: bool,
    pub extra_time_for_long_words: bool,
    /// Analyzer-driven durations; when off the fixed `timing` table is used.
    pub adaptive_mode: bool,
    pub mode: ReadingMode,
    pub timing: TimingConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wpm: 300,
            pause_at_punctuation: true,
            extra_time_for_long_words: true,
            adaptive_mode: true,
            mode: ReadingMode::Normal,
            timing: TimingConfig::default(),
        }
    }
}

impl ReaderConfig {
    /// Applies every `Some` field of `update`; WPM is clamped into range.
    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(wpm) = update.wpm {
            self.wpm = clamp_wpm(wpm);
        }
        if let Some(pause) = update.pause_at_punctuation {
            self.pause_at_punctuation = pause;
        }
        if let Some(extra) = update.extra_time_for_long_words {
            self.extra_time_for_long_words = extra;
        }
        if let Some(adaptive) = update.adaptive_mode {
            self.adaptive_mode = adaptive;
        }
        if let Some(mode) = update.mode {
            self.mode = mode;
        }
    }
}

/// Partial configuration update; `None` leaves a value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigUpdate {
    pub wpm: Option<u32>,
    pub pause_at_punctuation: Option<bool>,
    pub extra_time_for_long_words: Option<bool>,
    pub adaptive_mode: Option<bool>,
    pub mode: Option<ReadingMode>,
}
