//! Fatigue and comprehension tracking driven by reading events.

use log::trace;

/// Minutes of reading before elapsed time starts to count as fatigue.
const FATIGUE_ONSET_MINUTES: f64 = 5.0;
/// Minutes after onset at which fatigue from elapsed time saturates.
const FATIGUE_RAMP_MINUTES: f64 = 20.0;
const REWIND_PENALTY: f64 = 0.05;
const LONG_PAUSE_PENALTY: f64 = 0.03;
const LONG_PAUSE_MS: u64 = 3_000;
const RESUME_RECOVERY: f64 = 0.02;

/// Behavioral signal fed to the monitor.
///
/// A pause is counted when it starts; its length is only known on resume, so
/// the long-pause penalty is applied there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatigueEvent {
    Start,
    Word,
    Rewind,
    Pause,
    Resume { paused_ms: u64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FatigueState {
    /// Session start on the engine clock, in milliseconds.
    pub start_time: Option<u64>,
    pub words_read: u32,
    pub rewinds: u32,
    pub pauses: u32,
    /// Bounded to `[0, 1]`.
    pub fatigue_level: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComprehensionState {
    pub rewind_count: u32,
    pub pause_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatigueLevel {
    Fresh,
    Mild,
    Moderate,
    High,
}

impl FatigueLevel {
    pub fn label(self) -> &'static str {
        match self {
            FatigueLevel::Fresh => "fresh",
            FatigueLevel::Mild => "mild",
            FatigueLevel::Moderate => "moderate",
            FatigueLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FatigueStatus {
    pub level: FatigueLevel,
    pub value: f64,
    pub message: Option<&'static str>,
}

/// Buckets a fatigue value into a status with its advisory message.
pub fn fatigue_status(value: f64) -> FatigueStatus {
    let (level, message) = if value < 0.2 {
        (FatigueLevel::Fresh, None)
    } else if value < 0.5 {
        (FatigueLevel::Mild, Some("Slight fatigue detected. Pace adjusted."))
    } else if value < 0.8 {
        (
            FatigueLevel::Moderate,
            Some("You seem tired. Consider slowing down or taking a short break."),
        )
    } else {
        (
            FatigueLevel::High,
            Some("High fatigue. Take a break before continuing."),
        )
    };

    FatigueStatus {
        level,
        value,
        message,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComprehensionAssessment {
    /// In `[0, 1]`.
    pub score: f64,
    pub rewind_ratio: f64,
    pub pause_ratio: f64,
    pub suggest_slowdown: bool,
    pub suggest_break: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FatigueMonitor {
    state: FatigueState,
    comprehension: ComprehensionState,
}

impl FatigueMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FatigueState {
        &self.state
    }

    pub fn comprehension_state(&self) -> ComprehensionState {
        self.comprehension
    }

    pub fn level(&self) -> f64 {
        self.state.fatigue_level
    }

    /// Clears all counters and the session start.
    pub fn reset(&mut self) {
        self.state = FatigueState::default();
        self.comprehension = ComprehensionState::default();
    }

    /// Applies one event observed at `now_ms` on the engine clock.
    pub fn record(&mut self, event: FatigueEvent, now_ms: u64) {
        match event {
            FatigueEvent::Start => {
                self.reset();
                self.state.start_time = Some(now_ms);
            }
            FatigueEvent::Word => {
                self.state.words_read += 1;
                if let Some(start) = self.state.start_time {
                    let elapsed_minutes = now_ms.saturating_sub(start) as f64 / 60_000.0;
                    if elapsed_minutes > FATIGUE_ONSET_MINUTES {
                        self.state.fatigue_level = ((elapsed_minutes - FATIGUE_ONSET_MINUTES)
                            / FATIGUE_RAMP_MINUTES)
                            .min(1.0);
                    }
                }
            }
            FatigueEvent::Rewind => {
                self.state.rewinds += 1;
                self.comprehension.rewind_count += 1;
                self.state.fatigue_level = (self.state.fatigue_level + REWIND_PENALTY).min(1.0);
            }
            FatigueEvent::Pause => {
                self.state.pauses += 1;
                self.comprehension.pause_count += 1;
            }
            FatigueEvent::Resume { paused_ms } => {
                if paused_ms > LONG_PAUSE_MS {
                    self.state.fatigue_level =
                        (self.state.fatigue_level + LONG_PAUSE_PENALTY).min(1.0);
                }
                self.state.fatigue_level = (self.state.fatigue_level - RESUME_RECOVERY).max(0.0);
            }
        }
        trace!(
            "fatigue event {:?} at {}ms -> level {:.3}",
            event,
            now_ms,
            self.state.fatigue_level
        );
    }

    pub fn status(&self) -> FatigueStatus {
        fatigue_status(self.state.fatigue_level)
    }

    pub fn assess_comprehension(&self) -> ComprehensionAssessment {
        let words = self.state.words_read.max(1) as f64;
        let rewind_ratio = self.comprehension.rewind_count as f64 / words;
        let pause_ratio = self.comprehension.pause_count as f64 / words;
        let fatigue = self.state.fatigue_level;

        let mut score: f64 = 1.0;
        if rewind_ratio > 0.05 {
            score -= 0.2;
        }
        if pause_ratio > 0.03 {
            score -= 0.1;
        }
        if fatigue > 0.5 {
            score -= 0.2;
        }
        let score = score.max(0.0);

        ComprehensionAssessment {
            score,
            rewind_ratio,
            pause_ratio,
            suggest_slowdown: score < 0.7,
            suggest_break: score < 0.5 || fatigue > 0.7,
        }
    }
}
