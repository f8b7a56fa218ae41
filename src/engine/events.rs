//! Notifications emitted by the playback engine.
//!
//! Collaborators either implement [`ReaderObserver`] directly or hand the
//! engine a [`ChannelObserver`] and drain [`ReaderEvent`]s from the receiver.
//! Within one step the order is always word change, analysis, progress.
//! Completion emits the statistics before the state change.

use crate::engine::state::PlaybackStatus;
use crate::reading::analyzer::AnalysisResult;
use crate::reading::fatigue::{ComprehensionAssessment, FatigueStatus};
use std::sync::mpsc::Sender;

/// Everything a front-end needs to draw one word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordView {
    /// The single underlying token text.
    pub word: String,
    /// The phrase when a collocation is shown jointly, otherwise `word`.
    pub display_text: String,
    pub is_collocation: bool,
    pub index: usize,
    pub total: usize,
    /// Position of this word as a fraction of the document, in `(0, 1]`.
    pub progress: f64,
    pub prefix: String,
    pub focus: String,
    pub suffix: String,
    pub previous_word: Option<String>,
    pub next_word: Option<String>,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Words consumed so far.
    pub current: usize,
    pub total: usize,
    pub fraction: f64,
}

impl Progress {
    pub fn new(current: usize, total: usize) -> Self {
        let fraction = if total == 0 {
            0.0
        } else {
            current as f64 / total as f64
        };
        Self {
            current,
            total,
            fraction,
        }
    }
}

/// Final report emitted once the cursor passes the last token.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionStats {
    pub word_count: usize,
    /// Reading time with paused intervals excluded.
    pub elapsed_ms: u64,
    pub actual_wpm: f64,
    pub fatigue: FatigueStatus,
    pub comprehension: ComprehensionAssessment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReaderEvent {
    WordChanged(WordView),
    Progress(Progress),
    Completed(CompletionStats),
    StateChanged(PlaybackStatus),
    Analysis(AnalysisResult),
}

/// Receives engine notifications. Every method defaults to doing nothing.
pub trait ReaderObserver {
    fn on_word_change(&mut self, _word: &WordView) {}
    fn on_progress(&mut self, _progress: Progress) {}
    fn on_complete(&mut self, _stats: &CompletionStats) {}
    fn on_state_change(&mut self, _status: PlaybackStatus) {}
    fn on_analysis(&mut self, _analysis: &AnalysisResult) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ReaderObserver for NullObserver {}

/// Forwards every notification into an mpsc channel as a [`ReaderEvent`].
///
/// A dropped receiver is not an error; events are simply discarded.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<ReaderEvent>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<ReaderEvent>) -> Self {
        Self { sender }
    }

    fn emit(&self, event: ReaderEvent) {
        let _ = self.sender.send(event);
    }
}

impl ReaderObserver for ChannelObserver {
    fn on_word_change(&mut self, word: &WordView) {
        self.emit(ReaderEvent::WordChanged(word.clone()));
    }

    fn on_progress(&mut self, progress: Progress) {
        self.emit(ReaderEvent::Progress(progress));
    }

    fn on_complete(&mut self, stats: &CompletionStats) {
        self.emit(ReaderEvent::Completed(stats.clone()));
    }

    fn on_state_change(&mut self, status: PlaybackStatus) {
        self.emit(ReaderEvent::StateChanged(status));
    }

    fn on_analysis(&mut self, analysis: &AnalysisResult) {
        self.emit(ReaderEvent::Analysis(analysis.clone()));
    }
}
