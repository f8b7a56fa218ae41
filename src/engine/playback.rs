//! The playback state machine.
//!
//! `empty -> loaded -> {playing <-> paused} -> completed`. The engine owns the
//! token array, the cursor, the analyzer and the fatigue monitor. Timed
//! advances go through a single-slot [`StepTimer`]; every path that leaves
//! `playing` or moves the cursor outside of `advance` cancels the pending step
//! first, so a stale step can never move a cursor that was repositioned.

use crate::engine::config::{clamp_wpm, ConfigUpdate, ReaderConfig, ReadingMode};
use crate::engine::error::EngineError;
use crate::engine::events::{CompletionStats, NullObserver, Progress, ReaderObserver, WordView};
use crate::engine::state::{PlaybackState, PlaybackStatus};
use crate::engine::timer::{Clock, StepTimer, SystemClock};
use crate::reading::analyzer::LinguisticAnalyzer;
use crate::reading::fatigue::{
    ComprehensionAssessment, FatigueEvent, FatigueMonitor, FatigueStatus,
};
use crate::reading::ovp::compute_focus;
use crate::reading::timing::{tokenize_text, wpm_to_milliseconds, DurationStrategy};
use crate::reading::token::Token;
use log::{debug, trace, warn};

/// Delay before stepping over a word that was already shown inside a phrase.
pub const COLLOCATION_TAIL_DELAY_MS: u64 = 10;

/// Snapshot returned by [`PlaybackEngine::stats`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingStats {
    pub status: PlaybackStatus,
    pub cursor: usize,
    pub total: usize,
    pub words_read: u32,
    /// Reading time with paused intervals excluded.
    pub elapsed_ms: u64,
    pub wpm: u32,
    pub actual_wpm: f64,
    pub fatigue_level: f64,
    pub rewinds: u32,
    pub pauses: u32,
}

fn words_per_minute(words: usize, elapsed_ms: u64) -> f64 {
    if elapsed_ms == 0 {
        0.0
    } else {
        words as f64 * 60_000.0 / elapsed_ms as f64
    }
}

pub struct PlaybackEngine<C: Clock = SystemClock> {
    config: ReaderConfig,
    tokens: Vec<Token>,
    state: PlaybackState,
    analyzer: LinguisticAnalyzer,
    fatigue: FatigueMonitor,
    timer: StepTimer,
    clock: C,
    observer: Box<dyn ReaderObserver>,
    displayed: Option<WordView>,
}

impl PlaybackEngine<SystemClock> {
    pub fn new(config: ReaderConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> PlaybackEngine<C> {
    pub fn with_clock(mut config: ReaderConfig, clock: C) -> Self {
        config.wpm = clamp_wpm(config.wpm);
        let analyzer = LinguisticAnalyzer::new(config.mode);
        Self {
            config,
            tokens: Vec::new(),
            state: PlaybackState::default(),
            analyzer,
            fatigue: FatigueMonitor::new(),
            timer: StepTimer::new(),
            clock,
            observer: Box::new(NullObserver),
            displayed: None,
        }
    }

    pub fn with_observer(mut self, observer: impl ReaderObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    // ---- commands ----------------------------------------------------------

    /// Replaces the document and returns its token count.
    ///
    /// Empty or whitespace-only text is accepted and leaves the engine loaded
    /// with no current word.
    pub fn load(&mut self, text: &str) -> usize {
        self.timer.cancel_pending();
        self.tokens = tokenize_text(text);
        self.state.rewind();
        self.analyzer.reset();
        self.analyzer.set_mode(self.config.mode);
        self.fatigue.record(FatigueEvent::Start, self.clock.now_ms());
        self.displayed = None;
        debug!("loaded document with {} tokens", self.tokens.len());

        self.show_preview();
        self.set_status(PlaybackStatus::Loaded);
        self.tokens.len()
    }

    /// Starts or resumes playback; the next word is shown without delay.
    pub fn play(&mut self) {
        if self.tokens.is_empty() || self.state.is_playing {
            return;
        }
        let now = self.clock.now_ms();

        if self.state.status == PlaybackStatus::Completed
            || self.state.cursor >= self.tokens.len()
        {
            self.state.rewind();
        }

        if let Some(paused_at) = self.state.paused_at.take() {
            let paused_ms = now.saturating_sub(paused_at);
            self.state.total_paused_ms += paused_ms;
            self.fatigue.record(FatigueEvent::Resume { paused_ms }, now);
        }
        if self.state.start_time.is_none() {
            self.state.start_time = Some(now);
        }

        self.state.is_playing = true;
        self.set_status(PlaybackStatus::Playing);
        self.advance();
    }

    pub fn pause(&mut self) {
        if !self.state.is_playing {
            return;
        }
        self.timer.cancel_pending();
        let now = self.clock.now_ms();
        self.state.is_playing = false;
        self.state.paused_at = Some(now);
        self.fatigue.record(FatigueEvent::Pause, now);
        self.set_status(PlaybackStatus::Paused);
    }

    pub fn toggle(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Back to the first token with a fresh session memory and fatigue state.
    pub fn restart(&mut self) {
        if self.state.status == PlaybackStatus::Empty {
            return;
        }
        self.timer.cancel_pending();
        self.state.rewind();
        self.analyzer.reset();
        self.fatigue.record(FatigueEvent::Start, self.clock.now_ms());
        self.displayed = None;
        debug!("restarted document of {} tokens", self.tokens.len());

        self.show_preview();
        self.set_status(PlaybackStatus::Loaded);
    }

    pub fn seek(&mut self, index: usize) {
        self.navigate_to(index, false);
    }

    /// Moves past the displayed word, or past the whole phrase when a
    /// collocation is on screen.
    pub fn next(&mut self) {
        let target = self.anchor_index() + self.displayed_span();
        self.navigate_to(target, false);
    }

    pub fn prev(&mut self) {
        let target = self.anchor_index().saturating_sub(1);
        self.navigate_to(target, true);
    }

    pub fn jump(&mut self, delta: i64) {
        let target = (self.anchor_index() as i64).saturating_add(delta).max(0) as usize;
        self.navigate_to(target, delta < 0);
    }

    /// Seeks to the next sentence start. Does nothing in the last sentence.
    pub fn next_sentence(&mut self) {
        let from = self.anchor_index() + 1;
        let target = self
            .tokens
            .iter()
            .skip(from)
            .position(|token| token.is_sentence_start)
            .map(|offset| from + offset);
        if let Some(target) = target {
            self.navigate_to(target, false);
        }
    }

    /// Seeks to the closest sentence start before the displayed word.
    pub fn prev_sentence(&mut self) {
        let end = self.anchor_index().min(self.tokens.len());
        let target = self.tokens[..end]
            .iter()
            .rposition(|token| token.is_sentence_start);
        if let Some(target) = target {
            self.navigate_to(target, true);
        }
    }

    /// Returns the clamped value that was applied.
    pub fn set_wpm(&mut self, wpm: u32) -> u32 {
        self.config.wpm = clamp_wpm(wpm);
        debug!("wpm set to {}", self.config.wpm);
        self.config.wpm
    }

    pub fn adjust_wpm(&mut self, delta: i32) -> u32 {
        let wanted = (self.config.wpm as i64 + delta as i64).max(0);
        self.set_wpm(wanted.min(u32::MAX as i64) as u32)
    }

    /// Selects a mode by name; unknown names leave the mode unchanged.
    pub fn set_mode(&mut self, name: &str) -> Result<ReadingMode, EngineError> {
        match name.parse::<ReadingMode>() {
            Ok(mode) => {
                self.set_reading_mode(mode);
                Ok(mode)
            }
            Err(err) => {
                warn!("{}", err);
                Err(err)
            }
        }
    }

    pub fn set_reading_mode(&mut self, mode: ReadingMode) {
        self.config.mode = mode;
        self.analyzer.set_mode(mode);
        debug!("reading mode set to {}", mode);
    }

    pub fn set_adaptive_mode(&mut self, adaptive: bool) {
        self.config.adaptive_mode = adaptive;
        debug!("adaptive mode {}", if adaptive { "on" } else { "off" });
    }

    pub fn update_config(&mut self, update: &ConfigUpdate) {
        self.config.apply(update);
        self.analyzer.set_mode(self.config.mode);
        debug!("config updated: {:?}", update);
    }

    /// Fires the pending step if its deadline has passed. Returns whether a
    /// step ran.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        if self.timer.take_due(now).is_none() {
            return false;
        }
        self.advance();
        true
    }

    // ---- queries -----------------------------------------------------------

    /// Composes the word under the cursor.
    ///
    /// Runs the analyzer (updating session memory) and, on the head of a
    /// phrase, claims the phrase so the following steps skip its tail.
    pub fn current_word(&mut self) -> Option<WordView> {
        if self.state.cursor >= self.tokens.len() {
            return None;
        }
        self.compose(true)
    }

    /// The word most recently shown to observers.
    pub fn displayed_word(&self) -> Option<&WordView> {
        self.displayed.as_ref()
    }

    pub fn fatigue_status(&self) -> FatigueStatus {
        self.fatigue.status()
    }

    pub fn comprehension(&self) -> ComprehensionAssessment {
        self.fatigue.assess_comprehension()
    }

    /// Remaining tokens at the base interval, scaled by the mode in adaptive
    /// mode.
    pub fn estimated_remaining_ms(&self) -> u64 {
        let remaining = self.tokens.len().saturating_sub(self.state.cursor) as f64;
        let mode_factor = if self.config.adaptive_mode {
            self.config.mode.base_multiplier()
        } else {
            1.0
        };
        (remaining * wpm_to_milliseconds(self.config.wpm) as f64 * mode_factor).round() as u64
    }

    pub fn stats(&self) -> ReadingStats {
        let elapsed_ms = self.state.active_elapsed_ms(self.clock.now_ms());
        let fatigue = self.fatigue.state();
        ReadingStats {
            status: self.state.status,
            cursor: self.state.cursor,
            total: self.tokens.len(),
            words_read: fatigue.words_read,
            elapsed_ms,
            wpm: self.config.wpm,
            actual_wpm: words_per_minute(self.state.cursor, elapsed_ms),
            fatigue_level: fatigue.fatigue_level,
            rewinds: fatigue.rewinds,
            pauses: fatigue.pauses,
        }
    }

    /// Clock time at which the pending step is due.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timer.deadline()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn skip_count(&self) -> usize {
        self.state.skip_count
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &LinguisticAnalyzer {
        &self.analyzer
    }

    // ---- internals ---------------------------------------------------------

    /// One playback step; the deferred callback behind every scheduled step.
    fn advance(&mut self) {
        if self.state.skip_count > 0 {
            self.state.skip_count -= 1;
            self.state.cursor += 1;
            trace!("skipped phrase tail, cursor at {}", self.state.cursor);
            if self.state.is_playing {
                self.schedule_step(COLLOCATION_TAIL_DELAY_MS);
            }
            return;
        }

        if self.state.cursor >= self.tokens.len() {
            self.complete();
            return;
        }

        let Some(view) = self.compose(true) else {
            return;
        };
        let index = view.index;
        self.fatigue
            .record(FatigueEvent::Word, self.clock.now_ms());
        let delay_ms = DurationStrategy::for_config(&self.config).duration_ms(
            &self.tokens[index],
            &view.analysis,
            &self.config,
        );

        self.observer.on_word_change(&view);
        self.observer.on_analysis(&view.analysis);
        self.observer
            .on_progress(Progress::new(index + 1, self.tokens.len()));
        self.displayed = Some(view);
        self.state.cursor += 1;

        // The last word is held for its full duration; the step after it completes.
        if self.state.is_playing {
            self.schedule_step(delay_ms);
        }
    }

    fn complete(&mut self) {
        self.timer.cancel_pending();
        self.state.is_playing = false;

        let elapsed_ms = self.state.active_elapsed_ms(self.clock.now_ms());
        let word_count = self.tokens.len();
        let stats = CompletionStats {
            word_count,
            elapsed_ms,
            actual_wpm: words_per_minute(word_count, elapsed_ms),
            fatigue: self.fatigue.status(),
            comprehension: self.fatigue.assess_comprehension(),
        };
        debug!(
            "completed {} words in {}ms ({:.0} wpm)",
            word_count, elapsed_ms, stats.actual_wpm
        );

        self.observer.on_complete(&stats);
        self.set_status(PlaybackStatus::Completed);
    }

    fn schedule_step(&mut self, delay_ms: u64) {
        let now = self.clock.now_ms();
        self.timer.schedule_after(now, delay_ms);
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.state.status == status {
            return;
        }
        debug!("playback {} -> {}", self.state.status, status);
        self.state.status = status;
        self.observer.on_state_change(status);
    }

    /// Builds the view for the token under the cursor.
    ///
    /// With `claim_phrase` the analyzer memory is updated and a phrase head
    /// sets `skip_count`; without it the word is only previewed.
    fn compose(&mut self, claim_phrase: bool) -> Option<WordView> {
        let index = self.state.cursor;
        let total = self.tokens.len();
        let token = self.tokens.get(index)?;

        let phrase = if token.starts_collocation() && self.state.skip_count == 0 {
            token.collocation.as_ref()
        } else {
            None
        };
        let display_text = phrase.map_or_else(|| token.text.clone(), |c| c.display_text());
        let span = phrase.map_or(1, |c| c.len().max(1));

        let fatigue_level = self.fatigue.level();
        let mut analysis = if claim_phrase {
            self.analyzer.analyze(token, fatigue_level)
        } else {
            self.analyzer.preview(token, fatigue_level)
        };
        analysis.display_text = display_text.clone();

        if claim_phrase && phrase.is_some() {
            // Never claim past the end of the document.
            self.state.skip_count = (span - 1).min(total - index - 1);
        }

        let split = compute_focus(&token.text, analysis.orp_offset);
        let previous_word = index
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.text.clone());
        let next_word = self.tokens.get(index + span).map(|t| t.text.clone());

        Some(WordView {
            word: token.text.clone(),
            display_text,
            is_collocation: phrase.is_some(),
            index,
            total,
            progress: (index + 1) as f64 / total as f64,
            prefix: split.prefix,
            focus: split.focus,
            suffix: split.suffix,
            previous_word,
            next_word,
            analysis,
        })
    }

    /// Notifies observers of the word under the cursor without consuming it.
    fn show_preview(&mut self) {
        let Some(view) = self.compose(false) else {
            return;
        };
        self.observer.on_word_change(&view);
        self.observer.on_analysis(&view.analysis);
        self.observer
            .on_progress(Progress::new(self.state.cursor, self.tokens.len()));
        self.displayed = Some(view);
    }

    /// Index of the word on screen, falling back to the cursor.
    fn anchor_index(&self) -> usize {
        self.displayed
            .as_ref()
            .map_or(self.state.cursor, |word| word.index)
    }

    fn displayed_span(&self) -> usize {
        match &self.displayed {
            Some(word) if word.is_collocation => self
                .tokens
                .get(word.index)
                .and_then(|token| token.collocation.as_ref())
                .map_or(1, |phrase| phrase.len()),
            _ => 1,
        }
    }

    /// Playback is paused around the move and resumed afterwards, so the
    /// resumed step shows the target word.
    fn navigate_to(&mut self, target: usize, rewind: bool) {
        if self.tokens.is_empty() || self.state.status == PlaybackStatus::Completed {
            return;
        }
        let target = target.min(self.tokens.len() - 1);
        let was_playing = self.state.is_playing;

        if was_playing {
            self.pause();
        }
        if rewind {
            self.fatigue.record(FatigueEvent::Rewind, self.clock.now_ms());
        }
        self.state.cursor = target;
        self.state.skip_count = 0;
        trace!("cursor moved to {}", target);

        if was_playing {
            self.play();
        } else {
            self.show_preview();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::events::{ChannelObserver, ReaderEvent};
    use crate::engine::timer::ManualClock;
    use crate::reading::analyzer::Factor;
    use std::sync::mpsc::{self, Receiver};

    fn fixed_config() -> ReaderConfig {
        ReaderConfig {
            adaptive_mode: false,
            ..ReaderConfig::default()
        }
    }

    fn engine_with_events(
        config: ReaderConfig,
    ) -> (PlaybackEngine<ManualClock>, ManualClock, Receiver<ReaderEvent>) {
        let clock = ManualClock::new();
        let (tx, rx) = mpsc::channel();
        let engine = PlaybackEngine::with_clock(config, clock.clone())
            .with_observer(ChannelObserver::new(tx));
        (engine, clock, rx)
    }

    fn word_changes(rx: &Receiver<ReaderEvent>) -> Vec<String> {
        rx.try_iter()
            .filter_map(|event| match event {
                ReaderEvent::WordChanged(word) => Some(word.display_text),
                _ => None,
            })
            .collect()
    }

    /// Moves the clock to the pending deadline and fires the step.
    fn run_due(engine: &mut PlaybackEngine<ManualClock>, clock: &ManualClock) -> bool {
        match engine.next_deadline() {
            Some(deadline) => {
                clock.set(deadline);
                engine.tick()
            }
            None => false,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_new_engine_is_empty() {
        let (mut engine, _clock, _rx) = engine_with_events(ReaderConfig::default());
        assert_eq!(engine.status(), PlaybackStatus::Empty);
        assert!(engine.current_word().is_none());
        engine.play();
        engine.restart();
        assert_eq!(engine.status(), PlaybackStatus::Empty);
    }

    #[test]
    fn test_load_returns_token_count() {
        let (mut engine, _clock, rx) = engine_with_events(ReaderConfig::default());
        assert_eq!(engine.load("The quick brown fox"), 4);
        assert_eq!(engine.status(), PlaybackStatus::Loaded);
        assert_eq!(engine.displayed_word().map(|w| w.index), Some(0));

        let events: Vec<ReaderEvent> = rx.try_iter().collect();
        assert!(matches!(events.last(), Some(ReaderEvent::StateChanged(PlaybackStatus::Loaded))));
    }

    #[test]
    fn test_load_empty_text_has_no_current_word() {
        let (mut engine, _clock, _rx) = engine_with_events(ReaderConfig::default());
        assert_eq!(engine.load("   \n\n \t "), 0);
        assert_eq!(engine.status(), PlaybackStatus::Loaded);
        assert!(engine.current_word().is_none());
        assert!(engine.displayed_word().is_none());

        engine.play();
        engine.next();
        engine.jump(-3);
        assert_eq!(engine.status(), PlaybackStatus::Loaded);
        assert_eq!(engine.next_deadline(), None);
        assert_eq!(engine.cursor(), 0);
    }

    #[test]
    fn test_play_shows_first_word_without_delay() {
        let (mut engine, _clock, rx) = engine_with_events(fixed_config());
        engine.load("alpha beta gamma");
        rx.try_iter().count();

        engine.play();
        let events: Vec<ReaderEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], ReaderEvent::StateChanged(PlaybackStatus::Playing));
        assert!(matches!(&events[1], ReaderEvent::WordChanged(w) if w.word == "alpha"));
        assert!(matches!(&events[2], ReaderEvent::Analysis(a) if a.source_text == "alpha"));
        assert_eq!(events[3], ReaderEvent::Progress(Progress::new(1, 3)));

        assert_eq!(engine.cursor(), 1);
        assert_eq!(engine.next_deadline(), Some(200));
    }

    #[test]
    fn test_collocation_round_trip() {
        let (mut engine, clock, rx) = engine_with_events(ReaderConfig::default());
        engine.load("in order to succeed");
        rx.try_iter().count();

        engine.play();
        assert_eq!(engine.skip_count(), 2);
        let shown = engine.displayed_word().cloned();
        assert_eq!(shown.as_ref().map(|w| w.display_text.as_str()), Some("in order to"));
        assert_eq!(shown.as_ref().map(|w| w.word.as_str()), Some("in"));
        assert_eq!(shown.as_ref().map(|w| w.is_collocation), Some(true));
        assert_eq!(shown.and_then(|w| w.next_word), Some("succeed".to_string()));
        assert_eq!(word_changes(&rx), vec!["in order to".to_string()]);

        assert!(run_due(&mut engine, &clock));
        assert!(run_due(&mut engine, &clock));
        assert_eq!(engine.cursor(), 3);
        assert_eq!(engine.skip_count(), 0);
        assert!(word_changes(&rx).is_empty());

        assert!(run_due(&mut engine, &clock));
        assert_eq!(word_changes(&rx), vec!["succeed".to_string()]);
    }

    #[test]
    fn test_tail_steps_use_minimal_delay() {
        let (mut engine, clock, _rx) = engine_with_events(fixed_config());
        engine.load("in order to succeed");
        engine.play();
        assert!(run_due(&mut engine, &clock));
        let now = clock.now_ms();
        assert_eq!(engine.next_deadline(), Some(now + COLLOCATION_TAIL_DELAY_MS));
    }

    #[test]
    fn test_pause_cancels_pending_step() {
        let (mut engine, clock, rx) = engine_with_events(fixed_config());
        engine.load("alpha beta gamma");
        engine.play();
        engine.pause();
        rx.try_iter().count();

        assert_eq!(engine.next_deadline(), None);
        clock.advance(10_000);
        assert!(!engine.tick());
        assert!(word_changes(&rx).is_empty());
        assert_eq!(engine.status(), PlaybackStatus::Paused);

        engine.play();
        assert_eq!(word_changes(&rx), vec!["beta".to_string()]);
    }

    #[test]
    fn test_pause_is_noop_when_not_playing() {
        let (mut engine, _clock, rx) = engine_with_events(fixed_config());
        engine.load("alpha beta");
        rx.try_iter().count();
        engine.pause();
        assert!(rx.try_iter().next().is_none());
        assert_eq!(engine.status(), PlaybackStatus::Loaded);
    }

    #[test]
    fn test_long_pause_and_resume_feed_fatigue() {
        let (mut engine, clock, _rx) = engine_with_events(fixed_config());
        engine.load("alpha beta gamma delta");
        engine.play();
        clock.set(100);
        engine.pause();
        clock.set(5_000);
        engine.play();

        let stats = engine.stats();
        assert_eq!(stats.pauses, 1);
        assert!(approx(stats.fatigue_level, 0.01));
        assert_eq!(stats.elapsed_ms, 100);
    }

    #[test]
    fn test_pause_counts_before_resume() {
        let (mut engine, clock, _rx) = engine_with_events(fixed_config());
        engine.load("alpha beta gamma delta");
        engine.play();
        clock.set(100);
        engine.pause();

        assert_eq!(engine.stats().pauses, 1);
        assert!(approx(engine.comprehension().pause_ratio, 1.0));
        assert_eq!(engine.stats().fatigue_level, 0.0);
    }

    #[test]
    fn test_navigation_while_playing_pauses_and_resumes() {
        let (mut engine, clock, rx) = engine_with_events(fixed_config());
        engine.load("one two three four five six seven");
        engine.play();
        clock.set(50);
        rx.try_iter().count();

        engine.jump(3);
        engine.seek(1);
        assert_eq!(engine.stats().pauses, 2);
        assert_eq!(engine.status(), PlaybackStatus::Playing);
        assert_eq!(engine.displayed_word().map(|w| w.index), Some(1));
        assert_eq!(engine.next_deadline(), Some(250));

        let states: Vec<PlaybackStatus> = rx
            .try_iter()
            .filter_map(|event| match event {
                ReaderEvent::StateChanged(status) => Some(status),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            vec![
                PlaybackStatus::Paused,
                PlaybackStatus::Playing,
                PlaybackStatus::Paused,
                PlaybackStatus::Playing,
            ]
        );

        // The rewind penalty is partly recovered by the resume that follows it.
        engine.prev();
        let stats = engine.stats();
        assert_eq!(stats.pauses, 3);
        assert_eq!(stats.rewinds, 1);
        assert!(approx(stats.fatigue_level, 0.03));
    }

    #[test]
    fn test_rewind_fires_once_per_call() {
        let (mut engine, clock, _rx) = engine_with_events(fixed_config());
        engine.load("one two three four five six seven eight nine ten");
        engine.play();
        for _ in 0..6 {
            run_due(&mut engine, &clock);
        }

        engine.jump(-5);
        assert_eq!(engine.stats().rewinds, 1);
        engine.prev();
        assert_eq!(engine.stats().rewinds, 2);
        engine.jump(3);
        engine.next();
        engine.seek(0);
        assert_eq!(engine.stats().rewinds, 2);
    }

    #[test]
    fn test_navigation_clamps_target() {
        let (mut engine, _clock, _rx) = engine_with_events(fixed_config());
        engine.load("one two three");
        engine.seek(999);
        assert_eq!(engine.displayed_word().map(|w| w.index), Some(2));
        engine.jump(-50);
        assert_eq!(engine.displayed_word().map(|w| w.index), Some(0));
        engine.prev();
        assert_eq!(engine.cursor(), 0);
    }

    #[test]
    fn test_seek_while_paused_previews_without_learning() {
        let (mut engine, _clock, rx) = engine_with_events(ReaderConfig::default());
        engine.load("in order to succeed quickly");
        rx.try_iter().count();
        let concepts_before = engine.analyzer().memory().concept_total();

        engine.seek(0);
        assert_eq!(engine.skip_count(), 0);
        assert_eq!(engine.analyzer().memory().concept_total(), concepts_before);

        let events: Vec<ReaderEvent> = rx.try_iter().collect();
        assert!(matches!(&events[0], ReaderEvent::WordChanged(w) if w.display_text == "in order to"));
        assert!(events.contains(&ReaderEvent::Progress(Progress::new(0, 5))));
    }

    #[test]
    fn test_next_skips_displayed_phrase() {
        let (mut engine, _clock, _rx) = engine_with_events(ReaderConfig::default());
        engine.load("in order to succeed today");
        engine.next();
        assert_eq!(engine.displayed_word().map(|w| w.word.as_str()), Some("succeed"));
    }

    #[test]
    fn test_navigation_while_playing_keeps_playing() {
        let (mut engine, clock, rx) = engine_with_events(fixed_config());
        engine.load("one two three four five six");
        engine.play();
        run_due(&mut engine, &clock);
        rx.try_iter().count();

        engine.seek(4);
        assert_eq!(word_changes(&rx), vec!["five".to_string()]);
        assert_eq!(engine.status(), PlaybackStatus::Playing);
        assert_eq!(engine.cursor(), 5);
        assert!(engine.next_deadline().is_some());
    }

    #[test]
    fn test_backward_navigation_keeps_memory() {
        let (mut engine, clock, _rx) = engine_with_events(ReaderConfig::default());
        engine.load("galaxy orbits slowly");
        engine.play();
        assert!(engine
            .displayed_word()
            .map_or(false, |w| w.analysis.has(Factor::FirstOccurrence)));
        run_due(&mut engine, &clock);

        engine.seek(0);
        let revisit = engine.displayed_word().cloned();
        assert_eq!(revisit.as_ref().map(|w| w.word.as_str()), Some("galaxy"));
        assert!(revisit.map_or(false, |w| w.analysis.has(Factor::RecentRepeat)));
    }

    #[test]
    fn test_sentence_navigation() {
        let (mut engine, _clock, _rx) = engine_with_events(fixed_config());
        engine.load("First one. Second one. Third one.");

        engine.next_sentence();
        assert_eq!(engine.displayed_word().map(|w| w.index), Some(2));
        engine.next_sentence();
        assert_eq!(engine.displayed_word().map(|w| w.index), Some(4));
        engine.next_sentence();
        assert_eq!(engine.displayed_word().map(|w| w.index), Some(4));

        engine.prev_sentence();
        assert_eq!(engine.displayed_word().map(|w| w.index), Some(2));
        assert_eq!(engine.stats().rewinds, 1);
    }

    #[test]
    fn test_restart_resets_session() {
        let (mut engine, clock, rx) = engine_with_events(ReaderConfig::default());
        engine.load("Photosynthesis converts sunlight into chemical energy.");
        engine.play();
        run_due(&mut engine, &clock);
        engine.prev();
        rx.try_iter().count();

        engine.restart();
        assert_eq!(engine.status(), PlaybackStatus::Loaded);
        assert_eq!(engine.cursor(), 0);
        assert_eq!(engine.next_deadline(), None);
        assert_eq!(engine.analyzer().memory().concept_total(), 0);
        assert_eq!(engine.stats().rewinds, 0);

        let events: Vec<ReaderEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 4);
        assert!(matches!(&events[0], ReaderEvent::WordChanged(w) if w.index == 0));
        assert_eq!(events[2], ReaderEvent::Progress(Progress::new(0, 6)));
        assert_eq!(events[3], ReaderEvent::StateChanged(PlaybackStatus::Loaded));
    }

    #[test]
    fn test_completion_emits_stats_then_state() {
        let (mut engine, clock, rx) = engine_with_events(fixed_config());
        engine.load("Hi there.");
        engine.play();
        while run_due(&mut engine, &clock) {}
        let events: Vec<ReaderEvent> = rx.try_iter().collect();

        let n = events.len();
        assert!(matches!(&events[n - 2], ReaderEvent::Completed(stats) if stats.word_count == 2));
        assert_eq!(events[n - 1], ReaderEvent::StateChanged(PlaybackStatus::Completed));
        assert_eq!(engine.next_deadline(), None);
        assert!(!engine.is_playing());
    }

    #[test]
    fn test_completed_is_terminal_for_navigation() {
        let (mut engine, clock, _rx) = engine_with_events(fixed_config());
        engine.load("one two");
        engine.play();
        while run_due(&mut engine, &clock) {}

        engine.prev();
        engine.seek(0);
        assert_eq!(engine.status(), PlaybackStatus::Completed);
        assert_eq!(engine.cursor(), 2);
        assert_eq!(engine.stats().rewinds, 0);
    }

    #[test]
    fn test_play_after_completion_replays() {
        let (mut engine, clock, _rx) = engine_with_events(fixed_config());
        engine.load("one two");
        engine.play();
        while run_due(&mut engine, &clock) {}

        engine.play();
        assert_eq!(engine.status(), PlaybackStatus::Playing);
        assert_eq!(engine.displayed_word().map(|w| w.word.as_str()), Some("one"));
        assert_eq!(engine.cursor(), 1);
    }

    #[test]
    fn test_set_mode_rejects_unknown_names() {
        let (mut engine, _clock, _rx) = engine_with_events(ReaderConfig::default());
        assert!(engine.set_mode("skim").is_err());
        assert_eq!(engine.config().mode, ReadingMode::Normal);

        assert_eq!(engine.set_mode("Study"), Ok(ReadingMode::Study));
        assert_eq!(engine.analyzer().mode(), ReadingMode::Study);
    }

    #[test]
    fn test_set_wpm_clamps() {
        let (mut engine, _clock, _rx) = engine_with_events(ReaderConfig::default());
        assert_eq!(engine.set_wpm(10), 50);
        assert_eq!(engine.set_wpm(5_000), 1_500);
        assert_eq!(engine.adjust_wpm(-25), 1_475);
        engine.set_wpm(60);
        assert_eq!(engine.adjust_wpm(-100), 50);
    }

    #[test]
    fn test_construction_clamps_wpm() {
        let engine = PlaybackEngine::with_clock(
            ReaderConfig {
                wpm: 9_000,
                ..ReaderConfig::default()
            },
            ManualClock::new(),
        );
        assert_eq!(engine.config().wpm, 1_500);
    }

    #[test]
    fn test_wpm_change_applies_to_next_step() {
        let (mut engine, clock, _rx) = engine_with_events(fixed_config());
        engine.load("one two three");
        engine.play();
        engine.set_wpm(600);
        assert_eq!(engine.next_deadline(), Some(200));
        run_due(&mut engine, &clock);
        assert_eq!(engine.next_deadline(), Some(300));
    }

    #[test]
    fn test_update_config_forwards_mode() {
        let (mut engine, _clock, _rx) = engine_with_events(ReaderConfig::default());
        engine.update_config(&ConfigUpdate {
            mode: Some(ReadingMode::Proofread),
            wpm: Some(20),
            ..ConfigUpdate::default()
        });
        assert_eq!(engine.analyzer().mode(), ReadingMode::Proofread);
        assert_eq!(engine.config().wpm, 50);
    }

    #[test]
    fn test_estimated_remaining_time() {
        let (mut engine, _clock, _rx) = engine_with_events(fixed_config());
        engine.load("a b c d e f g h i j");
        assert_eq!(engine.estimated_remaining_ms(), 2_000);

        engine.set_adaptive_mode(true);
        engine.set_reading_mode(ReadingMode::Study);
        assert_eq!(engine.estimated_remaining_ms(), 2_800);
    }

    #[test]
    fn test_current_word_claims_phrase() {
        let (mut engine, _clock, _rx) = engine_with_events(ReaderConfig::default());
        engine.load("as well as tea");
        let word = engine.current_word();
        assert_eq!(word.map(|w| w.display_text), Some("as well as".to_string()));
        assert_eq!(engine.skip_count(), 2);

        // The phrase is already claimed, so the head is now shown alone.
        let again = engine.current_word();
        assert_eq!(again.map(|w| w.display_text), Some("as".to_string()));
    }
}
