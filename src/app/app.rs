use super::event::AppEvent;
use super::mode::AppMode;
use super::render_state::{format_remaining, RenderState};
use crate::engine::{
    ChannelObserver, CompletionStats, PlaybackEngine, Progress, ReaderConfig, ReaderEvent,
    ReadingMode, SystemClock,
};
use crate::input::load_text_file;
use crate::ui::command::{command_to_app_event, parse_command};
use log::{debug, warn};
use std::sync::mpsc::{self, Receiver};

/// WPM change per `+`/`-` key press.
pub const WPM_STEP: i32 = 25;

pub struct App {
    mode: AppMode,
    engine: PlaybackEngine<SystemClock>,
    events: Receiver<ReaderEvent>,
    progress: Progress,
    command_buffer: String,
    message: Option<String>,
    show_help: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let engine = PlaybackEngine::new(config).with_observer(ChannelObserver::new(tx));
        Self {
            mode: AppMode::Reading,
            engine,
            events: rx,
            progress: Progress::new(0, 0),
            command_buffer: String::new(),
            message: Some("Press @ and type a file path to load a document".to_string()),
            show_help: false,
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn engine(&self) -> &PlaybackEngine<SystemClock> {
        &self.engine
    }

    pub fn load_text(&mut self, text: &str) -> usize {
        let count = self.engine.load(text);
        self.drain_events();
        count
    }

    /// Keys while reading drive playback; in the command deck they edit input.
    pub fn handle_key(&mut self, key: char) {
        if self.mode == AppMode::Command {
            self.command_buffer.push(key);
            return;
        }

        if key != '?' {
            self.show_help = false;
        }

        match key {
            ' ' => self.engine.toggle(),
            'h' => self.engine.prev(),
            'l' => self.engine.next(),
            'H' => self.engine.prev_sentence(),
            'L' => self.engine.next_sentence(),
            'r' => self.engine.restart(),
            '+' | '=' => {
                self.engine.adjust_wpm(WPM_STEP);
            }
            '-' => {
                self.engine.adjust_wpm(-WPM_STEP);
            }
            '1'..='4' => {
                let slot = key as usize - '1' as usize;
                self.engine.set_reading_mode(ReadingMode::ALL[slot]);
            }
            'a' => {
                let adaptive = !self.engine.config().adaptive_mode;
                self.engine.set_adaptive_mode(adaptive);
            }
            '?' => self.show_help = !self.show_help,
            ':' | '@' => {
                self.mode = AppMode::Command;
                self.command_buffer = key.to_string();
            }
            'q' => self.mode = AppMode::Quit,
            _ => {}
        }
        self.drain_events();
    }

    pub fn handle_enter(&mut self) {
        if self.mode != AppMode::Command {
            return;
        }
        let input = std::mem::take(&mut self.command_buffer);
        self.mode = AppMode::Reading;
        self.handle_event(command_to_app_event(parse_command(&input)));
    }

    pub fn handle_backspace(&mut self) {
        if self.mode != AppMode::Command {
            return;
        }
        self.command_buffer.pop();
        if self.command_buffer.is_empty() {
            self.mode = AppMode::Reading;
        }
    }

    pub fn handle_escape(&mut self) {
        if self.mode == AppMode::Command {
            self.command_buffer.clear();
            self.mode = AppMode::Reading;
        }
        self.show_help = false;
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoadFile(path) => match load_text_file(&path) {
                Ok(doc) => {
                    let count = self.engine.load(&doc.text);
                    debug!("loaded {} tokens from {}", count, doc.source);
                    self.message = Some(format!("Loaded {} words from {}", count, path));
                }
                Err(err) => {
                    warn!("failed to load {}: {}", path, err);
                    self.message = Some(err.to_string());
                }
            },
            AppEvent::SetWpm(wpm) => {
                let applied = self.engine.set_wpm(wpm);
                self.message = Some(format!("Speed set to {} wpm", applied));
            }
            AppEvent::SetMode(name) => {
                self.message = Some(match self.engine.set_mode(&name) {
                    Ok(mode) => format!("Reading mode: {}", mode),
                    Err(err) => err.to_string(),
                });
            }
            AppEvent::SetAdaptive(adaptive) => {
                self.engine.set_adaptive_mode(adaptive);
                self.message = Some(format!(
                    "Adaptive timing {}",
                    if adaptive { "on" } else { "off" }
                ));
            }
            AppEvent::Seek(word_number) => self.engine.seek(word_number.saturating_sub(1)),
            AppEvent::Jump(delta) => self.engine.jump(delta),
            AppEvent::Quit => self.mode = AppMode::Quit,
            AppEvent::Help => self.show_help = true,
            AppEvent::InvalidCommand(input) => {
                self.message = Some(format!("Unknown command: {}", input));
            }
            AppEvent::None => {}
        }
        self.drain_events();
    }

    /// Runs a due playback step. Returns whether anything changed on screen.
    pub fn tick(&mut self) -> bool {
        let stepped = self.engine.tick();
        self.drain_events() || stepped
    }

    /// Milliseconds until the engine wants its next step.
    pub fn time_until_next_step(&self) -> Option<u64> {
        self.engine
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.engine.now_ms()))
    }

    pub fn get_render_state(&self) -> RenderState {
        let config = self.engine.config();
        RenderState {
            mode: self.mode,
            status: self.engine.status(),
            word: self.engine.displayed_word().cloned(),
            progress: self.progress,
            wpm: config.wpm,
            reading_mode: config.mode,
            adaptive: config.adaptive_mode,
            fatigue: self.engine.fatigue_status(),
            remaining_ms: self.engine.estimated_remaining_ms(),
            command_buffer: self.command_buffer.clone(),
            message: self.message.clone(),
            show_help: self.show_help,
        }
    }

    fn drain_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            changed = true;
            match event {
                ReaderEvent::Progress(progress) => self.progress = progress,
                ReaderEvent::Completed(stats) => self.message = Some(completion_message(&stats)),
                ReaderEvent::WordChanged(_)
                | ReaderEvent::Analysis(_)
                | ReaderEvent::StateChanged(_) => {}
            }
        }
        changed
    }
}

fn completion_message(stats: &CompletionStats) -> String {
    let mut message = format!(
        "Finished {} words in {} at {:.0} wpm, comprehension {:.0}%",
        stats.word_count,
        format_remaining(stats.elapsed_ms),
        stats.actual_wpm,
        stats.comprehension.score * 100.0
    );
    if stats.comprehension.suggest_break {
        message.push_str(". Time for a break.");
    } else if stats.comprehension.suggest_slowdown {
        message.push_str(". Try a slower pace.");
    }
    message
}
