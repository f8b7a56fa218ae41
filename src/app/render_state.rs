use crate::app::mode::AppMode;
use crate::engine::{PlaybackStatus, Progress, ReadingMode, WordView};
use crate::reading::FatigueStatus;

/// Render state for UI components
#[derive(Debug, Clone)]
pub struct RenderState {
    pub mode: AppMode,
    pub status: PlaybackStatus,
    pub word: Option<WordView>,
    pub progress: Progress,
    pub wpm: u32,
    pub reading_mode: ReadingMode,
    pub adaptive: bool,
    pub fatigue: FatigueStatus,
    pub remaining_ms: u64,
    pub command_buffer: String,
    pub message: Option<String>,
    pub show_help: bool,
}

impl RenderState {
    /// Text for the status line, e.g. `playing · normal · 300 wpm · adaptive`.
    pub fn status_line(&self) -> String {
        let mut parts = vec![
            self.status.label().to_string(),
            self.reading_mode.name().to_string(),
            format!("{} wpm", self.wpm),
            if self.adaptive { "adaptive" } else { "fixed" }.to_string(),
            format!("fatigue {}", self.fatigue.level.label()),
        ];
        if self.progress.total > 0 {
            parts.push(format!("{} left", format_remaining(self.remaining_ms)));
        }
        parts.join(" · ")
    }
}

pub fn format_remaining(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
