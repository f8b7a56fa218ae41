use std::fmt;

/// Coarse lifecycle of the playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Empty,
    Loaded,
    Playing,
    Paused,
    Completed,
}

impl PlaybackStatus {
    pub fn label(self) -> &'static str {
        match self {
            PlaybackStatus::Empty => "empty",
            PlaybackStatus::Loaded => "loaded",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cursor and timing bookkeeping owned by the engine.
///
/// `cursor` is the index of the next token `advance` will consume and stays
/// within `[0, token_count]`. A non-zero `skip_count` means the cursor is
/// walking through the tail of a phrase that was already shown jointly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub cursor: usize,
    pub is_playing: bool,
    pub skip_count: usize,
    pub start_time: Option<u64>,
    pub paused_at: Option<u64>,
    pub total_paused_ms: u64,
    pub status: PlaybackStatus,
}

impl PlaybackState {
    /// Rewinds to the first token and forgets all session timing.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.is_playing = false;
        self.skip_count = 0;
        self.start_time = None;
        self.paused_at = None;
        self.total_paused_ms = 0;
    }

    /// Reading time since the session started, paused intervals excluded.
    pub fn active_elapsed_ms(&self, now_ms: u64) -> u64 {
        let Some(start) = self.start_time else {
            return 0;
        };
        let open_pause = self
            .paused_at
            .map_or(0, |paused_at| now_ms.saturating_sub(paused_at));
        now_ms
            .saturating_sub(start)
            .saturating_sub(self.total_paused_ms)
            .saturating_sub(open_pause)
    }
}
