pub mod config;
pub mod error;
pub mod events;
pub mod playback;
pub mod state;
pub mod timer;

pub use config::{ConfigUpdate, ReaderConfig, ReadingMode, TimingConfig};
pub use error::EngineError;
pub use events::{
    ChannelObserver, CompletionStats, NullObserver, Progress, ReaderEvent, ReaderObserver,
    WordView,
};
pub use playback::{PlaybackEngine, ReadingStats};
pub use state::{PlaybackState, PlaybackStatus};
pub use timer::{Clock, ManualClock, StepTimer, SystemClock, TimerHandle};
