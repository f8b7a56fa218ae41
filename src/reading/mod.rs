pub mod analyzer;
pub mod fatigue;
pub mod lexicon;
pub mod ovp;
pub mod timing;
pub mod token;

pub use analyzer::{AnalysisResult, Factor, LinguisticAnalyzer, SessionMemory};
pub use fatigue::{
    fatigue_status, ComprehensionAssessment, FatigueEvent, FatigueLevel, FatigueMonitor,
    FatigueStatus,
};
pub use ovp::{compute_focus, FocusSplit};
pub use timing::{
    detect_sentence_boundary, display_duration_ms, tokenize_text, wpm_to_milliseconds,
    DurationStrategy,
};
pub use token::{Collocation, Token};
