/// Application events
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    LoadFile(String),
    SetWpm(u32),
    SetMode(String),
    SetAdaptive(bool),
    Seek(usize),
    Jump(i64),
    Quit,
    Help,
    InvalidCommand(String),
    None,
}
