/// Which surface has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Keys drive playback.
    #[default]
    Reading,
    /// Keys edit the command deck.
    Command,
    Quit,
}
