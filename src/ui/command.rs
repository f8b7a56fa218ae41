//! Command parsing for TUI command deck
//!
//! Parses user input in Command mode, supporting:
//! - `:q` or `:quit` → Quit command
//! - `:h` or `:help` → Help command
//! - `@notes.txt`, `:@notes.txt` or `:load notes.txt` → Load a plain-text file
//! - `:wpm 350` → Set reading speed
//! - `:mode study` → Select a reading mode
//! - `:adaptive on|off` → Toggle analyzer-driven timing
//! - `:seek 120` → Go to word number 120 (1-based)
//! - `:jump -10` → Move relative to the current word

use crate::app::AppEvent;

/// Commands that can be parsed from command deck input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    LoadFile(String),
    SetWpm(u32),
    SetMode(String),
    SetAdaptive(bool),
    Seek(usize),
    Jump(i64),
    Unknown(String),
}

fn parse_switch(value: &str) -> Option<bool> {
    match value {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Parse command deck input string into a Command
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    if input.is_empty() {
        return Command::Unknown(input.to_string());
    }

    // `@path` may be typed straight away or after the `:` that opens the deck.
    let body = input.strip_prefix(':').map_or(input, str::trim_start);
    if let Some(rest) = body.strip_prefix('@') {
        let filename = rest.trim();
        return if filename.is_empty() {
            Command::Unknown(input.to_string())
        } else {
            Command::LoadFile(filename.to_string())
        };
    }

    let Some(cmd) = input.strip_prefix(':') else {
        return Command::Unknown(input.to_string());
    };

    let mut parts = cmd.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let argument = parts.next();
    if parts.next().is_some() {
        return Command::Unknown(input.to_string());
    }

    let parsed = match (name, argument) {
        ("q" | "quit", None) => Some(Command::Quit),
        ("h" | "help", None) => Some(Command::Help),
        ("load", Some(path)) => Some(Command::LoadFile(path.to_string())),
        ("wpm", Some(value)) => value.parse().ok().map(Command::SetWpm),
        ("mode", Some(value)) => Some(Command::SetMode(value.to_string())),
        ("adaptive", Some(value)) => parse_switch(&value.to_lowercase()).map(Command::SetAdaptive),
        ("seek", Some(value)) => value.parse().ok().map(Command::Seek),
        ("jump", Some(value)) => value
            .strip_prefix('+')
            .unwrap_or(value)
            .parse()
            .ok()
            .map(Command::Jump),
        _ => None,
    };

    parsed.unwrap_or_else(|| Command::Unknown(input.to_string()))
}

/// Convert a parsed command into an AppEvent
///
/// This is the translation layer between command deck input and App core.
pub fn command_to_app_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::Quit,
        Command::Help => AppEvent::Help,
        Command::LoadFile(path) => AppEvent::LoadFile(path),
        Command::SetWpm(wpm) => AppEvent::SetWpm(wpm),
        Command::SetMode(name) => AppEvent::SetMode(name),
        Command::SetAdaptive(adaptive) => AppEvent::SetAdaptive(adaptive),
        Command::Seek(word) => AppEvent::Seek(word),
        Command::Jump(delta) => AppEvent::Jump(delta),
        Command::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}
