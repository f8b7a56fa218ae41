use crate::app::{App, AppMode};
use crate::ui::reader::view::{
    render_command_deck, render_context, render_help, render_placeholder, render_progress_bar,
    render_status_line, render_word_display,
};
use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::theme::Theme;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;

/// Longest the loop sleeps while idle, so resizes and messages still repaint.
const IDLE_POLL_MS: u64 = 250;
const PROGRESS_WIDTH: usize = 40;

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new() -> Result<Self, io::Error> {
        let guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            theme: Theme::default(),
            _guard: guard,
        })
    }

    /// Runs until the app quits. Sleeps until the next playback step or the
    /// next key press, whichever comes first.
    pub fn run_event_loop(&mut self, app: &mut App) -> io::Result<()> {
        self.render_frame(app)?;

        loop {
            if app.mode() == AppMode::Quit {
                return Ok(());
            }

            let wait_ms = app
                .time_until_next_step()
                .map_or(IDLE_POLL_MS, |ms| ms.min(IDLE_POLL_MS));

            if event::poll(Duration::from_millis(wait_ms))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char(c) => app.handle_key(c),
                        KeyCode::Enter => app.handle_enter(),
                        KeyCode::Backspace => app.handle_backspace(),
                        KeyCode::Esc => app.handle_escape(),
                        _ => {}
                    },
                    _ => {}
                }
            }

            app.tick();
            self.render_frame(app)?;
        }
    }

    pub fn render_frame(&mut self, app: &App) -> io::Result<()> {
        let state = app.get_render_state();
        let theme = self.theme;

        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(
                Block::default().style(Style::default().bg(theme.background)),
                area,
            );

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(1),
                    Constraint::Length(2),
                ])
                .split(area);

            // The focus letter sits on the horizontal centre of the screen.
            let focus_column = area.width / 2;

            if state.show_help {
                frame.render_widget(render_help(&theme), rows[5]);
            }

            match &state.word {
                Some(word) => {
                    frame.render_widget(
                        render_word_display(word, focus_column, &theme),
                        rows[1],
                    );
                    frame.render_widget(render_context(word, &theme), rows[3]);
                }
                None => frame.render_widget(render_placeholder(&theme), rows[1]),
            }

            frame.render_widget(
                render_progress_bar(state.progress, PROGRESS_WIDTH, &theme),
                rows[4],
            );
            frame.render_widget(render_status_line(&state, &theme), rows[6]);
            render_command_deck(frame, rows[7], &state, &theme);
        })?;

        Ok(())
    }
}
