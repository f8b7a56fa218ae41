use crate::app::{AppMode, RenderState};
use crate::engine::{Progress, WordView};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const HELP_TEXT: &str = "space play/pause · h/l word · H/L sentence · r restart\n\
+/- speed · 1-4 scan/normal/study/proofread · a adaptive · : commands · q quit\n\
@file.txt  :load PATH  :wpm N  :mode NAME  :adaptive on|off  :seek N  :jump ±N  :q";

/// Spans for one word with its focus letter at `focus_column`.
///
/// Only the head word of a phrase carries the focus letter; the rest of the
/// phrase follows it in the regular text colour.
pub fn word_spans(word: &WordView, focus_column: u16, theme: &Theme) -> Vec<Span<'static>> {
    let padding = (focus_column as usize).saturating_sub(word.prefix.width());
    let text = Style::default().fg(theme.text);

    let mut spans = vec![
        Span::styled(" ".repeat(padding), text),
        Span::styled(word.prefix.clone(), text),
        Span::styled(
            word.focus.clone(),
            Style::default()
                .fg(theme.focus)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(word.suffix.clone(), text),
    ];

    if word.is_collocation {
        if let Some(tail) = word.display_text.strip_prefix(word.word.as_str()) {
            spans.push(Span::styled(tail.to_string(), text));
        }
    }
    spans
}

pub fn render_word_display(word: &WordView, focus_column: u16, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(Line::from(word_spans(word, focus_column, theme)))
        .alignment(Alignment::Left)
        .style(Style::default().bg(theme.background))
}

pub fn render_context(word: &WordView, theme: &Theme) -> Paragraph<'static> {
    let previous = word.previous_word.clone().unwrap_or_default();
    let next = word.next_word.clone().unwrap_or_default();
    Paragraph::new(format!("{}   ·   {}", previous, next))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.dimmed).bg(theme.background))
}

/// Number of filled cells for a progress bar `width` cells wide.
pub fn filled_cells(progress: Progress, width: usize) -> usize {
    ((progress.fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width)
}

pub fn render_progress_bar(progress: Progress, width: usize, theme: &Theme) -> Line<'static> {
    let filled = filled_cells(progress, width);
    Line::from(vec![
        Span::styled("─".repeat(filled), Style::default().fg(theme.text)),
        Span::styled("─".repeat(width - filled), Style::default().fg(theme.dimmed)),
    ])
    .alignment(Alignment::Center)
}

pub fn render_status_line(state: &RenderState, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled(
        state.status_line(),
        Style::default().fg(theme.fatigue(state.fatigue.level)),
    )];
    if let Some(advice) = state.fatigue.message {
        spans.push(Span::styled(
            format!("  {}", advice),
            Style::default().fg(theme.warning),
        ));
    }
    Line::from(spans).alignment(Alignment::Center)
}

pub fn render_placeholder(theme: &Theme) -> Paragraph<'static> {
    Paragraph::new("Type @notes.txt to load a file\n:h for help, :q to quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.dimmed).bg(theme.background))
}

pub fn render_help(theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(HELP_TEXT)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text).bg(theme.surface))
}

pub fn render_command_deck(frame: &mut Frame, area: Rect, state: &RenderState, theme: &Theme) {
    frame.render_widget(Clear, area);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let accent_bar =
        Paragraph::new("▌").style(Style::default().fg(theme.focus).bg(theme.surface));
    frame.render_widget(accent_bar, layout[0]);

    let text = match state.mode {
        AppMode::Command => format!(" {}", state.command_buffer),
        _ => format!(" {}", state.message.clone().unwrap_or_default()),
    };
    let input_widget = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.dimmed)),
        )
        .style(Style::default().fg(theme.text).bg(theme.surface));
    frame.render_widget(input_widget, layout[1]);
}
