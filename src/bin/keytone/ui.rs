//! Terminal rendering for the keyboard strip.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use keytone::dsp::Waveform;
use keytone::keyboard::KeyColor;

use crate::app::KeyBinding;

/// Render the full UI: status bar, key strip, help line.
pub fn render(
    frame: &mut Frame,
    bindings: &[KeyBinding],
    waveform: Waveform,
    sample_rate: f32,
    release_events: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Length(4), // Keyboard strip
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    let status = Paragraph::new(Line::from(vec![
        Span::raw(format!("{waveform:?}").to_lowercase()),
        Span::raw("  |  "),
        Span::raw(format!("{sample_rate} Hz")),
        Span::raw("  |  "),
        Span::styled(
            if release_events {
                "hold keys to sustain"
            } else {
                "one note at a time (no key-release events)"
            },
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().title(" keytone ").borders(Borders::ALL));
    frame.render_widget(status, chunks[0]);

    frame.render_widget(keyboard_strip(bindings), chunks[1]);

    let help = Paragraph::new(" [a..k] Play  [Space] Release all  [Esc/Q] Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}

/// Two rows: the bound characters, and the note each one sounds. Black keys
/// are drawn inverted; held keys are highlighted.
fn keyboard_strip(bindings: &[KeyBinding]) -> Paragraph<'_> {
    let mut char_row = Vec::with_capacity(bindings.len());
    let mut note_row = Vec::with_capacity(bindings.len());

    for binding in bindings {
        let style = key_style(binding);
        char_row.push(Span::styled(format!("  {}  ", binding.ch), style));
        let label = format!("{}{}", binding.key.pitch, binding.key.octave);
        note_row.push(Span::styled(format!("{label:^5}"), style));
    }

    Paragraph::new(vec![Line::from(char_row), Line::from(note_row)])
        .block(Block::default().borders(Borders::ALL))
}

fn key_style(binding: &KeyBinding) -> Style {
    let base = match binding.key.color {
        KeyColor::White => Style::default().fg(Color::Black).bg(Color::White),
        KeyColor::Black => Style::default().fg(Color::White).bg(Color::Black),
    };
    if binding.held {
        base.bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        base
    }
}
