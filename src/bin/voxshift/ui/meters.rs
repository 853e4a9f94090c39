//! Input/output peak meters.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use voxshift::AudioEngine;

/// Green up to -6 dBFS, yellow to -1 dBFS, red above.
fn level_color(level: f32) -> Color {
    match level {
        l if l < 0.5 => Color::Green,
        l if l < 0.89 => Color::Yellow,
        _ => Color::Red,
    }
}

fn meter(title: &str, level: f32) -> Gauge<'_> {
    let level = level.clamp(0.0, 1.0);
    Gauge::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .gauge_style(Style::default().fg(level_color(level)))
        .ratio(level as f64)
        .label(format!("{:.2}", level))
}

pub fn render_meters(frame: &mut Frame, area: Rect, engine: &AudioEngine) {
    let block = Block::default().title(" Levels ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    frame.render_widget(meter(" Input ", engine.input_level()), rows[0]);
    frame.render_widget(meter(" Output ", engine.output_level()), rows[1]);
}
