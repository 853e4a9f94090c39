//! Status bar and device panel.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use voxshift::EngineState;

use super::super::app::App;

pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let engine = &app.engine;
    let (symbol, label, color) = match engine.state() {
        EngineState::Running => ("▶", "Running", Color::Green),
        EngineState::Starting => ("…", "Starting", Color::Yellow),
        EngineState::Stopping => ("…", "Stopping", Color::Yellow),
        EngineState::Idle => ("■", "Stopped", Color::DarkGray),
    };

    let preset = engine
        .preset()
        .map_or_else(|| "none".to_string(), |p| p.name.clone());
    let config = engine.config();

    let mut spans = vec![
        Span::styled(format!(" {symbol} {label}  "), Style::default().fg(color)),
        Span::styled(format!("Preset: {preset}  "), Style::default().fg(Color::Cyan)),
    ];
    if engine.is_bypassed() {
        spans.push(Span::styled("BYPASS  ", Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::styled(
        format!(
            "{:.1}kHz / {} frames  dropped: {}  ",
            config.sample_rate_hz() / 1000.0,
            config.chunk_size,
            engine.dropped_chunks()
        ),
        Style::default().fg(Color::DarkGray),
    ));
    if let Some(status) = &app.status {
        spans.push(Span::styled(status.as_str(), Style::default().fg(Color::Red)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().title(" voxshift ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

pub fn render_devices(frame: &mut Frame, area: Rect, app: &App) {
    let name = |devices: &[voxshift::engine::DeviceInfo], idx: Option<usize>| {
        idx.and_then(|i| devices.get(i))
            .map_or_else(|| "(none)".to_string(), |d| d.name.clone())
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" In:  ", Style::default().fg(Color::DarkGray)),
            Span::raw(name(&app.inputs, app.input_idx)),
        ]),
        Line::from(vec![
            Span::styled(" Out: ", Style::default().fg(Color::DarkGray)),
            Span::raw(name(&app.outputs, app.output_idx)),
        ]),
    ];

    let block = Block::default().title(" Devices ").borders(Borders::ALL);
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
