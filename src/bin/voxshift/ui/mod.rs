//! TUI rendering for voxshift.
//!
//! Layout, top to bottom: status bar, devices, level meters beside the
//! preset list, help line.

mod meters;
mod presets;
mod status;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use super::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status
            Constraint::Length(4), // Devices
            Constraint::Min(8),    // Meters | presets
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    status::render_status(frame, rows[0], app);
    status::render_devices(frame, rows[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);
    meters::render_meters(frame, body[0], &app.engine);
    presets::render_presets(frame, body[1], app);

    let keys = " [↑/↓] Preset  [S] Start/Stop  [B] Bypass  [I/O] Cycle devices  [Q] Quit";
    let help = Paragraph::new(keys)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[3]);
}
