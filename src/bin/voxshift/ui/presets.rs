use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::super::app::App;

pub fn render_presets(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .presets
        .iter()
        .map(|p| ListItem::new(p.name.as_str()))
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Presets ").borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}
