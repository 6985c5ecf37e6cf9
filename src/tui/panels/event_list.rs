use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use civic_pulse::{
    app::DashboardState,
    calendar::category::category_label,
    ui::{map_view::Marker, theme::parse_hex_color},
};

/// Popup contents of every marker currently on the map.
pub fn render(f: &mut Frame, app: &DashboardState, markers: &[Marker], area: Rect) {
    let theme = &app.theme;
    let mut lines = Vec::new();

    if markers.is_empty() {
        lines.push(Line::from(Span::styled(
            app.formatter.empty_agenda_label(),
            Style::default().fg(theme.empty_day),
        )));
    }

    for marker in markers {
        let popup = &marker.popup;
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(parse_hex_color(marker.color))),
            Span::styled(
                category_label(&popup.category),
                Style::default().fg(parse_hex_color(marker.color)),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            popup.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            popup.moment.as_str(),
            Style::default().fg(theme.today),
        )));
        if let Some(address) = popup.address.as_deref().filter(|a| !a.is_empty()) {
            lines.push(Line::from(format!("📍 {}", address)));
        }
        lines.push(Line::from(Span::styled(
            popup.agenda.to_string(),
            Style::default().fg(theme.empty_day).add_modifier(Modifier::UNDERLINED),
        )));
        lines.push(Line::from(""));
    }

    let content = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" Eventos ({}) ", markers.len())),
    );
    f.render_widget(content, area);
}
