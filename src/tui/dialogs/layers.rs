use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use civic_pulse::{app::DashboardState, calendar::category::category_label};

use crate::tui::dialogs::centered_area;

pub fn render(f: &mut Frame, app: &DashboardState, frame: Rect) {
    let layers = app.layers();
    let height = layers.known().len() as u16 + 5;
    let area = centered_area(frame, 40, height);
    let theme = &app.theme;

    f.render_widget(Clear, area);

    let mut lines = Vec::new();
    for (position, id) in layers.known().iter().enumerate() {
        let checkbox = if layers.is_active(id) { "[x]" } else { "[ ]" };
        let mut label_style = Style::default().fg(theme.selected_fg);
        if position == app.layer_cursor {
            label_style = label_style.bg(theme.selected_bg).add_modifier(Modifier::BOLD);
        }

        lines.push(Line::from(vec![
            Span::raw(format!(" {} ", position + 1)),
            Span::styled(checkbox, label_style),
            Span::raw(" "),
            Span::styled("●", Style::default().fg(theme.category_color(id))),
            Span::raw(" "),
            Span::styled(category_label(id), label_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Space", Style::default().fg(theme.success)),
        Span::raw(" toggle | "),
        Span::styled("a", Style::default().fg(theme.success)),
        Span::raw(" all | "),
        Span::styled("x", Style::default().fg(theme.error)),
        Span::raw(" clear"),
    ]));

    let title = format!(" Capas ({}/{}) ", layers.active().len(), layers.known().len());
    let menu = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(title),
    );
    f.render_widget(menu, area);
}
