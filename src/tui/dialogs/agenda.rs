use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use civic_pulse::{
    app::DashboardState,
    calendar::{category::category_label, AgendaRoute, CivicEvent},
};

use crate::tui::dialogs::centered_area;

pub fn render(f: &mut Frame, app: &DashboardState, route: AgendaRoute, frame: Rect) {
    let area = centered_area(frame, frame.width * 7 / 10, frame.height * 7 / 10);
    let theme = &app.theme;
    let formatter = &app.formatter;

    f.render_widget(Clear, area);

    let title = match route {
        AgendaRoute::Date(date) => format!(" {} – {} ", formatter.agenda_title(), formatter.format_full_date(date)),
        AgendaRoute::Listing => format!(" {} ", formatter.agenda_title()),
    };

    let events = app.agenda_events();
    let mut lines = Vec::new();

    if events.is_empty() {
        lines.push(Line::from(Span::styled(
            formatter.empty_agenda_label(),
            Style::default().fg(theme.empty_day),
        )));
    }

    for event in events.iter().skip(app.agenda_scroll) {
        lines.extend(event_lines(app, event, route));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("j/k", Style::default().fg(theme.title)),
        Span::raw(" scroll | "),
        Span::styled("c", Style::default().fg(theme.title)),
        Span::raw(" calendar | "),
        Span::styled("Esc", Style::default().fg(theme.error)),
        Span::raw(" close | "),
        Span::raw(route.to_string()),
    ]));

    let agenda = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(title),
        );
    f.render_widget(agenda, area);
}

fn event_lines<'a>(app: &DashboardState, event: &'a CivicEvent, route: AgendaRoute) -> Vec<Line<'a>> {
    let theme = &app.theme;
    let formatter = &app.formatter;

    let time_label = match route {
        AgendaRoute::Date(_) => formatter.format_time_range(event.starts_at.as_deref(), event.ends_at.as_deref()),
        AgendaRoute::Listing => formatter.format_event_moment(event.starts_at.as_deref()),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(time_label, Style::default().fg(theme.today)),
        Span::raw("  "),
        Span::styled(event.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
    ])];

    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(
            category_label(&event.category),
            Style::default().fg(theme.category_color(&event.category)),
        ),
        Span::raw(
            event
                .municipality
                .as_deref()
                .map(|m| format!(" · {}", m))
                .unwrap_or_default(),
        ),
    ]));

    if let Some(address) = event.address.as_deref().filter(|a| !a.is_empty()) {
        lines.push(Line::from(format!("  📍 {}", address)));
    }
    if let Some(chips) = event.tag_chips() {
        lines.push(Line::from(Span::styled(
            format!("  {}", chips),
            Style::default().fg(theme.border),
        )));
    }
    if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("  {}", description),
            Style::default().fg(theme.empty_day),
        )));
    }

    lines
}
