use std::time::Instant;

use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use civic_pulse::{
    app::{DashboardState, LoadStatus, Mode},
    ui::map_view::MapSynchronizer,
};

use crate::tui::{dialogs, map_canvas::CanvasMap, panels};

pub fn ui(f: &mut Frame, app: &DashboardState, map: &MapSynchronizer<CanvasMap>, today: NaiveDate, now: Instant) {
    let frame = f.size();
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65),
            Constraint::Percentage(35),
        ])
        .split(main_chunks[1]);

    let title_text = format!(
        "civic-pulse - {} - {}",
        app.municipality.as_deref().unwrap_or("Todos los municipios"),
        app.formatter.tag()
    );
    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    match map.surface() {
        Some(surface) => {
            surface.render(f, content_chunks[0], &app.theme, now);
            panels::event_list::render(f, app, surface.markers(), content_chunks[1]);
        }
        None => {
            let placeholder = Paragraph::new("Mapa no disponible")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(placeholder, content_chunks[0]);
            panels::event_list::render(f, app, map.markers(), content_chunks[1]);
        }
    }

    let in_command_mode = matches!(app.mode, Mode::Command);
    let status_text = if in_command_mode {
        app.command_buffer.to_string()
    } else if let Some(message) = &app.status_message {
        message.clone()
    } else {
        status_line(app)
    };

    let status_color = if in_command_mode {
        app.theme.command_mode
    } else if app.status_message.is_some() {
        app.theme.error
    } else {
        app.theme.status_bar
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(if in_command_mode { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, main_chunks[2]);

    if app.layers_menu_open {
        dialogs::layers::render(f, app, frame);
    }

    if app.calendar_open() {
        dialogs::calendar::render(f, app, today);
    }

    if let Some(route) = app.agenda {
        dialogs::agenda::render(f, app, route, frame);
    }
}

fn status_line(app: &DashboardState) -> String {
    let load = match app.load_status {
        LoadStatus::Idle => "Idle".to_string(),
        LoadStatus::Loading => "Loading...".to_string(),
        LoadStatus::Loaded(count) => format!("{} events", count),
    };

    format!(
        "{} | Shown: {} | Layers: {}/{} | 1-5 layers, L menu, c calendar, e agenda, r reload, : command, q quit",
        load,
        app.filtered().len(),
        app.layers().active().len(),
        app.layers().known().len(),
    )
}
